//! CLI-specific error types and exit-code mappings.

use thiserror::Error;

use askql_core::ports::AnswerPortError;
use askql_voice::VoiceError;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Configuration error (missing or malformed environment).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backend call failed.
    #[error("{0}")]
    Api(String),

    /// Audio capture or playback error.
    #[error("Audio error: {0}")]
    Audio(String),

    /// IO error (terminal, file).
    #[error("IO error: {0}")]
    Io(String),

    /// Anything else that bubbled up from a handler.
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Api(_) => 69,      // EX_UNAVAILABLE
            Self::Audio(_) => 71,    // EX_OSERR
            Self::Io(_) => 74,       // EX_IOERR
            Self::Other(_) => 1,
        }
    }
}

impl From<AnswerPortError> for CliError {
    fn from(err: AnswerPortError) -> Self {
        Self::Api(err.to_string())
    }
}

impl From<VoiceError> for CliError {
    fn from(err: VoiceError) -> Self {
        Self::Audio(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_sysexits() {
        assert_eq!(CliError::Arguments("x".into()).exit_code(), 2);
        assert_eq!(CliError::Config("x".into()).exit_code(), 78);
        assert_eq!(CliError::Api("x".into()).exit_code(), 69);
    }
}
