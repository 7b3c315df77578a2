//! Question input buffer and submission gate.
//!
//! The buffer holds the question text being composed (by keystrokes or by a
//! speech transcript) and enforces the edit limit; the gate decides whether
//! a submission actually reaches the send handler.
//!
//! Invariant: the buffered text never exceeds [`MAX_QUESTION_CHARS`]
//! characters. Edits that would exceed the limit are rejected wholesale —
//! the prior value is retained, nothing is clipped mid-edit.

/// Maximum question length in characters.
pub const MAX_QUESTION_CHARS: usize = 1000;

/// Result of applying an edit to the question buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum EditOutcome {
    /// The edit was applied.
    Applied,

    /// The edit would exceed the length limit; the prior value is retained.
    Rejected,
}

/// What an Enter keypress resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// The gate accepted the submission; this is the raw (untrimmed) text.
    Submitted(String),

    /// Shift+Enter: a literal newline was inserted.
    NewlineInserted,

    /// The gate rejected the submission (disabled, or nothing to send).
    Ignored,
}

/// Question text buffer with a validating submission gate.
#[derive(Debug, Clone)]
pub struct QuestionBox {
    text: String,
    clear_on_send: bool,
}

impl QuestionBox {
    /// Create an empty buffer. `clear_on_send` controls whether a
    /// successful submission resets the text.
    #[must_use]
    pub const fn new(clear_on_send: bool) -> Self {
        Self {
            text: String::new(),
            clear_on_send,
        }
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether a submission would currently pass the gate.
    #[must_use]
    pub fn can_submit(&self, disabled: bool) -> bool {
        !disabled && !self.text.trim().is_empty()
    }

    /// Replace the text with an edited value.
    ///
    /// An empty value clears the buffer; a value over the limit is rejected.
    pub fn set_text(&mut self, value: &str) -> EditOutcome {
        if value.is_empty() {
            self.text.clear();
            return EditOutcome::Applied;
        }
        if value.chars().count() > MAX_QUESTION_CHARS {
            return EditOutcome::Rejected;
        }
        self.text = value.to_string();
        EditOutcome::Applied
    }

    /// Replace the text with a speech transcript.
    ///
    /// Transcripts bypass the gate but not the invariant: over-long
    /// transcripts are truncated at the limit.
    pub fn apply_transcript(&mut self, transcript: &str) {
        self.text = transcript.chars().take(MAX_QUESTION_CHARS).collect();
    }

    /// Run the submission gate.
    ///
    /// Returns the raw (untrimmed) text when the gate passes, or `None`
    /// when the gate is disabled or only whitespace is buffered. On a
    /// successful clear-on-send submission the buffer is reset.
    pub fn try_submit(&mut self, disabled: bool) -> Option<String> {
        if !self.can_submit(disabled) {
            return None;
        }

        let question = self.text.clone();
        if self.clear_on_send {
            self.text.clear();
        }
        Some(question)
    }

    /// Handle an Enter keypress: plain Enter submits, Shift+Enter inserts
    /// a literal newline (subject to the length limit).
    pub fn handle_enter(&mut self, shift: bool, disabled: bool) -> InputAction {
        if shift {
            if self.text.chars().count() < MAX_QUESTION_CHARS {
                self.text.push('\n');
            }
            return InputAction::NewlineInserted;
        }

        match self.try_submit(disabled) {
            Some(question) => InputAction::Submitted(question),
            None => InputAction::Ignored,
        }
    }

    /// Clear the buffer.
    pub fn clear(&mut self) {
        self.text.clear();
    }
}

impl Default for QuestionBox {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_within_limit_is_applied() {
        let mut input = QuestionBox::default();
        assert_eq!(input.set_text("What products are available"), EditOutcome::Applied);
        assert_eq!(input.text(), "What products are available");

        let exactly_limit = "a".repeat(MAX_QUESTION_CHARS);
        assert_eq!(input.set_text(&exactly_limit), EditOutcome::Applied);
        assert_eq!(input.text().len(), MAX_QUESTION_CHARS);
    }

    #[test]
    fn edit_over_limit_is_rejected_and_prior_value_retained() {
        let mut input = QuestionBox::default();
        assert_eq!(input.set_text("short question"), EditOutcome::Applied);

        let too_long = "a".repeat(MAX_QUESTION_CHARS + 1);
        assert_eq!(input.set_text(&too_long), EditOutcome::Rejected);
        assert_eq!(input.text(), "short question");
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        let mut input = QuestionBox::default();
        // 1000 multibyte characters is still within the limit.
        let multibyte = "é".repeat(MAX_QUESTION_CHARS);
        assert_eq!(input.set_text(&multibyte), EditOutcome::Applied);
    }

    #[test]
    fn empty_edit_clears() {
        let mut input = QuestionBox::default();
        let _ = input.set_text("something");
        assert_eq!(input.set_text(""), EditOutcome::Applied);
        assert_eq!(input.text(), "");
    }

    #[test]
    fn gate_rejects_blank_and_disabled() {
        let mut input = QuestionBox::default();
        assert_eq!(input.try_submit(false), None);

        let _ = input.set_text("   \n  ");
        assert_eq!(input.try_submit(false), None);

        let _ = input.set_text("real question");
        assert_eq!(input.try_submit(true), None);
        // Rejection did not consume the text.
        assert_eq!(input.text(), "real question");
    }

    #[test]
    fn gate_forwards_raw_untrimmed_text() {
        let mut input = QuestionBox::default();
        let _ = input.set_text("  padded question  ");
        assert_eq!(input.try_submit(false), Some("  padded question  ".to_string()));
    }

    #[test]
    fn clear_on_send_resets_buffer() {
        let mut input = QuestionBox::new(true);
        let _ = input.set_text("a question");
        assert_eq!(input.try_submit(false), Some("a question".to_string()));
        assert_eq!(input.text(), "");

        let mut keeping = QuestionBox::new(false);
        let _ = keeping.set_text("a question");
        assert_eq!(keeping.try_submit(false), Some("a question".to_string()));
        assert_eq!(keeping.text(), "a question");
    }

    #[test]
    fn enter_submits_and_shift_enter_inserts_newline() {
        let mut input = QuestionBox::new(true);
        let _ = input.set_text("line one");

        assert_eq!(input.handle_enter(true, false), InputAction::NewlineInserted);
        assert_eq!(input.text(), "line one\n");

        assert_eq!(
            input.handle_enter(false, false),
            InputAction::Submitted("line one\n".to_string())
        );
        assert_eq!(input.text(), "");

        assert_eq!(input.handle_enter(false, false), InputAction::Ignored);
    }

    #[test]
    fn transcript_replaces_text_and_is_truncated_at_limit() {
        let mut input = QuestionBox::default();
        let _ = input.set_text("typed text");

        input.apply_transcript("show me the sales by year");
        assert_eq!(input.text(), "show me the sales by year");

        let long_transcript = "b".repeat(MAX_QUESTION_CHARS + 50);
        input.apply_transcript(&long_transcript);
        assert_eq!(input.text().chars().count(), MAX_QUESTION_CHARS);
    }
}
