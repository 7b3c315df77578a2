//! Wire shapes for the backend's record envelope.
//!
//! Every function endpoint speaks the same envelope: a request carries a
//! list of records (`recordId` + `data`), and the response echoes each
//! record back with either a `data` payload or an `errors` array. This
//! client always sends exactly one record per call.

use serde::{Deserialize, Serialize};

use askql_core::domain::{AskOverrides, AskResponse};

use crate::error::{ApiError, ApiResult};

// ── Request ────────────────────────────────────────────────────────

/// Request envelope: `{"values": [...]}`.
#[derive(Debug, Serialize)]
pub(crate) struct RequestEnvelope {
    values: Vec<RequestRecord>,
}

#[derive(Debug, Serialize)]
struct RequestRecord {
    #[serde(rename = "recordId")]
    record_id: String,
    data: RequestData,
}

#[derive(Debug, Serialize)]
struct RequestData {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    overrides: Option<OverridesDto>,
}

/// Overrides as the backend spells them.
#[derive(Debug, Serialize)]
struct OverridesDto {
    top: u32,
    temperature: f32,
    #[serde(rename = "tokenLength")]
    token_length: u32,
    #[serde(rename = "promptTemplate", skip_serializing_if = "String::is_empty")]
    prompt_template: String,
    #[serde(rename = "promptTemplatePrefix", skip_serializing_if = "String::is_empty")]
    prompt_template_prefix: String,
    #[serde(rename = "promptTemplateSuffix", skip_serializing_if = "String::is_empty")]
    prompt_template_suffix: String,
}

impl From<&AskOverrides> for OverridesDto {
    fn from(overrides: &AskOverrides) -> Self {
        Self {
            top: overrides.top,
            temperature: overrides.temperature,
            token_length: overrides.token_length,
            prompt_template: overrides.prompt_template.clone(),
            prompt_template_prefix: overrides.prompt_template_prefix.clone(),
            prompt_template_suffix: overrides.prompt_template_suffix.clone(),
        }
    }
}

impl RequestEnvelope {
    /// A single-record envelope for `text`.
    pub(crate) fn single(text: &str, overrides: Option<&AskOverrides>) -> Self {
        Self {
            values: vec![RequestRecord {
                record_id: "0".to_string(),
                data: RequestData {
                    text: text.to_string(),
                    overrides: overrides.map(OverridesDto::from),
                },
            }],
        }
    }
}

// ── Response ───────────────────────────────────────────────────────

/// Response envelope: `{"values": [...]}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ResponseEnvelope {
    #[serde(default)]
    values: Vec<ResponseRecord>,
}

#[derive(Debug, Deserialize)]
struct ResponseRecord {
    #[serde(rename = "recordId", default)]
    #[allow(dead_code)]
    record_id: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Option<Vec<RecordError>>,
}

#[derive(Debug, Deserialize)]
struct RecordError {
    message: String,
}

/// Speech synthesis payload: the clip URL, or null when unavailable.
#[derive(Debug, Deserialize)]
pub(crate) struct SpeechData {
    #[serde(rename = "speechUrl", default)]
    pub(crate) speech_url: Option<String>,
}

impl ResponseEnvelope {
    /// Unwrap the single record's `data`, mapping record-level errors.
    fn into_data(self) -> ApiResult<serde_json::Value> {
        let record = self.values.into_iter().next().ok_or(ApiError::EmptyEnvelope)?;

        if let Some(errors) = record.errors {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ApiError::RecordError { message });
        }

        record.data.ok_or_else(|| ApiError::InvalidResponse {
            message: "record has neither data nor errors".to_string(),
        })
    }

    /// Parse the answer record out of the envelope.
    pub(crate) fn into_answer(self) -> ApiResult<AskResponse> {
        let data = self.into_data()?;
        serde_json::from_value(data).map_err(Into::into)
    }

    /// Parse the speech-synthesis record out of the envelope.
    pub(crate) fn into_speech(self) -> ApiResult<SpeechData> {
        let data = self.into_data()?;
        serde_json::from_value(data).map_err(Into::into)
    }
}
