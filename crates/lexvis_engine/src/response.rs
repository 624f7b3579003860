use lexvis_core::Token;
use serde::Deserialize;
use serde_json::Value;

use crate::{FailureKind, ProbeOutput, TokenizeError};

/// Success body of `POST /api/tokenize`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenizeResponse {
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub input_text: Option<String>,
}

impl TokenizeResponse {
    pub fn parse(body: &[u8]) -> Result<Self, TokenizeError> {
        serde_json::from_slice(body)
            .map_err(|err| TokenizeError::new(FailureKind::MalformedResponse, err.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Value,
}

/// Pulls the `detail` field out of an error body, falling back to raw text.
pub(crate) fn error_detail(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Value::String(text),
        }) => Some(text),
        Ok(ErrorBody { detail }) => Some(detail.to_string()),
        Err(_) => Some(String::from_utf8_lossy(body).trim().to_string()),
    }
}

#[derive(Debug, Deserialize)]
struct ProbeBody {
    message: Option<String>,
}

pub(crate) fn probe_output(body: &[u8]) -> ProbeOutput {
    let message = serde_json::from_slice::<ProbeBody>(body)
        .ok()
        .and_then(|body| body.message);
    ProbeOutput { message }
}
