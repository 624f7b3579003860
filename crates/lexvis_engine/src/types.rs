use std::fmt;
use std::time::Duration;

use lexvis_core::{RequestId, SubmitError, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    TokenizeCompleted {
        request_id: RequestId,
        result: Result<TokenizeOutput, TokenizeError>,
    },
    ProbeCompleted {
        result: Result<ProbeOutput, TokenizeError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeOutput {
    pub tokens: Vec<Token>,
    /// Input text as echoed back by the service, if it sent one.
    pub echoed_input: Option<String>,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutput {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeError {
    pub kind: FailureKind,
    pub message: String,
}

impl TokenizeError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Collapses the transport-level failure into the submission taxonomy.
    pub fn to_submit_error(&self) -> SubmitError {
        match self.kind {
            FailureKind::MalformedResponse => SubmitError::MalformedResponse {
                reason: self.message.clone(),
            },
            _ => SubmitError::RequestFailed {
                reason: self.to_string(),
            },
        }
    }
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for TokenizeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    InvalidRequest,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedResponse,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_response_maps_to_malformed_submit_error() {
        let err = TokenizeError::new(FailureKind::MalformedResponse, "missing field `tokens`");
        assert_eq!(
            err.to_submit_error(),
            SubmitError::MalformedResponse {
                reason: "missing field `tokens`".to_string()
            }
        );
    }

    #[test]
    fn transport_failures_map_to_request_failed() {
        let err = TokenizeError::new(FailureKind::HttpStatus(500), "Internal Server Error");
        assert_eq!(
            err.to_submit_error(),
            SubmitError::RequestFailed {
                reason: "http status 500: Internal Server Error".to_string()
            }
        );
        let err = TokenizeError::new(FailureKind::Timeout, "operation timed out");
        assert!(matches!(
            err.to_submit_error(),
            SubmitError::RequestFailed { .. }
        ));
    }
}
