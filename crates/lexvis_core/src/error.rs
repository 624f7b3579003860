use thiserror::Error;

/// Why a submission ended without new results.
///
/// The first two are detected before any request is issued; the last two
/// after the request resolves. All are recovered locally as notices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("no grammar file staged")]
    MissingGrammar,
    #[error("input text is empty")]
    EmptyInput,
    #[error("tokenize request failed: {reason}")]
    RequestFailed { reason: String },
    #[error("tokenize response malformed: {reason}")]
    MalformedResponse { reason: String },
}

impl SubmitError {
    /// Short text for the user-facing notice. Details stay in the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmitError::MissingGrammar => "Please select a grammar file first",
            SubmitError::EmptyInput => "Please enter some text to tokenize",
            SubmitError::RequestFailed { .. } | SubmitError::MalformedResponse { .. } => {
                "Failed to tokenize input. Please check the log for details."
            }
        }
    }

    /// True when the error was raised before any network call.
    pub fn is_precondition(&self) -> bool {
        matches!(self, SubmitError::MissingGrammar | SubmitError::EmptyInput)
    }
}
