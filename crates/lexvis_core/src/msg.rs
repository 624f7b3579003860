#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application finished setting up its UI.
    AppStarted,
    /// User picked a grammar file; it is staged, not uploaded.
    ArtifactSelected(crate::GrammarArtifact),
    /// The platform could not read the file the user picked.
    ArtifactUnreadable { path: String, reason: String },
    /// User removed the staged grammar file.
    ArtifactCleared,
    /// User edited the input text; carries the whole new buffer.
    InputEdited(String),
    /// User asked to tokenize the current input.
    SubmitRequested,
    /// Engine returned a token stream for a request.
    SubmitSucceeded {
        request_id: crate::RequestId,
        tokens: Vec<crate::Token>,
    },
    /// Engine reported a failed request.
    SubmitFailed {
        request_id: crate::RequestId,
        error: crate::SubmitError,
    },
    /// User switched the result tab.
    TabChanged(crate::ResultTab),
    /// The raw tree renderer is ready.
    RawViewLoaded,
    /// Result of the startup service probe.
    ServiceProbed(crate::ServiceStatus),
    /// UI/render tick; ages notices.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
