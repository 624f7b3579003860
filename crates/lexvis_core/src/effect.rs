use crate::{GrammarArtifact, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Check that the tokenization service answers.
    ProbeService,
    /// POST the staged grammar and input to the tokenization endpoint.
    SubmitTokenize {
        request_id: RequestId,
        grammar: GrammarArtifact,
        input_text: String,
    },
    /// Acquire the raw tree renderer; answered with `Msg::RawViewLoaded`.
    LoadRawView,
}
