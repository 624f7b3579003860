//! Lexvis engine: IO for grammar files and the tokenization service.
mod artifact;
mod client;
mod engine;
mod response;
mod types;

pub use artifact::{load_grammar_artifact, media_type_for, ArtifactError};
pub use client::{ClientSettings, ReqwestTokenizeClient, TokenizeClient, PROBE_PATH, TOKENIZE_PATH};
pub use engine::{EngineEvents, EngineHandle};
pub use response::TokenizeResponse;
pub use types::{EngineEvent, FailureKind, ProbeOutput, TokenizeError, TokenizeOutput};
