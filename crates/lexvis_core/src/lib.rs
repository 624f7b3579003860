//! Lexvis core: pure state machine and view-model helpers.
mod artifact;
mod effect;
mod error;
mod msg;
mod notice;
mod raw_tree;
mod state;
mod token;
mod update;
mod view_model;

pub use artifact::{ArtifactSummary, GrammarArtifact, DEFAULT_MEDIA_TYPE};
pub use effect::Effect;
pub use error::SubmitError;
pub use msg::Msg;
pub use notice::{Notice, NoticeLevel, NOTICE_TICKS};
pub use raw_tree::{RawTreeRenderer, TreeLine, TreeLineKind};
pub use state::{AppState, RawView, RequestId, ResultTab, ServiceStatus};
pub use token::Token;
pub use update::update;
pub use view_model::{display_lexeme, visual_chips, AppViewModel, TokenChip};
