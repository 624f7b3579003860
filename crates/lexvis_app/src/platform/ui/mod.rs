//! Terminal rendering for the interactive mode.

pub mod chips;
pub mod raw_viewer;
pub mod render;
