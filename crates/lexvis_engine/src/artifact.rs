use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lexvis_core::{GrammarArtifact, DEFAULT_MEDIA_TYPE};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("{path:?} is not a file")]
    NotAFile { path: PathBuf },
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads a grammar file into an artifact. The content is not inspected.
pub fn load_grammar_artifact(path: &Path) -> Result<GrammarArtifact, ArtifactError> {
    let io_err = |source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(path).map_err(io_err)?;
    if !metadata.is_file() {
        return Err(ArtifactError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(io_err)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    Ok(GrammarArtifact::new(name, media_type_for(path), bytes))
}

/// Guesses a media type from the file extension.
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("g4" | "g" | "ebnf" | "bnf" | "txt") => "text/plain",
        Some("json") => "application/json",
        _ => DEFAULT_MEDIA_TYPE,
    }
}
