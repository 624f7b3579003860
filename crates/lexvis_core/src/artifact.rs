use std::fmt;

/// Media type used when the platform cannot tell what a grammar file is.
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// A grammar file staged by the user. Opaque: never parsed or validated here.
#[derive(Clone, PartialEq, Eq)]
pub struct GrammarArtifact {
    name: String,
    media_type: String,
    bytes: Vec<u8>,
}

impl GrammarArtifact {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn summary(&self) -> ArtifactSummary {
        ArtifactSummary {
            name: self.name.clone(),
            size: self.size(),
            media_type: self.media_type.clone(),
        }
    }
}

// Grammar files can be large; keep the bytes out of debug output.
impl fmt::Debug for GrammarArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrammarArtifact")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// What the UI shows about the staged artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSummary {
    pub name: String,
    pub size: u64,
    pub media_type: String,
}
