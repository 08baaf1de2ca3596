use serde::{Deserialize, Serialize};

/// Container version written into every stored profile.
pub const FORMAT_VERSION: &str = "1.0";

/// A named speaker embedding plus metadata.
///
/// Value object: immutable once written to the store. The embedding
/// dimensionality is fixed by whichever model produced it (e.g. 512) and is
/// opaque to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    #[serde(rename = "name")]
    pub name: String,

    #[serde(rename = "embedding")]
    pub embedding: Vec<f32>,

    #[serde(rename = "version")]
    pub format_version: String,
}

impl VoiceProfile {
    /// Creates a profile at the current format version.
    pub fn new(name: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            embedding,
            format_version: FORMAT_VERSION.to_string(),
        }
    }
}
