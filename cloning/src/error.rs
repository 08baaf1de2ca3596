use thiserror::Error;

use vclone_audio::AudioError;
use vclone_profile::ProfileError;

/// Errors surfaced by the cloning workflow.
///
/// Every failure is a structured result; nothing is swallowed. For
/// [`CloneError::ValidationRejected`] the issue list is preserved verbatim
/// so callers can show users exactly which quality bar failed.
#[derive(Debug, Error)]
pub enum CloneError {
    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("audio validation rejected: {}", .issues.join("; "))]
    ValidationRejected { issues: Vec<String> },

    #[error("embedding extraction failed: {0}")]
    EmbeddingFailed(String),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("invalid synthesis parameter: {0}")]
    InvalidParameter(String),

    #[error("synthesis failed: {0}")]
    Synthesis(String),
}

/// Errors loading the application configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported config format: {0}")]
    UnknownFormat(String),

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
