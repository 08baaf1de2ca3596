use thiserror::Error;

/// Errors returned by voice profile storage operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("voice profile not found: {name}")]
    NotFound { name: String },

    #[error("voice profile {name} is corrupt: {reason}")]
    Corrupt { name: String, reason: String },

    #[error("invalid voice name: {0:?}")]
    InvalidName(String),

    #[error("profile encode error: {0}")]
    Encode(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
