use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by audio intake and transform operations.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("audio decoded to zero samples: {path}")]
    EmptyAudio { path: PathBuf },

    #[error("waveform contains no samples")]
    Empty,

    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(u32),

    #[error("resample error: {0}")]
    Resample(String),

    #[error("wav encode error: {0}")]
    Encode(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
