use thiserror::Error;

use vclone_audio::Waveform;

/// Errors returned by embedding extraction.
#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("embedding model error: {0}")]
    Model(String),

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Extracts a fixed-length speaker embedding from reference audio.
///
/// The workflow treats the embedding model as an opaque, swappable
/// capability: a real speaker-verification network and a test stub plug in
/// behind the same trait. The output is a dense f32 vector whose
/// dimensionality is reported by [`VoiceEmbedder::dimension`] (e.g. 512).
///
/// # Thread Safety
///
/// Implementations must be safe for concurrent use.
pub trait VoiceEmbedder: Send + Sync {
    /// Computes a speaker embedding from a validated waveform.
    fn extract(&self, waveform: &Waveform) -> Result<Vec<f32>, EmbedError>;

    /// Returns the dimensionality of the embedding vectors.
    fn dimension(&self) -> usize;
}
