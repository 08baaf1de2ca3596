//! Audio intake, quality validation, and transforms for voice cloning.
//!
//! The pipeline for a reference recording is:
//!
//! 1. [`loader::load`]: audio file -> mono [`Waveform`], sample rate
//!    preserved exactly as stored
//! 2. [`validate`]: waveform + [`ValidationPolicy`] -> [`ValidationReport`]
//!    (duration bounds, SNR estimate, clipping)
//! 3. [`transform`]: resampling, loudness normalization, and PCM encoding
//!    for export
//!
//! Validation and the transforms are pure; all I/O lives in [`loader`] and
//! [`transform::export_wav`].

pub mod error;
pub mod loader;
pub mod transform;
mod validate;
mod waveform;

pub use error::AudioError;
pub use transform::BitDepth;
pub use validate::{ValidationPolicy, ValidationReport, validate};
pub use waveform::Waveform;
