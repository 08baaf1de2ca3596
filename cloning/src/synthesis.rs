use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SynthesisLimits;
use crate::error::CloneError;
use vclone_audio::Waveform;

/// Errors returned by the synthesis capability.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("synthesis model error: {0}")]
    Model(String),
}

/// Generates speech audio for text in the voice of a stored embedding.
///
/// Like [`crate::VoiceEmbedder`], this is an opaque capability: the
/// workflow only validates parameters, resolves the profile, and hands off.
///
/// # Thread Safety
///
/// Implementations must be safe for concurrent use.
pub trait Synthesizer: Send + Sync {
    fn synthesize(
        &self,
        text: &str,
        embedding: &[f32],
        params: &SynthesisParams,
    ) -> Result<Waveform, SynthesisError>;
}

/// Emotional tone for synthesized speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "warm")]
    Warm,
    #[serde(rename = "energetic")]
    Energetic,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neutral => f.write_str("neutral"),
            Self::Warm => f.write_str("warm"),
            Self::Energetic => f.write_str("energetic"),
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "neutral" => Ok(Self::Neutral),
            "warm" => Ok(Self::Warm),
            "energetic" => Ok(Self::Energetic),
            other => Err(format!("unknown tone: {other}")),
        }
    }
}

/// Knobs for a single synthesis request.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisParams {
    /// Playback rate multiplier. Allowed range comes from [`SynthesisLimits`].
    pub speech_rate: f32,
    /// Pitch shift in semitone-like units.
    pub pitch: f32,
    pub tone: Tone,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            speech_rate: 1.0,
            pitch: 0.0,
            tone: Tone::Neutral,
        }
    }
}

impl SynthesisParams {
    /// Rejects out-of-range parameters. Values are never silently clamped;
    /// a bad request fails before the model is called.
    pub fn validate(&self, limits: &SynthesisLimits) -> Result<(), CloneError> {
        if !(limits.speech_rate_min..=limits.speech_rate_max).contains(&self.speech_rate) {
            return Err(CloneError::InvalidParameter(format!(
                "speech rate {} out of range [{}, {}]",
                self.speech_rate, limits.speech_rate_min, limits.speech_rate_max
            )));
        }
        if !(limits.pitch_min..=limits.pitch_max).contains(&self.pitch) {
            return Err(CloneError::InvalidParameter(format!(
                "pitch {} out of range [{}, {}]",
                self.pitch, limits.pitch_min, limits.pitch_max
            )));
        }
        Ok(())
    }
}
