//! Voice cloning workflow.
//!
//! Wires the audio pipeline to profile storage behind a single entry point:
//!
//! 1. [`CloningWorkflow::clone_voice`]: load a reference recording, run the
//!    quality gate, extract a speaker embedding, store the profile
//! 2. [`CloningWorkflow::synthesize`]: validate request parameters, resolve
//!    the stored profile, call the synthesis capability
//!
//! The embedding and synthesis models are opaque capabilities behind the
//! [`VoiceEmbedder`] and [`Synthesizer`] traits; a real model backend and a test
//! stub are interchangeable. Rejected audio never reaches the embedder, and
//! no profile is written unless every prior stage succeeded.

pub mod config;
mod embedder;
mod error;
mod synthesis;
mod workflow;

pub use config::{AppConfig, AudioSettings, SynthesisLimits};
pub use embedder::{EmbedError, VoiceEmbedder};
pub use error::{CloneError, ConfigError};
pub use synthesis::{SynthesisError, SynthesisParams, Synthesizer, Tone};
pub use workflow::{CloneOutcome, CloningWorkflow};
