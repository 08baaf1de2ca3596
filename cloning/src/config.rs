//! Application configuration.
//!
//! Explicit immutable structs passed into components at construction; no
//! ambient lookups inside validation or transform logic. Loadable from a
//! JSON or YAML file, with defaults rooted under `~/.vclone/`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use vclone_audio::ValidationPolicy;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding stored voice profiles.
    pub voices_dir: PathBuf,
    /// Directory for exported WAV files.
    pub exports_dir: PathBuf,
    pub audio: AudioSettings,
    pub synthesis: SynthesisLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            voices_dir: home.join(".vclone").join("voices"),
            exports_dir: home.join(".vclone").join("exports"),
            audio: AudioSettings::default(),
            synthesis: SynthesisLimits::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a JSON or YAML file, chosen by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
        match ext {
            "json" => serde_json::from_slice(&data).map_err(|e| ConfigError::Parse(e.to_string())),
            "yaml" | "yml" => {
                serde_yaml::from_slice(&data).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            other => Err(ConfigError::UnknownFormat(other.to_string())),
        }
    }
}

/// Audio processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Export sample rate in Hz.
    pub sample_rate: u32,
    /// Export bit depth (16 or 24).
    pub bit_depth: u16,
    pub min_duration_secs: f32,
    pub max_duration_secs: f32,
    pub min_snr_db: f32,
    pub clip_threshold: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            bit_depth: 16,
            min_duration_secs: 30.0,
            max_duration_secs: 120.0,
            min_snr_db: 15.0,
            clip_threshold: 0.95,
        }
    }
}

impl AudioSettings {
    /// Derives the quality-gate policy from these settings.
    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            min_duration_secs: self.min_duration_secs,
            max_duration_secs: self.max_duration_secs,
            min_snr_db: self.min_snr_db,
            clip_threshold: self.clip_threshold,
        }
    }
}

/// Allowed ranges for synthesis request parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisLimits {
    pub speech_rate_min: f32,
    pub speech_rate_max: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
}

impl Default for SynthesisLimits {
    fn default() -> Self {
        Self {
            speech_rate_min: 0.8,
            speech_rate_max: 1.5,
            pitch_min: -15.0,
            pitch_max: 15.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_policy() {
        let cfg = AppConfig::default();
        let policy = cfg.audio.validation_policy();
        assert_eq!(policy.min_duration_secs, 30.0);
        assert_eq!(policy.max_duration_secs, 120.0);
        assert_eq!(policy.min_snr_db, 15.0);
        assert_eq!(policy.clip_threshold, 0.95);
        assert_eq!(cfg.audio.sample_rate, 44100);
    }

    #[test]
    fn loads_partial_yaml_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "voices_dir: /tmp/voices").unwrap();
        writeln!(f, "audio:").unwrap();
        writeln!(f, "  min_duration_secs: 5.0").unwrap();

        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.voices_dir, PathBuf::from("/tmp/voices"));
        assert_eq!(cfg.audio.min_duration_secs, 5.0);
        // Untouched fields keep defaults.
        assert_eq!(cfg.audio.sample_rate, 44100);
        assert_eq!(cfg.synthesis.speech_rate_max, 1.5);
    }

    #[test]
    fn loads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, br#"{"audio": {"bit_depth": 24}}"#).unwrap();

        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.audio.bit_depth, 24);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, b"").unwrap();

        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::UnknownFormat(_))
        ));
    }
}
