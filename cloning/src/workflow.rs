//! The cloning workflow orchestrator.
//!
//! A single request walks Loading -> Validating -> (Rejected | Embedding)
//! -> Storing -> Done. Rejection terminates the request before the embedder
//! is ever called, and any failure after validation aborts before the store
//! write, so a failed request leaves no profile behind.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::embedder::VoiceEmbedder;
use crate::error::CloneError;
use crate::synthesis::{SynthesisParams, Synthesizer};
use vclone_audio::{
    BitDepth, ValidationPolicy, ValidationReport, Waveform, loader, transform, validate,
};
use vclone_profile::{ProfileStore, VoiceProfile, sanitize_name};

/// Result of a successful clone: the stored (sanitized) name plus the
/// quality report the reference audio passed.
#[derive(Debug, Clone)]
pub struct CloneOutcome {
    pub name: String,
    pub report: ValidationReport,
}

/// Composes intake, the quality gate, embedding extraction, and profile
/// storage behind one `clone_voice` call.
pub struct CloningWorkflow {
    config: AppConfig,
    policy: ValidationPolicy,
    store: ProfileStore,
    embedder: Arc<dyn VoiceEmbedder>,
    synthesizer: Arc<dyn Synthesizer>,
}

impl CloningWorkflow {
    pub fn new(
        config: AppConfig,
        embedder: Arc<dyn VoiceEmbedder>,
        synthesizer: Arc<dyn Synthesizer>,
    ) -> Result<Self, CloneError> {
        let store = ProfileStore::new(&config.voices_dir)?;
        let policy = config.audio.validation_policy();
        Ok(Self {
            config,
            policy,
            store,
            embedder,
            synthesizer,
        })
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Loads and gates a reference recording without cloning anything.
    pub fn validate_file(&self, path: impl AsRef<Path>) -> Result<ValidationReport, CloneError> {
        let waveform = loader::load(path)?;
        Ok(validate(&waveform, &self.policy))
    }

    /// Builds a voice profile from a reference recording.
    ///
    /// Rejected audio returns [`CloneError::ValidationRejected`] with the
    /// itemized issues; the embedder is not called and nothing is written.
    /// An embedder failure likewise leaves the store untouched.
    pub fn clone_voice(
        &self,
        path: impl AsRef<Path>,
        name: &str,
    ) -> Result<CloneOutcome, CloneError> {
        let path = path.as_ref();
        let name = sanitize_name(name).map_err(CloneError::Profile)?;
        info!(voice = %name, path = %path.display(), "cloning voice");

        let waveform = loader::load(path)?;
        let report = validate(&waveform, &self.policy);
        if !report.is_valid {
            warn!(voice = %name, issues = report.issues.len(), "reference audio rejected");
            return Err(CloneError::ValidationRejected {
                issues: report.issues,
            });
        }

        let embedding = self
            .embedder
            .extract(&waveform)
            .map_err(|e| CloneError::EmbeddingFailed(e.to_string()))?;
        if embedding.len() != self.embedder.dimension() {
            return Err(CloneError::EmbeddingFailed(format!(
                "model returned {} dims, expected {}",
                embedding.len(),
                self.embedder.dimension()
            )));
        }

        let profile = VoiceProfile::new(name, embedding);
        self.store.put(&profile)?;
        info!(voice = %profile.name, dims = profile.embedding.len(), "voice profile stored");

        Ok(CloneOutcome {
            name: profile.name,
            report,
        })
    }

    /// Synthesizes speech in a stored voice. Parameter validation runs
    /// before the profile lookup and before the model is called.
    pub fn synthesize(
        &self,
        text: &str,
        voice_name: &str,
        params: &SynthesisParams,
    ) -> Result<Waveform, CloneError> {
        params.validate(&self.config.synthesis)?;
        let profile = self.store.get(voice_name)?;
        info!(voice = %voice_name, chars = text.len(), "synthesizing");

        self.synthesizer
            .synthesize(text, &profile.embedding, params)
            .map_err(|e| CloneError::Synthesis(e.to_string()))
    }

    /// Exports a waveform as a PCM WAV at the configured rate and depth.
    pub fn export(&self, wave: &Waveform, path: impl AsRef<Path>) -> Result<(), CloneError> {
        let depth = BitDepth::from_bits(self.config.audio.bit_depth).ok_or_else(|| {
            CloneError::InvalidParameter(format!(
                "unsupported bit depth {}",
                self.config.audio.bit_depth
            ))
        })?;
        transform::export_wav(wave, path, self.config.audio.sample_rate, depth)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedder::EmbedError;
    use crate::synthesis::SynthesisError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Embedder stub that counts extractions and can be told to fail.
    struct StubEmbedder {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubEmbedder {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    impl VoiceEmbedder for StubEmbedder {
        fn extract(&self, _waveform: &Waveform) -> Result<Vec<f32>, EmbedError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(EmbedError::Model("weights unavailable".to_string()));
            }
            Ok(vec![0.25; 512])
        }

        fn dimension(&self) -> usize {
            512
        }
    }

    struct StubSynthesizer;

    impl Synthesizer for StubSynthesizer {
        fn synthesize(
            &self,
            text: &str,
            _embedding: &[f32],
            _params: &SynthesisParams,
        ) -> Result<Waveform, SynthesisError> {
            let n = text.len().max(1) * 160;
            Ok(Waveform::new(vec![0.1; n], 16000).unwrap())
        }
    }

    fn test_config(dir: &Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.voices_dir = dir.join("voices");
        config.exports_dir = dir.join("exports");
        // Small files keep the tests fast; the gate logic is identical.
        config.audio.min_duration_secs = 1.0;
        config.audio.max_duration_secs = 10.0;
        config.audio.sample_rate = 16000;
        config
    }

    fn write_sine_wav(path: &Path, amplitude: f32, secs: f32, sample_rate: u32) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        let n = (secs * sample_rate as f32) as usize;
        for i in 0..n {
            let t = i as f32 / sample_rate as f32;
            let s = amplitude * (2.0 * std::f32::consts::PI * 440.0 * t).sin();
            writer.write_sample((s * 32767.0).round() as i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn workflow(dir: &Path, embedder: Arc<StubEmbedder>) -> CloningWorkflow {
        CloningWorkflow::new(test_config(dir), embedder, Arc::new(StubSynthesizer)).unwrap()
    }

    #[test]
    fn clone_voice_stores_profile_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("ref.wav");
        write_sine_wav(&audio, 0.8, 2.0, 16000);

        let embedder = StubEmbedder::new(false);
        let wf = workflow(dir.path(), embedder.clone());

        let outcome = wf.clone_voice(&audio, "alice").unwrap();
        assert_eq!(outcome.name, "alice");
        assert!(outcome.report.is_valid);
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 1);

        let profile = wf.store().get("alice").unwrap();
        assert_eq!(profile.embedding.len(), 512);
    }

    #[test]
    fn rejected_audio_never_reaches_embedder_or_store() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("short.wav");
        // Below the 1 s minimum.
        write_sine_wav(&audio, 0.8, 0.2, 16000);

        let embedder = StubEmbedder::new(false);
        let wf = workflow(dir.path(), embedder.clone());

        let err = wf.clone_voice(&audio, "alice").unwrap_err();
        match err {
            CloneError::ValidationRejected { issues } => {
                assert!(issues[0].starts_with("Duration too short"));
            }
            other => panic!("expected ValidationRejected, got {other:?}"),
        }

        assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
        assert!(wf.store().list().unwrap().is_empty());
    }

    #[test]
    fn embedder_failure_leaves_no_partial_writes() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("ref.wav");
        write_sine_wav(&audio, 0.8, 2.0, 16000);

        let wf = workflow(dir.path(), StubEmbedder::new(true));
        let err = wf.clone_voice(&audio, "alice").unwrap_err();
        assert!(matches!(err, CloneError::EmbeddingFailed(_)));
        assert!(wf.store().list().unwrap().is_empty());
    }

    #[test]
    fn clone_voice_sanitizes_the_name() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("ref.wav");
        write_sine_wav(&audio, 0.8, 2.0, 16000);

        let wf = workflow(dir.path(), StubEmbedder::new(false));
        let outcome = wf.clone_voice(&audio, "my/voice").unwrap();
        assert_eq!(outcome.name, "my_voice");
        assert_eq!(wf.store().list().unwrap(), vec!["my_voice"]);
    }

    #[test]
    fn missing_file_surfaces_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let wf = workflow(dir.path(), StubEmbedder::new(false));
        let err = wf.clone_voice(dir.path().join("absent.wav"), "alice");
        assert!(matches!(
            err.unwrap_err(),
            CloneError::Audio(vclone_audio::AudioError::NotFound { .. })
        ));
    }

    #[test]
    fn synthesize_rejects_bad_params_before_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let wf = workflow(dir.path(), StubEmbedder::new(false));

        let params = SynthesisParams {
            speech_rate: 2.0,
            ..Default::default()
        };
        // No profile named "alice" exists; parameter validation must fire
        // first.
        let err = wf.synthesize("hello", "alice", &params).unwrap_err();
        assert!(matches!(err, CloneError::InvalidParameter(_)));
    }

    #[test]
    fn synthesize_unknown_voice_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let wf = workflow(dir.path(), StubEmbedder::new(false));

        let err = wf
            .synthesize("hello", "ghost", &SynthesisParams::default())
            .unwrap_err();
        assert!(matches!(
            err,
            CloneError::Profile(vclone_profile::ProfileError::NotFound { .. })
        ));
    }

    #[test]
    fn synthesize_and_export_wav() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("ref.wav");
        write_sine_wav(&audio, 0.8, 2.0, 16000);

        let wf = workflow(dir.path(), StubEmbedder::new(false));
        wf.clone_voice(&audio, "alice").unwrap();

        let wave = wf
            .synthesize("hello world", "alice", &SynthesisParams::default())
            .unwrap();
        let out = dir.path().join("exports").join("hello.wav");
        wf.export(&wave, &out).unwrap();
        assert!(out.is_file());
    }
}
