//! Placeholder model capabilities.
//!
//! Stand-ins for the real speaker-embedding network and TTS vocoder. They
//! satisfy the capability traits so the rest of the pipeline is exercised
//! end to end; swapping in real models means replacing these two types and
//! nothing else.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use vclone_audio::Waveform;
use vclone_cloning::{EmbedError, SynthesisError, SynthesisParams, Synthesizer, VoiceEmbedder};

/// Produces a random 512-dim embedding, standard-normal per component.
pub struct RandomEmbedder {
    rng: Mutex<StdRng>,
}

impl RandomEmbedder {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl VoiceEmbedder for RandomEmbedder {
    fn extract(&self, _waveform: &Waveform) -> Result<Vec<f32>, EmbedError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| EmbedError::Model(e.to_string()))?;

        // Box-Muller from pairs of uniforms.
        let n = self.dimension();
        let mut out = Vec::with_capacity(n);
        while out.len() < n {
            let u1: f32 = rng.gen_range(f32::EPSILON..1.0);
            let u2: f32 = rng.r#gen();
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f32::consts::PI * u2;
            out.push(r * theta.cos());
            if out.len() < n {
                out.push(r * theta.sin());
            }
        }
        Ok(out)
    }

    fn dimension(&self) -> usize {
        512
    }
}

/// Generates a sine tone sized to the text length, with pitch shifting the
/// base frequency and speech rate applied by linear-interpolation resampling.
pub struct SineSynthesizer {
    sample_rate: u32,
}

impl SineSynthesizer {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }
}

impl Synthesizer for SineSynthesizer {
    fn synthesize(
        &self,
        text: &str,
        _embedding: &[f32],
        params: &SynthesisParams,
    ) -> Result<Waveform, SynthesisError> {
        let sr = self.sample_rate as f32;
        let duration = (text.chars().count() as f32 * 0.1).max(1.0);
        let frequency = 440.0 + params.pitch * 10.0;

        let n = (sr * duration) as usize;
        let mut samples: Vec<f32> = (0..n)
            .map(|i| 0.1 * (2.0 * std::f32::consts::PI * frequency * i as f32 / sr).sin())
            .collect();

        if params.speech_rate != 1.0 {
            samples = stretch(&samples, params.speech_rate);
        }

        Waveform::new(samples, self.sample_rate)
            .map_err(|e| SynthesisError::Model(e.to_string()))
    }
}

/// Time-stretches by linear interpolation; rate > 1 shortens the output.
fn stretch(samples: &[f32], rate: f32) -> Vec<f32> {
    let new_len = ((samples.len() as f32 / rate) as usize).max(1);
    (0..new_len)
        .map(|i| {
            let pos = i as f32 * (samples.len() - 1) as f32 / (new_len - 1).max(1) as f32;
            let lo = pos.floor() as usize;
            let hi = (lo + 1).min(samples.len() - 1);
            let frac = pos - lo as f32;
            samples[lo] + (samples[hi] - samples[lo]) * frac
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedder_dimension_matches_output() {
        let embedder = RandomEmbedder::new();
        let wave = Waveform::new(vec![0.1; 16000], 16000).unwrap();
        let embedding = embedder.extract(&wave).unwrap();
        assert_eq!(embedding.len(), embedder.dimension());
    }

    #[test]
    fn synthesizer_scales_duration_with_text() {
        let synth = SineSynthesizer::new(16000);
        let short = synth
            .synthesize("hi", &[], &SynthesisParams::default())
            .unwrap();
        let long = synth
            .synthesize(&"a".repeat(50), &[], &SynthesisParams::default())
            .unwrap();
        assert!(long.len() > short.len());
        // Minimum one second.
        assert_eq!(short.len(), 16000);
    }

    #[test]
    fn faster_rate_shortens_output() {
        let synth = SineSynthesizer::new(16000);
        let params = SynthesisParams {
            speech_rate: 1.5,
            ..Default::default()
        };
        let fast = synth.synthesize(&"a".repeat(30), &[], &params).unwrap();
        let normal = synth
            .synthesize(&"a".repeat(30), &[], &SynthesisParams::default())
            .unwrap();
        assert!(fast.len() < normal.len());
    }
}
