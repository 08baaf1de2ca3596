//! Waveform transforms: sample-rate conversion, loudness normalization,
//! and PCM encoding for export.
//!
//! Resampling uses rubato's FFT-based converter, the same band-limited
//! approach used elsewhere in the stack, so results are deterministic for a
//! fixed input.

use std::path::Path;

use rubato::{FftFixedInOut, Resampler};

use crate::error::AudioError;
use crate::waveform::Waveform;

/// Frames per resampler processing block.
const CHUNK_SIZE: usize = 1024;

/// Peak level applied before WAV export.
const EXPORT_PEAK: f32 = 0.95;

/// PCM sample width for encoding and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    Pcm16,
    Pcm24,
}

impl BitDepth {
    /// Maps a configured bit count to a depth; only 16 and 24 are supported.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            16 => Some(Self::Pcm16),
            24 => Some(Self::Pcm24),
            _ => None,
        }
    }

    pub fn bits(self) -> u16 {
        match self {
            Self::Pcm16 => 16,
            Self::Pcm24 => 24,
        }
    }
}

/// Converts a waveform to `target_sr`. No-op (a clone) when the waveform is
/// already at the target rate.
pub fn resample(wave: &Waveform, target_sr: u32) -> Result<Waveform, AudioError> {
    if target_sr == 0 {
        return Err(AudioError::InvalidSampleRate(target_sr));
    }
    if wave.sample_rate() == target_sr {
        return Ok(wave.clone());
    }

    let mut resampler = FftFixedInOut::<f32>::new(
        wave.sample_rate() as usize,
        target_sr as usize,
        CHUNK_SIZE,
        1,
    )
    .map_err(|e| AudioError::Resample(e.to_string()))?;

    let in_frames = resampler.input_frames_next();
    let delay = resampler.output_delay();
    let expected =
        ((wave.len() as u64 * target_sr as u64) / wave.sample_rate() as u64) as usize;
    if expected == 0 {
        return Err(AudioError::Resample(format!(
            "input of {} samples too short to resample from {} Hz to {} Hz",
            wave.len(),
            wave.sample_rate(),
            target_sr
        )));
    }

    let samples = wave.samples();
    let mut out: Vec<f32> = Vec::with_capacity(expected + in_frames);
    let mut chunk = vec![0.0f32; in_frames];

    let mut pos = 0;
    while pos < samples.len() {
        let n = (samples.len() - pos).min(in_frames);
        chunk[..n].copy_from_slice(&samples[pos..pos + n]);
        chunk[n..].fill(0.0);
        let processed = resampler
            .process(&[&chunk], None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        out.extend_from_slice(&processed[0]);
        pos += n;
    }

    // Zero chunks flush the converter's internal delay.
    chunk.fill(0.0);
    while out.len() < delay + expected {
        let processed = resampler
            .process(&[&chunk], None)
            .map_err(|e| AudioError::Resample(e.to_string()))?;
        out.extend_from_slice(&processed[0]);
    }

    let start = delay.min(out.len());
    let end = (start + expected).min(out.len());
    Waveform::new(out[start..end].to_vec(), target_sr)
}

/// Scales the waveform so its RMS matches `target_db` (dBFS), then applies a
/// tanh soft limit. The output peak is strictly below 1.0; silence passes
/// through unscaled.
pub fn normalize_loudness(wave: &Waveform, target_db: f32) -> Waveform {
    let rms = wave.rms();
    let target_rms = 10f32.powf(target_db / 20.0);
    let gain = if rms > 0.0 { target_rms / rms } else { 1.0 };

    let samples = wave.samples().iter().map(|s| (s * gain).tanh()).collect();
    Waveform::from_parts(samples, wave.sample_rate())
}

/// Encodes float samples as little-endian signed PCM bytes.
///
/// Out-of-range input is clamped to [-1, 1] before scaling; values never
/// wrap.
pub fn encode_pcm(wave: &Waveform, depth: BitDepth) -> Vec<u8> {
    match depth {
        BitDepth::Pcm16 => {
            let mut out = Vec::with_capacity(wave.len() * 2);
            for s in wave.samples() {
                let v = (s.clamp(-1.0, 1.0) * 32767.0).round() as i16;
                out.extend_from_slice(&v.to_le_bytes());
            }
            out
        }
        BitDepth::Pcm24 => {
            let mut out = Vec::with_capacity(wave.len() * 3);
            for s in wave.samples() {
                let v = (s.clamp(-1.0, 1.0) * 8_388_607.0).round() as i32;
                let b = v.to_le_bytes();
                out.extend_from_slice(&b[..3]);
            }
            out
        }
    }
}

/// Writes a mono PCM WAV file at `target_sr`, resampling and peak-normalizing
/// to 0.95 first. Parent directories are created as needed.
pub fn export_wav(
    wave: &Waveform,
    path: impl AsRef<Path>,
    target_sr: u32,
    depth: BitDepth,
) -> Result<(), AudioError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let resampled = resample(wave, target_sr)?;
    let peak = resampled.peak();
    let gain = if peak > 0.0 { EXPORT_PEAK / peak } else { 1.0 };

    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: target_sr,
        bits_per_sample: depth.bits(),
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer =
        hound::WavWriter::create(path, spec).map_err(|e| AudioError::Encode(e.to_string()))?;

    for s in resampled.samples() {
        let scaled = (s * gain).clamp(-1.0, 1.0);
        let result = match depth {
            BitDepth::Pcm16 => writer.write_sample((scaled * 32767.0).round() as i16),
            BitDepth::Pcm24 => writer.write_sample((scaled * 8_388_607.0).round() as i32),
        };
        result.map_err(|e| AudioError::Encode(e.to_string()))?;
    }
    writer
        .finalize()
        .map_err(|e| AudioError::Encode(e.to_string()))?;
    Ok(())
}
