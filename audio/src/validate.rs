//! Reference-audio quality gate.
//!
//! [`validate`] is a pure function over a [`Waveform`] and a
//! [`ValidationPolicy`]: no I/O, no logging, no hidden state. The same
//! waveform and policy always produce the same report, which keeps the
//! accept/reject decision deterministic and unit-testable.
//!
//! The SNR estimate is intentionally simple: RMS energy over the 5th
//! percentile of absolute amplitude. It is not a windowed SNR estimator;
//! changing it changes which recordings are accepted, so it stays as-is
//! without a product decision.

use crate::waveform::Waveform;

/// Epsilon added to the noise floor to avoid division by zero on silence.
const NOISE_EPS: f32 = 1e-10;

/// Lower bound for the SNR estimate, used when the signal is all zeros
/// and the log ratio would otherwise be -inf.
const SNR_FLOOR_DB: f32 = -100.0;

/// Quality thresholds a reference recording must meet.
#[derive(Debug, Clone, Copy)]
pub struct ValidationPolicy {
    /// Minimum duration in seconds.
    pub min_duration_secs: f32,
    /// Maximum duration in seconds.
    pub max_duration_secs: f32,
    /// Minimum signal-to-noise ratio in dB.
    pub min_snr_db: f32,
    /// Peak amplitude above which the audio is considered clipped.
    pub clip_threshold: f32,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            min_duration_secs: 30.0,
            max_duration_secs: 120.0,
            min_snr_db: 15.0,
            clip_threshold: 0.95,
        }
    }
}

/// Outcome of the quality gate.
///
/// Invariant: `is_valid` is true exactly when `issues` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub is_valid: bool,
    /// Human-readable issues, in check order: duration, SNR, clipping.
    pub issues: Vec<String>,
    pub duration_secs: f32,
    pub snr_db: f32,
    pub sample_rate: u32,
}

/// Runs the quality checks and returns an itemized verdict.
pub fn validate(waveform: &Waveform, policy: &ValidationPolicy) -> ValidationReport {
    let mut issues = Vec::new();

    let duration = waveform.duration_secs();
    if duration < policy.min_duration_secs {
        issues.push(format!(
            "Duration too short: {duration:.1}s (min {:.1}s)",
            policy.min_duration_secs
        ));
    }
    if duration > policy.max_duration_secs {
        issues.push(format!(
            "Duration too long: {duration:.1}s (max {:.1}s)",
            policy.max_duration_secs
        ));
    }

    let snr_db = estimate_snr_db(waveform);
    if snr_db < policy.min_snr_db {
        issues.push(format!(
            "SNR too low: {snr_db:.1}dB (min {:.1}dB)",
            policy.min_snr_db
        ));
    }

    if waveform.peak() > policy.clip_threshold {
        issues.push("Audio appears to be clipped".to_string());
    }

    ValidationReport {
        is_valid: issues.is_empty(),
        issues,
        duration_secs: duration,
        snr_db,
        sample_rate: waveform.sample_rate(),
    }
}

/// SNR estimate in dB: RMS energy over the 5th-percentile noise floor.
fn estimate_snr_db(waveform: &Waveform) -> f32 {
    let rms = waveform.rms();
    let noise_floor = abs_percentile(waveform.samples(), 5.0);
    let ratio = rms / (noise_floor + NOISE_EPS);
    if ratio > 0.0 {
        (20.0 * ratio.log10()).max(SNR_FLOOR_DB)
    } else {
        SNR_FLOOR_DB
    }
}

/// Percentile of absolute sample values with linear interpolation between
/// adjacent ranks.
fn abs_percentile(samples: &[f32], pct: f32) -> f32 {
    let mut sorted: Vec<f32> = samples.iter().map(|s| s.abs()).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = (pct / 100.0) * (sorted.len() - 1) as f32;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f32;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
