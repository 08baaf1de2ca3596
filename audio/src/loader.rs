//! Audio file intake.
//!
//! Loads a file into a mono [`Waveform`], preserving the sample rate stored
//! in the source exactly. WAV goes through `hound`; every other container
//! (MP3, M4A/AAC, OGG, FLAC) goes through a `symphonia` probe. Multichannel
//! audio is downmixed to mono by averaging channels.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::AudioError;
use crate::waveform::Waveform;

/// Loads an audio file into a mono waveform.
///
/// Fails with [`AudioError::NotFound`] when the path is not an existing
/// file, [`AudioError::Decode`] when the container or codec cannot be
/// parsed, and [`AudioError::EmptyAudio`] when decoding yields no samples.
pub fn load(path: impl AsRef<Path>) -> Result<Waveform, AudioError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(AudioError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let (samples, sample_rate) = if path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("wav"))
    {
        load_wav(path)?
    } else {
        load_with_symphonia(path)?
    };

    if samples.is_empty() {
        return Err(AudioError::EmptyAudio {
            path: path.to_path_buf(),
        });
    }
    Waveform::new(samples, sample_rate)
}

/// WAV fast path, handles integer and float sample formats at any bit depth.
fn load_wav(path: &Path) -> Result<(Vec<f32>, u32), AudioError> {
    let reader = hound::WavReader::open(path).map_err(|e| AudioError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let spec = reader.spec();
    // A failed sample read means the file is truncated or corrupted; surface
    // it instead of returning a silently shortened waveform.
    let samples: Result<Vec<f32>, hound::Error> = match spec.sample_format {
        hound::SampleFormat::Float => reader.into_samples::<f32>().collect(),
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_value))
                .collect()
        }
    };
    let samples = samples.map_err(|e| AudioError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok((downmix(samples, spec.channels as usize), spec.sample_rate))
}

fn load_with_symphonia(path: &Path) -> Result<(Vec<f32>, u32), AudioError> {
    let decode_err = |reason: String| AudioError::Decode {
        path: path.to_path_buf(),
        reason,
    };

    let src = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(src), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let fmt_opts = FormatOptions::default();
    let meta_opts = MetadataOptions::default();
    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &fmt_opts, &meta_opts)
        .map_err(|e| decode_err(format!("unsupported format: {e}")))?;

    let mut format = probed.format;
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| decode_err("no supported audio track".to_string()))?;

    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| decode_err("unknown sample rate".to_string()))?;
    let channels = track.codec_params.channels.map(|c| c.count()).unwrap_or(1);
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| decode_err(format!("unsupported codec: {e}")))?;

    let mut all_samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(decode_err(format!("packet read error: {e}"))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                if sample_buf.is_none() {
                    let spec = *decoded.spec();
                    let capacity = decoded.capacity() as u64;
                    sample_buf = Some(SampleBuffer::new(capacity, spec));
                }
                if let Some(buf) = sample_buf.as_mut() {
                    buf.copy_interleaved_ref(decoded);
                    all_samples.extend_from_slice(buf.samples());
                }
            }
            // Corrupted packets are skipped; the stream may still be usable.
            Err(SymphoniaError::IoError(_)) | Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => return Err(decode_err(format!("decode error: {e}"))),
        }
    }

    Ok((downmix(all_samples, channels), sample_rate))
}

/// Averages interleaved channels down to mono.
fn downmix(samples: Vec<f32>, channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples;
    }
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}
