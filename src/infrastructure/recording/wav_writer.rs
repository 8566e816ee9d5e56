//! WAV output for finished captures
//!
//! Settings:
//! - Mono channel
//! - 16-bit integer samples
//! - Sample rate chosen by the quality preset

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use rubato::{FftFixedIn, Resampler};

/// Bits per sample (16-bit audio)
const BITS_PER_SAMPLE: u16 = 16;

/// Number of channels (mono)
const CHANNELS: u16 = 1;

/// WAV encoding errors
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("Resampler init failed: {0}")]
    ResamplerInit(String),

    #[error("Resampling failed: {0}")]
    Resample(String),

    #[error("WAV write failed: {0}")]
    Write(String),
}

/// Write mono i16 samples to a WAV file
pub fn write_wav(path: &Path, samples: &[i16], sample_rate: u32) -> Result<(), EncodingError> {
    let spec = WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    };

    let mut writer =
        WavWriter::create(path, spec).map_err(|e| EncodingError::Write(e.to_string()))?;

    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| EncodingError::Write(e.to_string()))?;
    }

    writer
        .finalize()
        .map_err(|e| EncodingError::Write(e.to_string()))?;

    Ok(())
}

/// Resample mono audio from `source_rate` to `target_rate`
pub fn resample(
    samples: &[i16],
    source_rate: u32,
    target_rate: u32,
) -> Result<Vec<i16>, EncodingError> {
    if source_rate == target_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

    let ratio = target_rate as f64 / source_rate as f64;
    let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        target_rate as usize,
        1024, // Chunk size
        2,    // Sub-chunks
        1,    // Mono
    )
    .map_err(|e| EncodingError::ResamplerInit(e.to_string()))?;

    let mut output = Vec::with_capacity(output_len);
    let mut input_pos = 0;

    while input_pos < samples_f32.len() {
        let frames_needed = resampler.input_frames_next();
        let end_pos = (input_pos + frames_needed).min(samples_f32.len());

        // The last chunk is zero-padded to a full frame
        let mut chunk = samples_f32[input_pos..end_pos].to_vec();
        chunk.resize(frames_needed, 0.0);

        let resampled = resampler
            .process(&[chunk], None)
            .map_err(|e| EncodingError::Resample(e.to_string()))?;

        output.extend(
            resampled[0]
                .iter()
                .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16),
        );
        input_pos = end_pos;
    }

    output.truncate(output_len);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_silence_produces_readable_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("silence.wav");
        let silence = vec![0i16; 16_000];

        write_wav(&path, &silence, 16_000).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len(), 16_000);
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("a.wav");
        assert!(write_wav(&path, &[0, 1, 2], 8_000).is_err());
    }

    #[test]
    fn resample_same_rate_is_identity() {
        let samples = vec![1i16, -2, 3];
        assert_eq!(resample(&samples, 16_000, 16_000).unwrap(), samples);
    }

    #[test]
    fn resample_downsamples_length() {
        let samples: Vec<i16> = (0..48_000)
            .map(|i| {
                let t = i as f32 / 48_000.0;
                (f32::sin(2.0 * std::f32::consts::PI * 440.0 * t) * 8000.0) as i16
            })
            .collect();

        let out = resample(&samples, 48_000, 16_000).unwrap();
        assert!(out.len() <= 16_000);
        assert!(out.len() > 15_000);
    }
}
