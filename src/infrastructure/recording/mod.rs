//! Recording infrastructure module
//!
//! Captures from the default input device with cpal and writes
//! mono WAV files, downsampled for the low quality preset.

mod cpal_recorder;
mod wav_writer;

pub use cpal_recorder::{CpalCapture, CpalCaptureHandle};
pub use wav_writer::{resample, write_wav, EncodingError};
