//! Microphone capture using cpal
//!
//! Each capture handle owns one recording thread. The cpal stream lives on
//! that thread (cpal::Stream is not Send) and is dropped when capture stops.
//! Finished recordings are written as mono 16-bit WAV files.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::thread::JoinHandle;
use std::time::{Duration as StdDuration, Instant};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::wav_writer::{resample, write_wav};
use crate::application::ports::{
    AudioCapture, CaptureHandle, FinishedRecording, RecordingError, TickCallback,
};
use crate::domain::recording::{Duration, QualityPreset, RecordingUri};

/// Capture capability backed by the default input device
pub struct CpalCapture {
    recordings_dir: PathBuf,
    tick_interval: StdDuration,
}

impl CpalCapture {
    /// Create a capture adapter writing into `recordings_dir`
    pub fn new(recordings_dir: impl Into<PathBuf>, tick_interval: StdDuration) -> Self {
        Self {
            recordings_dir: recordings_dir.into(),
            tick_interval,
        }
    }

    pub fn recordings_dir(&self) -> &Path {
        &self.recordings_dir
    }
}

#[async_trait]
impl AudioCapture for CpalCapture {
    type Handle = CpalCaptureHandle;

    async fn configure_session(&self) -> Result<(), RecordingError> {
        tokio::fs::create_dir_all(&self.recordings_dir)
            .await
            .map_err(|e| {
                RecordingError::SessionConfigFailed(format!(
                    "Cannot create {}: {}",
                    self.recordings_dir.display(),
                    e
                ))
            })?;

        tokio::task::spawn_blocking(|| get_input_device().map(|_| ()))
            .await
            .map_err(|e| RecordingError::SessionConfigFailed(format!("Task join error: {}", e)))?
    }

    async fn prepare(&self, preset: QualityPreset) -> Result<Self::Handle, RecordingError> {
        let path = self
            .recordings_dir
            .join(format!("recording-{}.wav", Uuid::new_v4()));

        debug!(path = %path.display(), %preset, "Prepared capture handle");

        Ok(CpalCaptureHandle {
            preset,
            path,
            tick_interval: self.tick_interval,
            shared: Arc::new(CaptureShared::default()),
            worker: None,
        })
    }

    async fn discard(&self, uri: &RecordingUri) -> Result<(), RecordingError> {
        let path = uri.to_path();
        if path.parent() != Some(self.recordings_dir.as_path()) {
            return Err(RecordingError::DiscardFailed(format!(
                "{} is outside {}",
                path.display(),
                self.recordings_dir.display()
            )));
        }
        remove_recording(&path).await
    }
}

/// State shared between a handle and its recording thread
#[derive(Default)]
struct CaptureShared {
    /// Recorded audio samples (mono, i16, at device sample rate)
    buffer: StdMutex<Vec<i16>>,
    /// Device sample rate, 0 until the stream is open
    sample_rate: AtomicU32,
    is_recording: AtomicBool,
}

/// One recording session on the default input device
pub struct CpalCaptureHandle {
    preset: QualityPreset,
    path: PathBuf,
    tick_interval: StdDuration,
    shared: Arc<CaptureShared>,
    worker: Option<JoinHandle<()>>,
}

impl CpalCaptureHandle {
    /// Signal the recording thread to stop and wait for it
    async fn join_worker(&mut self) -> Result<(), RecordingError> {
        self.shared.is_recording.store(false, Ordering::SeqCst);

        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        tokio::task::spawn_blocking(move || worker.join())
            .await
            .map_err(|e| RecordingError::FinalizeFailed(format!("Task join error: {}", e)))?
            .map_err(|_| RecordingError::FinalizeFailed("Recording thread panicked".into()))
    }

    fn take_samples(&self) -> Vec<i16> {
        let mut buffer = self
            .shared
            .buffer
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *buffer)
    }
}

#[async_trait]
impl CaptureHandle for CpalCaptureHandle {
    async fn start(&mut self, on_tick: TickCallback) -> Result<(), RecordingError> {
        if self.worker.is_some() {
            return Err(RecordingError::StartFailed(
                "Recording already in progress".to_string(),
            ));
        }

        self.shared.is_recording.store(true, Ordering::SeqCst);

        let shared = Arc::clone(&self.shared);
        let tick_interval = self.tick_interval;
        let (ready_tx, ready_rx) = oneshot::channel();

        let worker = std::thread::Builder::new()
            .name("voice-memo-capture".into())
            .spawn(move || run_capture(shared, tick_interval, on_tick, ready_tx))
            .map_err(|e| RecordingError::StartFailed(format!("Cannot spawn thread: {}", e)))?;
        self.worker = Some(worker);

        let ready = ready_rx
            .await
            .unwrap_or_else(|_| Err(RecordingError::StartFailed("Capture thread exited".into())));

        if let Err(e) = ready {
            // The thread has already returned; reap it
            let _ = self.join_worker().await;
            return Err(e);
        }

        info!(path = %self.path.display(), preset = %self.preset, "Capture started");
        Ok(())
    }

    async fn stop_and_finalize(&mut self) -> Result<FinishedRecording, RecordingError> {
        if self.worker.is_none() {
            return Err(RecordingError::HandleUnavailable);
        }

        self.join_worker().await?;

        let sample_rate = self.shared.sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(RecordingError::FinalizeFailed("Sample rate not set".into()));
        }

        let samples = self.take_samples();
        if samples.is_empty() {
            return Err(RecordingError::FinalizeFailed(
                "No audio data captured".to_string(),
            ));
        }

        let duration = Duration::from_millis(samples.len() as u64 * 1000 / sample_rate as u64);
        let target_rate = self.preset.target_sample_rate();
        let path = self.path.clone();

        let encoded = tokio::task::spawn_blocking(move || {
            encode_file(&path, &samples, sample_rate, target_rate)
        })
        .await
        .map_err(|e| RecordingError::FinalizeFailed(format!("Encode task error: {}", e)))
        .and_then(|result| result);

        if let Err(e) = encoded {
            if let Err(cleanup) = remove_recording(&self.path).await {
                debug!("Partial recording not removed: {}", cleanup);
            }
            return Err(e);
        }

        let uri = RecordingUri::from_path(&self.path)
            .ok_or_else(|| RecordingError::FinalizeFailed("Empty recording path".to_string()))?;

        info!(%uri, %duration, "Capture finalized");

        Ok(FinishedRecording { uri, duration })
    }

    async fn release(&mut self) -> Result<(), RecordingError> {
        self.join_worker().await?;
        self.take_samples();
        Ok(())
    }
}

impl Drop for CpalCaptureHandle {
    fn drop(&mut self) {
        self.shared.is_recording.store(false, Ordering::SeqCst);
    }
}

/// Body of the recording thread
fn run_capture(
    shared: Arc<CaptureShared>,
    tick_interval: StdDuration,
    on_tick: TickCallback,
    ready: oneshot::Sender<Result<(), RecordingError>>,
) {
    let stream = match open_stream(&shared) {
        Ok(stream) => stream,
        Err(e) => {
            shared.is_recording.store(false, Ordering::SeqCst);
            let _ = ready.send(Err(e));
            return;
        }
    };

    let started_at = Instant::now();
    if ready.send(Ok(())).is_err() {
        return;
    }

    on_tick(0);
    while shared.is_recording.load(Ordering::SeqCst) {
        std::thread::sleep(tick_interval);
        if !shared.is_recording.load(Ordering::SeqCst) {
            break;
        }
        on_tick(started_at.elapsed().as_millis() as u64);
    }

    drop(stream);
}

/// Open and start an input stream feeding `shared.buffer`
fn open_stream(shared: &Arc<CaptureShared>) -> Result<cpal::Stream, RecordingError> {
    let device = get_input_device()?;
    let (config, sample_format) = get_input_config(&device)?;
    let channels = config.channels;
    shared
        .sample_rate
        .store(config.sample_rate.0, Ordering::SeqCst);

    let on_error = |err: cpal::StreamError| warn!("Audio stream error: {}", err);

    let stream = match sample_format {
        SampleFormat::I16 => {
            let shared = Arc::clone(shared);
            device.build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    append_samples(&shared, data, channels);
                },
                on_error,
                None,
            )
        }
        SampleFormat::F32 => {
            let shared = Arc::clone(shared);
            device.build_input_stream(
                &config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    let converted: Vec<i16> = data
                        .iter()
                        .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
                        .collect();
                    append_samples(&shared, &converted, channels);
                },
                on_error,
                None,
            )
        }
        other => {
            return Err(RecordingError::StartFailed(format!(
                "Unsupported sample format: {:?}",
                other
            )))
        }
    }
    .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

    stream
        .play()
        .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

    debug!(
        sample_rate = config.sample_rate.0,
        channels, "Input stream opened"
    );
    Ok(stream)
}

fn append_samples(shared: &CaptureShared, data: &[i16], channels: u16) {
    if !shared.is_recording.load(Ordering::SeqCst) {
        return;
    }
    let mono = stereo_to_mono(data, channels);
    if let Ok(mut buffer) = shared.buffer.lock() {
        buffer.extend_from_slice(&mono);
    }
}

/// Get the default input device
pub(crate) fn get_input_device() -> Result<cpal::Device, RecordingError> {
    cpal::default_host()
        .default_input_device()
        .ok_or(RecordingError::NoAudioDevice)
}

/// Pick an input configuration at the device's default rate.
///
/// Prefers mono over stereo and integer or float formats the capture
/// callbacks understand.
fn get_input_config(device: &cpal::Device) -> Result<(StreamConfig, SampleFormat), RecordingError> {
    let default = device
        .default_input_config()
        .map_err(|e| RecordingError::StartFailed(format!("No default config: {}", e)))?;
    let rate = default.sample_rate();

    let best = device
        .supported_input_configs()
        .map_err(|e| RecordingError::StartFailed(format!("Failed to get configs: {}", e)))?
        .filter(|c| matches!(c.sample_format(), SampleFormat::I16 | SampleFormat::F32))
        .filter(|c| c.min_sample_rate() <= rate && c.max_sample_rate() >= rate)
        .min_by_key(|c| c.channels());

    let chosen = match best {
        Some(range) => range.with_sample_rate(rate),
        None => default,
    };

    let sample_format = chosen.sample_format();
    let config = StreamConfig {
        channels: chosen.channels(),
        sample_rate: rate,
        buffer_size: cpal::BufferSize::Default,
    };

    Ok((config, sample_format))
}

/// Mix interleaved channels down to mono
fn stereo_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
    if channels <= 1 {
        return samples.to_vec();
    }

    samples
        .chunks(channels as usize)
        .map(|chunk| {
            let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
            (sum / chunk.len() as i32) as i16
        })
        .collect()
}

/// Delete a recording file; a missing file counts as removed
async fn remove_recording(path: &Path) -> Result<(), RecordingError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RecordingError::DiscardFailed(format!(
            "{}: {}",
            path.display(),
            e
        ))),
    }
}

/// Resample for the preset and write the WAV file
fn encode_file(
    path: &Path,
    samples: &[i16],
    sample_rate: u32,
    target_rate: Option<u32>,
) -> Result<(), RecordingError> {
    let (samples, rate) = match target_rate {
        Some(target) if target < sample_rate => (
            resample(samples, sample_rate, target)
                .map_err(|e| RecordingError::FinalizeFailed(e.to_string()))?,
            target,
        ),
        _ => (samples.to_vec(), sample_rate),
    };

    write_wav(path, &samples, rate).map_err(|e| RecordingError::FinalizeFailed(e.to_string()))
}
