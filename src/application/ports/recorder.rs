//! Capture port interfaces

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::recording::{Duration, QualityPreset, RecordingUri};

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("Failed to configure audio session: {0}")]
    SessionConfigFailed(String),

    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Failed to finalize recording: {0}")]
    FinalizeFailed(String),

    #[error("Recording handle is not available")]
    HandleUnavailable,

    #[error("No audio device available")]
    NoAudioDevice,

    #[error("Failed to discard recording: {0}")]
    DiscardFailed(String),
}

/// Duration callback invoked periodically while capturing.
/// Parameter: elapsed_ms
pub type TickCallback = Arc<dyn Fn(u64) + Send + Sync>;

/// Result of a finalized capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedRecording {
    pub uri: RecordingUri,
    pub duration: Duration,
}

/// Port for the host capture capability
#[async_trait]
pub trait AudioCapture: Send + Sync {
    type Handle: CaptureHandle;

    /// Configure the host audio session for capture.
    async fn configure_session(&self) -> Result<(), RecordingError>;

    /// Acquire a new recording handle prepared with the given preset.
    ///
    /// # Returns
    /// A handle that has not started capturing yet
    async fn prepare(&self, preset: QualityPreset) -> Result<Self::Handle, RecordingError>;

    /// Delete a finished recording that is no longer referenced.
    /// A file that is already gone is not an error.
    async fn discard(&self, uri: &RecordingUri) -> Result<(), RecordingError>;
}

/// A single recording session on the host
#[async_trait]
pub trait CaptureHandle: Send + 'static {
    /// Begin capturing; `on_tick` receives the elapsed time until stopped.
    async fn start(&mut self, on_tick: TickCallback) -> Result<(), RecordingError>;

    /// Stop capturing and write the file.
    async fn stop_and_finalize(&mut self) -> Result<FinishedRecording, RecordingError>;

    /// Release the handle without producing a file. Safe to call in any state.
    async fn release(&mut self) -> Result<(), RecordingError>;
}
