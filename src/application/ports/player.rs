//! Playback port interfaces

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::recording::RecordingUri;

/// Errors that can occur during playback
#[derive(Error, Debug, Clone)]
pub enum PlaybackError {
    /// Failed to open or decode the recording
    #[error("Cannot load recording: {0}")]
    LoadFailed(String),

    /// Failed to play the recording
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// No audio output device available
    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Failed to release the output
    #[error("Unload failed: {0}")]
    UnloadFailed(String),
}

/// Invoked once when playback reaches the end of the file
pub type FinishCallback = Arc<dyn Fn() + Send + Sync>;

/// Port for the host playback capability
#[async_trait]
pub trait AudioPlayback: Send + Sync {
    type Handle: PlaybackHandle;

    /// Create a handle bound to `uri`.
    ///
    /// # Arguments
    /// * `uri` - The recording to play
    /// * `play_immediately` - Start rendering as soon as the file is loaded
    /// * `on_finish` - Called on natural end of playback
    async fn create(
        &self,
        uri: &RecordingUri,
        play_immediately: bool,
        on_finish: FinishCallback,
    ) -> Result<Self::Handle, PlaybackError>;
}

/// A single playback session on the host
#[async_trait]
pub trait PlaybackHandle: Send + 'static {
    /// Stop rendering and free the output. Safe to call more than once.
    async fn unload(&mut self) -> Result<(), PlaybackError>;
}
