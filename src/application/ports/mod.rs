//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod alert;
pub mod config;
pub mod permission;
pub mod player;
pub mod recorder;

// Re-export common types
pub use alert::{AlertError, Alerter};
pub use config::ConfigStore;
pub use permission::{MicrophonePermission, PermissionError};
pub use player::{AudioPlayback, FinishCallback, PlaybackError, PlaybackHandle};
pub use recorder::{AudioCapture, CaptureHandle, FinishedRecording, RecordingError, TickCallback};
