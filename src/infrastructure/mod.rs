//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the audio devices, the desktop and the filesystem.

pub mod alert;
pub mod config;
pub mod permission;
pub mod playback;
pub mod recording;

// Re-export adapters
pub use alert::DesktopAlerter;
pub use config::XdgConfigStore;
pub use permission::CpalPermission;
pub use playback::{RodioPlayback, RodioPlaybackHandle};
pub use recording::{CpalCapture, CpalCaptureHandle};
