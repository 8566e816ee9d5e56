//! Domain layer - Core business logic
//!
//! Contains value objects, the session state machine, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod memo;
pub mod permission;
pub mod recording;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use memo::{MemoEvent, MemoSession, MemoSnapshot, MemoState};
pub use permission::PermissionStatus;
pub use recording::{Duration, QualityPreset, RecordingUri};
