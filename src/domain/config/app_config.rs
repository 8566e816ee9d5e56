//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::recording::QualityPreset;

/// Default interval between duration ticks while recording
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Accepted range for `tick_interval_ms`
pub const TICK_INTERVAL_RANGE_MS: std::ops::RangeInclusive<u64> = 10..=1000;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub quality: Option<String>,
    pub tick_interval_ms: Option<u64>,
    pub desktop_alerts: Option<bool>,
    pub recordings_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            quality: Some(QualityPreset::default().to_string()),
            tick_interval_ms: Some(DEFAULT_TICK_INTERVAL_MS),
            desktop_alerts: Some(false),
            recordings_dir: Some(default_recordings_dir()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            quality: other.quality.or(self.quality),
            tick_interval_ms: other.tick_interval_ms.or(self.tick_interval_ms),
            desktop_alerts: other.desktop_alerts.or(self.desktop_alerts),
            recordings_dir: other.recordings_dir.or(self.recordings_dir),
        }
    }

    /// Get quality as parsed preset, or default if not set/invalid
    pub fn quality_or_default(&self) -> QualityPreset {
        self.quality
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get tick interval in milliseconds, clamped to the accepted range
    pub fn tick_interval_ms_or_default(&self) -> u64 {
        self.tick_interval_ms
            .unwrap_or(DEFAULT_TICK_INTERVAL_MS)
            .clamp(*TICK_INTERVAL_RANGE_MS.start(), *TICK_INTERVAL_RANGE_MS.end())
    }

    /// Get desktop alert setting, or false if not set
    pub fn desktop_alerts_or_default(&self) -> bool {
        self.desktop_alerts.unwrap_or(false)
    }

    /// Get the directory for temporary recordings
    pub fn recordings_dir_or_default(&self) -> PathBuf {
        self.recordings_dir
            .clone()
            .unwrap_or_else(default_recordings_dir)
    }
}

/// `<tmp>/voice-memo`
pub fn default_recordings_dir() -> PathBuf {
    std::env::temp_dir().join("voice-memo")
}
