//! Duration value object

use std::fmt;
use std::time::Duration as StdDuration;

/// Value object representing an elapsed recording time.
/// Immutable; displayed as a `m:ss` clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Duration {
    milliseconds: u64,
}

impl Duration {
    /// Zero duration
    pub const ZERO: Self = Self::from_millis(0);

    /// Create a Duration from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create a Duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Get duration in seconds (truncated)
    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    /// Get duration in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }

    /// Format as `minutes:seconds` with seconds zero-padded to two digits
    pub fn as_clock(&self) -> String {
        let total_secs = self.as_secs();
        format!("{}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl From<StdDuration> for Duration {
    fn from(d: StdDuration) -> Self {
        Self::from_millis(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_clock())
    }
}
