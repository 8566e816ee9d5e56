//! Capture quality preset value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidQualityError;

/// Sample rate used by the low quality preset
pub const LOW_QUALITY_SAMPLE_RATE: u32 = 16_000;

/// Quality preset handed to the capture capability when preparing a recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QualityPreset {
    /// Device native sample rate, mono
    #[default]
    High,
    /// 16kHz mono, speech-optimized
    Low,
}

impl QualityPreset {
    /// Get the string identifier for this preset
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }

    /// Target sample rate, or None to keep the device rate
    pub const fn target_sample_rate(&self) -> Option<u32> {
        match self {
            Self::High => None,
            Self::Low => Some(LOW_QUALITY_SAMPLE_RATE),
        }
    }
}

impl FromStr for QualityPreset {
    type Err = InvalidQualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "low" => Ok(Self::Low),
            _ => Err(InvalidQualityError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_presets() {
        assert_eq!("high".parse::<QualityPreset>().unwrap(), QualityPreset::High);
        assert_eq!(" LOW ".parse::<QualityPreset>().unwrap(), QualityPreset::Low);
    }

    #[test]
    fn parse_invalid() {
        let err = "studio".parse::<QualityPreset>().unwrap_err();
        assert!(err.to_string().contains("studio"));
    }

    #[test]
    fn target_rates() {
        assert_eq!(QualityPreset::High.target_sample_rate(), None);
        assert_eq!(QualityPreset::Low.target_sample_rate(), Some(16_000));
    }

    #[test]
    fn default_is_high() {
        assert_eq!(QualityPreset::default(), QualityPreset::High);
        assert_eq!(QualityPreset::default().to_string(), "high");
    }
}
