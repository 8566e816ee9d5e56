//! Domain error types

use thiserror::Error;

/// User-facing failures of the recorder/player.
///
/// All of them are recoverable by retrying the same intent; none is fatal
/// to the process. The controller is already back in a resting state by
/// the time one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoError {
    #[error("Microphone permission is required to record")]
    PermissionDenied,

    #[error("Failed to start recording: {0}")]
    RecordingStartFailed(String),

    #[error("Failed to stop recording: {0}")]
    RecordingStopFailed(String),

    #[error("Failed to play recording: {0}")]
    PlaybackFailed(String),
}

impl MemoError {
    /// Short title used for the blocking alert
    pub const fn title(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "Permission required",
            Self::RecordingStartFailed(_) => "Recording error",
            Self::RecordingStopFailed(_) => "Recording error",
            Self::PlaybackFailed(_) => "Playback error",
        }
    }
}

/// Error when an invalid quality preset is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid quality: \"{input}\". Valid presets are: high, low")]
pub struct InvalidQualityError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memo_error_messages() {
        assert_eq!(
            MemoError::PermissionDenied.to_string(),
            "Microphone permission is required to record"
        );
        let err = MemoError::PlaybackFailed("no output device".to_string());
        assert!(err.to_string().contains("no output device"));
    }

    #[test]
    fn memo_error_titles() {
        assert_eq!(MemoError::PermissionDenied.title(), "Permission required");
        assert_eq!(
            MemoError::RecordingStopFailed(String::new()).title(),
            "Recording error"
        );
        assert_eq!(MemoError::PlaybackFailed(String::new()).title(), "Playback error");
    }
}
