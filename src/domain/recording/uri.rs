//! Recording file reference

use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque reference to the file a finished capture produced.
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordingUri(String);

impl RecordingUri {
    /// Wrap a reference string; empty strings are not a valid reference
    pub fn new(uri: impl Into<String>) -> Option<Self> {
        let uri = uri.into();
        if uri.trim().is_empty() {
            None
        } else {
            Some(Self(uri))
        }
    }

    /// Build a reference from a local file path
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::new(path.to_string_lossy().into_owned())
    }

    /// Get the raw reference string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the reference as a local file path
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(self.0.strip_prefix("file://").unwrap_or(&self.0))
    }
}

impl fmt::Display for RecordingUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert!(RecordingUri::new("").is_none());
        assert!(RecordingUri::new("   ").is_none());
    }

    #[test]
    fn path_round_trip() {
        let uri = RecordingUri::from_path(Path::new("/tmp/voice-memo/a.wav")).unwrap();
        assert_eq!(uri.as_str(), "/tmp/voice-memo/a.wav");
        assert_eq!(uri.to_path(), PathBuf::from("/tmp/voice-memo/a.wav"));
    }

    #[test]
    fn file_scheme_is_stripped_for_paths() {
        let uri = RecordingUri::new("file:///tmp/a.wav").unwrap();
        assert_eq!(uri.to_path(), PathBuf::from("/tmp/a.wav"));
        assert_eq!(uri.to_string(), "file:///tmp/a.wav");
    }
}
