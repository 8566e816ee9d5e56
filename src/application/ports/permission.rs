//! Microphone permission port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::permission::PermissionStatus;

/// Permission query errors
#[derive(Debug, Clone, Error)]
pub enum PermissionError {
    #[error("Failed to query microphone permission: {0}")]
    QueryFailed(String),
}

/// Port for the host consent prompt
#[async_trait]
pub trait MicrophonePermission: Send + Sync {
    /// Ask for microphone access. Prompts only if not decided before.
    ///
    /// # Returns
    /// Granted or denied; errors mean the status could not be queried
    async fn request(&self) -> Result<PermissionStatus, PermissionError>;
}
