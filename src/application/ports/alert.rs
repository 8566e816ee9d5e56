//! User alert port interface

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Alert errors
#[derive(Debug, Clone, Error)]
pub enum AlertError {
    #[error("Failed to show alert: {0}")]
    ShowFailed(String),

    #[error("Alert was not acknowledged: {0}")]
    NotAcknowledged(String),
}

/// Port for blocking user alerts
#[async_trait]
pub trait Alerter: Send + Sync {
    /// Show a modal alert and wait until the user acknowledges it.
    ///
    /// # Arguments
    /// * `title` - The alert title
    /// * `message` - The alert body
    async fn alert(&self, title: &str, message: &str) -> Result<(), AlertError>;
}

/// Blanket implementation for boxed alerter types
#[async_trait]
impl Alerter for Box<dyn Alerter> {
    async fn alert(&self, title: &str, message: &str) -> Result<(), AlertError> {
        self.as_ref().alert(title, message).await
    }
}

#[async_trait]
impl<A: Alerter + ?Sized> Alerter for Arc<A> {
    async fn alert(&self, title: &str, message: &str) -> Result<(), AlertError> {
        self.as_ref().alert(title, message).await
    }
}
