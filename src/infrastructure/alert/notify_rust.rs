//! Desktop notification decorator using notify-rust
//!
//! Works on Windows, macOS, and Linux. A notification cannot be
//! acknowledged reliably across platforms, so acknowledgment is left to
//! the wrapped alerter.

use async_trait::async_trait;
use tracing::warn;

use crate::application::ports::{AlertError, Alerter};

/// Mirrors every alert as a desktop notification, then defers to `inner`
pub struct DesktopAlerter<A: Alerter> {
    inner: A,
    app_name: String,
}

impl<A: Alerter> DesktopAlerter<A> {
    pub fn new(inner: A) -> Self {
        Self::with_app_name(inner, "Voice Memo")
    }

    /// Create with custom app name
    pub fn with_app_name(inner: A, app_name: impl Into<String>) -> Self {
        Self {
            inner,
            app_name: app_name.into(),
        }
    }

    async fn notify(&self, title: &str, message: &str) -> Result<(), AlertError> {
        let title = title.to_owned();
        let message = message.to_owned();
        let app_name = self.app_name.clone();

        // notify-rust operations can block, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            notify_rust::Notification::new()
                .appname(&app_name)
                .summary(&title)
                .body(&message)
                .icon("dialog-error")
                .show()
                .map(|_| ())
                .map_err(|e| AlertError::ShowFailed(e.to_string()))
        })
        .await
        .map_err(|e| AlertError::ShowFailed(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl<A: Alerter> Alerter for DesktopAlerter<A> {
    async fn alert(&self, title: &str, message: &str) -> Result<(), AlertError> {
        if let Err(e) = self.notify(title, message).await {
            warn!("Desktop notification failed: {}", e);
        }
        self.inner.alert(title, message).await
    }
}
