//! Permission gate
//!
//! Wraps the host permission prompt and remembers the last decision.
//! Any failure to query the host is treated as a denial.

use std::sync::Mutex;

use tracing::{debug, warn};

use crate::domain::permission::PermissionStatus;

use super::ports::MicrophonePermission;

/// Fail-closed gate in front of [`MicrophonePermission`]
pub struct PermissionGate<P: MicrophonePermission> {
    port: P,
    status: Mutex<PermissionStatus>,
}

impl<P: MicrophonePermission> PermissionGate<P> {
    /// Create a gate with an undecided status
    pub fn new(port: P) -> Self {
        Self {
            port,
            status: Mutex::new(PermissionStatus::Unknown),
        }
    }

    /// Last known status, without asking the host
    pub fn status(&self) -> PermissionStatus {
        *self.status.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Ask the host for access, unless access was already granted.
    ///
    /// A denied or unknown status is re-queried so that a user who changed
    /// their mind in the system settings can record without a restart.
    pub async fn request_access(&self) -> PermissionStatus {
        if self.status().is_granted() {
            return PermissionStatus::Granted;
        }

        let status = match self.port.request().await {
            Ok(PermissionStatus::Granted) => PermissionStatus::Granted,
            Ok(_) => PermissionStatus::Denied,
            Err(e) => {
                warn!("Permission query failed, treating as denied: {}", e);
                PermissionStatus::Denied
            }
        };

        debug!(%status, "Microphone permission resolved");
        *self.status.lock().unwrap_or_else(|e| e.into_inner()) = status;
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::PermissionError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockPermission {
        answer: Result<PermissionStatus, PermissionError>,
        calls: AtomicUsize,
    }

    impl MockPermission {
        fn new(answer: Result<PermissionStatus, PermissionError>) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MicrophonePermission for MockPermission {
        async fn request(&self) -> Result<PermissionStatus, PermissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    #[tokio::test]
    async fn starts_unknown() {
        let gate = PermissionGate::new(MockPermission::new(Ok(PermissionStatus::Granted)));
        assert_eq!(gate.status(), PermissionStatus::Unknown);
    }

    #[tokio::test]
    async fn granted_is_cached() {
        let gate = PermissionGate::new(MockPermission::new(Ok(PermissionStatus::Granted)));
        assert_eq!(gate.request_access().await, PermissionStatus::Granted);
        assert_eq!(gate.request_access().await, PermissionStatus::Granted);
        assert_eq!(gate.port.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn denied_is_requeried() {
        let gate = PermissionGate::new(MockPermission::new(Ok(PermissionStatus::Denied)));
        assert_eq!(gate.request_access().await, PermissionStatus::Denied);
        assert_eq!(gate.request_access().await, PermissionStatus::Denied);
        assert_eq!(gate.port.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn query_failure_is_denied() {
        let gate = PermissionGate::new(MockPermission::new(Err(PermissionError::QueryFailed(
            "no host".to_string(),
        ))));
        assert_eq!(gate.request_access().await, PermissionStatus::Denied);
        assert_eq!(gate.status(), PermissionStatus::Denied);
    }

    #[tokio::test]
    async fn unknown_answer_is_denied() {
        let gate = PermissionGate::new(MockPermission::new(Ok(PermissionStatus::Unknown)));
        assert_eq!(gate.request_access().await, PermissionStatus::Denied);
    }
}
