//! Microphone access check using cpal
//!
//! Desktop hosts have no consent dialog cpal can trigger. Access counts as
//! granted when a default input device exists and reports a usable config.

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait};
use tracing::debug;

use crate::application::ports::{MicrophonePermission, PermissionError};
use crate::domain::permission::PermissionStatus;

/// Permission adapter probing the default input device
#[derive(Debug, Default)]
pub struct CpalPermission;

impl CpalPermission {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MicrophonePermission for CpalPermission {
    async fn request(&self) -> Result<PermissionStatus, PermissionError> {
        tokio::task::spawn_blocking(probe_input_device)
            .await
            .map_err(|e| PermissionError::QueryFailed(format!("Task join error: {}", e)))?
    }
}

fn probe_input_device() -> Result<PermissionStatus, PermissionError> {
    let host = cpal::default_host();
    let Some(device) = host.default_input_device() else {
        debug!("No default input device");
        return Ok(PermissionStatus::Denied);
    };

    match device.default_input_config() {
        Ok(config) => {
            debug!(
                sample_rate = config.sample_rate().0,
                channels = config.channels(),
                "Input device available"
            );
            Ok(PermissionStatus::Granted)
        }
        Err(cpal::DefaultStreamConfigError::DeviceNotAvailable) => Ok(PermissionStatus::Denied),
        Err(e) => Err(PermissionError::QueryFailed(e.to_string())),
    }
}
