//! Microphone permission infrastructure module

mod cpal_permission;

pub use cpal_permission::CpalPermission;
