//! Application layer - Use cases and port interfaces
//!
//! Contains the recorder/player controller, the permission gate,
//! and trait definitions for external system interactions.

pub mod controller;
pub mod permission;
pub mod ports;
pub mod slot;

// Re-export use cases
pub use controller::{ControllerConfig, MemoController, Outcome, StateListener};
pub use permission::PermissionGate;
pub use slot::{HandleSlot, OperationGuard};
