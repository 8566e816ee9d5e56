//! Voice Memo - record a voice memo and play it back
//!
//! This crate drives a single recorder/player screen: capture from the
//! microphone into a temporary WAV file, then play the last recording.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Session state machine, value objects and errors
//! - **Application**: The controller and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, rodio, notify-rust, config file)
//! - **CLI**: Argument parsing, the terminal screen and input handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
