//! Screen projection of a memo snapshot
//!
//! Pure mapping from [`MemoSnapshot`] to what the terminal shows. The
//! presenter renders a [`MemoView`] and never looks at the snapshot itself.

use crate::domain::memo::{MemoSnapshot, MemoState};

/// Microphone indicator next to the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MicIndicator {
    Off,
    Active,
}

impl MicIndicator {
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Off => "○",
            Self::Active => "●",
        }
    }
}

/// A key binding shown as a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonView {
    pub key: char,
    pub label: &'static str,
    pub enabled: bool,
}

/// Everything the screen shows for one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoView {
    pub status_label: String,
    pub mic: MicIndicator,
    pub toggle: ButtonView,
    pub play: ButtonView,
    /// Show an activity spinner
    pub busy: bool,
}

impl MemoView {
    pub fn project(snapshot: &MemoSnapshot) -> Self {
        let clock = snapshot.duration.as_clock();

        let status_label = match snapshot.state {
            MemoState::Idle if snapshot.has_recording() => format!("Recorded · {}", clock),
            MemoState::Idle => "Ready".to_string(),
            MemoState::Preparing => "Preparing…".to_string(),
            MemoState::Recording => format!("Recording · {}", clock),
            MemoState::Stopping => "Saving…".to_string(),
            MemoState::LoadingPlayback => "Loading…".to_string(),
            MemoState::Playing => format!("Playing · {}", clock),
        };

        let mic = if snapshot.is_recording() {
            MicIndicator::Active
        } else {
            MicIndicator::Off
        };

        let toggle = if snapshot.is_recording() {
            ButtonView {
                key: 'r',
                label: "Stop",
                enabled: snapshot.state == MemoState::Recording,
            }
        } else {
            ButtonView {
                key: 'r',
                label: "Start",
                enabled: snapshot.state == MemoState::Idle,
            }
        };

        let play = ButtonView {
            key: 'p',
            label: "Play",
            enabled: snapshot.state == MemoState::Idle && snapshot.has_recording(),
        };

        Self {
            status_label,
            mic,
            toggle,
            play,
            busy: snapshot.state != MemoState::Idle,
        }
    }
}
