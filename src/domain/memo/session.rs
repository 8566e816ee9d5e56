//! Recorder/player session state machine

use std::fmt;
use thiserror::Error;

use crate::domain::recording::{Duration, RecordingUri};

/// Lifecycle states.
///
/// `Idle` covers both "nothing recorded" and "idle with a file"; the
/// difference lives in [`MemoSession::recording_uri`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemoState {
    #[default]
    Idle,
    Preparing,
    Recording,
    Stopping,
    LoadingPlayback,
    Playing,
}

impl MemoState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Preparing => "preparing",
            Self::Recording => "recording",
            Self::Stopping => "stopping",
            Self::LoadingPlayback => "loading",
            Self::Playing => "playing",
        }
    }

    /// Transient states only exist while an operation is in flight
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Preparing | Self::Stopping | Self::LoadingPlayback
        )
    }
}

impl fmt::Display for MemoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Platform callbacks delivered into the state machine.
///
/// Each event carries the id of the handle that produced it so that a late
/// callback from an already released handle cannot touch a newer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoEvent {
    /// Capture progress; overwrites the elapsed duration
    DurationTick { capture_id: u64, elapsed_ms: u64 },
    /// Natural end of playback
    PlaybackFinished { playback_id: u64 },
}

/// What applying an event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventEffect {
    /// Stale or out-of-state event, nothing changed
    Ignored,
    DurationUpdated,
    /// Playing -> Idle; the caller owns releasing the playback handle
    PlaybackEnded,
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: MemoState,
    pub action: String,
}

/// Immutable view of a session, published to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoSnapshot {
    pub state: MemoState,
    pub duration: Duration,
    pub recording_uri: Option<RecordingUri>,
}

impl MemoSnapshot {
    /// Capture is starting, running or finalizing
    pub fn is_recording(&self) -> bool {
        matches!(
            self.state,
            MemoState::Preparing | MemoState::Recording | MemoState::Stopping
        )
    }

    pub fn is_playing(&self) -> bool {
        self.state == MemoState::Playing
    }

    pub fn loading_play(&self) -> bool {
        self.state == MemoState::LoadingPlayback
    }

    /// Idle with a completed recording
    pub fn has_recording(&self) -> bool {
        self.recording_uri.is_some()
    }
}

/// Recorder/player session entity.
///
/// State machine:
///   IDLE -> PREPARING (begin_start)
///   PREPARING -> RECORDING (recording_started)
///   PREPARING -> IDLE (start_failed)
///   RECORDING -> STOPPING (begin_stop)
///   STOPPING -> IDLE(with file) (stop_succeeded)
///   STOPPING -> IDLE (stop_failed)
///   IDLE(with file) -> LOADING (begin_play)
///   LOADING -> PLAYING (playback_started)
///   LOADING -> IDLE(with file) (playback_failed)
///   PLAYING -> IDLE(with file) (PlaybackFinished event)
#[derive(Debug, Default)]
pub struct MemoSession {
    state: MemoState,
    duration: Duration,
    recording_uri: Option<RecordingUri>,
    capture_id: Option<u64>,
    playback_id: Option<u64>,
    next_id: u64,
}

impl MemoSession {
    /// Create a new session in idle state without a recording
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    /// Get the current state
    pub fn state(&self) -> MemoState {
        self.state
    }

    #[cfg(test)]
    /// Elapsed duration of the current or last recording
    pub fn duration(&self) -> Duration {
        self.duration
    }

    #[cfg(test)]
    pub fn recording_uri(&self) -> Option<&RecordingUri> {
        self.recording_uri.as_ref()
    }

    #[cfg(test)]
    /// Id of the capture handle currently bound to the session
    pub fn capture_id(&self) -> Option<u64> {
        self.capture_id
    }

    #[cfg(test)]
    /// Id of the playback handle currently bound to the session
    pub fn playback_id(&self) -> Option<u64> {
        self.playback_id
    }

    pub fn snapshot(&self) -> MemoSnapshot {
        MemoSnapshot {
            state: self.state,
            duration: self.duration,
            recording_uri: self.recording_uri.clone(),
        }
    }

    fn invalid(&self, action: &str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.state,
            action: action.to_string(),
        }
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Transition from IDLE to PREPARING.
    /// Discards any previous recording reference and returns the new capture id.
    pub fn begin_start(&mut self) -> Result<u64, InvalidStateTransition> {
        if self.state != MemoState::Idle {
            return Err(self.invalid("start recording"));
        }
        let id = self.allocate_id();
        self.state = MemoState::Preparing;
        self.recording_uri = None;
        self.duration = Duration::ZERO;
        self.capture_id = Some(id);
        Ok(id)
    }

    /// Transition from PREPARING to RECORDING
    pub fn recording_started(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != MemoState::Preparing {
            return Err(self.invalid("begin capture"));
        }
        self.state = MemoState::Recording;
        Ok(())
    }

    /// Transition from PREPARING back to IDLE
    pub fn start_failed(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != MemoState::Preparing {
            return Err(self.invalid("abort start"));
        }
        self.reset_capture();
        Ok(())
    }

    /// Transition from RECORDING to STOPPING
    pub fn begin_stop(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != MemoState::Recording {
            return Err(self.invalid("stop recording"));
        }
        self.state = MemoState::Stopping;
        Ok(())
    }

    /// Transition from STOPPING to IDLE carrying the file reference.
    /// The duration keeps the last ticked value.
    pub fn stop_succeeded(&mut self, uri: RecordingUri) -> Result<(), InvalidStateTransition> {
        if self.state != MemoState::Stopping {
            return Err(self.invalid("finish recording"));
        }
        self.state = MemoState::Idle;
        self.capture_id = None;
        self.recording_uri = Some(uri);
        Ok(())
    }

    /// Transition from STOPPING to IDLE without a file
    pub fn stop_failed(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != MemoState::Stopping {
            return Err(self.invalid("fail stop"));
        }
        self.reset_capture();
        Ok(())
    }

    /// Drop any capture in PREPARING, RECORDING or STOPPING and return to IDLE
    /// without a file. Used when the handle is gone or the screen is torn down.
    pub fn abandon_recording(&mut self) -> bool {
        if matches!(
            self.state,
            MemoState::Preparing | MemoState::Recording | MemoState::Stopping
        ) {
            self.reset_capture();
            true
        } else {
            false
        }
    }

    fn reset_capture(&mut self) {
        self.state = MemoState::Idle;
        self.capture_id = None;
        self.recording_uri = None;
        self.duration = Duration::ZERO;
    }

    /// Transition from IDLE(with file) to LOADING.
    /// Returns the new playback id and the file to play.
    pub fn begin_play(&mut self) -> Result<(u64, RecordingUri), InvalidStateTransition> {
        if self.state != MemoState::Idle {
            return Err(self.invalid("play recording"));
        }
        let uri = self
            .recording_uri
            .clone()
            .ok_or_else(|| self.invalid("play without a recording"))?;
        let id = self.allocate_id();
        self.state = MemoState::LoadingPlayback;
        self.playback_id = Some(id);
        Ok((id, uri))
    }

    /// Transition from LOADING to PLAYING
    pub fn playback_started(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != MemoState::LoadingPlayback {
            return Err(self.invalid("begin playback"));
        }
        self.state = MemoState::Playing;
        Ok(())
    }

    /// Transition from LOADING back to IDLE(with file)
    pub fn playback_failed(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != MemoState::LoadingPlayback {
            return Err(self.invalid("abort playback"));
        }
        self.state = MemoState::Idle;
        self.playback_id = None;
        Ok(())
    }

    /// Drop any playback in LOADING or PLAYING and return to IDLE(with file)
    pub fn abandon_playback(&mut self) -> bool {
        if matches!(self.state, MemoState::LoadingPlayback | MemoState::Playing) {
            self.state = MemoState::Idle;
            self.playback_id = None;
            true
        } else {
            false
        }
    }

    /// Apply a platform callback
    pub fn apply(&mut self, event: MemoEvent) -> EventEffect {
        match event {
            MemoEvent::DurationTick {
                capture_id,
                elapsed_ms,
            } => {
                let active = matches!(self.state, MemoState::Preparing | MemoState::Recording);
                if !active || self.capture_id != Some(capture_id) {
                    return EventEffect::Ignored;
                }
                self.duration = Duration::from_millis(elapsed_ms.max(self.duration.as_millis()));
                EventEffect::DurationUpdated
            }
            MemoEvent::PlaybackFinished { playback_id } => {
                if self.state != MemoState::Playing || self.playback_id != Some(playback_id) {
                    return EventEffect::Ignored;
                }
                self.state = MemoState::Idle;
                self.playback_id = None;
                EventEffect::PlaybackEnded
            }
        }
    }
}
