//! Recorder/player controller use case
//!
//! Drives one [`MemoSession`] against the capture and playback ports.
//! Intents (`start`, `stop`, `play`) are serialized by a single operation
//! guard; platform callbacks arrive as [`MemoEvent`]s on the channel returned
//! by [`MemoController::new`] and are fed back through
//! [`MemoController::handle_event`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::domain::error::MemoError;
use crate::domain::memo::{EventEffect, MemoEvent, MemoSession, MemoSnapshot, MemoState};
use crate::domain::permission::PermissionStatus;
use crate::domain::recording::QualityPreset;

use super::permission::PermissionGate;
use super::ports::{
    Alerter, AudioCapture, AudioPlayback, CaptureHandle, FinishCallback, MicrophonePermission,
    PlaybackHandle, RecordingError, TickCallback,
};
use super::slot::{HandleSlot, OperationGuard};

/// How an intent was handled when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The transition ran to completion
    Done,
    /// Not allowed from the current state; nothing changed
    Ignored,
    /// Another operation is in flight; the intent was dropped
    Busy,
}

/// Called with the new snapshot after every state change
pub type StateListener = Arc<dyn Fn(&MemoSnapshot) + Send + Sync>;

/// Controller settings
#[derive(Debug, Clone, Default)]
pub struct ControllerConfig {
    /// Preset passed to the capture capability
    pub quality: QualityPreset,
}

/// Recorder/player controller, one per screen
pub struct MemoController<M, C, P, A>
where
    M: MicrophonePermission,
    C: AudioCapture,
    P: AudioPlayback,
    A: Alerter,
{
    permission: PermissionGate<M>,
    capture: C,
    playback: P,
    alerter: A,
    session: Mutex<MemoSession>,
    recording: HandleSlot<C::Handle>,
    player: HandleSlot<P::Handle>,
    guard: OperationGuard,
    closed: AtomicBool,
    events: mpsc::UnboundedSender<MemoEvent>,
    listener: Option<StateListener>,
    config: ControllerConfig,
}

impl<M, C, P, A> MemoController<M, C, P, A>
where
    M: MicrophonePermission,
    C: AudioCapture,
    P: AudioPlayback,
    A: Alerter,
{
    /// Create a controller and the receiver for its platform events
    pub fn new(
        permission: M,
        capture: C,
        playback: P,
        alerter: A,
        config: ControllerConfig,
    ) -> (Self, mpsc::UnboundedReceiver<MemoEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            permission: PermissionGate::new(permission),
            capture,
            playback,
            alerter,
            session: Mutex::new(MemoSession::new()),
            recording: HandleSlot::new(),
            player: HandleSlot::new(),
            guard: OperationGuard::new(),
            closed: AtomicBool::new(false),
            events: tx,
            listener: None,
            config,
        };
        (controller, rx)
    }

    /// Register the state listener (the presentation layer)
    pub fn with_listener(mut self, listener: StateListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Current state of the session
    pub fn snapshot(&self) -> MemoSnapshot {
        self.lock_session().snapshot()
    }

    pub fn permission_status(&self) -> PermissionStatus {
        self.permission.status()
    }

    /// Ask for microphone access ahead of the first recording
    pub async fn request_permission(&self) -> PermissionStatus {
        self.permission.request_access().await
    }

    fn lock_session(&self) -> std::sync::MutexGuard<'_, MemoSession> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Run a transition and publish the snapshot if anything changed
    fn transition<R>(&self, f: impl FnOnce(&mut MemoSession) -> R) -> R {
        let (result, changed) = {
            let mut session = self.lock_session();
            let before = session.snapshot();
            let result = f(&mut session);
            let after = session.snapshot();
            (result, (before != after).then_some(after))
        };

        if let (Some(snapshot), Some(listener)) = (changed, self.listener.as_ref()) {
            listener(&snapshot);
        }
        result
    }

    /// Show the blocking alert for a failure and hand the error back
    async fn surface(&self, err: MemoError) -> MemoError {
        if let Err(e) = self.alerter.alert(err.title(), &err.to_string()).await {
            warn!("Failed to show alert: {}", e);
        }
        err
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Start a recording (Idle -> Preparing -> Recording)
    pub async fn start(&self) -> Result<Outcome, MemoError> {
        let Some(_permit) = self.guard.try_begin() else {
            debug!("start ignored: operation in flight");
            return Ok(Outcome::Busy);
        };
        if self.is_closed() || self.snapshot().state != MemoState::Idle {
            debug!(state = %self.snapshot().state, "start ignored");
            return Ok(Outcome::Ignored);
        }

        if !self.permission.request_access().await.is_granted() {
            warn!("Recording refused: microphone permission not granted");
            return Err(self.surface(MemoError::PermissionDenied).await);
        }

        let previous = self.snapshot().recording_uri;
        let capture_id = match self.transition(|s| s.begin_start()) {
            Ok(id) => id,
            Err(e) => {
                debug!("start ignored: {}", e);
                return Ok(Outcome::Ignored);
            }
        };

        if let Some(uri) = previous {
            match self.capture.discard(&uri).await {
                Ok(()) => debug!(uri = %uri, "Previous recording discarded"),
                Err(e) => warn!("{}", e),
            }
        }

        let acquired = self.acquire_capture(capture_id).await;

        // Torn down mid-start: teardown owns the handle, nobody is left to alert.
        if self.is_closed() {
            debug!(capture_id, "start abandoned: controller torn down");
            self.transition(|s| s.abandon_recording());
            return Ok(Outcome::Ignored);
        }

        match acquired {
            Ok(()) => {
                if let Err(e) = self.transition(|s| s.recording_started()) {
                    warn!("Capture started after the session moved on: {}", e);
                }
                info!(capture_id, "Recording started");
                Ok(Outcome::Done)
            }
            Err(e) => {
                error!("Failed to start recording: {}", e);
                if self.transition(|s| s.start_failed()).is_err() {
                    self.transition(|s| s.abandon_recording());
                }
                Err(self
                    .surface(MemoError::RecordingStartFailed(e.to_string()))
                    .await)
            }
        }
    }

    async fn acquire_capture(&self, capture_id: u64) -> Result<(), RecordingError> {
        self.capture.configure_session().await?;

        if let Some(mut stale) = self.recording.take().await {
            warn!("Releasing a recording handle left over from a previous session");
            if let Err(e) = stale.release().await {
                debug!("Stale recording handle release failed: {}", e);
            }
        }

        let mut handle = self.capture.prepare(self.config.quality).await?;

        let events = self.events.clone();
        let on_tick: TickCallback = Arc::new(move |elapsed_ms: u64| {
            let _ = events.send(MemoEvent::DurationTick {
                capture_id,
                elapsed_ms,
            });
        });

        if let Err(e) = handle.start(on_tick).await {
            if let Err(release_err) = handle.release().await {
                debug!("Partial recording handle release failed: {}", release_err);
            }
            return Err(e);
        }

        if let Err(mut handle) = self.recording.fill(capture_id, handle).await {
            let _ = handle.release().await;
            return Err(RecordingError::StartFailed(
                "a recording handle is already held".to_string(),
            ));
        }

        // Torn down while we were acquiring: nobody is left to stop it.
        if self.is_closed() {
            if let Some(mut handle) = self.recording.take().await {
                let _ = handle.release().await;
            }
            return Err(RecordingError::StartFailed("screen closed".to_string()));
        }

        Ok(())
    }

    /// Stop the recording (Recording -> Stopping -> Idle with file)
    pub async fn stop(&self) -> Result<Outcome, MemoError> {
        let Some(_permit) = self.guard.try_begin() else {
            debug!("stop ignored: operation in flight");
            return Ok(Outcome::Busy);
        };

        if let Err(e) = self.transition(|s| s.begin_stop()) {
            warn!("stop requested with no active recording: {}", e);
            return Ok(Outcome::Ignored);
        }

        let Some(mut handle) = self.recording.take().await else {
            error!("Recording state without a recording handle");
            self.transition(|s| s.abandon_recording());
            return Err(self
                .surface(MemoError::RecordingStopFailed(
                    RecordingError::HandleUnavailable.to_string(),
                ))
                .await);
        };

        let result = handle.stop_and_finalize().await;
        if let Err(e) = handle.release().await {
            debug!("Recording handle release failed: {}", e);
        }
        drop(handle);

        match result {
            Ok(finished) => {
                debug!(
                    reported = %finished.duration,
                    "Capture finalized; keeping last ticked duration"
                );
                let uri = finished.uri.clone();
                if let Err(e) = self.transition(|s| s.stop_succeeded(finished.uri)) {
                    warn!("Recording finished after the session moved on: {}", e);
                }
                info!(uri = %uri, duration = %self.snapshot().duration, "Recording saved");
                Ok(Outcome::Done)
            }
            Err(e) => {
                error!("Failed to stop recording: {}", e);
                if self.transition(|s| s.stop_failed()).is_err() {
                    self.transition(|s| s.abandon_recording());
                }
                Err(self
                    .surface(MemoError::RecordingStopFailed(e.to_string()))
                    .await)
            }
        }
    }

    /// Toggle between start and stop, like the combined Start/Stop button
    pub async fn toggle(&self) -> Result<Outcome, MemoError> {
        match self.snapshot().state {
            MemoState::Recording => self.stop().await,
            _ => self.start().await,
        }
    }

    /// Play the last recording (Idle with file -> Loading -> Playing)
    pub async fn play(&self) -> Result<Outcome, MemoError> {
        let Some(_permit) = self.guard.try_begin() else {
            debug!("play ignored: operation in flight");
            return Ok(Outcome::Busy);
        };
        if self.is_closed() {
            return Ok(Outcome::Ignored);
        }

        let (playback_id, uri) = match self.transition(|s| s.begin_play()) {
            Ok(v) => v,
            Err(e) => {
                debug!("play ignored: {}", e);
                return Ok(Outcome::Ignored);
            }
        };

        // Never two playback handles at once: the old one is fully unloaded first.
        if let Some(mut previous) = self.player.take().await {
            if let Err(e) = previous.unload().await {
                warn!("Previous playback unload failed: {}", e);
            }
        }

        let events = self.events.clone();
        let on_finish: FinishCallback = Arc::new(move || {
            let _ = events.send(MemoEvent::PlaybackFinished { playback_id });
        });

        let failure = match self.playback.create(&uri, true, on_finish).await {
            Ok(handle) => match self.player.fill(playback_id, handle).await {
                Ok(()) => None,
                Err(mut handle) => {
                    let _ = handle.unload().await;
                    Some("a playback handle is already held".to_string())
                }
            },
            Err(e) => Some(e.to_string()),
        };

        // Torn down while loading: the handle may have landed after teardown
        // emptied the slot, so it is unloaded here.
        if self.is_closed() {
            if let Some(mut handle) = self.player.take().await {
                if let Err(e) = handle.unload().await {
                    debug!("Playback unload after teardown failed: {}", e);
                }
            }
            debug!(playback_id, "play abandoned: controller torn down");
            self.transition(|s| s.abandon_playback());
            return Ok(Outcome::Ignored);
        }

        match failure {
            None => {
                if let Err(e) = self.transition(|s| s.playback_started()) {
                    warn!("Playback started after the session moved on: {}", e);
                }
                info!(playback_id, uri = %uri, "Playback started");
                Ok(Outcome::Done)
            }
            Some(reason) => {
                error!("Failed to play recording: {}", reason);
                if self.transition(|s| s.playback_failed()).is_err() {
                    self.transition(|s| s.abandon_playback());
                }
                Err(self.surface(MemoError::PlaybackFailed(reason)).await)
            }
        }
    }

    /// Apply a platform callback
    pub async fn handle_event(&self, event: MemoEvent) -> EventEffect {
        let effect = self.transition(|s| s.apply(event));

        if let (EventEffect::PlaybackEnded, MemoEvent::PlaybackFinished { playback_id }) =
            (effect, event)
        {
            if let Some(mut handle) = self.player.take_if(playback_id).await {
                if let Err(e) = handle.unload().await {
                    warn!("Playback unload after finish failed: {}", e);
                }
            }
            info!(playback_id, "Playback finished");
        }

        effect
    }

    /// Release everything. Safe from any state; never fails.
    pub async fn teardown(&self) {
        self.closed.store(true, Ordering::SeqCst);

        if let Some(mut handle) = self.recording.take().await {
            debug!("Discarding active recording on teardown");
            if let Err(e) = handle.release().await {
                debug!("Recording release on teardown failed: {}", e);
            }
        }

        if let Some(mut handle) = self.player.take().await {
            debug!("Unloading playback on teardown");
            if let Err(e) = handle.unload().await {
                debug!("Playback unload on teardown failed: {}", e);
            }
        }

        self.transition(|s| {
            s.abandon_recording();
            s.abandon_playback();
        });
        info!("Controller torn down");
    }
}
