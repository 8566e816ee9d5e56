//! Rodio-based playback adapter
//!
//! The output stream is not Send, so every handle owns a player thread that
//! opens the device, decodes the file and watches for the end of playback.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::application::ports::{AudioPlayback, FinishCallback, PlaybackError, PlaybackHandle};
use crate::domain::recording::RecordingUri;

/// How often the player thread checks for the end of the file
const POLL_INTERVAL: Duration = Duration::from_millis(50);

enum PlayerCommand {
    Unload,
}

/// Playback capability backed by the default output device
#[derive(Debug, Default)]
pub struct RodioPlayback;

impl RodioPlayback {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioPlayback for RodioPlayback {
    type Handle = RodioPlaybackHandle;

    async fn create(
        &self,
        uri: &RecordingUri,
        play_immediately: bool,
        on_finish: FinishCallback,
    ) -> Result<Self::Handle, PlaybackError> {
        let path = uri.to_path();
        let (ready_tx, ready_rx) = oneshot::channel();
        let (command_tx, command_rx) = mpsc::channel();

        let worker = std::thread::Builder::new()
            .name("voice-memo-player".into())
            .spawn(move || run_player(path, play_immediately, on_finish, command_rx, ready_tx))
            .map_err(|e| PlaybackError::PlaybackFailed(format!("Cannot spawn thread: {}", e)))?;

        let mut handle = RodioPlaybackHandle {
            commands: Some(command_tx),
            worker: Some(worker),
        };

        let ready = ready_rx.await.unwrap_or_else(|_| {
            Err(PlaybackError::PlaybackFailed(
                "Player thread exited".to_string(),
            ))
        });

        match ready {
            Ok(()) => {
                info!(uri = %uri, "Playback started");
                Ok(handle)
            }
            Err(e) => {
                let _ = handle.unload().await;
                Err(e)
            }
        }
    }
}

/// One loaded recording on the default output device
pub struct RodioPlaybackHandle {
    commands: Option<mpsc::Sender<PlayerCommand>>,
    worker: Option<JoinHandle<()>>,
}

#[async_trait]
impl PlaybackHandle for RodioPlaybackHandle {
    async fn unload(&mut self) -> Result<(), PlaybackError> {
        if let Some(commands) = self.commands.take() {
            // The thread may already be gone after a failed load
            let _ = commands.send(PlayerCommand::Unload);
        }

        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        tokio::task::spawn_blocking(move || worker.join())
            .await
            .map_err(|e| PlaybackError::UnloadFailed(format!("Task join error: {}", e)))?
            .map_err(|_| PlaybackError::UnloadFailed("Player thread panicked".to_string()))?;

        debug!("Playback unloaded");
        Ok(())
    }
}

impl Drop for RodioPlaybackHandle {
    fn drop(&mut self) {
        if let Some(commands) = self.commands.take() {
            let _ = commands.send(PlayerCommand::Unload);
        }
    }
}

/// Body of the player thread
fn run_player(
    path: PathBuf,
    play_immediately: bool,
    on_finish: FinishCallback,
    commands: mpsc::Receiver<PlayerCommand>,
    ready: oneshot::Sender<Result<(), PlaybackError>>,
) {
    let (_stream, sink) = match open_sink(&path, play_immediately) {
        Ok(opened) => opened,
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };

    if ready.send(Ok(())).is_err() {
        return;
    }

    let mut finished = false;
    loop {
        match commands.recv_timeout(POLL_INTERVAL) {
            Ok(PlayerCommand::Unload) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                if !finished && sink.empty() {
                    finished = true;
                    on_finish();
                }
            }
        }
    }

    sink.stop();
}

/// Open the output device and queue the decoded file
fn open_sink(path: &Path, play_immediately: bool) -> Result<(OutputStream, Sink), PlaybackError> {
    let (stream, stream_handle) = OutputStream::try_default()
        .map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;

    let sink =
        Sink::try_new(&stream_handle).map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;

    let file = File::open(path)
        .map_err(|e| PlaybackError::LoadFailed(format!("{}: {}", path.display(), e)))?;
    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| PlaybackError::LoadFailed(e.to_string()))?;

    if !play_immediately {
        sink.pause();
    }
    sink.append(source);

    Ok((stream, sink))
}
