//! Keyboard and OS signal input for the recorder screen

use std::sync::Arc;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

/// What the user asked the screen to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Start or stop recording
    Toggle,
    Play,
    /// `q` on stdin
    Quit,
    /// SIGINT/SIGTERM or end of stdin
    Shutdown,
    /// Any other line, used to acknowledge alerts
    Other(String),
}

impl ScreenCommand {
    /// Parse one line of keyboard input
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "r" | "record" | "s" | "stop" => Self::Toggle,
            "p" | "play" => Self::Play,
            "q" | "quit" | "exit" => Self::Quit,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn ends_session(&self) -> bool {
        matches!(self, Self::Quit | Self::Shutdown)
    }
}

/// Screen input shared by the screen loop and the terminal alerter
pub type SharedInput = Arc<Mutex<ScreenInput>>;

/// Merged stream of keyboard lines and shutdown signals.
///
/// A quit that arrives while an alert is waiting for acknowledgment is
/// held back and returned by the next [`ScreenInput::recv`].
pub struct ScreenInput {
    receiver: mpsc::Receiver<ScreenCommand>,
    pending_exit: Option<ScreenCommand>,
}

impl ScreenInput {
    /// Start reading stdin and listening for shutdown signals
    pub fn spawn() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(16);

        spawn_shutdown_listener(tx.clone())?;

        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                let command = match lines.next_line().await {
                    Ok(Some(line)) => ScreenCommand::parse(&line),
                    Ok(None) | Err(_) => ScreenCommand::Shutdown,
                };
                let done = command == ScreenCommand::Shutdown;
                if tx.send(command).await.is_err() || done {
                    break;
                }
            }
        });

        Ok(Self::from_receiver(rx))
    }

    /// Wrap an existing command channel
    pub fn from_receiver(receiver: mpsc::Receiver<ScreenCommand>) -> Self {
        Self {
            receiver,
            pending_exit: None,
        }
    }

    /// Wait for the next command
    pub async fn recv(&mut self) -> Option<ScreenCommand> {
        if let Some(command) = self.pending_exit.take() {
            return Some(command);
        }
        self.receiver.recv().await
    }

    /// Wait for any input that acknowledges an alert
    pub async fn acknowledge(&mut self) {
        match self.receiver.recv().await {
            Some(command) if command.ends_session() => {
                debug!(?command, "Exit requested during alert");
                self.pending_exit = Some(command);
            }
            Some(_) => {}
            None => self.pending_exit = Some(ScreenCommand::Shutdown),
        }
    }
}

#[cfg(unix)]
fn spawn_shutdown_listener(tx: mpsc::Sender<ScreenCommand>) -> Result<(), std::io::Error> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => eprintln!("\n{} Received SIGINT (shutdown)", "↓".cyan()),
            _ = sigterm.recv() => eprintln!("\n{} Received SIGTERM (shutdown)", "↓".cyan()),
        }
        let _ = tx.send(ScreenCommand::Shutdown).await;
    });

    Ok(())
}

#[cfg(not(unix))]
fn spawn_shutdown_listener(tx: mpsc::Sender<ScreenCommand>) -> Result<(), std::io::Error> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n{} Received Ctrl-C (shutdown)", "↓".cyan());
            let _ = tx.send(ScreenCommand::Shutdown).await;
        }
    });

    Ok(())
}
