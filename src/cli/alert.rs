//! Terminal alert adapter
//!
//! Prints the alert above the status line and blocks until the user
//! presses Enter on the recorder screen.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{AlertError, Alerter};

use super::presenter::Presenter;
use super::signals::SharedInput;

/// Modal alert on the terminal
pub struct TerminalAlerter {
    input: SharedInput,
    presenter: Arc<Presenter>,
}

impl TerminalAlerter {
    pub fn new(input: SharedInput, presenter: Arc<Presenter>) -> Self {
        Self { input, presenter }
    }
}

#[async_trait]
impl Alerter for TerminalAlerter {
    async fn alert(&self, title: &str, message: &str) -> Result<(), AlertError> {
        self.presenter.alert(title, message);
        self.input.lock().await.acknowledge().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::signals::{ScreenCommand, ScreenInput};
    use tokio::sync::{mpsc, Mutex};

    #[tokio::test]
    async fn alert_returns_after_acknowledgment() {
        let (tx, rx) = mpsc::channel(2);
        let input = Arc::new(Mutex::new(ScreenInput::from_receiver(rx)));
        let alerter = TerminalAlerter::new(Arc::clone(&input), Arc::new(Presenter::new()));

        tx.send(ScreenCommand::Other(String::new())).await.unwrap();
        alerter
            .alert("Playback error", "file missing")
            .await
            .unwrap();

        tx.send(ScreenCommand::Toggle).await.unwrap();
        assert_eq!(input.lock().await.recv().await, Some(ScreenCommand::Toggle));
    }
}
