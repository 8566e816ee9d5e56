//! Recorder screen runner
//!
//! Wires the hardware adapters into a [`MemoController`], renders every
//! state change and feeds keyboard input and platform events to it until
//! the user quits.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use crate::application::ports::{Alerter, AudioCapture, AudioPlayback, MicrophonePermission};
use crate::application::{ControllerConfig, MemoController, Outcome};
use crate::domain::error::MemoError;
use crate::domain::memo::{MemoEvent, MemoSnapshot};
use crate::infrastructure::{CpalCapture, CpalPermission, DesktopAlerter, RodioPlayback};

use super::alert::TerminalAlerter;
use super::app::{EXIT_ERROR, EXIT_SUCCESS};
use super::args::ScreenOptions;
use super::presenter::Presenter;
use super::signals::{ScreenCommand, ScreenInput, SharedInput};
use super::view::MemoView;

/// Run the interactive recorder screen
pub async fn run_screen(options: ScreenOptions) -> ExitCode {
    let presenter = Arc::new(Presenter::new());

    let input = match ScreenInput::spawn() {
        Ok(input) => Arc::new(Mutex::new(input)),
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let terminal = TerminalAlerter::new(Arc::clone(&input), Arc::clone(&presenter));
    let alerter: Box<dyn Alerter> = if options.desktop_alerts {
        Box::new(DesktopAlerter::new(terminal))
    } else {
        Box::new(terminal)
    };

    let capture = CpalCapture::new(
        options.recordings_dir.clone(),
        StdDuration::from_millis(options.tick_interval_ms),
    );
    info!(
        quality = %options.quality,
        dir = %capture.recordings_dir().display(),
        "Recorder screen starting"
    );

    let (controller, events) = MemoController::new(
        CpalPermission::new(),
        capture,
        RodioPlayback::new(),
        alerter,
        ControllerConfig {
            quality: options.quality,
        },
    );

    let render = Arc::clone(&presenter);
    let controller = controller.with_listener(Arc::new(move |snapshot: &MemoSnapshot| {
        render.render(&MemoView::project(snapshot))
    }));

    presenter.help();
    presenter.render(&MemoView::project(&controller.snapshot()));

    let status = controller.request_permission().await;
    if !status.is_granted() {
        presenter.warn("No microphone available. Recording will ask again.");
    }

    let clean = run_loop(&controller, &input, events, &presenter).await;

    controller.teardown().await;
    presenter.stop_spinner();

    if clean {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Dispatch input and platform events until the user quits.
///
/// Returns false if the input stream ended unexpectedly.
async fn run_loop<M, C, P, A>(
    controller: &MemoController<M, C, P, A>,
    input: &SharedInput,
    mut events: mpsc::UnboundedReceiver<MemoEvent>,
    presenter: &Presenter,
) -> bool
where
    M: MicrophonePermission,
    C: AudioCapture,
    P: AudioPlayback,
    A: Alerter,
{
    loop {
        let command = tokio::select! {
            Some(event) = events.recv() => {
                let effect = controller.handle_event(event).await;
                debug!(?event, ?effect, "Platform event");
                continue;
            }
            command = async { input.lock().await.recv().await } => command,
        };

        let result = match command {
            Some(ScreenCommand::Toggle) => controller.toggle().await,
            Some(ScreenCommand::Play) => controller.play().await,
            Some(ScreenCommand::Quit) => return true,
            Some(ScreenCommand::Shutdown) => {
                info!("Shutdown requested");
                return true;
            }
            Some(ScreenCommand::Other(line)) => {
                if !line.is_empty() {
                    presenter.warn(&format!("Unknown key '{}'. Use r, p or q.", line));
                }
                continue;
            }
            None => return false,
        };

        report(result);
    }
}

/// Failures were already shown as alerts; only log them
fn report(result: Result<Outcome, MemoError>) {
    match result {
        Ok(Outcome::Done) => {}
        Ok(outcome) => debug!(?outcome, "Intent not applied"),
        Err(e) => warn!("{}", e),
    }
}
