//! CLI presenter for output formatting

use std::sync::Mutex;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use super::view::{ButtonView, MemoView, MicIndicator};

/// Presenter for CLI output formatting.
///
/// Shared between the screen loop, the state listener and the terminal
/// alerter, so the spinner sits behind a mutex.
pub struct Presenter {
    spinner: Mutex<Option<ProgressBar>>,
    last_line: Mutex<Option<String>>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            last_line: Mutex::new(None),
        }
    }

    /// Draw the recorder screen for `view`
    pub fn render(&self, view: &MemoView) {
        let line = format_view(view);

        if view.busy {
            self.show_spinner(&line);
            return;
        }

        self.stop_spinner();
        let mut last = self.last_line.lock().unwrap_or_else(|e| e.into_inner());
        if last.as_deref() != Some(line.as_str()) {
            eprintln!("{}", line);
            *last = Some(line);
        }
    }

    fn show_spinner(&self, message: &str) {
        let mut spinner = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        match spinner.as_ref() {
            Some(existing) => existing.set_message(message.to_string()),
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(spinner_style());
                bar.set_message(message.to_string());
                bar.enable_steady_tick(std::time::Duration::from_millis(80));
                *spinner = Some(bar);
            }
        }
        *self.last_line.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Stop spinner without status
    pub fn stop_spinner(&self) {
        if let Some(spinner) = self
            .spinner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            spinner.finish_and_clear();
        }
    }

    /// Print above the spinner, if one is running
    fn print(&self, line: String) {
        let spinner = self.spinner.lock().unwrap_or_else(|e| e.into_inner());
        match spinner.as_ref() {
            Some(bar) => bar.suspend(|| eprintln!("{}", line)),
            None => eprintln!("{}", line),
        }
    }

    /// Print a blocking alert box
    pub fn alert(&self, title: &str, message: &str) {
        self.print(format!(
            "\n{} {}\n  {}\n  {}",
            "✗".red(),
            title.red().bold(),
            message,
            "Press Enter to continue".dimmed()
        ));
    }

    /// Print the key bindings
    pub fn help(&self) {
        self.print(format!(
            "{}  {} start/stop   {} play   {} quit",
            "Keys:".dimmed(),
            "r".cyan().bold(),
            "p".cyan().bold(),
            "q".cyan().bold()
        ));
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        self.print(format!("{} {}", "ℹ".cyan(), message));
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        self.print(format!("{} {}", "✓".green(), message));
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        self.print(format!("{} {}", "⚠".yellow(), message));
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        self.print(format!("{} {}", "✗".red(), message));
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Single status line: mic indicator, label, then the buttons
pub fn format_view(view: &MemoView) -> String {
    let mic = match view.mic {
        MicIndicator::Active => view.mic.symbol().red().to_string(),
        MicIndicator::Off => view.mic.symbol().dimmed().to_string(),
    };

    format!(
        "{} {:<18} {}  {}",
        mic,
        view.status_label,
        format_button(&view.toggle),
        format_button(&view.play)
    )
}

fn format_button(button: &ButtonView) -> String {
    let text = format!("[{}] {}", button.key, button.label);
    if button.enabled {
        text.bold().to_string()
    } else {
        text.dimmed().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::memo::{MemoSnapshot, MemoState};
    use crate::domain::recording::Duration;

    #[test]
    fn format_view_contains_label_and_buttons() {
        colored::control::set_override(false);
        let view = MemoView::project(&MemoSnapshot {
            state: MemoState::Recording,
            duration: Duration::from_secs(7),
            recording_uri: None,
        });

        let line = format_view(&view);
        assert!(line.contains("Recording · 0:07"));
        assert!(line.contains("[r] Stop"));
        assert!(line.contains("[p] Play"));
    }

    #[test]
    fn format_view_ready() {
        colored::control::set_override(false);
        let line = format_view(&MemoView::project(&MemoSnapshot::default()));
        assert!(line.starts_with("○ Ready"));
        assert!(line.contains("[r] Start"));
    }
}
