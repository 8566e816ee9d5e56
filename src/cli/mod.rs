//! CLI layer - Command-line interface
//!
//! Contains argument parsing, the recorder screen, output formatting,
//! and keyboard/signal input.

pub mod alert;
pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod screen;
pub mod signals;
pub mod view;

// Re-export commonly used types
pub use app::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, ScreenOptions};
pub use presenter::Presenter;
pub use screen::run_screen;
pub use view::MemoView;
