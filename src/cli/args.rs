//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::config::AppConfig;
use crate::domain::recording::QualityPreset;

/// Voice Memo - record a voice memo and play it back
#[derive(Parser, Debug)]
#[command(name = "voice-memo")]
#[command(version)]
#[command(about = "Record a voice memo from the microphone and play it back")]
#[command(long_about = None)]
pub struct Cli {
    /// Capture quality preset
    #[arg(short = 'Q', long, value_name = "PRESET")]
    pub quality: Option<QualityArg>,

    /// Interval between duration updates while recording, in milliseconds
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(10..=1000))]
    pub tick_interval_ms: Option<u64>,

    /// Mirror error alerts as desktop notifications
    #[arg(short = 'n', long)]
    pub desktop_alerts: bool,

    /// Directory for recorded files
    #[arg(long, value_name = "DIR")]
    pub recordings_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Settings given on the command line, for merging over file and env
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            quality: self.quality.map(|q| QualityPreset::from(q).to_string()),
            tick_interval_ms: self.tick_interval_ms,
            desktop_alerts: self.desktop_alerts.then_some(true),
            recordings_dir: self.recordings_dir.clone(),
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Quality argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum QualityArg {
    High,
    Low,
}

impl From<QualityArg> for QualityPreset {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::High => QualityPreset::High,
            QualityArg::Low => QualityPreset::Low,
        }
    }
}

/// Parsed options for the recorder screen
#[derive(Debug, Clone)]
pub struct ScreenOptions {
    pub quality: QualityPreset,
    pub tick_interval_ms: u64,
    pub desktop_alerts: bool,
    pub recordings_dir: PathBuf,
}

impl ScreenOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            quality: config.quality_or_default(),
            tick_interval_ms: config.tick_interval_ms_or_default(),
            desktop_alerts: config.desktop_alerts_or_default(),
            recordings_dir: config.recordings_dir_or_default(),
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] =
    &["quality", "tick_interval_ms", "desktop_alerts", "recordings_dir"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
