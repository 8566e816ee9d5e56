//! Application bootstrap: exit codes, logging and merged configuration

use std::env;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::recording::QualityPreset;
use crate::infrastructure::XdgConfigStore;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the quality preset
pub const QUALITY_ENV: &str = "VOICE_MEMO_QUALITY";

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins over the defaults; `verbose` raises the crate to debug.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "voice_memo=debug,warn"
    } else {
        "voice_memo=warn"
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Settings taken from the environment
pub fn env_config() -> Result<AppConfig, String> {
    let quality = match env::var(QUALITY_ENV) {
        Ok(value) if !value.trim().is_empty() => Some(
            value
                .parse::<QualityPreset>()
                .map_err(|e| format!("{}: {}", QUALITY_ENV, e))?
                .to_string(),
        ),
        _ => None,
    };

    Ok(AppConfig {
        quality,
        ..Default::default()
    })
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> Result<AppConfig, String> {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.map_err(|e| e.to_string())?;

    // Merge: defaults < file < env < cli
    Ok(AppConfig::defaults()
        .merge(file_config)
        .merge(env_config()?)
        .merge(cli_config))
}
