//! Config command handler

use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, TICK_INTERVAL_RANGE_MS};
use crate::domain::error::ConfigError;
use crate::domain::recording::QualityPreset;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut update = AppConfig::empty();
    apply_value(&mut update, key, value)?;

    let config = store.load().await?.merge(update);
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(&read_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &read_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Validate `value` and store it under `key`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "quality" => {
            let preset = value
                .parse::<QualityPreset>()
                .map_err(|e| invalid(e.to_string()))?;
            config.quality = Some(preset.to_string());
        }
        "tick_interval_ms" => {
            let ms = value
                .parse::<u64>()
                .ok()
                .filter(|ms| TICK_INTERVAL_RANGE_MS.contains(ms))
                .ok_or_else(|| {
                    invalid(format!(
                        "Value must be a number from {} to {}",
                        TICK_INTERVAL_RANGE_MS.start(),
                        TICK_INTERVAL_RANGE_MS.end()
                    ))
                })?;
            config.tick_interval_ms = Some(ms);
        }
        "desktop_alerts" => {
            let enabled = parse_bool(value)
                .map_err(|_| invalid("Value must be 'true' or 'false'".to_string()))?;
            config.desktop_alerts = Some(enabled);
        }
        "recordings_dir" => {
            if value.trim().is_empty() {
                return Err(invalid("Value must be a directory path".to_string()));
            }
            config.recordings_dir = Some(PathBuf::from(value));
        }
        _ => return Err(invalid("Unknown key".to_string())),
    }

    Ok(())
}

fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "quality" => config.quality.clone(),
        "tick_interval_ms" => config.tick_interval_ms.map(|ms| ms.to_string()),
        "desktop_alerts" => config.desktop_alerts.map(|b| b.to_string()),
        "recordings_dir" => config
            .recordings_dir
            .as_ref()
            .map(|dir| dir.to_string_lossy().into_owned()),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("No"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn apply_quality() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "quality", "LOW").unwrap();
        assert_eq!(config.quality, Some("low".to_string()));
        assert!(apply_value(&mut config, "quality", "ultra").is_err());
    }

    #[test]
    fn apply_tick_interval_bounds() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "tick_interval_ms", "10").is_ok());
        assert!(apply_value(&mut config, "tick_interval_ms", "1000").is_ok());
        assert!(apply_value(&mut config, "tick_interval_ms", "9").is_err());
        assert!(apply_value(&mut config, "tick_interval_ms", "fast").is_err());
        assert_eq!(config.tick_interval_ms, Some(1000));
    }

    #[test]
    fn apply_desktop_alerts() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "desktop_alerts", "yes").unwrap();
        assert_eq!(read_value(&config, "desktop_alerts"), Some("true".to_string()));
    }

    #[test]
    fn apply_recordings_dir() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "recordings_dir", " ").is_err());
        apply_value(&mut config, "recordings_dir", "/tmp/memos").unwrap();
        assert_eq!(read_value(&config, "recordings_dir"), Some("/tmp/memos".to_string()));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(check_key("api_key").is_err());
        assert!(check_key("quality").is_ok());
    }

    #[tokio::test]
    async fn set_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_set(&store, &presenter, "quality", "low").await.unwrap();
        handle_set(&store, &presenter, "tick_interval_ms", "200")
            .await
            .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.quality, Some("low".to_string()));
        assert_eq!(config.tick_interval_ms, Some(200));
    }

    #[tokio::test]
    async fn invalid_set_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));

        let result = handle_set(&store, &Presenter::new(), "quality", "ultra").await;

        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
        assert!(!store.exists());
    }

    #[test]
    fn unset_values_read_as_none() {
        let config = AppConfig::empty();
        for key in VALID_CONFIG_KEYS {
            assert_eq!(read_value(&config, key), None);
        }
    }
}
