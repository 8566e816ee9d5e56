//! Configuration domain module

mod app_config;

pub use app_config::{
    default_recordings_dir, AppConfig, DEFAULT_TICK_INTERVAL_MS, TICK_INTERVAL_RANGE_MS,
};
