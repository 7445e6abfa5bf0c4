use std::path::PathBuf;

use config::{Config, ConfigError};
use serde::Deserialize;

pub mod domain;
pub mod infrastructure;

#[derive(Clone, Debug, Deserialize)]
pub struct HomestayConfig {
    pub data: Data,
    pub logger: Logger,
}

impl HomestayConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(config::File::with_name("homestay.toml"))
            .add_source(config::Environment::with_prefix("HOMESTAY").separator("_"))
            .build()?
            .try_deserialize::<HomestayConfig>()
    }

    /// Installs the global tracing subscriber at the configured level.
    pub fn init_logging(&self) {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::from(&self.logger.level))
            .try_init();
    }
}

/// Locations of the flat-file backing stores.
#[derive(Clone, Debug, Deserialize)]
pub struct Data {
    pub guests_file: PathBuf,
    pub hosts_file: PathBuf,
    pub reservations_dir: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Logger {
    pub level: Level,
}

#[derive(Clone, Debug, Deserialize)]
pub enum Level {
    TRACE,
    DEBUG,
    INFO,
    WARN,
    ERROR,
}

impl From<&Level> for tracing::Level {
    fn from(value: &Level) -> Self {
        match value {
            Level::TRACE => tracing::Level::TRACE,
            Level::DEBUG => tracing::Level::DEBUG,
            Level::INFO => tracing::Level::INFO,
            Level::WARN => tracing::Level::WARN,
            Level::ERROR => tracing::Level::ERROR,
        }
    }
}
