//! Configuration management

use crate::domain::conference::{MediaCapabilities, MediaDirection};
use config::{ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of environment overrides, e.g. `CONFDEVICE__LOGGING__LEVEL=debug`
pub const ENV_PREFIX: &str = "CONFDEVICE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub devices: DeviceDefaults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub level: String,
}

/// Media directions given to newly created devices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDefaults {
    pub audio: MediaDirection,
    pub video: MediaDirection,
    pub text: MediaDirection,
}

impl DeviceDefaults {
    pub fn media_capabilities(&self) -> MediaCapabilities {
        MediaCapabilities::with_directions(self.audio, self.video, self.text)
    }
}

impl Config {
    /// Defaults, overlaid by an optional TOML file, overlaid by the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Config::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        builder.add_source(env).build()?.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            devices: DeviceDefaults {
                audio: MediaDirection::Inactive,
                video: MediaDirection::Inactive,
                text: MediaDirection::Inactive,
            },
        }
    }
}
