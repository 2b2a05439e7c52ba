//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! layered TOML files and `BLOCKIDLE__*` environment variables. Each
//! sub-module represents a logical configuration section.

pub mod host;
pub mod logging;
pub mod plugin;

use serde::{Deserialize, Serialize};

pub use self::host::{HostConfig, SdkConfig};
pub use self::logging::LoggingConfig;
pub use self::plugin::PluginConfig;

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "BLOCKIDLE";

/// Root application configuration.
///
/// Every section has defaults, so an empty configuration is valid and
/// describes the bundled alpha runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host build metadata published to plugins.
    #[serde(default)]
    pub host: HostConfig,
    /// Plugin selection settings.
    #[serde(default)]
    pub plugins: PluginConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default` with an environment-specific overlay
    /// `config/{env}` and environment variables prefixed with `BLOCKIDLE`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(contents: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
