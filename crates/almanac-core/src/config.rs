use std::path::PathBuf;

use anyhow::Result;
use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

use crate::constants::{CONFIG_FILE, ENV_PREFIX, PRODUCT_IDENTIFIER};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `almanac_rfc=trace,info`
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    pub product_id: String,
    pub output_dir: Option<PathBuf>,
}

impl CalendarConfig {
    /// ## Summary
    /// Returns the destination for a normalized copy of `input`, or `None` when
    /// output goes to stdout.
    #[must_use]
    pub fn output_path(&self, input: &std::path::Path) -> Option<PathBuf> {
        let dir = self.output_dir.as_ref()?;
        let file_name = input.file_name()?;
        Some(dir.join(file_name))
    }
}

impl Settings {
    /// ## Summary
    /// Returns a configuration builder pre-populated with the built-in defaults.
    ///
    /// ## Errors
    /// Returns an error if a default value cannot be set.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default("calendar.product_id", PRODUCT_IDENTIFIER)?)
    }

    /// ## Summary
    /// Loads configuration from defaults, environment variables, and the optional
    /// `almanac.toml` file, in increasing precedence.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let builder = Self::defaults()?
            // Env
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(config::Case::Snake)
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE).required(false));

        Self::from_builder(builder)
    }

    /// ## Summary
    /// Builds and validates settings from an already assembled builder.
    ///
    /// ## Errors
    /// Returns an error if a source fails to load, deserialization fails, or the
    /// resulting settings are invalid.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder.build()?.try_deserialize::<Settings>()?;
        settings.validate()?;
        tracing::debug!(
            level = %settings.logging.level,
            product_id = %settings.calendar.product_id,
            "Configuration loaded"
        );
        Ok(settings)
    }

    /// ## Summary
    /// Checks values that deserialize fine but are unusable.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` naming the first offending key.
    pub fn validate(&self) -> CoreResult<()> {
        if self.logging.level.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "logging.level must not be empty".to_string(),
            ));
        }
        if self.calendar.product_id.trim().is_empty() {
            return Err(CoreError::ConfigError(
                "calendar.product_id must not be empty".to_string(),
            ));
        }
        if let Some(dir) = &self.calendar.output_dir
            && dir.as_os_str().is_empty()
        {
            return Err(CoreError::ConfigError(
                "calendar.output_dir must not be empty when set".to_string(),
            ));
        }
        Ok(())
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
