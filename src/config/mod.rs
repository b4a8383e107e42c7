//! Application configuration module
//!
//! Configuration is read from an optional `formbot.toml` in the working
//! directory, then from environment variables with the `FORMBOT_` prefix,
//! using the `config` and `dotenvy` crates. Nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use formbot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.logging.init().expect("Failed to initialize logging");
//! ```

mod dispatch;
mod error;
mod logging;

pub use dispatch::DispatchConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;
use std::path::Path;

/// Base name of the optional configuration file.
pub const CONFIG_FILE: &str = "formbot";

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Message templates
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl AppConfig {
    /// Load configuration from `formbot.*` (if present) and the environment
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `formbot.toml` (or any format `config` recognizes) if present
    /// 3. Overlays environment variables with `FORMBOT` prefix
    ///
    /// # Environment Variable Format
    ///
    /// - `FORMBOT__LOGGING__LEVEL=debug` -> `logging.level = "debug"`
    /// - `FORMBOT__DISPATCH__TEMPLATES__GREET=Hey` -> `dispatch.templates.greet = "Hey"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::build(config::File::with_name(CONFIG_FILE).required(false))
    }

    /// Load configuration from an explicit file, then the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or malformed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::build(config::File::from(path.as_ref()))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::default()
                    .prefix("FORMBOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.dispatch.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("FORMBOT__LOGGING__LEVEL");
        env::remove_var("FORMBOT__LOGGING__JSON");
        env::remove_var("FORMBOT__DISPATCH__TEMPLATES__GREET");
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_with_no_sources_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = write_config("");
        let result = AppConfig::load_from(file.path());

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.logging, LoggingConfig::default());
        assert!(config.dispatch.templates.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let file = write_config(
            r#"
[logging]
level = "warn"
json = true

[dispatch.templates]
greet = "Howdy!"
"#,
        );
        let config = AppConfig::load_from(file.path()).unwrap();

        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.json);
        assert_eq!(
            config.dispatch.templates.get("greet"),
            Some(&"Howdy!".to_string())
        );
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("FORMBOT__LOGGING__LEVEL", "error");
        let file = write_config("[logging]\nlevel = \"warn\"\n");
        let result = AppConfig::load_from(file.path());
        clear_env();

        assert_eq!(result.unwrap().logging.level, "error");
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validate_rejects_blank_template() {
        let mut config = AppConfig::default();
        config
            .dispatch
            .templates
            .insert("greet".to_string(), String::new());
        assert_eq!(
            config.validate(),
            Err(ValidationError::BlankTemplate("greet".to_string()))
        );
    }
}
