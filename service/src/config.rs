use crate::format::OutputFormat;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Default config file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "export.yaml";

/// Environment variable prefix; nested keys are separated by `__`.
pub const ENV_PREFIX: &str = "EXPORT_";

/// Exporter configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. export.yaml file (if exists)
/// 3. Environment variables with EXPORT_ prefix
///
/// Command-line flags are applied on top by the binary.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Destination file, relative to the working directory.
    #[serde(default = "default_output_path")]
    pub path: String,

    /// Explicit output format. When unset, inferred from the path extension.
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

impl OutputConfig {
    #[must_use]
    pub fn path(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }

    /// Explicit format, else the one named by the extension, else YAML.
    #[must_use]
    pub fn resolved_format(&self) -> OutputFormat {
        self.format
            .or_else(|| OutputFormat::from_path(Path::new(&self.path)))
            .unwrap_or_default()
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log filter directive (e.g. `info`, `docconv_api=debug`).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_output_path() -> String {
    "openapi.yaml".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from defaults, `export.yaml` and the environment.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// A missing file is not an error; its layer is simply empty.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file that must exist.
    ///
    /// Used for an explicitly named config file, where a typo should fail
    /// rather than fall back to the defaults.
    ///
    /// # Errors
    /// Returns a validation error if the file is missing, otherwise as
    /// [`Config::load_from`].
    pub fn load_required(yaml_path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml_path = yaml_path.as_ref();
        if !yaml_path.is_file() {
            return Err(ConfigError::Validation(format!(
                "config file '{}' does not exist",
                yaml_path.display()
            )));
        }
        Self::load_from(yaml_path)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.path cannot be empty".into(),
            ));
        }

        if let Err(err) = EnvFilter::try_new(&self.logging.level) {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not a valid filter: {err}",
                self.logging.level
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output.path, "openapi.yaml");
        assert!(config.output.format.is_none());
        assert_eq!(config.output.resolved_format(), OutputFormat::Yaml);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_path() {
        let mut config = Config::default();
        config.output.path = "  ".into();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("output.path"));
    }

    #[test]
    fn test_validation_rejects_bad_log_filter() {
        let mut config = Config::default();
        config.logging.level = "docconv_api=loud".into();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("logging.level"));
    }

    #[test]
    fn resolved_format_cases() {
        let cases = [
            ("openapi.yaml", None, OutputFormat::Yaml, "yaml extension"),
            ("openapi.json", None, OutputFormat::Json, "json extension"),
            ("openapi.spec", None, OutputFormat::Yaml, "unknown extension"),
            ("openapi.yaml", Some(OutputFormat::Json), OutputFormat::Json, "explicit wins"),
        ];

        for (path, format, expected, desc) in cases {
            let output = OutputConfig {
                path: path.into(),
                format,
            };
            assert_eq!(output.resolved_format(), expected, "case '{desc}'");
        }
    }

    #[test]
    fn test_file_and_env_layering() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                "output:\n  path: web/openapi.json\nlogging:\n  level: debug\n",
            )?;

            let config = Config::load().map_err(|e| e.to_string())?;
            assert_eq!(config.output.path, "web/openapi.json");
            assert_eq!(config.output.resolved_format(), OutputFormat::Json);
            assert_eq!(config.logging.level, "debug");

            jail.set_env("EXPORT_LOGGING__LEVEL", "warn");
            jail.set_env("EXPORT_OUTPUT__FORMAT", "yaml");
            let config = Config::load().map_err(|e| e.to_string())?;
            assert_eq!(config.logging.level, "warn");
            assert_eq!(config.output.resolved_format(), OutputFormat::Yaml);
            Ok(())
        });
    }

    #[test]
    fn test_required_file_must_exist() {
        figment::Jail::expect_with(|_jail| {
            let result = Config::load_required("typo-export.yaml");
            let message = result.expect_err("missing file").to_string();
            assert!(message.contains("typo-export.yaml"), "{message}");
            assert!(message.contains("does not exist"), "{message}");
            Ok(())
        });
    }

    #[test]
    fn test_required_file_is_loaded() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("ci-export.yaml", "output:\n  path: api/openapi.json\n")?;
            let config = Config::load_required("ci-export.yaml").map_err(|e| e.to_string())?;
            assert_eq!(config.output.path, "api/openapi.json");
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = Config::load_from("absent.yaml").map_err(|e| e.to_string())?;
            assert_eq!(config.output.path, "openapi.yaml");
            Ok(())
        });
    }
}
