//! # Application Configuration
//!
//! Loaded once at startup, read-only afterwards.
//!
//! ## Load Order (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`facture.toml`, `--config` or the platform config dir)
//! 3. Environment variables (`FACTURE_*`)
//!
//! ## Example Config File
//! ```toml
//! default_payment_method = "CHÈQUE"
//!
//! [paths]
//! data_dir = "/srv/facture/data"
//! output_dir = "/srv/facture/documents"
//!
//! [format]
//! decimal_separator = ","
//! thousands_separator = " "
//! currency = "DINARS"
//!
//! [company]
//! name = "SARL PROTRONIC INTERNATIONAL"
//! ```

use std::path::{Path, PathBuf};

use facture_core::{validation, FormatConfig, DEFAULT_PAYMENT_METHOD};
use facture_render::CompanyInfo;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

const CONFIG_FILE_NAME: &str = "facture.toml";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Cannot write config file: {0}")]
    Write(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Where records are read from and documents are written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding `clients.xlsx` and `items.xlsx`.
    pub data_dir: PathBuf,

    /// Directory receiving generated documents.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        match project_dirs() {
            Some(dirs) => PathsConfig {
                data_dir: dirs.data_dir().join("data"),
                output_dir: dirs.data_dir().join("documents"),
            },
            None => PathsConfig {
                data_dir: PathBuf::from("data"),
                output_dir: PathBuf::from("generated_docs"),
            },
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Printed when a document request names no payment method.
    #[serde(default = "default_payment_method")]
    pub default_payment_method: String,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub format: FormatConfig,

    #[serde(default)]
    pub company: CompanyInfo,
}

fn default_payment_method() -> String {
    DEFAULT_PAYMENT_METHOD.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            default_payment_method: default_payment_method(),
            paths: PathsConfig::default(),
            format: FormatConfig::default(),
            company: CompanyInfo::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` must exist; the default location is
    /// optional.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.is_some();
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if explicit || path.exists() => {
                info!(path = %path.display(), "Loading config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses one TOML file; missing sections take their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write(e.to_string()))?;
        }
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Write(e.to_string()))?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Write(e.to_string()))?;

        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let required = [
            ("paths.data_dir", self.paths.data_dir.as_os_str().is_empty()),
            ("paths.output_dir", self.paths.output_dir.as_os_str().is_empty()),
        ];
        for (field, empty) in required {
            if empty {
                return Err(ConfigError::Invalid(format!("{} must not be empty", field)));
            }
        }

        for (field, value) in [
            ("format.decimal_separator", &self.format.decimal_separator),
            ("format.currency", &self.format.currency),
            ("default_payment_method", &self.default_payment_method),
            ("company.name", &self.company.name),
        ] {
            validation::validate_required(field, value)
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }

        if self.format.decimal_separator == self.format.thousands_separator {
            return Err(ConfigError::Invalid(
                "format.decimal_separator and format.thousands_separator must differ".into(),
            ));
        }

        Ok(())
    }

    /// Applies `FACTURE_*` overrides looked up through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("FACTURE_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data directory from environment");
            self.paths.data_dir = PathBuf::from(dir);
        }

        if let Some(dir) = lookup("FACTURE_OUTPUT_DIR") {
            debug!(output_dir = %dir, "Overriding output directory from environment");
            self.paths.output_dir = PathBuf::from(dir);
        }

        if let Some(currency) = lookup("FACTURE_CURRENCY") {
            self.format.currency = currency.trim().to_uppercase();
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "protronic", "facture")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facture.toml");
        std::fs::write(
            &path,
            "default_payment_method = \"CHÈQUE\"\n\n[format]\ncurrency = \"EUROS\"\n",
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.default_payment_method, "CHÈQUE");
        assert_eq!(config.format.currency, "EUROS");
        assert_eq!(config.format.decimal_separator, ",");
        assert_eq!(config.company, CompanyInfo::default());
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_bad_toml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facture.toml");
        std::fs::write(&path, "[paths\n").unwrap();
        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("FACTURE_DATA_DIR", "/tmp/records"),
            ("FACTURE_CURRENCY", " euros "),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        let output_dir = config.paths.output_dir.clone();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.paths.data_dir, PathBuf::from("/tmp/records"));
        assert_eq!(config.paths.output_dir, output_dir);
        assert_eq!(config.format.currency, "EUROS");
    }

    #[test]
    fn test_validate_rejects_same_separators() {
        let mut config = AppConfig::default();
        config.format.thousands_separator = ",".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_blank_currency() {
        let mut config = AppConfig::default();
        config.format.currency = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("facture.toml");
        let mut config = AppConfig::default();
        config.paths.data_dir = dir.path().join("data");
        config.save(&path).unwrap();

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
