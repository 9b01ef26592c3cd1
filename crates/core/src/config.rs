//! PetCare configuration
//!
//! Supports a YAML config file and environment variables.
//!
//! Precedence (highest first): command-line flags, `PETCARE_*` environment
//! variables, the YAML file, built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const ENV_CONFIG: &str = "PETCARE_CONFIG";
pub const ENV_DATA_FILE: &str = "PETCARE_DATA_FILE";
pub const ENV_LOG: &str = "PETCARE_LOG";
pub const ENV_HEALTH_PREVIEW: &str = "PETCARE_HEALTH_PREVIEW";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetCareConfig {
    /// JSON file holding all pets
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// tracing filter directive, e.g. `info` or `petcare_core=debug`.
    /// Unset means `info` in the TUI log file and `warn` on stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Health records shown under the care tasks of the selected pet
    #[serde(default = "default_health_preview_limit")]
    pub health_preview_limit: usize,

    /// Terminal event poll interval (milliseconds)
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("data/pets_data.json")
}

fn default_health_preview_limit() -> usize {
    3
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for PetCareConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            log_level: None,
            health_preview_limit: default_health_preview_limit(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl PetCareConfig {
    /// Parse a YAML document. Missing keys take their defaults.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Read a YAML file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `PETCARE_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DATA_FILE).filter(|v| !v.trim().is_empty()) {
            self.data_file = PathBuf::from(path);
        }
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.log_level = Some(level);
        }
        if let Some(limit) = lookup(ENV_HEALTH_PREVIEW).and_then(|v| v.trim().parse::<usize>().ok()) {
            self.health_preview_limit = limit;
        }
    }

    /// Directory that holds the data file; log files go here too.
    pub fn data_dir(&self) -> PathBuf {
        match self.data_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Resolves and loads the configuration.
#[derive(Debug, Default)]
pub struct PetCareConfigLoader {
    explicit_path: Option<PathBuf>,
}

impl PetCareConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_path = path;
        self
    }

    /// `--config`, else `$PETCARE_CONFIG`, else `<config dir>/petcare/config.yaml`.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config_path_with(|key| std::env::var(key).ok())
    }

    pub fn config_path_with<F>(&self, lookup: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.explicit_path
            .clone()
            .or_else(|| {
                lookup(ENV_CONFIG)
                    .filter(|v| !v.trim().is_empty())
                    .map(PathBuf::from)
            })
            .or_else(|| dirs::config_dir().map(|dir| dir.join("petcare").join("config.yaml")))
    }

    pub fn load(&self) -> Result<PetCareConfig, ConfigError> {
        self.load_with(|key| std::env::var(key).ok())
    }

    /// Load with environment variables read through `lookup`.
    pub fn load_with<F>(&self, lookup: F) -> Result<PetCareConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match self.config_path_with(&lookup) {
            Some(path) => PetCareConfig::from_file(&path)?,
            None => PetCareConfig::default(),
        };
        config.apply_env_overrides(lookup);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = PetCareConfig::default();
        assert_eq!(config.data_file, PathBuf::from("data/pets_data.json"));
        assert_eq!(config.health_preview_limit, 3);
        assert_eq!(config.data_dir(), PathBuf::from("data"));
        assert_eq!(PetCareConfig::from_yaml("").unwrap(), config);
    }

    #[test]
    fn test_partial_yaml() {
        let config = PetCareConfig::from_yaml("data_file: /tmp/pets.json\ntick_rate_ms: 100\n").unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/pets.json"));
        assert_eq!(config.tick_rate_ms, 100);
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DATA_FILE, "elsewhere/pets.json"),
            (ENV_LOG, "debug"),
            (ENV_HEALTH_PREVIEW, "not-a-number"),
        ]
        .into_iter()
        .collect();
        let mut config = PetCareConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.data_file, PathBuf::from("elsewhere/pets.json"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.health_preview_limit, 3);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert_eq!(
            PetCareConfig::from_file(&missing).unwrap(),
            PetCareConfig::default()
        );

        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "health_preview_limit: 5\n").unwrap();
        assert_eq!(PetCareConfig::from_file(&path).unwrap().health_preview_limit, 5);

        std::fs::write(&path, "health_preview_limit: [oops\n").unwrap();
        assert!(matches!(
            PetCareConfig::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_config_path_precedence() {
        let env: HashMap<&str, &str> = [(ENV_CONFIG, "/etc/petcare.yaml")].into_iter().collect();
        let lookup = |key: &str| env.get(key).map(|v| v.to_string());

        let explicit = PetCareConfigLoader::new().with_path(Some(PathBuf::from("mine.yaml")));
        assert_eq!(explicit.config_path_with(lookup), Some(PathBuf::from("mine.yaml")));

        let loader = PetCareConfigLoader::new();
        assert_eq!(
            loader.config_path_with(lookup),
            Some(PathBuf::from("/etc/petcare.yaml"))
        );

        assert_eq!(
            loader.config_path_with(|_| None),
            dirs::config_dir().map(|dir| dir.join("petcare").join("config.yaml"))
        );
        // blank value falls through to the default location
        assert_eq!(
            loader.config_path_with(|_| Some(" ".to_string())),
            loader.config_path_with(|_| None)
        );
    }

    #[test]
    fn test_load_with_file_and_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "data_file: from-file.json\nlog_level: debug\nhealth_preview_limit: 5\n").unwrap();
        let config_path = path.display().to_string();

        let env: HashMap<&str, &str> = [
            (ENV_CONFIG, config_path.as_str()),
            (ENV_DATA_FILE, "from-env.json"),
        ]
        .into_iter()
        .collect();
        let config = PetCareConfigLoader::new()
            .load_with(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.data_file, PathBuf::from("from-env.json"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.health_preview_limit, 5);
    }

    #[test]
    fn test_data_dir_for_bare_file_name() {
        let config = PetCareConfig {
            data_file: PathBuf::from("pets.json"),
            ..PetCareConfig::default()
        };
        assert_eq!(config.data_dir(), PathBuf::from("."));
    }
}
