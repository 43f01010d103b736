use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILE: &str = "cyac.toml";
pub const ENV_DATA_DIR: &str = "CYAC_DATA_DIR";
pub const ENV_QUEUE_DELAY: &str = "CYAC_QUEUE_DELAY_MS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub username: String,
    pub password: String,
    pub queue_delay_ms: u64,
    pub log_level: String,
    pub show_banner: bool,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            username: "admin".to_string(),
            password: "password".to_string(),
            queue_delay_ms: 200,
            log_level: "warn".to_string(),
            show_banner: true,
            color: true,
        }
    }
}

impl Config {
    /// `cyac.toml` from the working directory (defaults when absent) with
    /// environment overrides applied.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(CONFIG_FILE)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(CONFIG_FILE)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Overwrite the file at `path` with the defaults.
    pub fn reset<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    /// Apply `CYAC_DATA_DIR` and `CYAC_QUEUE_DELAY_MS` as returned by `lookup`.
    /// An unparsable delay is ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_QUEUE_DELAY) {
            match raw.trim().parse() {
                Ok(ms) => self.queue_delay_ms = ms,
                Err(_) => tracing::warn!("Ignoring {}={:?}: not a number", ENV_QUEUE_DELAY, raw),
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::Invalid("username must not be empty".to_string()));
        }
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_dir must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn queue_delay(&self) -> Duration {
        Duration::from_millis(self.queue_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.queue_delay(), Duration::from_millis(200));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("username = \"root\"\ncolor = false\n").unwrap();
        assert_eq!(config.username, "root");
        assert!(!config.color);
        assert_eq!(config.password, "password");
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            ENV_DATA_DIR => Some("/tmp/cyac".to_string()),
            ENV_QUEUE_DELAY => Some("5".to_string()),
            _ => None,
        });
        assert_eq!(config.data_dir, PathBuf::from("/tmp/cyac"));
        assert_eq!(config.queue_delay_ms, 5);

        config.apply_overrides(|key| (key == ENV_QUEUE_DELAY).then(|| "soon".to_string()));
        assert_eq!(config.queue_delay_ms, 5);
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let config = Config {
            username: " ".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = Config {
            data_dir: PathBuf::new(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
