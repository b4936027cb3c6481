//! Server configuration.
//!
//! Loaded with figment from, in increasing precedence:
//! 1. Built-in defaults
//! 2. A TOML file (`workout.toml`, or the path in `WORKOUT_CONFIG`)
//! 3. Environment variables prefixed with `WORKOUT_`, nested with `__`
//!    (for example `WORKOUT_SERVER__PORT=8080`)

use std::path::PathBuf;
use std::str::FromStr;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default configuration file, relative to the working directory.
const CONFIG_FILE_NAME: &str = "workout.toml";

/// Environment variable naming an alternative configuration file.
const CONFIG_PATH_VAR: &str = "WORKOUT_CONFIG";

const ENV_PREFIX: &str = "WORKOUT_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(Box<figment::Error>),

    #[error("invalid configuration: {message}")]
    Validation { message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where records live between restarts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON file holding the collection. `None` keeps records in memory only.
    pub data_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// One of `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from the default file location and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from))
    }

    /// Load with an explicit config file path. A missing file is not an
    /// error; its layer is simply empty.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                message: "server.port must be greater than 0".to_string(),
            });
        }
        if tracing::Level::from_str(&self.log.level).is_err() {
            return Err(ConfigError::Validation {
                message: format!("unknown log level: {}", self.log.level),
            });
        }
        Ok(())
    }

    /// The `host:port` string to bind the listener to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_local_port() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:5001");
        assert!(config.storage.data_file.is_none());
        assert_eq!(config.log.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_port_is_rejected() {
        let mut config = Config::default();
        config.server.port = 0;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("server.port"));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let mut config = Config::default();
        config.log.level = "chatty".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("chatty"));
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workout.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 8080

[storage]
data_file = "/var/lib/workout/exercises.json"
"#,
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.storage.data_file,
            Some(PathBuf::from("/var/lib/workout/exercises.json"))
        );
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(Some(dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn invalid_file_values_fail_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workout.toml");
        std::fs::write(&path, "[server]\nport = \"many\"\n").unwrap();
        assert!(matches!(
            Config::load_from(Some(path)),
            Err(ConfigError::Load(_))
        ));
    }
}
