//! Runtime configuration for the biography editor.
//!
//! Loaded with figment from, lowest precedence first: built-in defaults, a
//! TOML file, then `BIOGRAPHY_`-prefixed environment variables. Command-line
//! flags are applied on top by the caller.

use std::path::PathBuf;

use biography_net::server::DEFAULT_MAX_UPLOAD_BYTES;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file looked up in the working directory when none is given.
pub const CONFIG_FILE_NAME: &str = "biography.toml";

const DEFAULT_DATA_DIR: &str = "biography_data";
const DEFAULT_BIND: &str = "127.0.0.1:8501";

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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `progress.json` and `profile_picture`.
    pub data_dir: PathBuf,
    /// Address the HTTP server listens on.
    pub bind: String,
    /// Send permissive CORS headers.
    pub cors: bool,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            bind: DEFAULT_BIND.to_string(),
            cors: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Loads configuration, reading `config_path` or `biography.toml` if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config_file = config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("BIOGRAPHY_"))
            .extract()?;

        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if any value is unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation {
                message: "data_dir must not be empty".to_string(),
            });
        }

        if self.bind.trim().is_empty() {
            return Err(ConfigError::Validation {
                message: "bind must not be empty".to_string(),
            });
        }

        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Validation {
                message: "max_upload_bytes must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.data_dir, PathBuf::from("biography_data"));
        assert_eq!(config.bind, "127.0.0.1:8501");
        assert!(config.cors);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_without_sources_is_default() {
        Jail::expect_with(|_jail| {
            let config = Config::load_from(None).map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE_NAME,
                r#"
                data_dir = "/srv/biography"
                cors = false
                "#,
            )?;

            let config = Config::load_from(None).map_err(|e| e.to_string())?;
            assert_eq!(config.data_dir, PathBuf::from("/srv/biography"));
            assert!(!config.cors);
            assert_eq!(config.bind, "127.0.0.1:8501");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", r#"bind = "0.0.0.0:80""#)?;
            jail.set_env("BIOGRAPHY_BIND", "0.0.0.0:9000");
            jail.set_env("BIOGRAPHY_MAX_UPLOAD_BYTES", "2048");

            let config = Config::load_from(Some(PathBuf::from("custom.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.bind, "0.0.0.0:9000");
            assert_eq!(config.max_upload_bytes, 2048);
            Ok(())
        });
    }

    #[test]
    fn test_malformed_file_is_load_error() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE_NAME, "cors = \"sometimes\"")?;

            let result = Config::load_from(None);
            assert!(matches!(result, Err(ConfigError::Load(_))));
            Ok(())
        });
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let mut config = Config::default();
        config.data_dir = PathBuf::new();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("data_dir"));

        let mut config = Config::default();
        config.bind = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.max_upload_bytes = 0;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("max_upload_bytes"));
    }
}
