//! Endpoint configuration for the remote user collection.
//!
//! The collection lives at `http://{host}:{port}{base}/users`. Values come from
//! `API_HOST`, `API_PORT` and `API_BASE`, read once at startup:
//! - native builds: the process environment, after loading `.env` ([`ApiConfig::from_env`])
//! - WASM builds: the build environment ([`ApiConfig::from_build_env`])
//!
//! Native builds may instead ship a TOML file with `host`, `port` and `base`
//! keys ([`ApiConfig::from_file_or_env`]); when present it replaces the
//! environment. Missing values fall back to `localhost`, `8080` and an empty base.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_PORT is not a valid port: {0}")]
    InvalidPort(String),
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the user collection is served.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path prefix in front of `/users`, e.g. `"/api"`.
    #[serde(default)]
    pub base: String,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base: String::new(),
        }
    }
}

impl ApiConfig {
    pub fn new(host: impl Into<String>, port: u16, base: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            base: base.into(),
        }
    }

    /// Read from the process environment, loading `.env` first.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_vars(
            std::env::var("API_HOST").ok(),
            std::env::var("API_PORT").ok(),
            std::env::var("API_BASE").ok(),
        )
    }

    /// Read `path` if it exists, otherwise fall back to [`ApiConfig::from_env`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file_or_env(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::from_env(),
            Err(e) => Err(e.into()),
        }
    }

    /// Read the values baked in at compile time.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            option_env!("API_HOST").map(str::to_string),
            option_env!("API_PORT").map(str::to_string),
            option_env!("API_BASE").map(str::to_string),
        )
    }

    /// Parse from a TOML table with `host`, `port` and `base` keys.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    fn from_vars(
        host: Option<String>,
        port: Option<String>,
        base: Option<String>,
    ) -> Result<Self, ConfigError> {
        let port = match port.filter(|p| !p.is_empty()) {
            Some(p) => p.parse().map_err(|_| ConfigError::InvalidPort(p))?,
            None => default_port(),
        };
        Ok(Self {
            host: host.filter(|h| !h.is_empty()).unwrap_or_else(default_host),
            port,
            base: base.unwrap_or_default(),
        })
    }

    /// Full URL of the user collection.
    pub fn collection_url(&self) -> String {
        let base = self.base.trim_end_matches('/');
        format!("http://{}:{}{}/users", self.host, self.port, base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_url() {
        let config = ApiConfig::new("10.0.0.5", 3000, "/api/v1");
        assert_eq!(config.collection_url(), "http://10.0.0.5:3000/api/v1/users");

        let config = ApiConfig::new("localhost", 8080, "/api/");
        assert_eq!(config.collection_url(), "http://localhost:8080/api/users");

        assert_eq!(
            ApiConfig::default().collection_url(),
            "http://localhost:8080/users"
        );
    }

    #[test]
    fn test_vars_fall_back_to_defaults() {
        let config = ApiConfig::from_vars(None, Some(String::new()), None).unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = ApiConfig::from_vars(None, Some("eighty".into()), None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(p) if p == "eighty"));
    }

    #[test]
    fn test_config_file_replaces_environment() {
        let path = std::env::temp_dir().join(format!("directory-{}.toml", std::process::id()));
        std::fs::write(&path, "host = \"users.internal\"\nport = 9000\n").unwrap();

        let config = ApiConfig::from_file_or_env(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config, ApiConfig::new("users.internal", 9000, ""));
    }

    #[test]
    fn test_missing_config_file_uses_environment() {
        let missing = std::env::temp_dir().join("directory-does-not-exist.toml");

        let config = ApiConfig::from_file_or_env(&missing).unwrap();

        assert_eq!(config, ApiConfig::from_env().unwrap());
    }

    #[test]
    fn test_bad_config_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("directory-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "port = \"not a number\"").unwrap();

        let err = ApiConfig::from_file_or_env(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_from_toml() {
        let config = ApiConfig::from_toml("host = \"api.local\"\nbase = \"/v2\"").unwrap();
        assert_eq!(config.host, "api.local");
        assert_eq!(config.port, 8080);
        assert_eq!(config.base, "/v2");
    }
}
