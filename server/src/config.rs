//! Server configuration.
//!
//! Every setting has a default matching the original deployment (API on
//! `127.0.0.1:8000`, browser client served from `http://localhost:5173`) and
//! can be overridden through the environment:
//!
//! | Variable             | Default                 |
//! |----------------------|-------------------------|
//! | `HOST`               | `127.0.0.1`             |
//! | `PORT`               | `8000`                  |
//! | `ALLOWED_ORIGIN`     | `http://localhost:5173` |
//! | `INDEX_ERROR_STATUS` | `legacy`                |

use std::str::FromStr;

use axum::http::{HeaderValue, StatusCode};
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

/// HTTP status used when a request names an index outside the list.
///
/// `Legacy` answers `200 OK` with an `{"error": "Invalid index"}` body, which
/// is what existing clients expect. `NotFound` sends the same body with
/// `404 Not Found`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndexErrorStatus {
    #[default]
    Legacy,
    NotFound,
}

impl IndexErrorStatus {
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::Legacy => StatusCode::OK,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl FromStr for IndexErrorStatus {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "legacy" | "200" => Ok(Self::Legacy),
            "not-found" | "not_found" | "404" => Ok(Self::NotFound),
            _ => Err(ConfigError::Invalid {
                name: "INDEX_ERROR_STATUS",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origin: HeaderValue,
    pub index_error_status: IndexErrorStatus,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_allowed_origin(mut self, origin: &str) -> Result<Self, ConfigError> {
        self.allowed_origin = parse_origin(origin)?;
        Ok(self)
    }

    pub fn with_index_error_status(mut self, status: IndexErrorStatus) -> Self {
        self.index_error_status = status;
        self
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load overrides through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(origin) = lookup("ALLOWED_ORIGIN") {
            config.allowed_origin = parse_origin(&origin)?;
        }
        if let Some(status) = lookup("INDEX_ERROR_STATUS") {
            config.index_error_status = status.parse()?;
        }
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origin: HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN),
            index_error_status: IndexErrorStatus::default(),
        }
    }
}

fn parse_origin(origin: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(origin.trim()).map_err(|_| ConfigError::Invalid {
        name: "ALLOWED_ORIGIN",
        value: origin.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_match_original_deployment() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr(), "127.0.0.1:8000");
        assert_eq!(config.allowed_origin, "http://localhost:5173");
        assert_eq!(config.index_error_status, IndexErrorStatus::Legacy);
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn environment_overrides_every_field() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "3000"),
            ("ALLOWED_ORIGIN", "https://todo.example"),
            ("INDEX_ERROR_STATUS", "not-found"),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
        assert_eq!(config.allowed_origin, "https://todo.example");
        assert_eq!(config.index_error_status, IndexErrorStatus::NotFound);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn bad_origin_is_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[("ALLOWED_ORIGIN", "bad\norigin")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "ALLOWED_ORIGIN", .. }));
    }

    #[test]
    fn index_error_status_parses_aliases() {
        assert_eq!("legacy".parse::<IndexErrorStatus>(), Ok(IndexErrorStatus::Legacy));
        assert_eq!("200".parse::<IndexErrorStatus>(), Ok(IndexErrorStatus::Legacy));
        assert_eq!("NOT_FOUND".parse::<IndexErrorStatus>(), Ok(IndexErrorStatus::NotFound));
        assert_eq!("404".parse::<IndexErrorStatus>(), Ok(IndexErrorStatus::NotFound));
        assert!("teapot".parse::<IndexErrorStatus>().is_err());
    }

    #[test]
    fn index_error_status_codes() {
        assert_eq!(IndexErrorStatus::Legacy.status_code(), StatusCode::OK);
        assert_eq!(IndexErrorStatus::NotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn builder_methods() {
        let config = ServerConfig::new("localhost", 9000)
            .with_allowed_origin("http://127.0.0.1:5173")
            .unwrap()
            .with_index_error_status(IndexErrorStatus::NotFound);
        assert_eq!(config.socket_addr(), "localhost:9000");
        assert_eq!(config.allowed_origin, "http://127.0.0.1:5173");
        assert_eq!(config.index_error_status, IndexErrorStatus::NotFound);
    }
}
