use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/api/customers";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL serving both the list (GET) and create (POST) operations.
    pub directory_endpoint: String,
    pub request_timeout: Duration,

    // Reference endpoint
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let directory_endpoint =
            lookup("DIRECTORY_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let request_timeout = Duration::from_secs(parse(&lookup, "REQUEST_TIMEOUT_SECS", 10)?);
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse(&lookup, "PORT", 8080)?;

        Ok(Self {
            directory_endpoint,
            request_timeout,
            host,
            port,
        })
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
