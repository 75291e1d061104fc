//! Process configuration read from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `TODO_BIND_ADDR` | `127.0.0.1` |
//! | `PORT` | `3000` |
//! | `TODO_REQUEST_TIMEOUT_SECS` | `30` |

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    /// Upper bound on handling one request; the in-flight service call is
    /// dropped when it elapses.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 3000,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, falling back to defaults
    /// for absent keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(addr) = lookup("TODO_BIND_ADDR") {
            if addr.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    key: "TODO_BIND_ADDR",
                    value: addr,
                });
            }
            config.bind_addr = addr;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: port.clone(),
            })?;
        }

        if let Some(secs) = lookup("TODO_REQUEST_TIMEOUT_SECS") {
            let parsed = secs
                .parse::<u64>()
                .ok()
                .filter(|&s| s > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "TODO_REQUEST_TIMEOUT_SECS",
                    value: secs.clone(),
                })?;
            config.request_timeout = Duration::from_secs(parsed);
        }

        Ok(config)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
