use crate::error::{Result, RelayError};
use std::env;

/// Application configuration
///
/// Listening addresses are fixed; only logging can be tuned from the
/// environment.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Broadcaster (HTTP + WebSocket) configuration
    pub broadcast: BroadcastConfig,
    /// Echo server configuration
    pub echo: EchoConfig,
    /// Logging configuration
    pub log: LogConfig,
}

#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Host to bind both listeners to (default: 0.0.0.0)
    pub host: String,
    /// Port for the HTTP ingress (default: 5000)
    pub http_port: u16,
    /// Port for WebSocket subscribers (default: 5001)
    pub ws_port: u16,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            http_port: 5000,
            ws_port: 5001,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EchoConfig {
    /// Host to bind to (default: 0.0.0.0)
    pub host: String,
    /// Port for the echo WebSocket (default: 5000)
    pub port: u16,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration, reading the logging settings from the environment
    pub fn from_env() -> Result<Self> {
        let format = match get_env_or("LOG_FORMAT", "pretty").to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(RelayError::InvalidConfig(format!(
                    "LOG_FORMAT must be json or pretty, got {}",
                    other
                )))
            }
        };

        Ok(Config {
            log: LogConfig {
                level: get_env_or("LOG_LEVEL", "info"),
                format,
            },
            ..Config::default()
        })
    }

    /// Get the broadcaster's HTTP address
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.broadcast.host, self.broadcast.http_port)
    }

    /// Get the broadcaster's WebSocket address
    pub fn broadcast_ws_addr(&self) -> String {
        format!("{}:{}", self.broadcast.host, self.broadcast.ws_port)
    }

    /// Get the echo server's address
    pub fn echo_addr(&self) -> String {
        format!("{}:{}", self.echo.host, self.echo.port)
    }
}

/// Get environment variable with a default value
fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
