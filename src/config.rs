//! Configuration loader for the `tempmap` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). The location table is not configurable; see
//! [`crate::LOCATIONS`].
//!
use std::{env, time::Duration};

use anyhow::{anyhow, Result};

/// Default forecast endpoint.
pub const DEFAULT_API_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u64 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable with a default value.
macro_rules! env_or {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| $default.to_string())
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Forecast API URL.
    pub api_url: String,

    /// How long a fetch cycle stays memoized.
    pub cache_ttl_secs: u64,

    /// Timeout for each upstream request.
    pub http_timeout_secs: u64,

    /// Port the HTTP server binds on all interfaces.
    pub listen_port: u16,
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `WEATHER_API_URL` – forecast endpoint (default: Open-Meteo)
/// - `CACHE_TTL_SECS` – memoization window (default: 600)
/// - `HTTP_TIMEOUT_SECS` – per-request timeout (default: 10)
/// - `LISTEN_PORT` – HTTP port (default: 8080)
///
/// Returns an error if any variable is set but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let api_url = env_or!("WEATHER_API_URL", DEFAULT_API_URL);
    let cache_ttl_secs = parse_env_u64!("CACHE_TTL_SECS", 600);
    let http_timeout_secs = parse_env_u64!("HTTP_TIMEOUT_SECS", 10);
    let listen_port = u16::try_from(parse_env_u64!("LISTEN_PORT", 8080))
        .map_err(|e| anyhow!("Invalid LISTEN_PORT: {}", e))?;

    if http_timeout_secs == 0 {
        return Err(anyhow!("Invalid HTTP_TIMEOUT_SECS: must be greater than 0"));
    }

    Ok(Config {
        api_url,
        cache_ttl_secs,
        http_timeout_secs,
        listen_port,
    })
}

impl Config {
    // ---
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  WEATHER_API_URL   : {}", self.api_url);
        tracing::info!("  CACHE_TTL_SECS    : {}", self.cache_ttl_secs);
        tracing::info!("  HTTP_TIMEOUT_SECS : {}", self.http_timeout_secs);
        tracing::info!("  LISTEN_PORT       : {}", self.listen_port);
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    // Env vars are process-global, so every case runs inside one test.
    #[test]
    fn test_load_from_env() {
        // ---
        for var in ["WEATHER_API_URL", "CACHE_TTL_SECS", "HTTP_TIMEOUT_SECS", "LISTEN_PORT"] {
            env::remove_var(var);
        }

        let cfg = load_from_env().unwrap();
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.cache_ttl(), Duration::from_secs(600));
        assert_eq!(cfg.http_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.listen_port, 8080);

        env::set_var("WEATHER_API_URL", "http://127.0.0.1:9000/v1/forecast");
        env::set_var("CACHE_TTL_SECS", "30");
        env::set_var("LISTEN_PORT", "3000");
        let cfg = load_from_env().unwrap();
        assert_eq!(cfg.api_url, "http://127.0.0.1:9000/v1/forecast");
        assert_eq!(cfg.cache_ttl_secs, 30);
        assert_eq!(cfg.listen_port, 3000);

        env::set_var("CACHE_TTL_SECS", "ten minutes");
        assert!(load_from_env().is_err());
        env::remove_var("CACHE_TTL_SECS");

        env::set_var("LISTEN_PORT", "70000");
        assert!(load_from_env().is_err());
        env::remove_var("LISTEN_PORT");

        env::set_var("HTTP_TIMEOUT_SECS", "0");
        assert!(load_from_env().is_err());
        env::remove_var("HTTP_TIMEOUT_SECS");

        env::remove_var("WEATHER_API_URL");
    }
}
