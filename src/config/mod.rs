//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `QUILL_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL, DEFAULT_MODEL, DEFAULT_MODEL_TIMEOUT,
};

/// Service configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `QUILL_*` overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Scoring model API key. `None` runs the service in fallback-only mode.
    pub model_api_key: Option<String>,

    /// Scoring model identifier. Default: `gpt-3.5-turbo`.
    pub model: String,

    /// Deadline for a single model call. Default: 30 s.
    pub model_timeout: Duration,

    /// Whether scores are cached. Default: `true`.
    pub cache_enabled: bool,

    /// Max entries in the score cache. Default: `10_000`.
    pub cache_capacity: u64,

    /// Lifetime of a cached score. Default: 24 h.
    pub cache_ttl: Duration,

    /// JSON file replacing the built-in vocabularies.
    pub lexicon_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            model_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            model_timeout: DEFAULT_MODEL_TIMEOUT,
            cache_enabled: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl: DEFAULT_CACHE_TTL,
            lexicon_path: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("bind_addr", &self.bind_addr)
            .field(
                "model_api_key",
                &self.model_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("model", &self.model)
            .field("model_timeout", &self.model_timeout)
            .field("cache_enabled", &self.cache_enabled)
            .field("cache_capacity", &self.cache_capacity)
            .field("cache_ttl", &self.cache_ttl)
            .field("lexicon_path", &self.lexicon_path)
            .finish()
    }
}

impl Config {
    const ENV_PORT: &'static str = "QUILL_PORT";
    const ENV_BIND_ADDR: &'static str = "QUILL_BIND_ADDR";
    const ENV_MODEL_API_KEY: &'static str = "QUILL_MODEL_API_KEY";
    const ENV_OPENAI_API_KEY: &'static str = "OPENAI_API_KEY";
    const ENV_MODEL: &'static str = "QUILL_MODEL";
    const ENV_MODEL_TIMEOUT_SECS: &'static str = "QUILL_MODEL_TIMEOUT_SECS";
    const ENV_CACHE_ENABLED: &'static str = "QUILL_CACHE_ENABLED";
    const ENV_CACHE_CAPACITY: &'static str = "QUILL_CACHE_CAPACITY";
    const ENV_CACHE_TTL_SECS: &'static str = "QUILL_CACHE_TTL_SECS";
    const ENV_LEXICON_PATH: &'static str = "QUILL_LEXICON_PATH";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let model_api_key = Self::parse_optional_string_from_env(Self::ENV_MODEL_API_KEY)
            .or_else(|| Self::parse_optional_string_from_env(Self::ENV_OPENAI_API_KEY));
        let model = Self::parse_optional_string_from_env(Self::ENV_MODEL).unwrap_or(defaults.model);
        let model_timeout =
            Self::parse_secs_from_env(Self::ENV_MODEL_TIMEOUT_SECS, defaults.model_timeout)?;
        let cache_enabled = Self::parse_bool_from_env(Self::ENV_CACHE_ENABLED, defaults.cache_enabled);
        let cache_capacity =
            Self::parse_u64_from_env(Self::ENV_CACHE_CAPACITY, defaults.cache_capacity);
        let cache_ttl = Self::parse_secs_from_env(Self::ENV_CACHE_TTL_SECS, defaults.cache_ttl)?;
        let lexicon_path = Self::parse_optional_path_from_env(Self::ENV_LEXICON_PATH);

        Ok(Self {
            port,
            bind_addr,
            model_api_key,
            model,
            model_timeout,
            cache_enabled,
            cache_capacity,
            cache_ttl,
            lexicon_path,
        })
    }

    /// Validates paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_MODEL_TIMEOUT_SECS,
                value: "0".to_string(),
                reason: "must be greater than zero",
            });
        }

        if self.cache_enabled && self.cache_ttl.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_CACHE_TTL_SECS,
                value: "0".to_string(),
                reason: "must be greater than zero while the cache is enabled",
            });
        }

        if self.cache_enabled && self.cache_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_CACHE_CAPACITY,
                value: "0".to_string(),
                reason: "must be greater than zero while the cache is enabled",
            });
        }

        if let Some(ref path) = self.lexicon_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// `true` when a model key is present.
    pub fn model_configured(&self) -> bool {
        self.model_api_key.is_some()
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::parse_optional_string_from_env(var_name).map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn parse_secs_from_env(var_name: &'static str, default: Duration) -> Result<Duration, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidValue {
                    name: var_name,
                    value,
                    reason: "expected a whole number of seconds",
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        match env::var(var_name) {
            Ok(value) => !matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "false" | "0" | "no" | "off"
            ),
            Err(_) => default,
        }
    }
}
