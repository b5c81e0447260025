use crate::archive::client::ARCHIVE_URL;
use crate::transport::retry::RetryPolicy;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Process settings for the `annual-rainfall` binary, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: NonZeroUsize,
    /// `None` means the system cache directory.
    pub cache_dir: Option<PathBuf>,
    pub archive_url: String,
    pub retry_policy: RetryPolicy,
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the real environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RetryPolicy::default();
        Ok(Self {
            host: lookup("RAINFALL_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "RAINFALL_PORT", 8000)?,
            workers: parse_or(&lookup, "RAINFALL_WORKERS", default_workers())?,
            cache_dir: lookup("RAINFALL_CACHE_DIR").map(PathBuf::from),
            archive_url: lookup("RAINFALL_ARCHIVE_URL").unwrap_or_else(|| ARCHIVE_URL.to_string()),
            retry_policy: RetryPolicy::builder()
                .max_retries(parse_or(&lookup, "RAINFALL_MAX_RETRIES", defaults.max_retries)?)
                .backoff_factor(parse_or(
                    &lookup,
                    "RAINFALL_BACKOFF_FACTOR",
                    defaults.backoff_factor,
                )?)
                .build(),
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "RAINFALL_REQUEST_TIMEOUT_SECS",
                30,
            )?),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_workers() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}
