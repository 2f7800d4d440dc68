// src/config.rs

use std::env;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;

use crate::error::AppError;

pub const DEFAULT_EMBARGO_MONTHS: u32 = 2;
pub const DEFAULT_AUTHORS_CACHE_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct Config {
    /// Months a published issue stays in preview before general release.
    pub embargo_months: u32,
    pub authors_cache_ttl: Duration,
    pub log_dir: String,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embargo_months: DEFAULT_EMBARGO_MONTHS,
            authors_cache_ttl: Duration::from_secs(DEFAULT_AUTHORS_CACHE_TTL_SECS),
            log_dir: "logs".to_string(),
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let defaults = Self::default();

        let embargo_months = parse_var(
            "MAGAZINE_EMBARGO_TIME_IN_MONTHS",
            defaults.embargo_months,
        )?;

        let ttl_secs = parse_var("MAGAZINE_AUTHORS_CACHE_TTL", DEFAULT_AUTHORS_CACHE_TTL_SECS)?;

        let log_dir = env::var("MAGAZINE_LOG_DIR").unwrap_or(defaults.log_dir);

        let rust_log = env::var("RUST_LOG").unwrap_or(defaults.rust_log);

        Ok(Self {
            embargo_months,
            authors_cache_ttl: Duration::from_secs(ttl_secs),
            log_dir,
            rust_log,
        })
    }
}

/// Reads an unsigned value, falling back to `default` when the variable is unset.
/// Negative or malformed values are rejected rather than silently defaulted.
fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(AppError::Config(format!("{}: {}", key, e))),
    }
}

pub(crate) fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::Config(format!("{} must be a non-negative integer, got '{}'", key, raw)))
}
