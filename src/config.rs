//! Server configuration loaded from the environment.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address, `VIDZY_ADDR`.
    pub addr: String,
    /// JSON file backing the store, `VIDZY_DATA_FILE`. Unset keeps data in memory.
    pub data_file: Option<PathBuf>,
    /// Per-request timeout, `VIDZY_REQUEST_TIMEOUT_SECS`.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            data_file: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            addr: load_or("VIDZY_ADDR", DEFAULT_ADDR.to_string(), &lookup),
            data_file: lookup("VIDZY_DATA_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            request_timeout: Duration::from_secs(load_or(
                "VIDZY_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
                &lookup,
            )),
        }
    }
}

fn load_or<T>(key: &str, default: T, lookup: &impl Fn(&str) -> Option<String>) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|e| {
        warn!("invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}
