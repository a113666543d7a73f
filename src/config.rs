// src/config.rs
//! Env-driven runtime configuration. `.env` is loaded once by the binary;
//! everything here is plain `std::env` reads with parse-and-default.

use std::time::Duration;

use crate::cache::DEFAULT_TTL;

pub const ENV_REPO_BASE: &str = "CHANGELOG_REPO_BASE";
pub const ENV_CACHE_TTL_SECS: &str = "CHANGELOG_CACHE_TTL_SECS";
pub const ENV_BASELINE_PATH: &str = "CHANGELOG_BASELINE_PATH";
pub const ENV_BIND_ADDR: &str = "CHANGELOG_BIND_ADDR";

pub const DEFAULT_BASELINE_PATH: &str = "config/baseline.json";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Base URL the live changelog JSON is derived from.
    pub repo_base: String,
    /// Freshness window for cached payloads.
    pub cache_ttl: Duration,
    /// Path of the build-time baseline dataset.
    pub baseline_path: String,
    pub bind_addr: String,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        let repo_base = std::env::var(ENV_REPO_BASE)
            .unwrap_or_else(|_| "http://127.0.0.1:8000/toolkit".to_string());

        let cache_ttl = std::env::var(ENV_CACHE_TTL_SECS)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TTL);

        let baseline_path = std::env::var(ENV_BASELINE_PATH)
            .unwrap_or_else(|_| DEFAULT_BASELINE_PATH.to_string());

        let bind_addr =
            std::env::var(ENV_BIND_ADDR).unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        Self {
            repo_base,
            cache_ttl,
            baseline_path,
            bind_addr,
        }
    }
}
