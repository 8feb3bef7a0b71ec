use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_FEED_LIMIT: usize = 4;
const DEFAULT_TOKEN_KEY: &str = "token";

/// Client configuration loaded from environment variables.
/// Fails at startup if `API_BASE_URL` is missing or a numeric value is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    /// JSON key/value file holding persisted client storage (the auth token lives here).
    pub auth_storage_path: Option<PathBuf>,
    pub auth_token_key: String,
    pub feed_limit: usize,
    pub jobs_page_limit: Option<u32>,
    /// Off by default: a hung request leaves its screen loading indefinitely.
    pub request_timeout: Option<Duration>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .context("Required environment variable 'API_BASE_URL' is not set")?;

        let feed_limit = match lookup("FEED_LIMIT") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .context("FEED_LIMIT must be a non-negative integer")?,
            None => DEFAULT_FEED_LIMIT,
        };

        let jobs_page_limit = lookup("JOBS_PAGE_LIMIT")
            .map(|raw| {
                raw.trim()
                    .parse::<u32>()
                    .context("JOBS_PAGE_LIMIT must be a positive integer")
            })
            .transpose()?;

        let request_timeout = lookup("REQUEST_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .context("REQUEST_TIMEOUT_SECS must be a number of seconds")
            })
            .transpose()?;

        Ok(Config {
            api_base_url: api_base_url.trim().trim_end_matches('/').to_string(),
            auth_storage_path: lookup("AUTH_STORAGE_PATH").map(PathBuf::from),
            auth_token_key: lookup("AUTH_TOKEN_KEY")
                .unwrap_or_else(|| DEFAULT_TOKEN_KEY.to_string()),
            feed_limit,
            jobs_page_limit,
            request_timeout,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
