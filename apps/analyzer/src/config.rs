use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Alternate skill catalog. The embedded catalog is used when unset.
    pub skill_taxonomy_path: Option<PathBuf>,
    /// JSON file overriding ATS scoring thresholds and section titles.
    pub scoring_config_path: Option<PathBuf>,
    pub analysis_timeout: Duration,
    pub max_upload_bytes: usize,
    /// Analyses allowed on the blocking pool at once; further requests queue.
    pub max_concurrent_analyses: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            skill_taxonomy_path: optional_env("SKILL_TAXONOMY_PATH").map(PathBuf::from),
            scoring_config_path: optional_env("ATS_SCORING_CONFIG_PATH").map(PathBuf::from),
            analysis_timeout: Duration::from_secs(parse_env("ANALYSIS_TIMEOUT_SECS", 20u64)?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024usize)?,
            max_concurrent_analyses: parse_env("MAX_CONCURRENT_ANALYSES", 8usize)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            rust_log: "info".to_string(),
            skill_taxonomy_path: None,
            scoring_config_path: None,
            analysis_timeout: Duration::from_secs(20),
            max_upload_bytes: 10 * 1024 * 1024,
            max_concurrent_analyses: 8,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}
