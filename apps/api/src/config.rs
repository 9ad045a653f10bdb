use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

const DEFAULT_PORT: u16 = 8080;
/// 5 MB upload ceiling for resume documents.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_MATCH_LIMIT: usize = 10;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed numeric values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    /// JSON file mapping category → skill terms. Built-in catalog when unset.
    pub skills_catalog_path: Option<PathBuf>,
    /// JSON file holding the career category rule table. Built-in table when unset.
    pub career_rules_path: Option<PathBuf>,
    pub default_match_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_match_limit = parse_or(&lookup, "DEFAULT_MATCH_LIMIT", DEFAULT_MATCH_LIMIT)
            .context("DEFAULT_MATCH_LIMIT must be a positive integer")?;
        ensure!(
            default_match_limit > 0,
            "DEFAULT_MATCH_LIMIT must be a positive integer"
        );

        Ok(Config {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            skills_catalog_path: non_empty(&lookup, "SKILLS_CATALOG_PATH").map(PathBuf::from),
            career_rules_path: non_empty(&lookup, "CAREER_RULES_PATH").map(PathBuf::from),
            default_match_limit,
        })
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty(lookup, key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        None => Ok(default),
    }
}
