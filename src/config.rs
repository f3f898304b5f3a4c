//! Konfigurace z `.env` / env proměnných.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token:               String,
    pub admin_ids:               Vec<i64>,
    pub opendota_enabled:        bool,
    pub opendota_cache_ttl_secs: u64,
    pub opendota_api_key:        Option<String>,
    /// getUpdates long-poll timeout.
    pub poll_timeout_secs:       u64,
    pub log_dir:                 PathBuf,
    /// Pevný seed pro noise, jinak entropy.
    pub prediction_seed:         Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, with an injectable variable source.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bot_token = var("TELEGRAM_BOT_TOKEN")
            .context("TELEGRAM_BOT_TOKEN not set (add it to .env)")?;

        let admin_ids = match var("ADMIN_IDS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| s.parse::<i64>().with_context(|| format!("Invalid ADMIN_IDS entry '{s}'")))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        let opendota_enabled = match var("OPENDOTA_ENABLED") {
            Some(raw) => parse_bool(&raw).with_context(|| format!("Invalid OPENDOTA_ENABLED '{raw}'"))?,
            None => true,
        };

        Ok(Self {
            bot_token,
            admin_ids,
            opendota_enabled,
            opendota_cache_ttl_secs: parse_num(var("OPENDOTA_CACHE_TTL_SECS"), "OPENDOTA_CACHE_TTL_SECS", 3600)?,
            opendota_api_key:        var("OPENDOTA_API_KEY"),
            poll_timeout_secs:       parse_num(var("BOT_POLL_TIMEOUT_SECS"), "BOT_POLL_TIMEOUT_SECS", 25)?,
            log_dir:                 var("LOG_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("logs")),
            prediction_seed:         var("PREDICTION_SEED")
                .map(|s| s.parse::<u64>().with_context(|| format!("Invalid PREDICTION_SEED '{s}'")))
                .transpose()?,
        })
    }

    pub fn opendota_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.opendota_cache_ttl_secs)
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}

fn parse_num(raw: Option<String>, key: &str, default: u64) -> Result<u64> {
    match raw {
        Some(s) => s.parse::<u64>().with_context(|| format!("Invalid {key} '{s}'")),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected true/false, got '{other}'"),
    }
}
