//! DotaCounterBot: OpenDota client
//!
//! Volitelný zdroj živých statistik pro /meta, /stats a /counters.
//! - TTL cache odpovědí (klíč = endpoint + parametry)
//! - governor rate limiter, HTTP 429 → 1 s pauza a jeden retry
//! - chyby jako anyhow, volající loguje a degraduje na vestavěný katalog

pub mod cache;
pub mod stats;

use anyhow::{bail, Context, Result};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::{debug, warn};

pub use cache::{cache_key, ResponseCache};
pub use stats::{
    best_counters, calculate_meta_score, calculate_tier, safe_percent, Advantage, HeroMatchup,
    HeroStat, HeroStatsReport, MatchupStats, MetaReport,
};

pub const DEFAULT_BASE_URL: &str = "https://api.opendota.com/api";
pub const DEFAULT_MIN_META_GAMES: u64 = 50;
pub const DEFAULT_MIN_COUNTER_GAMES: u64 = 20;
const USER_AGENT: &str = "Dota2CounterBot/1.0";
const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct OpenDotaConfig {
    pub base_url:            String,
    pub cache_ttl:           Duration,
    pub api_key:             Option<String>,
    pub requests_per_second: u32,
    pub timeout:             Duration,
}

impl Default for OpenDotaConfig {
    fn default() -> Self {
        Self {
            base_url:            DEFAULT_BASE_URL.to_string(),
            cache_ttl:           Duration::from_secs(3600),
            api_key:             None,
            requests_per_second: 1,
            timeout:             Duration::from_secs(30),
        }
    }
}

pub struct OpenDotaClient {
    client:  reqwest::Client,
    config:  OpenDotaConfig,
    cache:   ResponseCache,
    limiter: DefaultDirectRateLimiter,
}

impl OpenDotaClient {
    pub fn new(config: OpenDotaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .context("Failed to build OpenDota HTTP client")?;

        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let limiter = RateLimiter::direct(Quota::per_second(per_second));

        Ok(Self {
            client,
            cache: ResponseCache::new(config.cache_ttl),
            config,
            limiter,
        })
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub async fn hero_stats(&self) -> Result<Vec<HeroStat>> {
        self.request("heroStats").await
    }

    pub async fn hero_matchups(&self, hero_id: u32) -> Result<Vec<HeroMatchup>> {
        self.request(&format!("heroes/{hero_id}/matchups")).await
    }

    pub async fn hero_stats_detailed(&self, hero_id: u32) -> Result<Option<HeroStatsReport>> {
        let stats = self.hero_stats().await?;
        Ok(stats.iter().find(|s| s.id == hero_id).map(HeroStatsReport::from_stat))
    }

    pub async fn meta_report(&self, min_games: u64) -> Result<Option<MetaReport>> {
        let stats = self.hero_stats().await?;
        Ok(MetaReport::build(&stats, min_games))
    }

    pub async fn best_counters(&self, hero_id: u32, min_games: u64) -> Result<Vec<MatchupStats>> {
        let matchups = self.hero_matchups(hero_id).await?;
        Ok(best_counters(hero_id, &matchups, min_games))
    }

    async fn request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let value = self.get_json(endpoint).await?;
        serde_json::from_value(value).with_context(|| format!("Unexpected OpenDota payload for {endpoint}"))
    }

    async fn get_json(&self, endpoint: &str) -> Result<Value> {
        let key = cache_key(endpoint, &[]);
        if let Some(cached) = self.cache.get(&key) {
            debug!("OpenDota cache hit: {key}");
            return Ok(cached);
        }

        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint);

        for attempt in 0..2 {
            self.limiter.until_ready().await;

            let mut req = self.client.get(&url);
            if let Some(api_key) = &self.config.api_key {
                req = req.query(&[("api_key", api_key)]);
            }
            let resp = req
                .send()
                .await
                .with_context(|| format!("OpenDota request {endpoint} failed"))?;

            let status = resp.status();
            if status == StatusCode::TOO_MANY_REQUESTS && attempt == 0 {
                warn!("OpenDota rate limit on {endpoint}, retrying in {}s", RATE_LIMIT_BACKOFF.as_secs());
                tokio::time::sleep(RATE_LIMIT_BACKOFF).await;
                continue;
            }
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                let snippet: String = body.chars().take(100).collect();
                bail!("OpenDota HTTP {status} on {endpoint}: {snippet}");
            }

            let value: Value = resp
                .json()
                .await
                .with_context(|| format!("OpenDota {endpoint} returned invalid JSON"))?;
            self.cache.insert(key, value.clone());
            return Ok(value);
        }

        bail!("OpenDota rate limit persists on {endpoint}")
    }
}
