//! Telegram Bot API přes raw reqwest: getMe, getUpdates (long poll), sendMessage.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

/// Telegram odmítne text nad 4096 znaků, dělíme s rezervou.
const SPLIT_AT: usize = 4000;

#[derive(Debug, Deserialize)]
pub struct TgUpdatesResponse {
    pub ok:     bool,
    #[serde(default)]
    pub result: Vec<TgUpdate>,
}

#[derive(Debug, Deserialize)]
pub struct TgUpdate {
    pub update_id: i64,
    pub message:   Option<TgMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TgMessage {
    pub chat: TgChat,
    pub from: Option<TgUser>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TgChat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct TgUser {
    pub id:         i64,
    #[serde(default)]
    pub first_name: String,
}

pub struct TelegramClient {
    client: reqwest::Client,
    base:   String,
}

impl TelegramClient {
    /// `poll_timeout` is the long-poll wait; the HTTP timeout leaves headroom above it.
    pub fn new(token: &str, poll_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(poll_timeout + Duration::from_secs(10))
            .build()
            .context("Failed to build Telegram HTTP client")?;
        Ok(Self { client, base: format!("https://api.telegram.org/bot{token}") })
    }

    /// Vrací (bot_id, username).
    pub async fn get_me(&self) -> Result<(i64, String)> {
        let resp: serde_json::Value = self
            .client
            .get(format!("{}/getMe", self.base))
            .send()
            .await
            .context("getMe request failed")?
            .json()
            .await
            .context("getMe returned invalid JSON")?;
        if resp["ok"].as_bool() != Some(true) {
            bail!("getMe rejected: {}", resp["description"].as_str().unwrap_or("unknown error"));
        }
        let bot_id = resp["result"]["id"].as_i64().unwrap_or(0);
        let username = resp["result"]["username"].as_str().unwrap_or_default().to_string();
        Ok((bot_id, username))
    }

    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<TgUpdate>> {
        let url = format!(
            "{}/getUpdates?offset={}&timeout={}&allowed_updates=[\"message\"]",
            self.base, offset, timeout_secs
        );
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            bail!("getUpdates HTTP {}: {}", status, body);
        }
        let parsed: TgUpdatesResponse = serde_json::from_str(&body).with_context(|| {
            let snippet: String = body.chars().take(200).collect();
            format!("Failed to parse getUpdates: {snippet}")
        })?;
        if !parsed.ok {
            bail!("getUpdates returned ok=false");
        }
        Ok(parsed.result)
    }

    /// Long texts are sent as several messages, split on line boundaries.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        for part in split_message(text) {
            let body = serde_json::json!({
                "chat_id": chat_id,
                "text": part,
                "parse_mode": "HTML",
                "disable_web_page_preview": true,
            });
            let resp = self
                .client
                .post(format!("{}/sendMessage", self.base))
                .json(&body)
                .send()
                .await?;
            if !resp.status().is_success() {
                let status = resp.status();
                let body = resp.text().await.unwrap_or_default();
                warn!("Telegram sendMessage failed: {} {}", status, body);
                bail!("Telegram sendMessage failed: {} {}", status, body);
            }
        }
        Ok(())
    }
}

/// Rozdělí text po řádcích na části kratší než limit.
pub fn split_message(text: &str) -> Vec<String> {
    if text.chars().count() <= SPLIT_AT {
        return vec![text.to_string()];
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.lines() {
        let line_len = line.chars().count();
        if current_len + line_len + 1 > SPLIT_AT && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if line_len + 1 > SPLIT_AT {
            // jediný obří řádek, tvrdý řez
            let chars: Vec<char> = line.chars().collect();
            for chunk in chars.chunks(SPLIT_AT) {
                parts.push(chunk.iter().collect());
            }
            continue;
        }
        current.push_str(line);
        current.push('\n');
        current_len += line_len + 1;
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}
