/// DotaCounterBot: Telegram bot
///
/// Co dělá:
///   1. Long-poll getUpdates, jedna odpověď na každou textovou zprávu
///   2. Hero info, counters, buildy, vyhledávání z vestavěného katalogu
///   3. /meta, /stats, /counters přes OpenDota (fallback na katalog)
///   4. /predict: heuristická predikce výsledku draftu
///
/// Spuštění:
///   TELEGRAM_BOT_TOKEN=... cargo run --bin counter-bot

use anyhow::Result;
use dota_counter_bot::config::Config;
use dota_counter_bot::handlers::Bot;
use dota_counter_bot::telegram::TelegramClient;
use dotenv::dotenv;
use logger::EventLogger;
use opendota::{OpenDotaClient, OpenDotaConfig};
use prediction_engine::RandomNoise;
use std::env;
use std::fs::File;
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Pauza po chybě getUpdates, ať nespamujeme API.
const ERROR_BACKOFF_SECS: u64 = 5;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let config = Config::from_env()?;
    let catalog = hero_catalog::builtin();

    info!("=== DotaCounterBot v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Heroes in catalog: {}", catalog.len());
    info!("OpenDota: {}", if config.opendota_enabled { "enabled" } else { "disabled" });
    info!("Logs: {}", config.log_dir.display());

    // Single instance lock
    let lock_file_path = env::temp_dir().join("dota_counter_bot.lock");
    let lock_file = match File::create(&lock_file_path) {
        Ok(f) => f,
        Err(e) => {
            warn!("Failed to create lock file at {:?}: {}", lock_file_path, e);
            return Ok(());
        }
    };

    let mut lock = fd_lock::RwLock::new(lock_file);
    let _write_guard = match lock.try_write() {
        Ok(guard) => {
            info!("Acquired single-instance lock.");
            guard
        }
        Err(_) => {
            warn!("Another instance of counter-bot is already running! Exiting.");
            return Ok(());
        }
    };

    let opendota = if config.opendota_enabled {
        let od_config = OpenDotaConfig {
            cache_ttl: config.opendota_cache_ttl(),
            api_key:   config.opendota_api_key.clone(),
            ..OpenDotaConfig::default()
        };
        match OpenDotaClient::new(od_config) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("OpenDota client unavailable, using catalog only: {e:#}");
                None
            }
        }
    } else {
        None
    };

    let noise = match config.prediction_seed {
        Some(seed) => {
            info!("Deterministic prediction noise, seed={seed}");
            RandomNoise::seeded(seed)
        }
        None => RandomNoise::from_entropy(),
    };

    let bot = Bot::new(catalog, opendota, noise, EventLogger::new(&config.log_dir));
    let telegram = TelegramClient::new(&config.bot_token, Duration::from_secs(config.poll_timeout_secs))?;

    let (bot_id, username) = telegram.get_me().await?;
    info!("Telegram bot started, bot_id={} (@{})", bot_id, username);

    let mut update_offset: i64 = 0;

    loop {
        let updates = match telegram.get_updates(update_offset, config.poll_timeout_secs).await {
            Ok(u) => u,
            Err(e) => {
                warn!("getUpdates error: {e:#}");
                sleep(Duration::from_secs(ERROR_BACKOFF_SECS)).await;
                continue;
            }
        };

        for update in updates {
            update_offset = update_offset.max(update.update_id + 1);

            let Some(msg) = update.message else { continue };
            let Some(text) = msg.text.as_deref() else { continue };
            let (user_id, first_name) = msg
                .from
                .as_ref()
                .map(|u| (u.id, u.first_name.as_str()))
                .unwrap_or((0, ""));

            info!("msg chat={} user={} admin={}: {}", msg.chat.id, user_id, config.is_admin(user_id), text);

            let Some(reply) = bot.handle(msg.chat.id, first_name, text).await else { continue };
            if let Err(e) = telegram.send_message(msg.chat.id, &reply).await {
                error!("Reply to chat {} failed: {e:#}", msg.chat.id);
            }
        }
    }
}
