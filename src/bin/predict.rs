//! One-shot predikce z příkazové řádky, výstup JSON.
//!
//! Spuštění:
//!   cargo run --bin predict -- kez void slardar vs muerta ember tide
//!   PREDICTION_SEED=7 cargo run --bin predict -- "shadow shaman, lich vs lion, anti-mage"

use anyhow::{bail, Context, Result};
use dota_counter_bot::commands::parse_predict;
use dotenv::dotenv;
use prediction_engine::{MatchPredictor, RandomNoise};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn"))
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        bail!("usage: predict <radiant heroes...> vs <dire heroes...>");
    }

    let catalog = hero_catalog::builtin();
    let (radiant, dire) = parse_predict(catalog, &args.join(" "))?;

    let noise = match std::env::var("PREDICTION_SEED") {
        Ok(raw) => RandomNoise::seeded(raw.trim().parse().with_context(|| format!("Invalid PREDICTION_SEED '{raw}'"))?),
        Err(_) => RandomNoise::from_entropy(),
    };

    debug!("radiant={:?} dire={:?}", radiant, dire);
    let prediction = MatchPredictor::new(catalog, noise).predict(&radiant, &dire);

    println!("{}", serde_json::to_string_pretty(&prediction)?);
    Ok(())
}
