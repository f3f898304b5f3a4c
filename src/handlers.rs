//! Command routing: jeden vstupní text → jedna HTML odpověď.

use crate::commands::{parse_command, parse_predict, Command, PredictInputError};
use crate::format;
use hero_catalog::{Catalog, Hero};
use logger::{now_iso, CommandEvent, EventLogger, PredictionEvent};
use opendota::{OpenDotaClient, DEFAULT_MIN_COUNTER_GAMES, DEFAULT_MIN_META_GAMES};
use prediction_engine::{MatchPrediction, MatchPredictor, PredictionResult, RandomNoise};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{info, warn};

const SUGGESTIONS: usize = 3;
const SEARCH_LIMIT: usize = 5;

pub struct Bot {
    catalog:   &'static Catalog,
    opendota:  Option<OpenDotaClient>,
    predictor: Mutex<MatchPredictor<'static, RandomNoise>>,
    events:    EventLogger,
}

impl Bot {
    pub fn new(
        catalog: &'static Catalog,
        opendota: Option<OpenDotaClient>,
        noise: RandomNoise,
        events: EventLogger,
    ) -> Self {
        Self {
            catalog,
            opendota,
            predictor: Mutex::new(MatchPredictor::new(catalog, noise)),
            events,
        }
    }

    /// Reply for one incoming message, `None` for empty text.
    pub async fn handle(&self, chat_id: i64, first_name: &str, text: &str) -> Option<String> {
        let command = parse_command(text)?;
        let (reply, ok) = self.dispatch(&command, first_name).await;

        if let Err(e) = self.events.log(&CommandEvent::new(chat_id, command.name(), ok)) {
            warn!("Event log write failed: {e}");
        }
        Some(reply)
    }

    async fn dispatch(&self, command: &Command, first_name: &str) -> (String, bool) {
        match command {
            Command::Start => (format::start_text(first_name), true),
            Command::Help => (format::help_text(), true),
            Command::About => (format::about_text(self.catalog.len()), true),
            Command::List => (format::list_text(self.catalog), true),
            Command::Hero(q) => self.with_hero(q, "/hero kez", format::hero_info),
            Command::Counter(q) => self.with_hero(q, "/counter muerta", format::counters_text),
            Command::Build(q) => self.with_hero(q, "/build void spirit", format::build_text),
            Command::Search(q) => self.search(q),
            Command::Text(q) => self.text_lookup(q),
            Command::Predict(args) => self.predict(args),
            Command::Meta => (self.meta().await, true),
            Command::Stats(q) => match self.find(q, "/stats kez") {
                Ok(hero) => (self.stats(hero).await, true),
                Err(reply) => (reply, false),
            },
            Command::Counters(q) => match self.find(q, "/counters kez") {
                Ok(hero) => (self.counter_stats(hero).await, true),
                Err(reply) => (reply, false),
            },
            Command::Unknown(cmd) => (
                format!("❓ Unknown command {}. See /help", format::escape(cmd)),
                false,
            ),
        }
    }

    /// Hero by exact lookup, otherwise an error reply with suggestions.
    fn find(&self, query: &str, example: &str) -> Result<&'static Hero, String> {
        if query.is_empty() {
            return Err(format::missing_argument(example));
        }
        self.catalog
            .lookup(query)
            .ok_or_else(|| format::not_found(query, &self.catalog.search(query, SUGGESTIONS)))
    }

    fn with_hero(&self, query: &str, example: &str, render: fn(&Hero) -> String) -> (String, bool) {
        match self.find(query, example) {
            Ok(hero) => (render(hero), true),
            Err(reply) => (reply, false),
        }
    }

    fn search(&self, query: &str) -> (String, bool) {
        if query.is_empty() {
            return ("❌ Give a query: <code>/search void</code>".to_string(), false);
        }
        match self.catalog.search(query, SEARCH_LIMIT).as_slice() {
            [] => (format::search_results(query, &[]), false),
            [single] => (format::hero_info(single), true),
            many => (format::search_results(query, many), true),
        }
    }

    fn text_lookup(&self, text: &str) -> (String, bool) {
        if let Some(hero) = self.catalog.lookup(text) {
            return (format::hero_info(hero), true);
        }
        match self.catalog.search(text, SEARCH_LIMIT).as_slice() {
            [] => (format::not_found(text, &[]), false),
            [single] => (format::hero_info(single), true),
            many => (format::search_results(text, many), true),
        }
    }

    fn predict(&self, args: &str) -> (String, bool) {
        let (radiant, dire) = match parse_predict(self.catalog, args) {
            Ok(teams) => teams,
            Err(PredictInputError::Empty) => return (format::predict_usage(), false),
            Err(PredictInputError::UnknownHeroes(names)) => {
                let mut text = "❌ <b>Unknown heroes:</b>".to_string();
                for name in names {
                    text.push_str(&format!("\n• '{}' not found", format::escape(&name)));
                }
                return (text, false);
            }
            Err(e) => return (format!("❌ Cannot read the lineups: {e}"), false),
        };

        let prediction = {
            let mut predictor = self.predictor.lock().unwrap_or_else(|e| e.into_inner());
            predictor.predict(&radiant, &dire)
        };
        info!(
            "Prediction {:?} vs {:?}: {:?} ({:.1}%/{:.1}%)",
            radiant, dire, prediction.result, prediction.win_probability_radiant, prediction.win_probability_dire
        );
        self.log_prediction(&prediction);

        (format::prediction_text(&prediction), true)
    }

    fn log_prediction(&self, p: &MatchPrediction) {
        let event = PredictionEvent {
            ts:                      now_iso(),
            event:                   "PREDICTION",
            radiant:                 p.radiant.roster.clone(),
            dire:                    p.dire.roster.clone(),
            result:                  result_label(p.result).to_string(),
            win_probability_radiant: p.win_probability_radiant,
            win_probability_dire:    p.win_probability_dire,
            confidence:              p.confidence,
        };
        if let Err(e) = self.events.log(&event) {
            warn!("Event log write failed: {e}");
        }
    }

    // ── OpenDota s fallbackem na katalog ──────────────────────────────────────

    async fn meta(&self) -> String {
        if let Some(api) = &self.opendota {
            match api.meta_report(DEFAULT_MIN_META_GAMES).await {
                Ok(Some(report)) => return format::meta_text(&report),
                Ok(None) => warn!("OpenDota meta report empty, using catalog tiers"),
                Err(e) => warn!("OpenDota meta failed: {e:#}"),
            }
        }
        format::catalog_meta_text(self.catalog)
    }

    async fn stats(&self, hero: &Hero) -> String {
        if let (Some(api), Some(id)) = (&self.opendota, hero.opendota_id) {
            match api.hero_stats_detailed(id).await {
                Ok(Some(stats)) => return format::stats_text(&stats),
                Ok(None) => warn!("OpenDota has no stats for {} ({id})", hero.name),
                Err(e) => warn!("OpenDota stats failed for {}: {e:#}", hero.name),
            }
        }
        format::catalog_stats_text(hero)
    }

    async fn counter_stats(&self, hero: &Hero) -> String {
        if let (Some(api), Some(id)) = (&self.opendota, hero.opendota_id) {
            match api.best_counters(id, DEFAULT_MIN_COUNTER_GAMES).await {
                Ok(counters) if !counters.is_empty() => {
                    let names = self.hero_names(api).await;
                    let rows: Vec<_> = counters
                        .into_iter()
                        .filter_map(|m| names.get(&m.vs_hero_id).map(|n| (n.clone(), m)))
                        .collect();
                    if !rows.is_empty() {
                        return format::counter_stats_text(hero, &rows);
                    }
                }
                Ok(_) => warn!("OpenDota has no matchups for {}", hero.name),
                Err(e) => warn!("OpenDota matchups failed for {}: {e:#}", hero.name),
            }
        }
        format::counters_text(hero)
    }

    /// OpenDota id → display name; heroStats when reachable, catalog ids otherwise.
    async fn hero_names(&self, api: &OpenDotaClient) -> HashMap<u32, String> {
        let mut names: HashMap<u32, String> = self
            .catalog
            .all()
            .iter()
            .filter_map(|h| h.opendota_id.map(|id| (id, h.name.clone())))
            .collect();

        match api.hero_stats().await {
            Ok(stats) => {
                for s in stats.into_iter().filter(|s| !s.localized_name.is_empty()) {
                    names.entry(s.id).or_insert(s.localized_name);
                }
            }
            Err(e) => warn!("OpenDota hero names unavailable: {e:#}"),
        }
        names
    }
}

pub fn result_label(result: PredictionResult) -> &'static str {
    match result {
        PredictionResult::RadiantWin => "radiant_win",
        PredictionResult::DireWin    => "dire_win",
        PredictionResult::Uncertain  => "uncertain",
    }
}
