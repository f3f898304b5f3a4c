//! HTML texty odpovědí (Telegram parse_mode = HTML).

use hero_catalog::{Catalog, Hero, Tier};
use opendota::{HeroStatsReport, MatchupStats, MetaReport};
use prediction_engine::{ConfidenceLevel, MatchPrediction, PredictionResult, TeamAnalysis};
use std::collections::BTreeMap;

const SHOWN_FACTORS: usize = 3;
const SHOWN_RISKS: usize = 2;
const SHOWN_MATCHUPS: usize = 4;
const SHOWN_TEAM_NOTES: usize = 3;
const SHOWN_COUNTER_STATS: usize = 7;
const SHOWN_META: usize = 5;

/// Escapes the three characters Telegram HTML cares about.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

pub fn tier_emoji(tier: Option<Tier>) -> &'static str {
    match tier {
        Some(Tier::S) => "🔴",
        Some(Tier::A) => "🟠",
        Some(Tier::B) => "🟡",
        Some(Tier::C) => "🟢",
        Some(Tier::D) => "⚪",
        None => "❓",
    }
}

pub fn format_win_rate(wr: Option<f64>) -> String {
    match wr {
        None => "N/A".to_string(),
        Some(wr) if wr >= 55.0 => format!("🟢 {wr:.1}%"),
        Some(wr) if wr >= 50.0 => format!("🟡 {wr:.1}%"),
        Some(wr) if wr >= 45.0 => format!("🟠 {wr:.1}%"),
        Some(wr) => format!("🔴 {wr:.1}%"),
    }
}

// ── Static texts ─────────────────────────────────────────────────────────────

const COMMAND_LIST: &str = "\
/hero [name] - hero overview
/counter [name] - counter picks from the knowledge base
/counters [name] - statistical counters (OpenDota)
/build [name] - recommended build
/stats [name] - current statistics
/meta - current meta
/predict [A] vs [B] - predict the winner
/search [query] - find a hero
/list - all heroes
/help - help";

pub fn start_text(first_name: &str) -> String {
    format!(
        "🎮 <b>Dota 2 Counter Bot</b>\n\n\
         Hi, {}! I help with counter picks, builds and match predictions.\n\n\
         <b>Commands:</b>\n{}\n\n\
         Just type a hero name and I will find everything about it!",
        escape(first_name),
        COMMAND_LIST
    )
}

pub fn help_text() -> String {
    format!(
        "📚 <b>Commands</b>\n\n{COMMAND_LIST}\n/about - about the bot\n\n\
         <b>Examples:</b>\n\
         • <code>/hero kez</code>\n\
         • <code>/stats muerta</code>\n\
         • <code>/predict kez void slardar vs muerta ember tide</code>\n\
         • <code>/predict shadow shaman, lich vs lion, anti-mage</code>\n\
         • <code>/meta</code>\n\n\
         💡 You can also just type a hero name without a command."
    )
}

pub fn about_text(hero_count: usize) -> String {
    format!(
        "🤖 <b>Dota 2 Counter Bot</b>\n\n\
         Version {}\n\
         Heroes in the catalog: {hero_count}\n\n\
         • Counter picks and builds\n\
         • Live statistics (OpenDota API)\n\
         • Heuristic match prediction\n\
         • Meta overview",
        env!("CARGO_PKG_VERSION")
    )
}

// ── Catalog ──────────────────────────────────────────────────────────────────

pub fn list_text(catalog: &Catalog) -> String {
    let mut by_role: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for hero in catalog.all() {
        let role = hero.main_role().map(|r| r.to_string()).unwrap_or_else(|| "Other".to_string());
        by_role.entry(role).or_default().push(&hero.name);
    }

    let mut lines = vec!["📋 <b>Heroes in the catalog:</b>".to_string(), String::new()];
    for (role, mut names) in by_role {
        names.sort_unstable();
        lines.push(format!("<b>{role}:</b> {}", escape(&names.join(", "))));
    }
    lines.join("\n")
}

pub fn hero_info(hero: &Hero) -> String {
    let roles: Vec<String> = hero.roles.iter().map(|r| r.to_string()).collect();
    let mut lines = vec![
        format!("🎯 <b>{}</b>", escape(&hero.name)),
        format!("📊 Roles: {}", roles.join(", ")),
        format!("⚔️ Attack: {} | Attribute: {}", hero.attack_type, hero.primary_attr),
    ];

    if !hero.description.is_empty() {
        lines.push(String::new());
        lines.push(format!("📝 <b>Description:</b>\n{}", escape(&hero.description)));
    }
    push_bullets(&mut lines, "✅ <b>Strengths:</b>", &hero.strengths);
    push_bullets(&mut lines, "❌ <b>Weaknesses:</b>", &hero.weaknesses);

    if let Some(stats) = &hero.stats {
        lines.push(String::new());
        lines.push(format!(
            "📈 Stats: WR {} | Pick {} | Tier {}",
            stats.win_rate.map_or("N/A".to_string(), |w| format!("{w:.1}%")),
            stats.pick_rate.map_or("N/A".to_string(), |p| format!("{p:.1}%")),
            stats.tier.map_or("?".to_string(), |t| t.to_string()),
        ));
    }
    lines.join("\n")
}

pub fn counters_text(hero: &Hero) -> String {
    let c = &hero.counters;
    let mut lines = vec![format!("🛡️ <b>Counters for {}</b>", escape(&hero.name))];

    push_numbered(&mut lines, "⚔️ <b>Weak against:</b>", &c.weak_against);
    push_numbered(&mut lines, "💪 <b>Strong against:</b>", &c.strong_against);
    push_bullets(&mut lines, "🎒 <b>Counter items:</b>", &c.counter_items);
    push_bullets(&mut lines, "🔑 <b>Core items:</b>", &c.core_items);

    if lines.len() == 1 {
        lines.push("No counter data for this hero yet.".to_string());
    }
    lines.join("\n")
}

pub fn build_text(hero: &Hero) -> String {
    let Some(build) = &hero.build else {
        return format!("No build for {} yet.", escape(&hero.name));
    };

    let mut lines = vec![format!("⚔️ <b>Build for {}</b>", escape(&hero.name))];
    let stages: [(&str, &Vec<String>, &str); 5] = [
        ("🌱 <b>Start:</b>", &build.starting_items, ", "),
        ("⚡ <b>Early game:</b>", &build.early_game, " → "),
        ("🔥 <b>Mid game:</b>", &build.mid_game, " → "),
        ("👑 <b>Late game:</b>", &build.late_game, " → "),
        ("🔄 <b>Situational:</b>", &build.situational, ", "),
    ];
    for (title, items, sep) in stages {
        if items.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(title.to_string());
        lines.push(format!("  {}", escape(&items.join(sep))));
    }
    lines.join("\n")
}

pub fn search_results(query: &str, heroes: &[&Hero]) -> String {
    if heroes.is_empty() {
        return format!("❌ Nothing found for '<b>{}</b>'.", escape(query));
    }
    let mut lines = vec![format!("🔍 Found for '<b>{}</b>':", escape(query))];
    for hero in heroes {
        lines.push(format!("• {} (<code>/hero {}</code>)", escape(&hero.name), escape(&hero.id)));
    }
    lines.join("\n")
}

pub fn not_found(query: &str, suggestions: &[&Hero]) -> String {
    if suggestions.is_empty() {
        return format!(
            "❓ Hero '<b>{q}</b>' not found. Try <code>/search {q}</code> or /list",
            q = escape(query)
        );
    }
    let names: Vec<&str> = suggestions.iter().map(|h| h.name.as_str()).collect();
    format!("❌ Hero '<b>{}</b>' not found.\n\nDid you mean: {}?", escape(query), escape(&names.join(", ")))
}

pub fn missing_argument(example: &str) -> String {
    format!("❌ Give a hero name: <code>{example}</code>")
}

// ── Prediction ───────────────────────────────────────────────────────────────

pub fn winner_text(p: &MatchPrediction) -> String {
    match (p.result.side(), p.winner_probability()) {
        (Some(side), Some(prob)) => {
            let dot = if p.result == PredictionResult::RadiantWin { "🟢" } else { "🔴" };
            format!("{dot} {side} ({prob:.1}%)")
        }
        _ => "⚪ Too close to call (50/50)".to_string(),
    }
}

pub fn confidence_text(level: ConfidenceLevel) -> &'static str {
    match level {
        ConfidenceLevel::VeryHigh => "🔴 Very high",
        ConfidenceLevel::High     => "🟠 High",
        ConfidenceLevel::Medium   => "🟡 Medium",
        ConfidenceLevel::Low      => "🟢 Low (even odds)",
    }
}

pub fn prediction_text(p: &MatchPrediction) -> String {
    let mut lines = vec![
        "🔮 <b>MATCH PREDICTION</b>".to_string(),
        String::new(),
        format!("🟢 <b>Radiant:</b> {}", escape(&p.radiant.roster.join(", "))),
        format!("🔴 <b>Dire:</b> {}", escape(&p.dire.roster.join(", "))),
        String::new(),
        "🏆 <b>Likely winner:</b>".to_string(),
        winner_text(p),
        String::new(),
        format!("📊 <b>Confidence:</b> {} ({:.1}%)", confidence_text(p.confidence_level()), p.confidence),
    ];

    let factors: Vec<String> = p.key_factors.iter().take(SHOWN_FACTORS).cloned().collect();
    push_bullets(&mut lines, "<b>Key factors:</b>", &factors);
    let risks: Vec<String> = p.risk_factors.iter().take(SHOWN_RISKS).cloned().collect();
    push_bullets(&mut lines, "⚠️ <b>Risks:</b>", &risks);

    push_team(&mut lines, "🟢", &p.radiant, p.win_probability_radiant);
    push_team(&mut lines, "🔴", &p.dire, p.win_probability_dire);

    let matchups: Vec<String> = p.counter_matchups.iter().take(SHOWN_MATCHUPS).map(|m| m.text.clone()).collect();
    push_bullets(&mut lines, "🎯 <b>Key matchups:</b>", &matchups);

    lines.push(String::new());
    lines.push("<i>Based on synergy, counters, meta and draft balance</i>".to_string());
    lines.join("\n")
}

fn push_team(lines: &mut Vec<String>, marker: &str, team: &TeamAnalysis, probability: f64) {
    lines.push(String::new());
    lines.push(format!("{marker} <b>{} ({probability:.1}%)</b>", team.team_label));
    lines.push(format!(
        "Synergy {:.0}/100 | Draft {:.0}/100 | Meta {:.0}/100",
        team.synergy_score, team.draft_score, team.meta_score
    ));
    for s in team.strengths.iter().take(SHOWN_TEAM_NOTES) {
        lines.push(format!("  ✅ {}", escape(s)));
    }
    for w in team.weaknesses.iter().take(SHOWN_TEAM_NOTES) {
        lines.push(format!("  ❌ {}", escape(w)));
    }
}

pub fn predict_usage() -> String {
    "❌ Give both lineups: <code>/predict kez void slardar shaman lich vs muerta ember tide lion pudge</code>"
        .to_string()
}

// ── Statistics ───────────────────────────────────────────────────────────────

pub fn stats_text(stats: &HeroStatsReport) -> String {
    let mut lines = vec![
        format!("📊 <b>Statistics: {}</b>", escape(&stats.hero_name)),
        String::new(),
        format!("{} <b>Tier:</b> {}", tier_emoji(Some(stats.tier)), stats.tier),
        format!("📈 <b>Win rate:</b> {}", format_win_rate(Some(stats.win_rate))),
        format!("🎯 <b>Picks:</b> {:.0} games", stats.pick_rate),
    ];
    if stats.ban_rate > 0.0 {
        lines.push(format!("🚫 <b>Bans:</b> {:.0} games", stats.ban_rate));
    }
    lines.push(format!("⭐ <b>Meta score:</b> {:.1}/100", stats.meta_score));

    lines.push(String::new());
    lines.push("<b>Win rate by bracket:</b>".to_string());
    if stats.win_rate_herald.is_some() {
        lines.push(format!("  🥉 Herald: {}", format_win_rate(stats.win_rate_herald)));
    }
    if stats.win_rate_divine.is_some() {
        lines.push(format!("  🥇 Divine+: {}", format_win_rate(stats.win_rate_divine)));
    }
    lines.push(format!("  🏆 Pro: {}", format_win_rate(Some(stats.win_rate))));

    lines.push(String::new());
    lines.push(format!("<i>Updated {}</i>", stats.last_updated.format("%H:%M UTC")));
    lines.join("\n")
}

/// Fallback bez API: jen data z katalogu.
pub fn catalog_stats_text(hero: &Hero) -> String {
    let stats = hero.stats.clone().unwrap_or_default();
    [
        format!("📊 <b>Statistics: {}</b>", escape(&hero.name)),
        String::new(),
        format!("{} <b>Tier:</b> {}", tier_emoji(stats.tier), stats.tier.map_or("?".to_string(), |t| t.to_string())),
        format!("📈 <b>Win rate:</b> {}", format_win_rate(stats.win_rate)),
        format!("🎯 <b>Pick rate:</b> {}", stats.pick_rate.map_or("N/A".to_string(), |p| format!("{p:.1}%"))),
        String::new(),
        "<i>Live statistics are unavailable, showing catalog data</i>".to_string(),
    ]
    .join("\n")
}

pub fn meta_text(report: &MetaReport) -> String {
    let mut lines = vec![
        "🌍 <b>Current meta</b>".to_string(),
        format!("<i>Updated {}</i>", report.timestamp.format("%d.%m %H:%M UTC")),
        String::new(),
        "🔥 <b>Top win rate:</b>".to_string(),
    ];
    for (i, hero) in report.top_wins.iter().take(SHOWN_META).enumerate() {
        lines.push(format!("{}. {} {}", i + 1, escape(&hero.hero_name), format_win_rate(Some(hero.win_rate))));
    }

    lines.push(String::new());
    lines.push("📈 <b>Most picked:</b>".to_string());
    for (i, hero) in report.top_picks.iter().take(SHOWN_META).enumerate() {
        lines.push(format!("{}. {} ({:.0} picks)", i + 1, escape(&hero.hero_name), hero.pick_rate));
    }

    if !report.top_bans.is_empty() {
        lines.push(String::new());
        lines.push("🚫 <b>Most banned:</b>".to_string());
        for (i, hero) in report.top_bans.iter().take(SHOWN_META).enumerate() {
            lines.push(format!("{}. {} ({:.0} bans)", i + 1, escape(&hero.hero_name), hero.ban_rate));
        }
    }
    if !report.rising_heroes.is_empty() {
        lines.push(String::new());
        lines.push("⬆️ <b>Rising:</b>".to_string());
        for hero in report.rising_heroes.iter().take(3) {
            lines.push(format!("• {} {}", escape(&hero.hero_name), format_win_rate(Some(hero.win_rate))));
        }
    }
    if !report.falling_heroes.is_empty() {
        lines.push(String::new());
        lines.push("⬇️ <b>Falling:</b>".to_string());
        for hero in report.falling_heroes.iter().take(3) {
            lines.push(format!("• {} {}", escape(&hero.hero_name), format_win_rate(Some(hero.win_rate))));
        }
    }
    lines.join("\n")
}

/// Meta fallback: catalog heroes grouped by tier, best first.
pub fn catalog_meta_text(catalog: &Catalog) -> String {
    let mut heroes: Vec<&Hero> = catalog.all().iter().collect();
    heroes.sort_by_key(|h| std::cmp::Reverse(h.tier().map_or(0, |t| t.rank())));

    let mut lines = vec!["🌍 <b>Catalog meta</b>".to_string(), String::new()];
    for hero in heroes {
        lines.push(format!(
            "{} {} (tier {})",
            tier_emoji(hero.tier()),
            escape(&hero.name),
            hero.tier().map_or("?".to_string(), |t| t.to_string())
        ));
    }
    lines.push(String::new());
    lines.push("<i>Live statistics are unavailable, showing catalog tiers</i>".to_string());
    lines.join("\n")
}

/// `rows` are (opponent display name, head-to-head record of `hero`).
pub fn counter_stats_text(hero: &Hero, rows: &[(String, MatchupStats)]) -> String {
    let mut lines = vec![
        format!("🛡️ <b>Statistical counters for {}</b>", escape(&hero.name)),
        "<i>Based on professional matches</i>".to_string(),
        String::new(),
    ];
    for (i, (name, m)) in rows.iter().take(SHOWN_COUNTER_STATS).enumerate() {
        lines.push(format!(
            "{}. <b>{}</b>\n   Win rate against: {:.1}% ({} games)\n   {}",
            i + 1,
            escape(name),
            m.win_rate(),
            m.games(),
            m.advantage().label()
        ));
    }
    lines.join("\n")
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn push_bullets(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(title.to_string());
    for item in items {
        lines.push(format!("  • {}", escape(item)));
    }
}

fn push_numbered(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(title.to_string());
    for (i, item) in items.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, escape(item)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_catalog::builtin;
    use prediction_engine::{FixedNoise, MatchPredictor};

    #[test]
    fn escapes_html() {
        assert_eq!(escape("<b>A & B</b>"), "&lt;b&gt;A &amp; B&lt;/b&gt;");
    }

    #[test]
    fn win_rate_buckets() {
        assert_eq!(format_win_rate(None), "N/A");
        assert_eq!(format_win_rate(Some(56.0)), "🟢 56.0%");
        assert_eq!(format_win_rate(Some(44.94)), "🔴 44.9%");
    }

    #[test]
    fn hero_texts_use_catalog_data() {
        let kez = builtin().lookup("kez").unwrap();
        let info = hero_info(kez);
        assert!(info.starts_with("🎯 <b>Kez</b>"));
        assert!(info.contains("Roles: Carry, Escape, Nuker"));

        let counters = counters_text(kez);
        assert!(counters.contains("1. Phantom Lancer"));

        let build = build_text(kez);
        assert!(build.contains("Build for Kez"));
    }

    #[test]
    fn list_groups_by_main_role() {
        let text = list_text(builtin());
        assert!(text.contains("<b>Support:</b> Lich, Lion, Shadow Shaman"));
        assert!(text.contains("<b>Initiator:</b> Tidehunter"));
    }

    #[test]
    fn prediction_text_shows_lineups_and_limits() {
        let mut predictor = MatchPredictor::new(builtin(), FixedNoise::zero());
        let p = predictor.predict(&["Kez", "Lich"], &["Phantom Lancer"]);
        let text = prediction_text(&p);
        assert!(text.contains("<b>Radiant:</b> Kez, Lich"));
        assert!(text.contains("<b>Dire:</b> Phantom Lancer"));
        assert!(text.contains("Kez is weak against Phantom Lancer"));
        assert!(text.contains("Radiant lineup is incomplete (2/5)"));
        // jen první dvě rizika
        assert!(!text.contains("has no clear strengths"));
    }

    #[test]
    fn winner_line_names_side_and_its_probability() {
        let none: [&str; 0] = [];
        let even = MatchPredictor::new(builtin(), FixedNoise::zero()).predict(&none, &none);
        assert_eq!(winner_text(&even), "⚪ Too close to call (50/50)");

        let radiant = MatchPredictor::new(builtin(), FixedNoise(3.0)).predict(&none, &none);
        assert_eq!(winner_text(&radiant), "🟢 Radiant (53.0%)");

        let dire = MatchPredictor::new(builtin(), FixedNoise(-3.0)).predict(&none, &none);
        assert_eq!(winner_text(&dire), "🔴 Dire (53.0%)");
    }

    #[test]
    fn not_found_offers_suggestions() {
        let catalog = builtin();
        assert!(not_found("spirit", &catalog.search("spirit", 3)).contains("Void Spirit, Ember Spirit"));
        assert!(not_found("zzz", &[]).contains("/search zzz"));
    }

    #[test]
    fn catalog_meta_orders_by_tier() {
        let text = catalog_meta_text(builtin());
        let ember = text.find("Ember Spirit").unwrap();
        let slardar = text.find("Slardar").unwrap();
        assert!(ember < slardar);
    }
}
