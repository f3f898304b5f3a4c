//! OpenDota payloads and the statistics derived from them.

use chrono::{DateTime, Utc};
use hero_catalog::Tier;
use serde::{Deserialize, Serialize};

const META_TOP: usize = 10;
const TREND_TOP: usize = 5;
const COUNTERS_TOP: usize = 10;

// ── Raw payloads ─────────────────────────────────────────────────────────────

/// One row of `/heroStats`. `1_*` fields are Herald bracket, `7_*` Divine.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HeroStat {
    #[serde(default)]
    pub id:             u32,
    #[serde(default)]
    pub localized_name: String,
    #[serde(default)]
    pub pro_win:        u64,
    #[serde(default)]
    pub pro_pick:       u64,
    #[serde(default)]
    pub pro_ban:        u64,
    #[serde(rename = "1_win", default)]
    pub herald_win:     Option<u64>,
    #[serde(rename = "1_pick", default)]
    pub herald_pick:    Option<u64>,
    #[serde(rename = "7_win", default)]
    pub divine_win:     Option<u64>,
    #[serde(rename = "7_pick", default)]
    pub divine_pick:    Option<u64>,
}

/// One row of `/heroes/{id}/matchups`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HeroMatchup {
    #[serde(default)]
    pub hero_id:      u32,
    #[serde(default)]
    pub games_played: u64,
    #[serde(default)]
    pub wins:         u64,
}

// ── Reports ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroStatsReport {
    pub hero_id:         u32,
    pub hero_name:       String,
    /// Pro win rate in percent.
    pub win_rate:        f64,
    /// Pro picks (count, not a rate).
    pub pick_rate:       f64,
    pub ban_rate:        f64,
    pub win_rate_herald: Option<f64>,
    pub win_rate_divine: Option<f64>,
    pub tier:            Tier,
    pub meta_score:      f64,
    pub last_updated:    DateTime<Utc>,
}

impl HeroStatsReport {
    pub fn from_stat(stat: &HeroStat) -> Self {
        let win_rate = pro_win_rate(stat.pro_win, stat.pro_pick);
        Self {
            hero_id:         stat.id,
            hero_name:       if stat.localized_name.is_empty() { "Unknown".to_string() } else { stat.localized_name.clone() },
            win_rate,
            pick_rate:       stat.pro_pick as f64,
            ban_rate:        stat.pro_ban as f64,
            win_rate_herald: safe_percent(stat.herald_win, stat.herald_pick),
            win_rate_divine: safe_percent(stat.divine_win, stat.divine_pick),
            tier:            calculate_tier(win_rate, stat.pro_pick),
            meta_score:      calculate_meta_score(stat.pro_win, stat.pro_pick),
            last_updated:    Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaReport {
    pub timestamp:      DateTime<Utc>,
    pub top_picks:      Vec<HeroStatsReport>,
    pub top_wins:       Vec<HeroStatsReport>,
    pub top_bans:       Vec<HeroStatsReport>,
    pub rising_heroes:  Vec<HeroStatsReport>,
    pub falling_heroes: Vec<HeroStatsReport>,
}

impl MetaReport {
    /// None when no hero reaches `min_games` pro picks.
    pub fn build(stats: &[HeroStat], min_games: u64) -> Option<Self> {
        let heroes: Vec<HeroStatsReport> = stats
            .iter()
            .filter(|s| s.pro_pick >= min_games)
            .map(HeroStatsReport::from_stat)
            .collect();
        if heroes.is_empty() {
            return None;
        }

        let top_by = |key: fn(&HeroStatsReport) -> f64| {
            let mut sorted = heroes.clone();
            sorted.sort_by(|a, b| key(b).total_cmp(&key(a)));
            sorted.truncate(META_TOP);
            sorted
        };

        Some(Self {
            timestamp:      Utc::now(),
            top_picks:      top_by(|h| h.pick_rate),
            top_wins:       top_by(|h| h.win_rate),
            top_bans:       top_by(|h| h.ban_rate),
            rising_heroes:  heroes.iter().filter(|h| h.win_rate > 55.0).take(TREND_TOP).cloned().collect(),
            falling_heroes: heroes.iter().filter(|h| h.win_rate < 45.0).take(TREND_TOP).cloned().collect(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Advantage {
    StrongAdvantage,
    SlightAdvantage,
    Neutral,
    SlightDisadvantage,
    StrongDisadvantage,
}

impl Advantage {
    pub fn label(&self) -> &'static str {
        match self {
            Advantage::StrongAdvantage    => "⬆️ Strong advantage",
            Advantage::SlightAdvantage    => "↗️ Slight advantage",
            Advantage::Neutral            => "➡️ Neutral matchup",
            Advantage::SlightDisadvantage => "↘️ Slight disadvantage",
            Advantage::StrongDisadvantage => "⬇️ Strong disadvantage",
        }
    }
}

/// Head-to-head record of `hero_id` against `vs_hero_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchupStats {
    pub hero_id:    u32,
    pub vs_hero_id: u32,
    pub wins:       u64,
    pub losses:     u64,
}

impl MatchupStats {
    pub fn games(&self) -> u64 {
        self.wins + self.losses
    }

    pub fn win_rate(&self) -> f64 {
        match self.games() {
            0 => 0.0,
            g => self.wins as f64 / g as f64 * 100.0,
        }
    }

    pub fn advantage(&self) -> Advantage {
        let wr = self.win_rate();
        if wr > 55.0 {
            Advantage::StrongAdvantage
        } else if wr > 52.0 {
            Advantage::SlightAdvantage
        } else if wr < 45.0 {
            Advantage::StrongDisadvantage
        } else if wr < 48.0 {
            Advantage::SlightDisadvantage
        } else {
            Advantage::Neutral
        }
    }
}

/// Opponents with at least `min_games`, worst win rate for `hero_id` first.
pub fn best_counters(hero_id: u32, matchups: &[HeroMatchup], min_games: u64) -> Vec<MatchupStats> {
    let mut results: Vec<MatchupStats> = matchups
        .iter()
        .filter(|m| m.games_played >= min_games)
        .map(|m| MatchupStats {
            hero_id,
            vs_hero_id: m.hero_id,
            wins:       m.wins.min(m.games_played),
            losses:     m.games_played.saturating_sub(m.wins),
        })
        .collect();

    results.sort_by(|a, b| a.win_rate().total_cmp(&b.win_rate()));
    results.truncate(COUNTERS_TOP);
    results
}

// ── Helpers ──────────────────────────────────────────────────────────────────

pub fn pro_win_rate(wins: u64, picks: u64) -> f64 {
    if picks == 0 {
        return 0.0;
    }
    wins as f64 / picks as f64 * 100.0
}

pub fn safe_percent(wins: Option<u64>, picks: Option<u64>) -> Option<f64> {
    match (wins, picks) {
        (Some(w), Some(p)) if p > 0 => Some(w as f64 / p as f64 * 100.0),
        _ => None,
    }
}

pub fn calculate_tier(win_rate: f64, picks: u64) -> Tier {
    if win_rate >= 55.0 && picks > 100 {
        Tier::S
    } else if win_rate >= 52.0 || (win_rate >= 50.0 && picks > 200) {
        Tier::A
    } else if win_rate >= 48.0 {
        Tier::B
    } else if win_rate >= 45.0 {
        Tier::C
    } else {
        Tier::D
    }
}

/// Pro win rate weighted with popularity (capped at 500 picks).
pub fn calculate_meta_score(wins: u64, picks: u64) -> f64 {
    if picks == 0 {
        return 0.0;
    }
    let popularity = (picks as f64 / 50.0).min(10.0);
    pro_win_rate(wins, picks) * 0.6 + popularity * 4.0
}
