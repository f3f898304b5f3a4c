//! Counter-matchup analyzer.
//!
//! Two independent views of the same `weak_against` data: a short display
//! list (first hits in roster order) and a scalar score used for blending.

use crate::features::Member;
use serde::{Deserialize, Serialize};

pub const MAX_DISPLAY_MATCHUPS: usize = 5;
const PAIR_WEIGHT: f64 = 10.0;
const NEUTRAL_COUNTER_SCORE: f64 = 50.0;

/// Relative to the home team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchupKind {
    Good,
    Bad,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterMatchup {
    #[serde(rename = "type")]
    pub kind: MatchupKind,
    pub text: String,
}

/// First `MAX_DISPLAY_MATCHUPS` directional hits over home × away in roster order.
/// Pairs with an unresolved hero are skipped.
pub fn counter_matchups(home: &[Member<'_>], away: &[Member<'_>]) -> Vec<CounterMatchup> {
    let mut matchups = Vec::new();

    for h1 in home.iter().filter_map(|m| m.hero) {
        for h2 in away.iter().filter_map(|m| m.hero) {
            if h1.is_weak_against(&h2.name) {
                matchups.push(CounterMatchup {
                    kind: MatchupKind::Bad,
                    text: format!("{} is weak against {}", h1.name, h2.name),
                });
            } else if h2.is_weak_against(&h1.name) {
                matchups.push(CounterMatchup {
                    kind: MatchupKind::Good,
                    text: format!("{} is strong against {}", h1.name, h2.name),
                });
            }

            if matchups.len() >= MAX_DISPLAY_MATCHUPS {
                return matchups;
            }
        }
    }

    matchups
}

/// Scalar counter advantage of `home` over `away`, 0–100 with 50 neutral.
///
/// Every directional hit counts once: −10 when a home hero is weak against an
/// away hero, +10 for the reverse. The total is averaged over the hits.
pub fn counter_score(home: &[Member<'_>], away: &[Member<'_>]) -> f64 {
    if home.is_empty() || away.is_empty() {
        return NEUTRAL_COUNTER_SCORE;
    }

    let mut total = 0.0;
    let mut hits = 0usize;

    for h1 in home.iter().filter_map(|m| m.hero) {
        for h2 in away.iter().filter_map(|m| m.hero) {
            if h1.is_weak_against(&h2.name) {
                total -= PAIR_WEIGHT;
                hits += 1;
            }
            if h2.is_weak_against(&h1.name) {
                total += PAIR_WEIGHT;
                hits += 1;
            }
        }
    }

    if hits == 0 {
        return NEUTRAL_COUNTER_SCORE;
    }

    (NEUTRAL_COUNTER_SCORE + total / hits as f64).clamp(0.0, 100.0)
}
