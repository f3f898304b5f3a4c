//! Prediction Engine pro Dota 2 drafty
//! Heuristika místo AI/ML: synergie, draft, meta tier a counter matchupy
//! se skládají do win probability obou stran.

pub mod counters;
pub mod features;
pub mod noise;
pub mod scoring;
pub mod synergy;

use hero_catalog::{Catalog, Role};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use counters::{CounterMatchup, MatchupKind};
pub use features::TeamFeatures;
pub use noise::{FixedNoise, NoiseSource, RandomNoise};

use counters::{counter_matchups, counter_score};
use features::{classify, resolve, Member};
use scoring::{draft_score, meta_score, FULL_ROSTER};
use synergy::synergy_score;

/// Score gap above which a component becomes a key factor.
const FACTOR_THRESHOLD: f64 = 10.0;
const MAX_KEY_FACTORS: usize = 4;
const MAX_KEY_HEROES: usize = 3;
const NOISE_AMPLITUDE: f64 = 3.0;
const MIN_PROBABILITY: f64 = 5.0;
const MAX_PROBABILITY: f64 = 95.0;
/// Separation below which the match is called uncertain.
const UNCERTAIN_BELOW: f64 = 5.0;
const TEAMFIGHT_HEROES: &[&str] = &["Magnus", "Dark Seer", "Enigma"];

/// Výsledek predikce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionResult {
    RadiantWin,
    DireWin,
    Uncertain,
}

impl PredictionResult {
    /// Label of the favoured side, `None` when uncertain.
    pub fn side(&self) -> Option<&'static str> {
        match self {
            PredictionResult::RadiantWin => Some("Radiant"),
            PredictionResult::DireWin => Some("Dire"),
            PredictionResult::Uncertain => None,
        }
    }
}

/// Bucket of the probability separation, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 80.0 {
            ConfidenceLevel::VeryHigh
        } else if confidence >= 65.0 {
            ConfidenceLevel::High
        } else if confidence >= 50.0 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Fixed blend weights, applied symmetrically to both sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub synergy: f64,
    pub draft:   f64,
    pub meta:    f64,
    pub counter: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self { synergy: 0.35, draft: 0.25, meta: 0.20, counter: 0.20 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAnalysis {
    pub team_label:      String,
    pub roster:          Vec<String>,
    pub synergy_score:   f64,
    pub draft_score:     f64,
    pub meta_score:      f64,
    /// Plain average of the three scores, superseded by the blended probability.
    pub win_probability: f64,
    pub strengths:       Vec<String>,
    pub weaknesses:      Vec<String>,
    pub key_heroes:      Vec<String>,
}

impl TeamAnalysis {
    pub fn is_complete(&self) -> bool {
        self.roster.len() >= FULL_ROSTER
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPrediction {
    pub radiant:                 TeamAnalysis,
    pub dire:                    TeamAnalysis,
    pub result:                  PredictionResult,
    /// |radiant − dire| on the 0–100 scale, not a calibrated probability.
    pub confidence:              f64,
    pub win_probability_radiant: f64,
    pub win_probability_dire:    f64,
    pub key_factors:             Vec<String>,
    pub risk_factors:            Vec<String>,
    pub counter_matchups:        Vec<CounterMatchup>,
}

impl MatchPrediction {
    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_confidence(self.confidence)
    }

    /// Probability of the predicted winner, `None` when uncertain.
    pub fn winner_probability(&self) -> Option<f64> {
        match self.result {
            PredictionResult::RadiantWin => Some(self.win_probability_radiant),
            PredictionResult::DireWin => Some(self.win_probability_dire),
            PredictionResult::Uncertain => None,
        }
    }
}

/// Engine pro predikci výsledků draftu. Catalog je read-only, stav drží jen noise source.
pub struct MatchPredictor<'a, N: NoiseSource = RandomNoise> {
    catalog: &'a Catalog,
    noise:   N,
    weights: Weights,
}

impl<'a, N: NoiseSource> MatchPredictor<'a, N> {
    pub fn new(catalog: &'a Catalog, noise: N) -> Self {
        Self { catalog, noise, weights: Weights::default() }
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Predikuje výsledek ze dvou rosterů. Nikdy nepadá: neznámí hrdinové
    /// přispívají neutrálními hodnotami.
    pub fn predict<S: AsRef<str>>(&mut self, radiant: &[S], dire: &[S]) -> MatchPrediction {
        let rad_members = resolve(self.catalog, radiant);
        let dire_members = resolve(self.catalog, dire);

        let radiant_analysis = analyze_team("Radiant", &rad_members);
        let dire_analysis = analyze_team("Dire", &dire_members);

        let matchups = counter_matchups(&rad_members, &dire_members);
        let counter = counter_score(&rad_members, &dire_members);

        let (rad_prob, dire_prob) = self.probabilities(&radiant_analysis, &dire_analysis, counter);
        let (result, confidence) = determine_result(rad_prob, dire_prob);

        debug!(
            rad_synergy = radiant_analysis.synergy_score,
            rad_draft = radiant_analysis.draft_score,
            rad_meta = radiant_analysis.meta_score,
            dire_synergy = dire_analysis.synergy_score,
            dire_draft = dire_analysis.draft_score,
            dire_meta = dire_analysis.meta_score,
            counter,
            "prediction {:.1}/{:.1} -> {:?}",
            rad_prob, dire_prob, result
        );

        MatchPrediction {
            key_factors: key_factors(&radiant_analysis, &dire_analysis, &matchups),
            risk_factors: risk_factors(&radiant_analysis, &dire_analysis),
            radiant: radiant_analysis,
            dire: dire_analysis,
            result,
            confidence,
            win_probability_radiant: rad_prob,
            win_probability_dire: dire_prob,
            counter_matchups: matchups,
        }
    }

    fn probabilities(&mut self, rad: &TeamAnalysis, dire: &TeamAnalysis, counter: f64) -> (f64, f64) {
        let w = self.weights;
        let weighted = |t: &TeamAnalysis| {
            t.synergy_score * w.synergy + t.draft_score * w.draft + t.meta_score * w.meta
        };

        // Zero-sum: co získá Radiant, ztratí Dire
        let counter_bonus = (counter - 50.0) * w.counter;
        let rad_score = weighted(rad) + counter_bonus;
        let dire_score = weighted(dire) - counter_bonus;

        let total = rad_score + dire_score;
        if total == 0.0 {
            return (50.0, 50.0);
        }

        let mut rad_prob = rad_score / total * 100.0;
        if !rad_prob.is_finite() {
            rad_prob = 50.0;
        }

        let noise = self.noise.next_in_range(-NOISE_AMPLITUDE, NOISE_AMPLITUDE);
        let rad_prob = (rad_prob + noise).clamp(MIN_PROBABILITY, MAX_PROBABILITY);
        (rad_prob, 100.0 - rad_prob)
    }
}

fn analyze_team(label: &str, members: &[Member<'_>]) -> TeamAnalysis {
    let features = classify(members);

    let synergy = synergy_score(members, &features);
    let draft = draft_score(&features);
    let meta = meta_score(members);
    let (strengths, weaknesses) = strengths_and_weaknesses(&features);

    TeamAnalysis {
        team_label:      label.to_string(),
        roster:          members.iter().map(|m| m.name.to_string()).collect(),
        synergy_score:   synergy,
        draft_score:     draft,
        meta_score:      meta,
        win_probability: (synergy + draft + meta) / 3.0,
        strengths,
        weaknesses,
        key_heroes:      key_heroes(members),
    }
}

fn strengths_and_weaknesses(f: &TeamFeatures) -> (Vec<String>, Vec<String>) {
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    if f.has_carry && f.has_initiator {
        strengths.push("Balanced lineup with a carry and an initiator".to_string());
    }
    if f.has_support {
        strengths.push("Sustain in the lineup".to_string());
    }
    if f.has_push {
        strengths.push("Strong push potential".to_string());
    }
    if f.melee_count >= 3 {
        strengths.push("Plenty of melee for teamfights".to_string());
    }

    if !f.has_carry {
        weaknesses.push("No clear carry (late game will be hard)".to_string());
    }
    if !f.has_initiator {
        weaknesses.push("No initiator (hard to start fights)".to_string());
    }
    if !f.has_support {
        weaknesses.push("No healing (relies on regeneration)".to_string());
    }
    if f.ranged_count == 0 {
        weaknesses.push("All melee (trouble in lane)".to_string());
    }

    (strengths, weaknesses)
}

fn key_heroes(members: &[Member<'_>]) -> Vec<String> {
    let mut key = Vec::new();

    for hero in members.iter().filter_map(|m| m.hero) {
        if hero.has_role(Role::Carry) {
            key.push(format!("{} (Carry)", hero.name));
        } else if hero.has_any_role(&[Role::Initiator, Role::Disabler]) {
            key.push(format!("{} (Initiator)", hero.name));
        }

        if TEAMFIGHT_HEROES.contains(&hero.name.as_str()) {
            key.push(format!("{} (Teamfight)", hero.name));
        }
    }

    key.truncate(MAX_KEY_HEROES);
    key
}

fn determine_result(rad_prob: f64, dire_prob: f64) -> (PredictionResult, f64) {
    let diff = (rad_prob - dire_prob).abs();

    let result = if diff < UNCERTAIN_BELOW {
        PredictionResult::Uncertain
    } else if rad_prob > dire_prob {
        PredictionResult::RadiantWin
    } else {
        PredictionResult::DireWin
    };

    (result, diff)
}

fn key_factors(rad: &TeamAnalysis, dire: &TeamAnalysis, matchups: &[CounterMatchup]) -> Vec<String> {
    let mut factors = Vec::new();

    if let Some((side, gap)) = leader(rad.synergy_score, dire.synergy_score) {
        factors.push(format!("Better synergy for {side} (+{gap:.0})"));
    }
    if let Some((side, _)) = leader(rad.meta_score, dire.meta_score) {
        factors.push(format!("{side}'s draft is stronger in the current meta"));
    }
    if let Some((side, gap)) = leader(rad.draft_score, dire.draft_score) {
        factors.push(format!("{side}'s lineup is better balanced (+{gap:.0})"));
    }

    let good = matchups.iter().filter(|m| m.kind == MatchupKind::Good).count();
    let bad = matchups.len() - good;
    if good > 0 {
        factors.push(format!("Radiant has {good} favourable matchup(s)"));
    }
    if bad > 0 {
        factors.push(format!("Dire has {bad} favourable matchup(s)"));
    }

    factors.truncate(MAX_KEY_FACTORS);
    factors
}

/// Side whose score exceeds the other's by more than the threshold.
fn leader(rad: f64, dire: f64) -> Option<(&'static str, f64)> {
    if rad > dire + FACTOR_THRESHOLD {
        Some(("Radiant", rad - dire))
    } else if dire > rad + FACTOR_THRESHOLD {
        Some(("Dire", dire - rad))
    } else {
        None
    }
}

fn risk_factors(rad: &TeamAnalysis, dire: &TeamAnalysis) -> Vec<String> {
    let mut risks = Vec::new();

    for team in [rad, dire] {
        if !team.is_complete() {
            risks.push(format!(
                "{} lineup is incomplete ({}/{})",
                team.team_label,
                team.roster.len(),
                FULL_ROSTER
            ));
        }
    }
    for team in [rad, dire] {
        if team.strengths.is_empty() {
            risks.push(format!("{} has no clear strengths", team.team_label));
        }
    }

    risks
}
