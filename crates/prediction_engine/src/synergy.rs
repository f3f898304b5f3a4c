//! Synergy scorer: fixed pair tables plus role-balance adjustments.

use crate::features::{Member, TeamFeatures, CARRY_ROLES};
use hero_catalog::{normalize, Attribute, AttackType, Role};

pub const NEUTRAL_SCORE: f64 = 50.0;
const BALANCE_BONUS: f64 = 10.0;
const NO_CARRY_PENALTY: f64 = 20.0;

/// Jedna strana pravidla: konkrétní hero id nebo archetyp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Hero(&'static str),
    /// Melee hero with the Carry role.
    MeleeCarry,
    /// Melee hero with Carry or Nuker.
    MeleeCore,
    /// Intelligence primary attribute.
    ManaHungry,
    Pusher,
    /// Initiator or Disabler.
    Teamfight,
    /// Tempo of the game is not a hero attribute, never matches.
    FastGame,
}

impl Pattern {
    pub fn matches(self, member: &Member<'_>) -> bool {
        if let Pattern::Hero(id) = self {
            return normalize(member.name) == id || member.hero.map_or(false, |h| h.id == id);
        }

        let Some(hero) = member.hero else {
            return false;
        };
        match self {
            Pattern::Hero(_)    => false,
            Pattern::MeleeCarry => hero.attack_type == AttackType::Melee && hero.has_role(Role::Carry),
            Pattern::MeleeCore  => hero.attack_type == AttackType::Melee && hero.has_any_role(CARRY_ROLES),
            Pattern::ManaHungry => hero.primary_attr == Attribute::Int,
            Pattern::Pusher     => hero.has_role(Role::Pusher),
            Pattern::Teamfight  => hero.has_any_role(&[Role::Initiator, Role::Disabler]),
            Pattern::FastGame   => false,
        }
    }

    fn present_in(self, members: &[Member<'_>]) -> bool {
        members.iter().any(|m| self.matches(m))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairRule {
    pub a:     Pattern,
    pub b:     Pattern,
    pub bonus: f64,
}

const fn rule(a: Pattern, b: Pattern, bonus: f64) -> PairRule {
    PairRule { a, b, bonus }
}

pub const SYNERGIES: &[PairRule] = &[
    rule(Pattern::Hero("slardar"),        Pattern::Hero("spectre"), 15.0),
    rule(Pattern::Hero("dazzle"),         Pattern::Hero("axe"),     12.0),
    rule(Pattern::Hero("magnus"),         Pattern::MeleeCarry,      10.0),
    rule(Pattern::Hero("dark_seer"),      Pattern::MeleeCarry,      10.0),
    rule(Pattern::Hero("crystal_maiden"), Pattern::ManaHungry,       8.0),
    rule(Pattern::Hero("omniknight"),     Pattern::MeleeCore,        8.0),
    rule(Pattern::Hero("shadow_shaman"),  Pattern::Pusher,          10.0),
    rule(Pattern::Hero("lich"),           Pattern::Teamfight,        8.0),
];

pub const ANTISYNERGIES: &[PairRule] = &[
    rule(Pattern::Hero("anti_mage"), Pattern::Hero("medusa"), -10.0),
    rule(Pattern::Hero("invoker"),   Pattern::Hero("meepo"),   -8.0),
    rule(Pattern::Hero("techies"),   Pattern::FastGame,       -15.0),
];

/// Sum of table bonuses/penalties whose both sides are present in the roster.
/// Pairs are unordered; "present" is symmetric so one check covers both orderings.
pub fn pair_adjustment(members: &[Member<'_>]) -> f64 {
    SYNERGIES
        .iter()
        .chain(ANTISYNERGIES)
        .filter(|r| r.a.present_in(members) && r.b.present_in(members))
        .map(|r| r.bonus)
        .sum()
}

pub fn synergy_score(members: &[Member<'_>], features: &TeamFeatures) -> f64 {
    if members.len() < 2 {
        return NEUTRAL_SCORE;
    }

    let mut score = NEUTRAL_SCORE + pair_adjustment(members);

    // carry + initiator, support bonus se nestackuje
    if features.has_carry && features.has_initiator {
        score += BALANCE_BONUS;
    }
    if !features.has_carry {
        score -= NO_CARRY_PENALTY;
    }

    score.clamp(0.0, 100.0)
}
