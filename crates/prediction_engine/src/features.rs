//! Role/archetype classifier: coarse boolean features of one roster.

use hero_catalog::{AttackType, Catalog, Hero, Role};

/// Rank used when a hero is unresolved or has no tier.
const DEFAULT_TIER_RANK: f64 = 3.0;

pub const CARRY_ROLES:     &[Role] = &[Role::Carry, Role::Nuker];
pub const INITIATOR_ROLES: &[Role] = &[Role::Initiator, Role::Disabler];
pub const SUPPORT_ROLES:   &[Role] = &[Role::Support, Role::Healer];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamFeatures {
    /// Requested roster length, unresolved names included.
    pub count:              usize,
    pub has_carry:          bool,
    pub has_initiator:      bool,
    pub has_support:        bool,
    pub has_push:           bool,
    pub melee_count:        usize,
    pub ranged_count:       usize,
    /// Average 1–5 tier rank over the requested roster length.
    pub average_tier_score: f64,
}

/// One roster entry: what the caller typed plus its catalog record, if any.
#[derive(Debug, Clone, Copy)]
pub struct Member<'a> {
    pub name: &'a str,
    pub hero: Option<&'a Hero>,
}

pub fn resolve<'a, S: AsRef<str>>(catalog: &'a Catalog, roster: &'a [S]) -> Vec<Member<'a>> {
    roster
        .iter()
        .map(|n| Member { name: n.as_ref(), hero: catalog.lookup(n.as_ref()) })
        .collect()
}

pub fn classify(members: &[Member<'_>]) -> TeamFeatures {
    let mut features = TeamFeatures { count: members.len(), ..TeamFeatures::default() };
    if members.is_empty() {
        return features;
    }

    let mut tier_total = 0.0;

    for member in members {
        let Some(hero) = member.hero else {
            tier_total += DEFAULT_TIER_RANK;
            continue;
        };

        features.has_carry     |= hero.has_any_role(CARRY_ROLES);
        features.has_initiator |= hero.has_any_role(INITIATOR_ROLES);
        features.has_support   |= hero.has_any_role(SUPPORT_ROLES);
        features.has_push      |= hero.has_role(Role::Pusher);

        match hero.attack_type {
            AttackType::Melee  => features.melee_count += 1,
            AttackType::Ranged => features.ranged_count += 1,
        }

        tier_total += hero.tier().map_or(DEFAULT_TIER_RANK, |t| f64::from(t.rank()));
    }

    features.average_tier_score = tier_total / members.len() as f64;
    features
}
