//! Draft quality a meta score jedné strany.

use crate::features::{Member, TeamFeatures};
use crate::synergy::NEUTRAL_SCORE;

pub const FULL_ROSTER: usize = 5;
/// Meta points for unresolved heroes and heroes without a tier.
const NEUTRAL_META_POINTS: f64 = 50.0;

/// Rewards role balance, penalises missing carry and incomplete rosters.
pub fn draft_score(features: &TeamFeatures) -> f64 {
    if features.count < 2 {
        return NEUTRAL_SCORE;
    }

    let mut score = NEUTRAL_SCORE;

    if features.has_carry && features.has_initiator {
        score += 15.0;
    }
    if features.melee_count > 0 && features.ranged_count > 0 {
        score += 10.0;
    }
    if features.has_support {
        score += 10.0;
    }
    if features.has_push {
        score += 5.0;
    }
    if !features.has_carry {
        score -= 20.0;
    }
    if features.count < FULL_ROSTER {
        score -= (FULL_ROSTER - features.count) as f64 * 10.0;
    }

    score.clamp(0.0, 100.0)
}

/// Average tier points over the requested roster length, 0 for an empty roster.
pub fn meta_score(members: &[Member<'_>]) -> f64 {
    if members.is_empty() {
        return 0.0;
    }

    let total: f64 = members
        .iter()
        .map(|m| {
            m.hero
                .and_then(|h| h.tier())
                .map_or(NEUTRAL_META_POINTS, |t| t.meta_points())
        })
        .sum();

    (total / members.len() as f64).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{classify, resolve};
    use hero_catalog::{AttackType, Attribute, Catalog, Hero, Role, Tier};

    fn catalog() -> Catalog {
        Catalog::builder()
            .add(Hero::new("sven", "Sven", Attribute::Str, AttackType::Melee, &[Role::Carry, Role::Disabler]).with_tier(Tier::S))
            .add(Hero::new("dazzle", "Dazzle", Attribute::Int, AttackType::Ranged, &[Role::Support, Role::Healer]).with_tier(Tier::D))
            .add(Hero::new("shaman", "Shadow Shaman", Attribute::Int, AttackType::Ranged, &[Role::Support, Role::Pusher]))
            .add(Hero::new("cm", "Crystal Maiden", Attribute::Int, AttackType::Ranged, &[Role::Support]))
            .build()
            .unwrap()
    }

    fn draft(catalog: &Catalog, roster: &[&str]) -> f64 {
        draft_score(&classify(&resolve(catalog, roster)))
    }

    #[test]
    fn short_rosters_are_neutral() {
        let catalog = catalog();
        assert_eq!(draft(&catalog, &[]), 50.0);
        assert_eq!(draft(&catalog, &["sven"]), 50.0);
    }

    #[test]
    fn balanced_full_roster_caps_at_100() {
        let catalog = catalog();
        let roster = ["sven", "dazzle", "shadow shaman", "cm", "sven"];
        // 50 + 15 + 10 + 10 + 5 = 90, full roster, no penalty
        assert_eq!(draft(&catalog, &roster), 90.0);
    }

    #[test]
    fn incomplete_roster_penalty_is_proportional() {
        let catalog = catalog();
        // 50 + 15 + 10 + 10 - 3 * 10
        assert_eq!(draft(&catalog, &["sven", "dazzle"]), 55.0);
    }

    #[test]
    fn no_carry_penalty_stacks_and_clamps() {
        let catalog = catalog();
        // 50 + 10 (support) - 20 - 30
        assert_eq!(draft(&catalog, &["dazzle", "cm"]), 10.0);
        // unresolved: 50 - 20 - 30
        assert_eq!(draft(&catalog, &["foo", "bar"]), 0.0);
    }

    #[test]
    fn meta_averages_over_requested_length() {
        let catalog = catalog();
        assert_eq!(meta_score(&resolve(&catalog, &["sven", "dazzle"])), 70.0);
        // S, no tier, unresolved
        assert_eq!(meta_score(&resolve(&catalog, &["sven", "cm", "nobody"])), 200.0 / 3.0);
        assert_eq!(meta_score(&resolve(&catalog, &[] as &[&str])), 0.0);
    }
}
