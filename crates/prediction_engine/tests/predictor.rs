use hero_catalog::{builtin, AttackType, Attribute, Catalog, Hero, Role, Tier};
use prediction_engine::{
    FixedNoise, MatchPredictor, MatchupKind, PredictionResult, RandomNoise, Weights,
};

/// Two sides far apart on every component, with one counter hit each way.
fn lopsided_catalog() -> Catalog {
    Catalog::builder()
        .add(
            Hero::new("alpha", "Alpha", Attribute::Str, AttackType::Melee, &[Role::Carry, Role::Initiator])
                .with_tier(Tier::S)
                .with_weak_against(&["Delta"]),
        )
        .add(
            Hero::new("beta", "Beta", Attribute::Int, AttackType::Ranged, &[Role::Support, Role::Pusher])
                .with_tier(Tier::S),
        )
        .add(
            Hero::new("gamma", "Gamma", Attribute::Agi, AttackType::Melee, &[Role::Durable])
                .with_tier(Tier::D)
                .with_weak_against(&["Alpha"]),
        )
        .add(
            Hero::new("delta", "Delta", Attribute::Agi, AttackType::Melee, &[Role::Durable])
                .with_tier(Tier::D),
        )
        .build()
        .unwrap()
}

fn deterministic(catalog: &Catalog) -> MatchPredictor<'_, FixedNoise> {
    MatchPredictor::new(catalog, FixedNoise::zero())
}

/// Catalog whose role tags match the classic "carry vs supports" scenario.
fn scenario_catalog() -> Catalog {
    Catalog::builder()
        .add(
            Hero::new("slardar", "Slardar", Attribute::Str, AttackType::Melee,
                &[Role::Carry, Role::Durable, Role::Initiator, Role::Disabler, Role::Escape])
                .with_tier(Tier::B),
        )
        .add(
            Hero::new("spectre", "Spectre", Attribute::Agi, AttackType::Melee,
                &[Role::Carry, Role::Durable, Role::Escape])
                .with_tier(Tier::A),
        )
        .add(
            Hero::new("lich", "Lich", Attribute::Int, AttackType::Ranged, &[Role::Support, Role::Disabler])
                .with_tier(Tier::A),
        )
        .add(
            Hero::new("lion", "Lion", Attribute::Int, AttackType::Ranged,
                &[Role::Support, Role::Disabler, Role::Initiator])
                .with_tier(Tier::B),
        )
        .build()
        .unwrap()
}

#[test]
fn empty_rosters_are_an_even_uncertain_match() {
    let catalog = builtin();
    let none: [&str; 0] = [];
    // Uncertain only with noise pinned to 0; a +3 draw would read 53/47 and pick Radiant.
    let p = deterministic(catalog).predict(&none, &none);

    assert_eq!(p.result, PredictionResult::Uncertain);
    assert_eq!(p.confidence, 0.0);
    assert_eq!(p.win_probability_radiant, 50.0);
    assert_eq!(p.win_probability_dire, 50.0);
    assert_eq!(p.radiant.synergy_score, 50.0);
    assert_eq!(p.radiant.meta_score, 0.0);
    assert!(p.counter_matchups.is_empty());
}

#[test]
fn single_hero_roster_has_neutral_synergy() {
    let p = deterministic(builtin()).predict(&["Slardar"], &["lion", "lich"]);
    assert_eq!(p.radiant.synergy_score, 50.0);
    assert_eq!(p.radiant.draft_score, 50.0);
}

#[test]
fn unresolved_names_score_symmetrically() {
    let p = deterministic(builtin()).predict(&["not_a_real_hero_xyz"], &["not_a_real_hero_xyz"]);

    assert_eq!(p.radiant.synergy_score, p.dire.synergy_score);
    assert_eq!(p.radiant.draft_score, p.dire.draft_score);
    assert_eq!(p.radiant.meta_score, 50.0);
    assert_eq!(p.dire.meta_score, 50.0);
    assert_eq!(p.win_probability_radiant, 50.0);
    assert_eq!(p.result, PredictionResult::Uncertain);
    assert!(p.radiant.key_heroes.is_empty());
}

#[test]
fn counter_matchup_sign_follows_direction() {
    let catalog = builtin();

    let forward = deterministic(catalog).predict(&["kez"], &["phantom lancer"]);
    assert_eq!(forward.counter_matchups.len(), 1);
    assert_eq!(forward.counter_matchups[0].kind, MatchupKind::Bad);
    assert_eq!(forward.counter_matchups[0].text, "Kez is weak against Phantom Lancer");
    assert!(forward.win_probability_radiant < 50.0);

    let reverse = deterministic(catalog).predict(&["phantom lancer"], &["kez"]);
    assert_eq!(reverse.counter_matchups[0].kind, MatchupKind::Good);
    assert_eq!(reverse.counter_matchups[0].text, "Phantom Lancer is strong against Kez");
    assert!(reverse.win_probability_radiant > 50.0);
}

#[test]
fn seeded_noise_is_reproducible() {
    let catalog = builtin();
    let radiant = ["kez", "slardar", "lich", "shadow shaman", "void spirit"];
    let dire = ["muerta", "ember spirit", "tidehunter", "lion", "anti-mage"];

    let a = MatchPredictor::new(catalog, RandomNoise::seeded(99)).predict(&radiant, &dire);
    let b = MatchPredictor::new(catalog, RandomNoise::seeded(99)).predict(&radiant, &dire);
    assert_eq!(a, b);
}

#[test]
fn probabilities_are_complementary_and_clamped() {
    let catalog = builtin();
    let pool: Vec<&str> = catalog
        .all()
        .iter()
        .map(|h| h.id.as_str())
        .chain(["ghost", "axe"])
        .collect();
    let mut predictor = MatchPredictor::new(catalog, RandomNoise::seeded(7));

    for start in 0..pool.len() {
        for len in 0..=5 {
            let radiant: Vec<&str> = pool.iter().cycle().skip(start).take(len).copied().collect();
            let dire: Vec<&str> = pool.iter().cycle().skip(start + 3).take(5 - len).copied().collect();
            let p = predictor.predict(&radiant, &dire);

            let sum = p.win_probability_radiant + p.win_probability_dire;
            assert!((sum - 100.0).abs() < 1e-9, "sum {sum}");
            assert!((5.0..=95.0).contains(&p.win_probability_radiant));
            assert!((5.0..=95.0).contains(&p.win_probability_dire));
            for team in [&p.radiant, &p.dire] {
                for score in [team.synergy_score, team.draft_score, team.meta_score] {
                    assert!((0.0..=100.0).contains(&score));
                }
            }
            assert!(p.counter_matchups.len() <= 5);
            assert!(p.key_factors.len() <= 4);
            assert!((p.confidence - (p.win_probability_radiant - p.win_probability_dire).abs()).abs() < 1e-9);
        }
    }
}

#[test]
fn synergy_pair_is_order_independent() {
    let catalog = builtin();
    let a = deterministic(catalog).predict(&["dazzle", "axe"], &["lich"]);
    let b = deterministic(catalog).predict(&["axe", "dazzle"], &["lich"]);
    // 50 + 12, no resolvable carry -20
    assert_eq!(a.radiant.synergy_score, 42.0);
    assert_eq!(a.radiant.synergy_score, b.radiant.synergy_score);
}

#[test]
fn carry_lineup_beats_support_lineup() {
    let catalog = scenario_catalog();
    let radiant = ["Slardar", "Spectre"];
    let dire = ["Lich", "Lion"];

    let p = deterministic(&catalog).predict(&radiant, &dire);
    assert_eq!(p.radiant.synergy_score, 75.0);
    assert_eq!(p.radiant.draft_score, 35.0);
    assert_eq!(p.dire.synergy_score, 38.0);
    assert_eq!(p.dire.draft_score, 10.0);
    assert!(p.radiant.draft_score > p.dire.draft_score);
    assert_eq!(p.result, PredictionResult::RadiantWin);

    for seed in 0..20 {
        let noisy = MatchPredictor::new(&catalog, RandomNoise::seeded(seed)).predict(&radiant, &dire);
        assert_eq!(noisy.result, PredictionResult::RadiantWin, "seed {seed}");
    }
}

#[test]
fn builtin_catalog_counts_nuker_supports_as_carry() {
    // Lich and Lion carry the Nuker tag, so Dire avoids the no-carry penalty here.
    let p = deterministic(builtin()).predict(&["Slardar", "Spectre"], &["Lich", "Lion"]);
    assert_eq!(p.radiant.draft_score, 35.0);
    assert_eq!(p.dire.draft_score, 45.0);
    assert!(!p.dire.weaknesses.iter().any(|w| w.starts_with("No clear carry")));
}

#[test]
fn team_analysis_summaries() {
    let p = deterministic(builtin()).predict(
        &["kez", "slardar", "lich", "shadow shaman", "tidehunter"],
        &["lion"],
    );

    assert_eq!(p.radiant.roster.len(), 5);
    assert_eq!(p.radiant.key_heroes, vec!["Kez (Carry)", "Slardar (Carry)", "Lich (Initiator)"]);
    assert!(p.radiant.strengths.contains(&"Balanced lineup with a carry and an initiator".to_string()));
    assert!(p.radiant.strengths.contains(&"Strong push potential".to_string()));
    let avg = (p.radiant.synergy_score + p.radiant.draft_score + p.radiant.meta_score) / 3.0;
    assert!((p.radiant.win_probability - avg).abs() < 1e-9);

    assert_eq!(p.risk_factors, vec!["Dire lineup is incomplete (1/5)".to_string()]);
    assert!(p.key_factors.iter().any(|f| f.starts_with("Radiant's lineup is better balanced")));
}

#[test]
fn custom_weights_are_applied_symmetrically() {
    let catalog = builtin();
    let weights = Weights { synergy: 0.0, draft: 0.0, meta: 1.0, counter: 0.0 };
    let p = MatchPredictor::new(catalog, FixedNoise::zero())
        .with_weights(weights)
        .predict(&["ember spirit"], &["lion"]);

    // meta only: S (100) vs B (70)
    assert!((p.win_probability_radiant - 100.0 / 170.0 * 100.0).abs() < 1e-9);
    assert_eq!(p.result, PredictionResult::RadiantWin);
}

#[test]
fn gap_factors_come_first_and_list_is_capped() {
    let catalog = lopsided_catalog();
    let p = deterministic(&catalog).predict(&["alpha", "beta"], &["gamma", "delta"]);

    assert_eq!(p.radiant.synergy_score, 60.0);
    assert_eq!(p.dire.synergy_score, 30.0);
    assert_eq!(p.radiant.draft_score, 60.0);
    assert_eq!(p.dire.draft_score, 0.0);
    assert_eq!(p.radiant.meta_score, 100.0);
    assert_eq!(p.dire.meta_score, 40.0);
    assert_eq!(p.counter_matchups.len(), 2);

    // Five factors fire, the Dire counter line falls off the end.
    assert_eq!(
        p.key_factors,
        vec![
            "Better synergy for Radiant (+30)",
            "Radiant's draft is stronger in the current meta",
            "Radiant's lineup is better balanced (+60)",
            "Radiant has 1 favourable matchup(s)",
        ]
    );
}

#[test]
fn team_without_strengths_is_a_risk() {
    let catalog = lopsided_catalog();
    let p = deterministic(&catalog).predict(&["alpha", "beta"], &["gamma", "delta"]);

    assert!(p.dire.strengths.is_empty());
    assert_eq!(
        p.risk_factors,
        vec![
            "Radiant lineup is incomplete (2/5)",
            "Dire lineup is incomplete (2/5)",
            "Dire has no clear strengths",
        ]
    );
}

#[test]
fn counter_counts_become_factors_for_each_side() {
    let catalog = builtin();

    let home = deterministic(catalog).predict(&["phantom lancer", "kez", "anti-mage"], &["kez", "slardar"]);
    assert_eq!(home.key_factors, vec!["Radiant has 2 favourable matchup(s)"]);

    let away = deterministic(catalog).predict(&["kez", "slardar"], &["phantom lancer", "kez", "anti-mage"]);
    assert_eq!(away.key_factors, vec!["Dire has 2 favourable matchup(s)"]);
    assert!(away.counter_matchups.iter().all(|m| m.kind == MatchupKind::Bad));
}

#[test]
fn prediction_serializes_with_wire_labels() {
    let catalog = lopsided_catalog();
    let p = deterministic(&catalog).predict(&["alpha", "beta"], &["gamma", "delta"]);
    assert_eq!(p.result, PredictionResult::RadiantWin);

    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json["result"], "radiant_win");
    assert_eq!(json["counter_matchups"][0]["type"], "good");
    assert_eq!(json["counter_matchups"][0]["text"], "Alpha is strong against Gamma");
    assert_eq!(json["counter_matchups"][1]["type"], "bad");
    assert_eq!(json["radiant"]["team_label"], "Radiant");
}
