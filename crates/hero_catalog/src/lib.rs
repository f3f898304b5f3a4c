/// DotaCounterBot: Hero Catalog
///
/// Read-only hero knowledge base: roles, attack type, counters, builds, tiers.
/// Built once at startup (embedded JSON), queried only through lookup/search.

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::debug;

const BUILTIN_HEROES_JSON: &str = include_str!("../data/heroes.json");

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    CatalogBuilder::from_json(BUILTIN_HEROES_JSON)
        .and_then(CatalogBuilder::build)
        .expect("embedded hero data must be valid")
});

/// Process-wide catalog z embedded dat. Corrupt data = programmer error, padá hned při prvním přístupu.
pub fn builtin() -> &'static Catalog {
    &BUILTIN
}

// ── Hero model ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Str,
    Agi,
    Int,
    Universal,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Attribute::Str       => "STR",
            Attribute::Agi       => "AGI",
            Attribute::Int       => "INT",
            Attribute::Universal => "UNIVERSAL",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackType {
    Melee,
    Ranged,
}

impl fmt::Display for AttackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackType::Melee  => f.write_str("Melee"),
            AttackType::Ranged => f.write_str("Ranged"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Carry,
    Support,
    Nuker,
    Disabler,
    Initiator,
    Durable,
    Escape,
    Pusher,
    Jungler,
    Healer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Letter grade of current competitive strength, S best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    S,
    A,
    B,
    C,
    D,
}

impl Tier {
    /// Numeric meta score on the 0–100 scale.
    pub fn meta_points(self) -> f64 {
        match self {
            Tier::S => 100.0,
            Tier::A => 85.0,
            Tier::B => 70.0,
            Tier::C => 55.0,
            Tier::D => 40.0,
        }
    }

    /// Coarse 1–5 rank.
    pub fn rank(self) -> u8 {
        match self {
            Tier::S => 5,
            Tier::A => 4,
            Tier::B => 3,
            Tier::C => 2,
            Tier::D => 1,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroCounters {
    #[serde(default)]
    pub strong_against: Vec<String>,
    /// Display names this hero has an unfavourable matchup against. Directional.
    #[serde(default)]
    pub weak_against:   Vec<String>,
    #[serde(default)]
    pub counter_items:  Vec<String>,
    #[serde(default)]
    pub core_items:     Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroBuild {
    #[serde(default)]
    pub starting_items: Vec<String>,
    #[serde(default)]
    pub early_game:     Vec<String>,
    #[serde(default)]
    pub mid_game:       Vec<String>,
    #[serde(default)]
    pub late_game:      Vec<String>,
    #[serde(default)]
    pub situational:    Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroStats {
    pub win_rate:  Option<f64>,
    pub pick_rate: Option<f64>,
    pub tier:      Option<Tier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id:             String,
    pub name:           String,
    #[serde(default)]
    pub localized_name: Option<String>,
    #[serde(default)]
    pub opendota_id:    Option<u32>,
    pub primary_attr:   Attribute,
    pub attack_type:    AttackType,
    pub roles:          Vec<Role>,
    #[serde(default)]
    pub description:    String,
    #[serde(default)]
    pub strengths:      Vec<String>,
    #[serde(default)]
    pub weaknesses:     Vec<String>,
    #[serde(default)]
    pub counters:       HeroCounters,
    #[serde(default)]
    pub build:          Option<HeroBuild>,
    #[serde(default)]
    pub stats:          Option<HeroStats>,
}

impl Hero {
    /// Minimal record, zbytek přes with_* buildery.
    pub fn new(
        id: &str,
        name: &str,
        primary_attr: Attribute,
        attack_type: AttackType,
        roles: &[Role],
    ) -> Self {
        Self {
            id:             id.to_string(),
            name:           name.to_string(),
            localized_name: None,
            opendota_id:    None,
            primary_attr,
            attack_type,
            roles:          roles.to_vec(),
            description:    String::new(),
            strengths:      Vec::new(),
            weaknesses:     Vec::new(),
            counters:       HeroCounters::default(),
            build:          None,
            stats:          None,
        }
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.stats.get_or_insert_with(HeroStats::default).tier = Some(tier);
        self
    }

    pub fn with_weak_against(mut self, names: &[&str]) -> Self {
        self.counters.weak_against = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.has_role(*r))
    }

    pub fn main_role(&self) -> Option<Role> {
        self.roles.first().copied()
    }

    pub fn tier(&self) -> Option<Tier> {
        self.stats.as_ref().and_then(|s| s.tier)
    }

    /// Case-insensitive membership in `weak_against`.
    pub fn is_weak_against(&self, other_name: &str) -> bool {
        self.counters
            .weak_against
            .iter()
            .any(|w| w.eq_ignore_ascii_case(other_name))
    }
}

/// Canonical alias key: trim, lowercase, spaces and hyphens → `_`.
pub fn normalize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

// ── Catalog ──────────────────────────────────────────────────────────────────

/// Immutable hero catalog. Safe for unlimited concurrent readers.
#[derive(Debug, Clone)]
pub struct Catalog {
    heroes:  Vec<Hero>,
    aliases: HashMap<String, usize>,
}

impl Catalog {
    pub fn builtin() -> &'static Catalog {
        builtin()
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Case/space/hyphen-insensitive lookup by id, display name or localized name.
    pub fn lookup(&self, name: &str) -> Option<&Hero> {
        self.aliases.get(&normalize(name)).map(|&idx| &self.heroes[idx])
    }

    /// Substring search for suggestions, catalog order, at most `limit` hits.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&Hero> {
        let query = query.trim().to_lowercase();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut matches = Vec::new();
        for hero in &self.heroes {
            let name = hero.name.to_lowercase();
            let terms = [
                hero.id.clone(),
                name.replace(' ', ""),
                name.replace('-', ""),
                hero.localized_name.as_deref().map(str::to_lowercase).unwrap_or_default(),
                name,
            ];

            if terms.iter().any(|t| !t.is_empty() && t.contains(&query)) {
                matches.push(hero);
                if matches.len() >= limit {
                    break;
                }
            }
        }
        matches
    }

    pub fn all(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}

/// Builder, jediné místo kde se katalog mutuje.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    heroes: Vec<Hero>,
}

impl CatalogBuilder {
    pub fn add(mut self, hero: Hero) -> Self {
        self.heroes.push(hero);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let heroes: Vec<Hero> = serde_json::from_str(json).context("Failed to parse hero data")?;
        Ok(Self { heroes })
    }

    pub fn build(self) -> Result<Catalog> {
        let mut ids = HashSet::new();
        let mut aliases = HashMap::new();

        for (idx, hero) in self.heroes.iter().enumerate() {
            if hero.id.trim().is_empty() || hero.name.trim().is_empty() {
                bail!("hero #{idx} has an empty id or name");
            }
            if hero.roles.is_empty() {
                bail!("hero '{}' has no roles", hero.id);
            }
            if !ids.insert(hero.id.clone()) {
                bail!("duplicate hero id '{}'", hero.id);
            }

            let mut keys = vec![normalize(&hero.id), normalize(&hero.name)];
            if let Some(loc) = &hero.localized_name {
                keys.push(normalize(loc));
            }
            for key in keys {
                // První hero s daným aliasem vyhrává
                aliases.entry(key).or_insert(idx);
            }
        }

        debug!("Hero catalog built: {} heroes, {} aliases", self.heroes.len(), aliases.len());
        Ok(Catalog { heroes: self.heroes, aliases })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads_all_heroes() {
        let catalog = builtin();
        assert_eq!(catalog.len(), 11);
        assert_eq!(catalog.all()[0].id, "kez");
        assert!(std::ptr::eq(catalog, Catalog::builtin()));
    }

    #[test]
    fn lookup_ignores_case_spaces_and_hyphens() {
        let catalog = builtin();
        assert_eq!(catalog.lookup("Anti-Mage").map(|h| h.id.as_str()), Some("anti_mage"));
        assert_eq!(catalog.lookup("  SHADOW shaman ").map(|h| h.id.as_str()), Some("shadow_shaman"));
        assert_eq!(catalog.lookup("void-spirit").map(|h| h.id.as_str()), Some("void_spirit"));
        assert!(catalog.lookup("not_a_real_hero_xyz").is_none());
    }

    #[test]
    fn search_matches_substrings_and_respects_limit() {
        let catalog = builtin();
        let spirits: Vec<_> = catalog.search("spirit", 5).iter().map(|h| h.id.as_str()).collect();
        assert_eq!(spirits, vec!["void_spirit", "ember_spirit"]);

        assert_eq!(catalog.search("a", 2).len(), 2);
        assert!(catalog.search("   ", 5).is_empty());
        assert_eq!(catalog.search("antimage", 5)[0].id, "anti_mage");
    }

    #[test]
    fn builtin_data_carries_tiers_and_counters() {
        let slardar = builtin().lookup("slardar").unwrap();
        assert_eq!(slardar.tier(), Some(Tier::B));
        assert_eq!(slardar.attack_type, AttackType::Melee);
        assert!(slardar.is_weak_against("phantom lancer"));
        assert!(!slardar.is_weak_against("Lich"));
        assert_eq!(slardar.main_role(), Some(Role::Carry));
    }

    #[test]
    fn build_rejects_duplicate_ids_and_empty_roles() {
        let dup = Catalog::builder()
            .add(Hero::new("axe", "Axe", Attribute::Str, AttackType::Melee, &[Role::Initiator]))
            .add(Hero::new("axe", "Axe", Attribute::Str, AttackType::Melee, &[Role::Initiator]))
            .build();
        assert!(dup.is_err());

        let no_roles = Catalog::builder()
            .add(Hero::new("axe", "Axe", Attribute::Str, AttackType::Melee, &[]))
            .build();
        assert!(no_roles.is_err());
    }

    #[test]
    fn malformed_json_fails_at_load_time() {
        assert!(CatalogBuilder::from_json(r#"[{"id": "x"}]"#).is_err());
        let unknown_role = r#"[{"id":"x","name":"X","primary_attr":"str","attack_type":"Melee","roles":["Tank"]}]"#;
        assert!(CatalogBuilder::from_json(unknown_role).is_err());
    }

    #[test]
    fn tier_mappings() {
        assert_eq!(Tier::S.meta_points(), 100.0);
        assert_eq!(Tier::D.meta_points(), 40.0);
        assert_eq!(Tier::B.rank(), 3);
    }
}
