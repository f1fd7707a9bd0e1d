use rand::Rng;
use rand::RngCore;
use rand::seq::SliceRandom;

use super::helpers::pick;
use crate::model::{BehaviorCategory, World};

const AGENT_STEMS: &[&str] = &[
    "Aru", "Bex", "Cira", "Dov", "Elo", "Fen", "Gal", "Hiro", "Isk", "Jun", "Kel", "Lio", "Mira",
    "Nox", "Oru", "Pell", "Quin", "Rho", "Sefa", "Tam", "Ulo", "Vix", "Wren", "Yara", "Zed",
];

/// Agent display name: "{Stem}-{category initial}{id}".
pub fn generate_agent_name(category: BehaviorCategory, id: u64, rng: &mut dyn RngCore) -> String {
    let stem = pick(AGENT_STEMS, rng);
    let initial = category
        .as_str()
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('X');
    format!("{stem}-{initial}{id}")
}

const COALITION_PREFIXES: &[&str] = &[
    "Amber", "Azure", "Bright", "Cobalt", "Ember", "Golden", "Hollow", "Ivory", "Jade", "Lunar",
    "Northern", "Quiet", "Rising", "Silver", "Verdant", "Woven",
];

const COALITION_TYPES: &[&str] = &[
    "Accord", "Alliance", "Assembly", "Circle", "Collective", "Compact", "Concord", "Council",
    "Covenant", "Guild", "League", "Union",
];

fn coalition_name(rng: &mut dyn RngCore) -> String {
    let prefix = pick(COALITION_PREFIXES, rng);
    let kind = pick(COALITION_TYPES, rng);
    format!("The {prefix} {kind}")
}

/// Generate a coalition name unique among living coalitions.
/// Falls back to a numeric suffix after 5 attempts.
pub fn generate_coalition_name(world: &World, rng: &mut dyn RngCore) -> String {
    for _ in 0..5 {
        let name = coalition_name(rng);
        if !world.coalitions.values().any(|c| c.name == name) {
            return name;
        }
    }
    let base = coalition_name(rng);
    format!("{base} {}", world.coalitions.len() + 1)
}

const GOALS: &[&str] = &[
    "mutual_protection",
    "resource_sharing",
    "knowledge_exchange",
    "territorial_expansion",
    "cultural_preservation",
    "innovation_pursuit",
    "collective_decision_making",
    "conflict_mediation",
];

/// Between 3 and 5 distinct goals.
pub fn generate_goals(rng: &mut dyn RngCore) -> Vec<String> {
    let count = rng.random_range(3..=5);
    let mut pool: Vec<&str> = GOALS.to_vec();
    pool.shuffle(rng);
    pool.into_iter().take(count).map(String::from).collect()
}

const STRATEGIES: &[&str] = &[
    "distributed_leadership",
    "rapid_consensus",
    "resource_pooling",
    "scout_networks",
    "ritual_bonding",
    "skill_specialization",
];

/// Two distinct adaptation strategies.
pub fn generate_strategies(rng: &mut dyn RngCore) -> Vec<String> {
    let mut pool: Vec<&str> = STRATEGIES.to_vec();
    pool.shuffle(rng);
    pool.into_iter().take(2).map(String::from).collect()
}

pub const NORMS: &[&str] = &[
    "reciprocity",
    "elder_respect",
    "open_debate",
    "shared_harvest",
    "craft_pride",
    "wanderlust",
    "hospitality",
    "consensus_first",
];

pub const KNOWLEDGE: &[&str] = &[
    "fire_keeping",
    "tool_making",
    "seasonal_tracking",
    "trail_mapping",
    "food_storage",
    "conflict_rituals",
    "signal_language",
    "shelter_design",
    "herbal_remedies",
    "counting_marks",
    "weaving",
    "water_finding",
];
