#![allow(dead_code)]

use std::collections::BTreeMap;

use primatom_sim::model::*;
use primatom_sim::{SimParams, Simulation, SimulationState};

/// Seeded simulation with default parameters.
pub fn seeded_sim(seed: u64) -> Simulation {
    Simulation::new(SimParams::seeded(seed)).unwrap()
}

/// Seeded simulation whose coalitions form readily, so short runs
/// exercise formation, crisis response, and dissolution.
pub fn lively_sim(seed: u64) -> Simulation {
    let params = SimParams {
        formation_chance: 0.5,
        alliance_threshold: 55.0,
        ..SimParams::seeded(seed)
    };
    Simulation::new(params).unwrap()
}

pub fn category_counts(state: &SimulationState) -> BTreeMap<BehaviorCategory, usize> {
    let mut counts = BTreeMap::new();
    for agent in &state.agents {
        *counts.entry(agent.category).or_insert(0) += 1;
    }
    counts
}

pub fn mean_trust(state: &SimulationState) -> f64 {
    if state.agents.is_empty() {
        return 0.0;
    }
    state.agents.iter().map(|a| a.traits.trust()).sum::<f64>() / state.agents.len() as f64
}

/// Bounds and bidirectional membership that must hold after every tick.
pub fn assert_invariants(state: &SimulationState) {
    let coalitions: BTreeMap<_, _> = state.coalitions.iter().map(|c| (c.id, c)).collect();
    for agent in &state.agents {
        for kind in TraitKind::ALL {
            let v = agent.traits.get(*kind);
            assert!((0.0..=100.0).contains(&v), "{} {kind} = {v}", agent.id);
        }
        for (other, s) in agent.relationships.iter() {
            assert!((0.0..=100.0).contains(&s), "{} -> {other} = {s}", agent.id);
        }
        if let Some(cid) = agent.coalition {
            let coalition = coalitions
                .get(&cid)
                .unwrap_or_else(|| panic!("{} points at dead {cid}", agent.id));
            assert!(coalition.contains(agent.id));
        }
    }
    for coalition in &state.coalitions {
        assert!((0.0..=100.0).contains(&coalition.cohesion()));
        assert!(!coalition.members.is_empty());
        for member in &coalition.members {
            let agent = state.agents.iter().find(|a| a.id == *member).unwrap();
            assert_eq!(agent.coalition, Some(coalition.id));
        }
    }
    assert!((0.0..=100.0).contains(&state.system_stability));
}

pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
