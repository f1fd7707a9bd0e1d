mod common;

use common::{assert_invariants, lively_sim, seeded_sim};
use primatom_sim::model::DisruptionSpec;
use primatom_sim::sim::Signal;

#[test]
fn invariants_hold_over_a_long_run() {
    let mut sim = lively_sim(42);
    sim.start();
    for _ in 0..400 {
        sim.tick();
        assert_invariants(&sim.snapshot());
    }
    let state = sim.snapshot();
    assert_eq!(state.tick, 400);
    assert_eq!(state.generation, 2);
    assert_eq!(state.metrics.len(), 40);
}

#[test]
fn dissolved_coalitions_leave_no_members_behind() {
    let mut sim = lively_sim(7);
    let mut dissolved = Vec::new();
    for _ in 0..600 {
        for signal in sim.tick() {
            if let Signal::CoalitionDissolved { id, .. } = signal {
                dissolved.push(id);
            }
        }
    }
    let state = sim.snapshot();
    for id in dissolved {
        assert!(state.coalitions.iter().all(|c| c.id != id));
        assert!(state.agents.iter().all(|a| a.coalition != Some(id)));
    }
}

#[test]
fn weak_coalitions_are_gone_by_the_next_snapshot() {
    let mut sim = lively_sim(19);
    let mut weak = Vec::new();
    for _ in 0..500 {
        sim.tick();
        let state = sim.snapshot();
        for id in &weak {
            assert!(state.coalitions.iter().all(|c| c.id != *id), "{id} outlived its cohesion");
        }
        weak = state
            .coalitions
            .iter()
            .filter(|c| c.cohesion() < 25.0)
            .map(|c| c.id)
            .collect();
    }
}

#[test]
fn zones_track_coalitions() {
    let mut sim = lively_sim(11);
    for _ in 0..200 {
        sim.tick();
        let state = sim.snapshot();
        assert_eq!(state.zones.len(), state.coalitions.len());
    }
}

#[test]
fn metrics_follow_the_coarse_cadence() {
    let mut sim = seeded_sim(3);
    for _ in 0..9 {
        sim.tick();
    }
    assert!(sim.snapshot().metrics.is_empty());
    sim.tick();
    let state = sim.snapshot();
    assert_eq!(state.metrics.len(), 1);
    let record = state.latest_metrics().unwrap();
    assert_eq!(record.tick, 10);
    assert_eq!(record.population, 100);
    assert!((0.0..=100.0).contains(&record.resilience));
}

#[test]
fn injected_event_reaches_coalitions() {
    let mut sim = seeded_sim(5);
    let id = sim.inject_disruption(DisruptionSpec::default());
    let signals = sim.tick();
    assert!(
        signals
            .iter()
            .any(|s| matches!(s, Signal::DisruptionActivated { id: got, .. } if *got == id))
    );
    assert_invariants(&sim.snapshot());
}
