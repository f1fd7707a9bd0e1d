mod common;

use std::collections::BTreeMap;

use common::{category_counts, mean_trust, seeded_sim};
use primatom_sim::model::{BehaviorCategory, BehaviorMix, DisruptionKind, DisruptionSpec, Effects};

#[test]
fn resize_regenerates_with_current_mix() {
    let mut sim = seeded_sim(1);
    sim.start();
    for _ in 0..20 {
        sim.tick();
    }
    sim.resize(120).unwrap();

    assert!(!sim.is_running());
    let state = sim.snapshot();
    assert_eq!(state.agents.len(), 120);
    assert!(state.coalitions.is_empty());
    assert!(state.metrics.is_empty());

    let counts = category_counts(&state);
    for (category, expected) in BehaviorMix::default().counts(120) {
        assert_eq!(counts.get(&category).copied().unwrap_or(0), expected, "{category}");
    }
}

#[test]
fn out_of_range_resize_changes_nothing() {
    let mut sim = seeded_sim(2);
    for _ in 0..15 {
        sim.tick();
    }
    let before = sim.snapshot();
    for n in [0, 49, 501, 10_000] {
        let err = sim.resize(n).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("50..=500"));
    }
    assert_eq!(sim.snapshot(), before);
}

#[test]
fn range_edges_are_accepted() {
    let mut sim = seeded_sim(3);
    sim.resize(50).unwrap();
    assert_eq!(sim.snapshot().agents.len(), 50);
    sim.resize(500).unwrap();
    assert_eq!(sim.snapshot().agents.len(), 500);
}

#[test]
fn leader_only_mix_yields_only_leaders() {
    let mut sim = seeded_sim(4);
    sim.set_behavior_mix(&BTreeMap::from([(BehaviorCategory::Leader, 1.0)]));
    sim.resize(80).unwrap();
    let state = sim.snapshot();
    assert_eq!(state.agents.len(), 80);
    assert!(state.agents.iter().all(|a| a.category == BehaviorCategory::Leader));
}

#[test]
fn zero_mix_falls_back_to_default() {
    let mut sim = seeded_sim(5);
    sim.set_behavior_mix(&BTreeMap::from([(BehaviorCategory::Explorer, 0.0)]));
    assert_eq!(sim.behavior_mix(), &BehaviorMix::default());
}

#[test]
fn injected_trust_boost_applies_then_expires() {
    let mut sim = seeded_sim(6);
    let before = mean_trust(&sim.snapshot());
    let id = sim.inject_disruption(DisruptionSpec {
        kind: Some(DisruptionKind::CulturalShift),
        intensity: Some(10),
        duration: Some(1),
        effects: Some(Effects {
            trust: 5.0,
            ..Default::default()
        }),
        ..Default::default()
    });
    sim.tick();
    let state = sim.snapshot();

    assert!(mean_trust(&state) > before);
    assert!(state.active_disruptions.iter().all(|e| e.id != id));
    let expired = state.disruption_history.iter().find(|e| e.id == id).unwrap();
    assert_eq!(expired.duration, 0);
    assert!(!expired.is_active);
}

#[test]
fn prediction_is_pure_and_monotonic() {
    let mut sim = seeded_sim(7);
    for _ in 0..30 {
        sim.tick();
    }
    let spec = |intensity| DisruptionSpec {
        kind: Some(DisruptionKind::ResourceScarcity),
        intensity: Some(intensity),
        effects: Some(Effects {
            trust: -1.0,
            energy: -2.0,
            cooperation: 1.0,
            innovation: 0.5,
        }),
        ..Default::default()
    };

    let before = sim.snapshot();
    let first = sim.predict_disruption_impact(spec(4));
    let second = sim.predict_disruption_impact(spec(4));
    assert_eq!(first, second);
    assert_eq!(sim.snapshot(), before);

    let mut last = sim.predict_disruption_impact(spec(1));
    for intensity in 2..=10 {
        let next = sim.predict_disruption_impact(spec(intensity));
        assert!(next.trust < last.trust);
        assert!(next.cooperation > last.cooperation);
        assert!(next.coalition_stability < last.coalition_stability);
        assert!(next.emergence_probability >= last.emergence_probability);
        last = next;
    }
}

#[test]
fn reset_round_trip() {
    let mut sim = seeded_sim(8);
    sim.set_behavior_mix(&BTreeMap::from([(BehaviorCategory::Mediator, 1.0)]));
    sim.start();
    for _ in 0..350 {
        sim.tick();
    }
    sim.reset();

    let state = sim.snapshot();
    assert_eq!(state.generation, 1);
    assert_eq!(state.tick, 0);
    assert!(state.coalitions.is_empty());
    assert!(state.metrics.is_empty());
    assert!(!state.running);
    assert_eq!(state.agents.len(), sim.params().default_population);
    assert_eq!(state.behavior_mix, BehaviorMix::default());
    let counts = category_counts(&state);
    for (category, expected) in BehaviorMix::default().counts(state.agents.len()) {
        assert_eq!(counts.get(&category).copied().unwrap_or(0), expected);
    }
    assert_eq!(sim.world().disruptions.dormant.len(), 6);
}

#[test]
fn consecutive_snapshots_are_equal() {
    let mut sim = seeded_sim(9);
    for _ in 0..25 {
        sim.tick();
    }
    assert_eq!(sim.snapshot(), sim.snapshot());
}

#[test]
fn snapshot_is_detached_from_live_state() {
    let mut sim = seeded_sim(10);
    let snapshot = sim.snapshot();
    let frozen = snapshot.clone();
    for _ in 0..5 {
        sim.tick();
    }
    assert_eq!(snapshot, frozen);
    assert_ne!(sim.snapshot().tick, snapshot.tick);
}
