mod common;

use common::{lively_sim, read_lines, seeded_sim};
use primatom_sim::flush::flush_to_jsonl;
use primatom_sim::model::DisruptionSpec;

#[test]
fn checkpoint_restores_identical_state() {
    let mut sim = lively_sim(21);
    for _ in 0..120 {
        sim.tick();
    }
    sim.inject_disruption(DisruptionSpec::default());
    let bytes = sim.checkpoint().unwrap();
    let saved = sim.snapshot();

    for _ in 0..50 {
        sim.tick();
    }
    assert_ne!(sim.snapshot(), saved);

    sim.restore(&bytes).unwrap();
    assert_eq!(sim.snapshot(), saved);
}

#[test]
fn corrupt_checkpoint_is_rejected_without_change() {
    let mut sim = seeded_sim(22);
    sim.tick();
    let before = sim.snapshot();
    let err = sim.restore(b"{not json").unwrap_err();
    assert!(!err.is_invalid_argument());
    assert_eq!(sim.snapshot(), before);
}

#[test]
fn disruption_state_round_trips() {
    let mut sim = seeded_sim(23);
    let lasting = sim.inject_disruption(DisruptionSpec {
        duration: Some(3),
        ..Default::default()
    });
    let brief = sim.inject_disruption(DisruptionSpec {
        duration: Some(1),
        ..Default::default()
    });
    sim.tick();
    let saved = sim.save_disruptions().unwrap();
    let active = sim.snapshot().active_disruptions;
    let history = sim.snapshot().disruption_history;
    assert!(active.iter().any(|e| e.id == lasting && e.duration == 2));
    assert!(history.iter().any(|e| e.id == brief));

    sim.reset();
    assert!(sim.snapshot().active_disruptions.is_empty());
    sim.restore_disruptions(&saved).unwrap();
    let state = sim.snapshot();
    assert_eq!(state.active_disruptions, active);
    assert_eq!(state.disruption_history, history);
}

#[test]
fn flush_writes_one_line_per_record() {
    let mut sim = lively_sim(24);
    for _ in 0..60 {
        sim.tick();
    }
    let state = sim.snapshot();
    let dir = tempfile::tempdir().unwrap();
    flush_to_jsonl(&state, dir.path()).unwrap();

    let agents = read_lines(&dir.path().join("agents.jsonl"));
    let coalitions = read_lines(&dir.path().join("coalitions.jsonl"));
    let metrics = read_lines(&dir.path().join("metrics.jsonl"));
    assert_eq!(agents.len(), state.agents.len());
    assert_eq!(coalitions.len(), state.coalitions.len());
    assert_eq!(metrics.len(), 6);

    for line in &agents {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(value.get("id").is_some());
        assert!(value.get("category").is_some());
        assert!(value.get("traits").is_some());
    }
    let first: serde_json::Value = serde_json::from_str(&metrics[0]).unwrap();
    assert_eq!(first["tick"], 10);
}
