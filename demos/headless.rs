//! Run the simulation without a UI and print a metrics line per coarse tick.
//!
//! ```text
//! RUST_LOG=primatom_sim=debug cargo run --example headless -- 42 600
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use primatom_sim::advisory::FixedInfluence;
use primatom_sim::model::{CulturalInfluence, DisruptionKind, DisruptionSpec};
use primatom_sim::{Driver, SimParams, Simulation};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);

    let mut sim = match Simulation::new(SimParams::seeded(seed)) {
        Ok(sim) => sim,
        Err(err) => {
            eprintln!("failed to build simulation: {err}");
            std::process::exit(1);
        }
    }
    .with_cultural_advisor(FixedInfluence(CulturalInfluence {
        innovation_appetite: 70.0,
        social_cohesion: 60.0,
        optimism: 55.0,
    }));

    sim.start();
    for _ in 0..ticks {
        sim.tick();
        if sim.world().tick == ticks / 2 {
            sim.inject_disruption(DisruptionSpec {
                kind: Some(DisruptionKind::GovernanceCrisis),
                intensity: Some(7),
                ..Default::default()
            });
        }
        let state = sim.snapshot();
        if let Some(m) = state.latest_metrics().filter(|m| m.tick == state.tick) {
            println!(
                "tick {:>5} gen {:>2} coalitions {:>3} trust {:>5.1} resilience {:>5.1} emergence {:>5.1} stability {:>5.1}",
                m.tick,
                m.generation,
                m.coalition_count,
                m.average_trust,
                m.resilience,
                m.emergence_index,
                m.system_stability,
            );
        }
    }
    println!("trend: {}", sim.stability_trend());

    // Hand the same simulation to the background driver for a short burst.
    let shared = Arc::new(Mutex::new(sim));
    let driver = Driver::spawn(Arc::clone(&shared), Duration::from_millis(5));
    std::thread::sleep(Duration::from_millis(200));
    let extra = driver.shutdown();
    println!("driver ran {extra} more ticks");
}
