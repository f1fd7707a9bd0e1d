use rand::RngCore;

use super::coalition::CoalitionSystem;
use super::context::TickContext;
use super::culture::CultureSystem;
use super::disruption::DisruptionSystem;
use super::evolution::EvolutionSystem;
use super::influence::InfluenceSystem;
use super::metrics::MetricsSystem;
use super::movement::MovementSystem;
use super::relationships::RelationshipSystem;
use super::signal::Signal;
use super::system::{SimSystem, TickFrequency};
use super::territory::TerritorySystem;
use crate::model::World;
use crate::params::SimParams;

/// Returns true if a system with the given frequency should run on `tick`.
pub fn should_fire(freq: TickFrequency, tick: u64, params: &SimParams) -> bool {
    match freq {
        TickFrequency::EveryTick => true,
        TickFrequency::Coarse => tick % params.coarse_interval.max(1) == 0,
        TickFrequency::Generational => tick % params.generation_interval.max(1) == 0,
    }
}

/// The tick pipeline in its fixed order. Coalition formation and metrics
/// read relationship state written earlier in the same tick, so the order
/// must not change.
pub fn default_systems() -> Vec<Box<dyn SimSystem>> {
    vec![
        Box::new(MovementSystem),
        Box::new(DisruptionSystem),
        Box::new(InfluenceSystem),
        Box::new(RelationshipSystem),
        Box::new(CoalitionSystem),
        Box::new(TerritorySystem),
        Box::new(MetricsSystem),
        Box::new(CultureSystem),
        Box::new(EvolutionSystem),
    ]
}

/// Advance `world.tick` and call each system whose frequency matches.
///
/// Signal delivery is single-pass and non-cascading:
///
/// 1. **Tick pass:** each firing system's `tick()` runs in registration
///    order. Signals emitted here join any `carried` signals (queued by
///    operations between ticks, such as manual injection).
/// 2. **React pass:** if the buffer is non-empty, each firing system's
///    `handle_signals()` sees the whole buffer as `ctx.inbox`. Signals
///    emitted during this pass are dropped.
///
/// Returns every signal delivered this tick.
pub fn dispatch_systems(
    world: &mut World,
    params: &SimParams,
    systems: &mut [Box<dyn SimSystem>],
    rng: &mut dyn RngCore,
    carried: Vec<Signal>,
) -> Vec<Signal> {
    world.tick += 1;
    let tick = world.tick;

    let mut signals = carried;
    for system in systems.iter_mut() {
        if should_fire(system.frequency(), tick, params) {
            let mut ctx = TickContext {
                world,
                params,
                rng,
                signals: &mut signals,
                inbox: &[],
            };
            system.tick(&mut ctx);
        }
    }

    if !signals.is_empty() {
        for system in systems.iter_mut() {
            if should_fire(system.frequency(), tick, params) {
                let mut dropped = Vec::new();
                let mut ctx = TickContext {
                    world,
                    params,
                    rng,
                    signals: &mut dropped,
                    inbox: &signals,
                };
                system.handle_signals(&mut ctx);
            }
        }
    }

    signals
}
