use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::advisory::{CulturalAdvisor, InsightAdvisor, fallback_trends, merge_trends};
use crate::error::SimError;
use crate::id::DisruptionId;
use crate::model::{
    BehaviorCategory, BehaviorMix, DisruptionSpec, DisruptionState, ImpactPrediction,
    StabilityTrend, World,
};
use crate::params::SimParams;
use crate::sim::disruption::{default_catalog, inject, predict_impact};
use crate::sim::population::populate;
use crate::sim::{Signal, SimSystem, TickFrequency, default_systems, dispatch_systems, should_fire};
use crate::snapshot::SimulationState;

/// Everything a checkpoint needs to resume a run, minus the systems and
/// advisors (which carry no state of their own).
#[derive(Serialize, Deserialize)]
struct Checkpoint {
    world: World,
    mix: BehaviorMix,
    population: usize,
    pending: Vec<Signal>,
}

/// Owns the world and drives the tick pipeline.
///
/// All mutation happens through `&mut self`, so the borrow checker
/// serializes ticks against every other operation. Share across threads
/// behind a `Mutex` (see [`crate::driver::Driver`]).
pub struct Simulation {
    params: SimParams,
    world: World,
    systems: Vec<Box<dyn SimSystem>>,
    rng: SmallRng,
    mix: BehaviorMix,
    population: usize,
    running: bool,
    /// Signals raised between ticks, delivered with the next one.
    pending: Vec<Signal>,
    cultural_advisor: Option<Box<dyn CulturalAdvisor>>,
    insight_advisor: Option<Box<dyn InsightAdvisor>>,
}

impl Simulation {
    /// Build a stopped simulation with the default population and mix.
    pub fn new(params: SimParams) -> Result<Self, SimError> {
        let population = params.default_population;
        if !params.population_in_range(population) {
            return Err(SimError::PopulationOutOfRange {
                requested: population,
                min: params.min_population,
                max: params.max_population,
            });
        }
        let rng = match params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let mut sim = Self {
            params,
            world: World::new(),
            systems: default_systems(),
            rng,
            mix: BehaviorMix::default(),
            population,
            running: false,
            pending: Vec::new(),
            cultural_advisor: None,
            insight_advisor: None,
        };
        sim.reinitialize();
        Ok(sim)
    }

    pub fn with_cultural_advisor(mut self, advisor: impl CulturalAdvisor + 'static) -> Self {
        self.cultural_advisor = Some(Box::new(advisor));
        self
    }

    pub fn with_insight_advisor(mut self, advisor: impl InsightAdvisor + 'static) -> Self {
        self.insight_advisor = Some(Box::new(advisor));
        self
    }

    // --- Accessors ---

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn behavior_mix(&self) -> &BehaviorMix {
        &self.mix
    }

    pub fn population(&self) -> usize {
        self.population
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    // --- Run state ---

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        info!(tick = self.world.tick, "simulation started");
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        info!(tick = self.world.tick, "simulation stopped");
    }

    /// Advance one tick through the full pipeline. Returns the signals
    /// delivered during it.
    ///
    /// Advisory ports are polled first on coarse ticks; their results are
    /// applied by the influence stage from the next tick on.
    pub fn tick(&mut self) -> Vec<Signal> {
        let next = self.world.tick + 1;
        if should_fire(TickFrequency::Coarse, next, &self.params) {
            self.poll_advisors();
        }
        let carried = std::mem::take(&mut self.pending);
        dispatch_systems(
            &mut self.world,
            &self.params,
            &mut self.systems,
            &mut self.rng,
            carried,
        )
    }

    fn poll_advisors(&mut self) {
        let now = self.world.tick;
        if let Some(advisor) = self.cultural_advisor.as_mut() {
            match advisor.poll() {
                Ok(bundle) => self.world.cultural_influence = Some(bundle.clamped()),
                Err(err) => warn!(%err, "keeping last cultural influence"),
            }
        }
        if let Some(advisor) = self.insight_advisor.as_mut() {
            match advisor.poll() {
                Ok(proposals) => merge_trends(&mut self.world.trends, proposals, now),
                Err(err) => {
                    warn!(%err, "insight feed down");
                    if self.world.trends.is_empty() {
                        self.world.trends = fallback_trends(now);
                    }
                }
            }
        }
    }

    // --- Population ---

    /// Stop and regenerate the population at size `n` with the current
    /// mix. Out-of-range sizes fail and change nothing.
    pub fn resize(&mut self, n: usize) -> Result<(), SimError> {
        if !self.params.population_in_range(n) {
            return Err(SimError::PopulationOutOfRange {
                requested: n,
                min: self.params.min_population,
                max: self.params.max_population,
            });
        }
        self.stop();
        self.population = n;
        self.regenerate();
        info!(population = n, "population resized");
        Ok(())
    }

    /// Normalize `weights` into the behavior mix and regenerate the
    /// population under it. All-zero weights select the default mix.
    pub fn set_behavior_mix(&mut self, weights: &BTreeMap<BehaviorCategory, f64>) {
        self.mix = BehaviorMix::from_weights(weights);
        self.regenerate();
        info!(population = self.population, "behavior mix changed");
    }

    fn regenerate(&mut self) {
        populate(
            &mut self.world,
            &self.params,
            &self.mix,
            self.population,
            &mut self.rng,
        );
        self.world.metrics.clear();
        self.world.emergent_phenomena.clear();
        self.world.disruptions.active.clear();
        self.world.disruptions.history.clear();
        self.world.system_stability = self.world.stability_average();
        self.pending.clear();
    }

    /// Fresh world: generation 1, new catalog, default mix and size.
    /// Leaves the simulation stopped.
    pub fn reset(&mut self) {
        self.stop();
        self.mix = BehaviorMix::default();
        self.population = self.params.default_population;
        self.reinitialize();
        info!(population = self.population, "simulation reset");
    }

    fn reinitialize(&mut self) {
        self.world = World::new();
        let catalog = default_catalog(&mut self.world.id_gen);
        self.world.disruptions = DisruptionState::with_catalog(catalog);
        self.regenerate();
    }

    // --- Disruptions ---

    /// Activate a caller-built event immediately, bypassing trigger
    /// evaluation. Coalitions hear about it on the next tick.
    pub fn inject_disruption(&mut self, spec: DisruptionSpec) -> DisruptionId {
        let (id, signal) = inject(&mut self.world, spec);
        info!(disruption = %id, "disruption injected");
        self.pending.push(signal);
        id
    }

    /// What firing `spec` now would do. Touches nothing.
    pub fn predict_disruption_impact(&self, spec: DisruptionSpec) -> ImpactPrediction {
        let event = spec.into_event(DisruptionId(0));
        predict_impact(&event, &self.world)
    }

    // --- Read side ---

    pub fn snapshot(&self) -> SimulationState {
        SimulationState::capture(&self.world, self.running, &self.mix)
    }

    pub fn stability_trend(&self) -> StabilityTrend {
        StabilityTrend::classify(&self.world.metrics)
    }

    // --- Checkpointing ---

    /// Opaque buffer holding the full world, mix, and queued signals.
    pub fn checkpoint(&self) -> Result<Vec<u8>, SimError> {
        let checkpoint = Checkpoint {
            world: self.world.clone(),
            mix: self.mix.clone(),
            population: self.population,
            pending: self.pending.clone(),
        };
        Ok(serde_json::to_vec(&checkpoint)?)
    }

    /// Replace live state with a checkpoint. On a decode failure nothing
    /// changes. The run state is left as it was.
    pub fn restore(&mut self, bytes: &[u8]) -> Result<(), SimError> {
        let checkpoint: Checkpoint = serde_json::from_slice(bytes).map_err(|err| {
            warn!(%err, "checkpoint rejected");
            SimError::from(err)
        })?;
        self.world = checkpoint.world;
        self.mix = checkpoint.mix;
        self.population = checkpoint.population;
        self.pending = checkpoint.pending;
        info!(tick = self.world.tick, "checkpoint restored");
        Ok(())
    }

    pub fn save_disruptions(&self) -> Result<Vec<u8>, SimError> {
        self.world.disruptions.save()
    }

    pub fn restore_disruptions(&mut self, bytes: &[u8]) -> Result<(), SimError> {
        self.world.disruptions = DisruptionState::restore(bytes)?;
        Ok(())
    }
}
