use rand::Rng;
use tracing::debug;

use super::context::TickContext;
use super::signal::Signal;
use super::system::{SimSystem, TickFrequency};
use crate::id::{DisruptionId, IdGenerator};
use crate::model::{
    DisruptionKind, DisruptionSpec, DisruptiveEvent, Effects, EmergenceConditions,
    ImpactPrediction, TraitKind, World,
};
use crate::params::SimParams;

/// Evaluates dormant catalog triggers, then applies and ages active events.
pub struct DisruptionSystem;

impl SimSystem for DisruptionSystem {
    fn name(&self) -> &str {
        "disruption"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::EveryTick
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        evaluate_triggers(ctx);
        apply_effects(ctx);
    }
}

// --- Catalog ---

struct CatalogEntry {
    kind: DisruptionKind,
    name: &'static str,
    description: &'static str,
    intensity: u8,
    duration: u32,
    effects: [f64; 4],
    min_generation: u32,
    required_coalitions: usize,
    stability_threshold: f64,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        kind: DisruptionKind::InnovationCatalyst,
        name: "Spark of Invention",
        description: "A breakthrough spreads through the population",
        intensity: 4,
        duration: 40,
        effects: [0.5, 0.5, 0.5, 2.0],
        min_generation: 1,
        required_coalitions: 1,
        stability_threshold: 40.0,
    },
    CatalogEntry {
        kind: DisruptionKind::GovernanceCrisis,
        name: "Succession Dispute",
        description: "Leadership legitimacy is questioned everywhere",
        intensity: 6,
        duration: 20,
        effects: [-1.5, -0.5, -1.0, 0.0],
        min_generation: 1,
        required_coalitions: 2,
        stability_threshold: 45.0,
    },
    CatalogEntry {
        kind: DisruptionKind::ResourceScarcity,
        name: "Lean Season",
        description: "Food and shelter grow scarce",
        intensity: 5,
        duration: 35,
        effects: [-0.5, -2.0, 0.5, 0.5],
        min_generation: 1,
        required_coalitions: 0,
        stability_threshold: 35.0,
    },
    CatalogEntry {
        kind: DisruptionKind::SocialUpheaval,
        name: "Voices of Dissent",
        description: "Old loyalties fracture under new ideas",
        intensity: 7,
        duration: 25,
        effects: [-2.0, -1.0, -1.5, 1.0],
        min_generation: 2,
        required_coalitions: 2,
        stability_threshold: 50.0,
    },
    CatalogEntry {
        kind: DisruptionKind::ExternalThreat,
        name: "Shadow at the Border",
        description: "An outside danger forces hard choices",
        intensity: 8,
        duration: 30,
        effects: [1.0, -1.5, 2.0, 0.5],
        min_generation: 2,
        required_coalitions: 1,
        stability_threshold: 40.0,
    },
    CatalogEntry {
        kind: DisruptionKind::CulturalShift,
        name: "New Songs",
        description: "A fresh aesthetic reshapes shared values",
        intensity: 3,
        duration: 50,
        effects: [0.5, 0.0, 0.5, 1.0],
        min_generation: 3,
        required_coalitions: 3,
        stability_threshold: 45.0,
    },
];

/// Fresh dormant catalog, one event per entry.
pub fn default_catalog(id_gen: &mut IdGenerator) -> Vec<DisruptiveEvent> {
    CATALOG
        .iter()
        .map(|entry| {
            let [trust, energy, cooperation, innovation] = entry.effects;
            DisruptiveEvent {
                id: id_gen.disruption(),
                kind: entry.kind,
                name: entry.name.to_string(),
                description: entry.description.to_string(),
                intensity: entry.intensity,
                duration: entry.duration,
                effects: Effects {
                    trust,
                    energy,
                    cooperation,
                    innovation,
                },
                conditions: EmergenceConditions {
                    min_generation: entry.min_generation,
                    required_coalitions: entry.required_coalitions,
                    stability_threshold: entry.stability_threshold,
                },
                is_active: false,
                started_at: None,
            }
        })
        .collect()
}

// --- Trigger evaluation ---

pub fn conditions_met(
    conditions: &EmergenceConditions,
    generation: u32,
    coalitions: usize,
    stability: f64,
) -> bool {
    generation >= conditions.min_generation
        && coalitions >= conditions.required_coalitions
        && stability >= conditions.stability_threshold
}

/// Rare by default (`base / intensity`), boosted as the population
/// outgrows the event's generation and coalition requirements, capped.
pub fn activation_probability(
    event: &DisruptiveEvent,
    generation: u32,
    coalitions: usize,
    params: &SimParams,
) -> f64 {
    let base = params.trigger_base / f64::from(event.intensity.max(1));

    let gen_excess = generation.saturating_sub(event.conditions.min_generation);
    let gen_ratio = (f64::from(gen_excess) / f64::from(params.generation_margin.max(1))).min(1.0);
    let gen_factor = 1.0 + (params.generation_boost - 1.0) * gen_ratio;

    let coalition_excess = coalitions.saturating_sub(event.conditions.required_coalitions);
    let coalition_ratio =
        (coalition_excess as f64 / params.coalition_margin.max(1) as f64).min(1.0);
    let coalition_factor = 1.0 + (params.coalition_boost - 1.0) * coalition_ratio;

    (base * gen_factor * coalition_factor).clamp(0.0, params.trigger_cap)
}

fn evaluate_triggers(ctx: &mut TickContext) {
    let generation = ctx.world.generation;
    let coalitions = ctx.world.coalitions.len();
    let stability = ctx.world.stability_average();
    let tick = ctx.world.tick;

    let dormant = std::mem::take(&mut ctx.world.disruptions.dormant);
    let mut remaining = Vec::with_capacity(dormant.len());
    for mut event in dormant {
        let fires = conditions_met(&event.conditions, generation, coalitions, stability)
            && ctx.rng.random_bool(activation_probability(
                &event,
                generation,
                coalitions,
                ctx.params,
            ));
        if !fires {
            remaining.push(event);
            continue;
        }
        event.activate(tick);
        debug!(disruption = %event.id, name = %event.name, "disruption triggered");
        ctx.signals.push(Signal::DisruptionActivated {
            id: event.id,
            kind: event.kind,
            intensity: event.intensity,
        });
        ctx.world.disruptions.active.push(event);
    }
    ctx.world.disruptions.dormant = remaining;
}

// --- Effect application ---

fn apply_effects(ctx: &mut TickContext) {
    let params = ctx.params;
    let active = std::mem::take(&mut ctx.world.disruptions.active);
    let mut still_active = Vec::with_capacity(active.len());

    for mut event in active {
        let scale = event.intensity_scale();
        let fx = event.effects;
        let tag = format!("disruption:{}", event.name);
        let v = params.effect_variance.abs();

        for agent in ctx.world.agents.values_mut() {
            let variance = 1.0 + ctx.rng.random_range(-v..=v);
            let k = scale * variance;
            agent.traits.adjust(TraitKind::Trust, fx.trust * k);
            agent.traits.adjust(TraitKind::Energy, fx.energy * k);
            agent.traits.adjust(TraitKind::Cooperation, fx.cooperation * k);
            agent.traits.adjust(TraitKind::Innovation, fx.innovation * k);
            if ctx
                .rng
                .random_bool(params.disruption_memory_chance.clamp(0.0, 1.0))
            {
                agent.memory.remember(tag.clone(), params.memory_capacity);
            }
        }

        if let Some(factor) = event.kind.cohesion_factor() {
            for coalition in ctx.world.coalitions.values_mut() {
                coalition.scale_cohesion(factor);
            }
        }

        event.duration = event.duration.saturating_sub(1);
        if event.duration > 0 {
            still_active.push(event);
            continue;
        }
        event.is_active = false;
        debug!(disruption = %event.id, name = %event.name, "disruption expired");
        ctx.signals.push(Signal::DisruptionExpired { id: event.id });
        ctx.world
            .disruptions
            .archive(event, params.disruption_history_cap);
    }
    ctx.world.disruptions.active = still_active;
}

// --- Manual injection & preview ---

/// Activate a caller-built event immediately, skipping trigger evaluation.
/// Returns the new id and the signal to deliver on the next tick.
pub fn inject(world: &mut World, spec: DisruptionSpec) -> (DisruptionId, Signal) {
    let mut event = spec.into_event(world.id_gen.disruption());
    event.activate(world.tick);
    let id = event.id;
    let signal = Signal::DisruptionActivated {
        id,
        kind: event.kind,
        intensity: event.intensity,
    };
    world.disruptions.active.push(event);
    (id, signal)
}

/// Projected effect of firing `event` against the current state.
/// Reads only; nothing in `world` changes.
pub fn predict_impact(event: &DisruptiveEvent, world: &World) -> ImpactPrediction {
    let scale = event.intensity_scale();
    let population = world.agents.len() as f64 / 100.0;
    let intensity = f64::from(event.intensity);
    let emergence = 0.5 * scale
        + 0.05 * world.coalitions.len() as f64
        + 0.02 * f64::from(world.generation);

    ImpactPrediction {
        trust: event.effects.trust * scale * population,
        cooperation: event.effects.cooperation * scale * population,
        innovation: event.effects.innovation * scale * population,
        coalition_stability: event.kind.stability_bias() * intensity,
        emergence_probability: emergence.clamp(0.0, 1.0),
    }
}
