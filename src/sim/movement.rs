use std::collections::BTreeMap;
use std::f64::consts::TAU;

use rand::{Rng, RngCore};

use super::context::TickContext;
use super::system::{SimSystem, TickFrequency};
use crate::id::{AgentId, CoalitionId};
use crate::model::position::centroid;
use crate::model::{Agent, MovementPattern, Position, TraitKind, World};
use crate::params::SimParams;

const AGE_PER_TICK: f64 = 0.01;
const ENERGY_BASELINE: f64 = 70.0;
const STRESS_BASELINE: f64 = 20.0;
const UPKEEP_RATE: f64 = 0.01;

/// Picks each agent's target by movement pattern, then steps toward it.
pub struct MovementSystem;

impl SimSystem for MovementSystem {
    fn name(&self) -> &str {
        "movement"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::EveryTick
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        upkeep(ctx.world);
        let targets = plan_targets(ctx.world, ctx.params, ctx.rng);
        apply_moves(ctx.world, ctx.params, &targets);
    }
}

// --- Upkeep ---

fn upkeep(world: &mut World) {
    for agent in world.agents.values_mut() {
        agent.age += AGE_PER_TICK;
        agent
            .traits
            .relax_toward(TraitKind::Energy, ENERGY_BASELINE, UPKEEP_RATE);
        agent
            .traits
            .relax_toward(TraitKind::Stress, STRESS_BASELINE, UPKEEP_RATE);
    }
}

// --- Target planning ---

/// New targets for agents whose pattern produced one this tick. Agents
/// absent from the map keep their previous target.
fn plan_targets(
    world: &World,
    params: &SimParams,
    rng: &mut dyn RngCore,
) -> BTreeMap<AgentId, Position> {
    let coalition_centers: BTreeMap<CoalitionId, Position> = world
        .coalitions
        .values()
        .filter_map(|c| {
            let center = centroid(
                c.members
                    .iter()
                    .filter_map(|m| world.agents.get(m))
                    .map(|a| a.position),
            )?;
            Some((c.id, center))
        })
        .collect();

    let mut targets = BTreeMap::new();
    for agent in world.agents.values() {
        let target = match agent.movement {
            MovementPattern::Territorial => agent
                .coalition
                .and_then(|cid| coalition_centers.get(&cid))
                .map(|center| {
                    let j = params.territorial_jitter;
                    center.offset(rng.random_range(-j..=j), rng.random_range(-j..=j))
                }),
            MovementPattern::Social => social_target(world, params, agent),
            MovementPattern::Nomadic => nomadic_target(params, agent, rng),
            MovementPattern::Strategic => strategic_target(world, params, agent),
        };
        if let Some(t) = target {
            targets.insert(agent.id, t.clamp_to(params.world_width, params.world_height));
        }
    }
    targets
}

/// Centroid of strong relations within social range.
fn social_target(world: &World, params: &SimParams, agent: &Agent) -> Option<Position> {
    let range = agent.category.social_range();
    centroid(
        agent
            .relationships
            .strong(params.social_link_threshold)
            .filter_map(|(other, _)| world.agents.get(&other))
            .map(|other| other.position)
            .filter(|p| p.distance(agent.position) <= range),
    )
}

fn nomadic_target(params: &SimParams, agent: &Agent, rng: &mut dyn RngCore) -> Option<Position> {
    if !rng.random_bool(params.nomad_retarget_chance.clamp(0.0, 1.0)) {
        return None;
    }
    let angle = rng.random_range(0.0..TAU);
    let radius = rng.random_range(0.0..=params.nomad_radius);
    Some(
        agent
            .position
            .offset(angle.cos() * radius, angle.sin() * radius),
    )
}

/// Repel from nearby same-category threats, attract toward the nearest
/// highly compatible stranger.
fn strategic_target(world: &World, params: &SimParams, agent: &Agent) -> Option<Position> {
    let mut push = Position::default();
    let mut threatened = false;
    let mut nearest: Option<(f64, Position)> = None;

    for other in world.agents.values() {
        if other.id == agent.id {
            continue;
        }
        let dist = agent.position.distance(other.position);

        if other.category == agent.category && dist < params.threat_radius {
            let mutual = agent
                .strength_toward(other.id)
                .min(other.strength_toward(agent.id));
            if mutual < params.threat_strength_ceiling {
                let away = agent.position.sub(other.position);
                let falloff = 1.0 - dist / params.threat_radius;
                let dir = if dist > f64::EPSILON {
                    away.scale(1.0 / dist)
                } else {
                    Position::new(1.0, 0.0)
                };
                push = push.add(dir.scale(params.repel_distance * falloff));
                threatened = true;
            }
        }

        if !agent.relationships.knows(other.id)
            && params.compatibility(agent.category, other.category)
                >= params.attraction_compatibility
            && nearest.is_none_or(|(d, _)| dist < d)
        {
            nearest = Some((dist, other.position));
        }
    }

    match (threatened, nearest) {
        (false, None) => None,
        (_, Some((_, toward))) => Some(toward.add(push)),
        (true, None) => Some(agent.position.add(push)),
    }
}

// --- Stepping ---

fn apply_moves(world: &mut World, params: &SimParams, targets: &BTreeMap<AgentId, Position>) {
    for agent in world.agents.values_mut() {
        if let Some(&t) = targets.get(&agent.id) {
            agent.target = t;
        }
        agent.position = agent
            .position
            .step_toward(agent.target, params.step_size, params.arrive_epsilon)
            .clamp_to(params.world_width, params.world_height);
    }
}
