use std::collections::BTreeSet;

use rand::Rng;
use tracing::debug;

use super::context::TickContext;
use super::helpers::{agent_views, mean, mean_pairwise_distance, member_positions};
use super::names::{generate_coalition_name, generate_goals, generate_strategies};
use super::signal::Signal;
use super::system::{SimSystem, TickFrequency};
use crate::id::{AgentId, CoalitionId};
use crate::model::{BehaviorCategory, Coalition, CrisisResponse, TraitKind};

/// Stress a member picks up when its coalition falls apart.
const DISSOLUTION_STRESS: f64 = 5.0;

pub struct CoalitionSystem;

impl SimSystem for CoalitionSystem {
    fn name(&self) -> &str {
        "coalitions"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::EveryTick
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        form_coalitions(ctx);
        update_cohesion(ctx);
    }

    fn handle_signals(&mut self, ctx: &mut TickContext) {
        for signal in ctx.inbox {
            if let Signal::DisruptionActivated { .. } = signal {
                respond_to_crisis(ctx);
            }
        }
    }
}

// --- Formation ---

/// Chance that a qualifying cluster forms a coalition this tick.
pub fn formation_chance(
    base: f64,
    disruption_active: bool,
    disruption_boost: f64,
    initiator: BehaviorCategory,
    leader_boost: f64,
) -> f64 {
    let mut chance = base;
    if disruption_active {
        chance *= disruption_boost;
    }
    if initiator == BehaviorCategory::Leader {
        chance *= leader_boost;
    }
    chance.clamp(0.0, 1.0)
}

fn form_coalitions(ctx: &mut TickContext) {
    let params = ctx.params;
    let views = agent_views(ctx.world);
    let disruption_active = ctx.world.disruptions.any_active();
    let mut claimed: BTreeSet<AgentId> = BTreeSet::new();

    for initiator in &views {
        if initiator.coalition.is_some() || claimed.contains(&initiator.id) {
            continue;
        }
        let Some(init_agent) = ctx.world.agents.get(&initiator.id) else {
            continue;
        };

        // Unattached neighbors trusted in both directions.
        let mut allies: Vec<(AgentId, f64)> = views
            .iter()
            .filter(|o| {
                o.id != initiator.id
                    && o.coalition.is_none()
                    && !claimed.contains(&o.id)
                    && o.position.distance(initiator.position) <= params.formation_radius
            })
            .filter_map(|o| {
                let other = ctx.world.agents.get(&o.id)?;
                let mutual = init_agent
                    .strength_toward(o.id)
                    .min(other.strength_toward(initiator.id));
                (mutual > params.alliance_threshold).then_some((o.id, mutual))
            })
            .collect();
        if allies.len() < 2 {
            continue;
        }

        let chance = formation_chance(
            params.formation_chance,
            disruption_active,
            params.disruption_formation_boost,
            initiator.category,
            params.leader_formation_boost,
        );
        if !ctx.rng.random_bool(chance) {
            continue;
        }

        allies.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        allies.truncate(params.max_founding_allies);

        let cohesion = mean(allies.iter().map(|(_, s)| *s));
        let mut members: BTreeSet<AgentId> = allies.iter().map(|(id, _)| *id).collect();
        members.insert(initiator.id);

        let id = ctx.world.id_gen.coalition();
        let name = generate_coalition_name(ctx.world, ctx.rng);
        let response = CrisisResponse::ALL[ctx.rng.random_range(0..CrisisResponse::ALL.len())];
        let mut coalition = Coalition::new(
            id,
            name,
            initiator.id,
            members.clone(),
            cohesion,
            ctx.world.tick,
            response,
        );
        coalition.goals = generate_goals(ctx.rng);
        coalition.strategies = generate_strategies(ctx.rng);

        debug!(
            coalition = %id,
            name = %coalition.name,
            size = members.len(),
            "coalition formed"
        );
        let founded = format!("founded:{}", coalition.name);
        for member in &members {
            if let Some(agent) = ctx.world.agents.get_mut(member) {
                agent.memory.remember(founded.clone(), params.memory_capacity);
            }
        }
        let size = members.len();
        claimed.extend(members);
        ctx.world.add_coalition(coalition);
        ctx.signals.push(Signal::CoalitionFormed { id, size });
    }
}

// --- Cohesion & dissolution ---

/// Cohesion a coalition is drawn toward: member trust and compactness lift
/// it, member stress drags it down. Fewer than two members earns no
/// compactness credit.
pub fn cohesion_target(
    avg_trust: f64,
    mean_distance: Option<f64>,
    avg_stress: f64,
    compactness_scale: f64,
) -> f64 {
    let compactness = mean_distance
        .map(|d| (100.0 * (1.0 - d / compactness_scale)).clamp(0.0, 100.0))
        .unwrap_or(0.0);
    0.6 * avg_trust + 0.4 * compactness - 0.3 * avg_stress
}

fn update_cohesion(ctx: &mut TickContext) {
    let params = ctx.params;
    let ids: Vec<CoalitionId> = ctx.world.coalitions.keys().copied().collect();

    for id in ids {
        let Some(coalition) = ctx.world.coalitions.get(&id) else {
            continue;
        };
        let members: Vec<_> = coalition
            .members
            .iter()
            .filter_map(|m| ctx.world.agents.get(m))
            .collect();
        let avg_trust = mean(members.iter().map(|a| a.traits.trust()));
        let avg_stress = mean(members.iter().map(|a| a.traits.stress()));
        let spread = mean_pairwise_distance(&member_positions(ctx.world, coalition));
        let target = cohesion_target(avg_trust, spread, avg_stress, params.compactness_scale);

        if let Some(coalition) = ctx.world.coalitions.get_mut(&id) {
            let current = coalition.cohesion();
            coalition.set_cohesion(current + (target - current) * params.cohesion_rate);
        }
    }

    dissolve_weak(ctx);
}

/// Dissolve every coalition below the cohesion threshold. Former members
/// remember the break-up and take on some stress.
fn dissolve_weak(ctx: &mut TickContext) {
    let params = ctx.params;
    let weak: Vec<CoalitionId> = ctx
        .world
        .coalitions
        .values()
        .filter(|c| c.cohesion() < params.dissolution_threshold)
        .map(|c| c.id)
        .collect();

    for id in weak {
        let Some(gone) = ctx.world.dissolve_coalition(id) else {
            continue;
        };
        let tag = format!("coalition_dissolved:{}", gone.name);
        for member in &gone.members {
            if let Some(agent) = ctx.world.agents.get_mut(member) {
                agent.memory.remember(tag.clone(), params.memory_capacity);
                agent.traits.adjust(TraitKind::Stress, DISSOLUTION_STRESS);
            }
        }
        debug!(coalition = %id, name = %gone.name, "coalition dissolved");
        ctx.signals.push(Signal::CoalitionDissolved {
            id,
            size: gone.size(),
        });
    }
}

// --- Crisis response ---

fn respond_to_crisis(ctx: &mut TickContext) {
    let params = ctx.params;
    let mut boosted_leaders = Vec::new();
    for coalition in ctx.world.coalitions.values_mut() {
        match coalition.crisis_response {
            CrisisResponse::Cooperative => {
                coalition.set_cohesion(coalition.cohesion() + params.crisis_cohesion_bonus);
            }
            CrisisResponse::Competitive => {
                coalition.set_cohesion(coalition.cohesion() - params.crisis_cohesion_penalty);
                boosted_leaders.push(coalition.leader);
            }
            CrisisResponse::Isolationist => {}
        }
    }
    for leader in boosted_leaders {
        if let Some(agent) = ctx.world.agents.get_mut(&leader) {
            agent
                .traits
                .adjust(TraitKind::LeadershipCapacity, params.crisis_leader_boost);
        }
    }
    dissolve_weak(ctx);
}
