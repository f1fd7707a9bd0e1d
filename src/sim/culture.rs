use rand::Rng;
use tracing::debug;

use super::context::TickContext;
use super::helpers::{mean, pick};
use super::names::{KNOWLEDGE, NORMS};
use super::system::{SimSystem, TickFrequency};
use crate::id::{AgentId, CoalitionId};
use crate::model::TraitKind;

const NORM_SPREAD_CHANCE: f64 = 0.2;
const NORM_ADOPTION_CHANCE: f64 = 0.1;
const NORM_ADOPTION_ALIGNMENT: f64 = 75.0;
const ALIGNMENT_CONVERGENCE: f64 = 0.05;
const KNOWLEDGE_INNOVATION: f64 = 85.0;
const KNOWLEDGE_CHANCE: f64 = 0.1;
const MAX_STRATEGIES: usize = 5;

/// Coarse-cadence governance and culture bookkeeping: norms, alignment,
/// shared knowledge, leadership turnover, crisis strategies, and trend
/// aging.
pub struct CultureSystem;

impl SimSystem for CultureSystem {
    fn name(&self) -> &str {
        "culture"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::Coarse
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        propagate_norms(ctx);
        converge_alignment(ctx);
        adopt_norms(ctx);
        accumulate_knowledge(ctx);
        reelect_leaders(ctx);
        adopt_crisis_strategies(ctx);
        age_trends(ctx);
    }
}

// --- Norms ---

/// Members pick up one of their leader's norms they don't hold yet.
fn propagate_norms(ctx: &mut TickContext) {
    let max_norms = ctx.params.max_norms;
    let mut adoptions: Vec<(AgentId, String)> = Vec::new();

    for coalition in ctx.world.coalitions.values() {
        let Some(leader) = ctx.world.agents.get(&coalition.leader) else {
            continue;
        };
        for member in coalition.members.iter().filter(|m| **m != coalition.leader) {
            let Some(agent) = ctx.world.agents.get(member) else {
                continue;
            };
            if agent.norms.len() >= max_norms {
                continue;
            }
            let missing: Vec<&String> = leader
                .norms
                .iter()
                .filter(|n| !agent.norms.contains(*n))
                .collect();
            if missing.is_empty() || !ctx.rng.random_bool(NORM_SPREAD_CHANCE) {
                continue;
            }
            let norm = missing[ctx.rng.random_range(0..missing.len())];
            adoptions.push((*member, norm.clone()));
        }
    }

    for (id, norm) in adoptions {
        if let Some(agent) = ctx.world.agents.get_mut(&id) {
            agent.norms.insert(norm);
        }
    }
}

/// Highly aligned agents occasionally take on a norm from the shared pool.
fn adopt_norms(ctx: &mut TickContext) {
    let max_norms = ctx.params.max_norms;
    for agent in ctx.world.agents.values_mut() {
        if agent.norms.len() >= max_norms
            || agent.traits.cultural_alignment() <= NORM_ADOPTION_ALIGNMENT
            || !ctx.rng.random_bool(NORM_ADOPTION_CHANCE)
        {
            continue;
        }
        agent.norms.insert(pick(NORMS, ctx.rng).to_string());
    }
}

/// Pull each member's cultural alignment a step toward its coalition mean.
fn converge_alignment(ctx: &mut TickContext) {
    let world = &mut *ctx.world;
    let mut targets: Vec<(AgentId, f64)> = Vec::new();
    for coalition in world.coalitions.values() {
        let avg = mean(
            coalition
                .members
                .iter()
                .filter_map(|m| world.agents.get(m))
                .map(|a| a.traits.cultural_alignment()),
        );
        targets.extend(coalition.members.iter().map(|m| (*m, avg)));
    }
    for (id, target) in targets {
        if let Some(agent) = world.agents.get_mut(&id) {
            agent
                .traits
                .relax_toward(TraitKind::CulturalAlignment, target, ALIGNMENT_CONVERGENCE);
        }
    }
}

// --- Knowledge ---

/// Highly innovative agents occasionally contribute a discovery to the
/// global knowledge list. Duplicates are ignored.
fn accumulate_knowledge(ctx: &mut TickContext) {
    let cap = ctx.params.knowledge_cap;
    let inventors = ctx
        .world
        .agents
        .values()
        .filter(|a| a.traits.innovation() > KNOWLEDGE_INNOVATION)
        .count();

    for _ in 0..inventors {
        if ctx.world.knowledge.len() >= cap {
            break;
        }
        if !ctx.rng.random_bool(KNOWLEDGE_CHANCE) {
            continue;
        }
        let discovery = pick(KNOWLEDGE, ctx.rng);
        if !ctx.world.knowledge.iter().any(|k| k == discovery) {
            ctx.world.knowledge.push(discovery.to_string());
        }
    }
}

// --- Governance ---

fn leadership_score(ctx: &TickContext, id: AgentId) -> f64 {
    ctx.world
        .agents
        .get(&id)
        .map_or(0.0, |a| (a.traits.leadership_capacity() + a.influence) / 2.0)
}

/// Hand leadership to the strongest member when they beat the sitting
/// leader by more than the re-election margin.
fn reelect_leaders(ctx: &mut TickContext) {
    let margin = ctx.params.reelection_margin;
    let mut changes: Vec<(CoalitionId, AgentId)> = Vec::new();

    for coalition in ctx.world.coalitions.values() {
        let incumbent = leadership_score(ctx, coalition.leader);
        let challenger = coalition
            .members
            .iter()
            .filter(|m| **m != coalition.leader)
            .map(|m| (*m, leadership_score(ctx, *m)))
            .max_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((id, score)) = challenger
            && score > incumbent + margin
        {
            changes.push((coalition.id, id));
        }
    }

    for (coalition_id, leader) in changes {
        if let Some(coalition) = ctx.world.coalitions.get_mut(&coalition_id) {
            debug!(
                coalition = %coalition_id,
                from = %coalition.leader,
                to = %leader,
                "leadership changed"
            );
            coalition.leader = leader;
        }
    }
}

/// While any disruption is active, every coalition learns a strategy
/// named after it.
fn adopt_crisis_strategies(ctx: &mut TickContext) {
    let tags: Vec<String> = ctx
        .world
        .disruptions
        .active
        .iter()
        .map(|e| format!("adapt:{}", e.kind))
        .collect();
    if tags.is_empty() {
        return;
    }
    for coalition in ctx.world.coalitions.values_mut() {
        for tag in &tags {
            if coalition.strategies.len() >= MAX_STRATEGIES {
                break;
            }
            if !coalition.strategies.contains(tag) {
                coalition.strategies.push(tag.clone());
            }
        }
    }
}

// --- Trends ---

/// Grow or decay every trend, then drop the ones past their peak or
/// faded under the floor.
fn age_trends(ctx: &mut TickContext) {
    let now = ctx.world.tick;
    let floor = ctx.params.trend_floor;
    for trend in &mut ctx.world.trends {
        trend.intensity = (trend.intensity * (1.0 + trend.growth_rate)).clamp(0.0, 100.0);
    }
    ctx.world
        .trends
        .retain(|t| now <= t.peak_tick && t.intensity >= floor);
}
