use super::context::TickContext;
use super::helpers::{AgentView, agent_views};
use super::system::{SimSystem, TickFrequency};
use crate::id::AgentId;
use crate::model::{TraitKind, World};
use crate::params::SimParams;

/// Links above this strength count toward network influence.
const INFLUENCE_LINK_FLOOR: f64 = 50.0;

/// Smooths every in-range link toward a compatibility-driven target and
/// refreshes the per-agent influence scores that depend on link quality.
pub struct RelationshipSystem;

impl SimSystem for RelationshipSystem {
    fn name(&self) -> &str {
        "relationships"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::EveryTick
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        update_links(ctx.world, ctx.params);
        refresh_influence(ctx.world);
    }
}

/// Target strength `from` is drawn toward for `to`.
pub fn link_target(params: &SimParams, from: &AgentView, to: &AgentView) -> f64 {
    params.compatibility(from.category, to.category)
        - (from.trust - to.trust).abs() * params.trust_gap_penalty
        - from.stress * params.stress_penalty
}

fn update_links(world: &mut World, params: &SimParams) {
    let views = agent_views(world);

    // Pairwise O(n^2) scan; fine up to the population ceiling.
    let mut updates: Vec<(AgentId, AgentId, f64)> = Vec::new();
    for from in &views {
        let range = from.category.social_range();
        for to in &views {
            if from.id == to.id || from.position.distance(to.position) > range {
                continue;
            }
            updates.push((from.id, to.id, link_target(params, from, to)));
        }
    }

    for (from, to, target) in updates {
        if let Some(agent) = world.agents.get_mut(&from) {
            agent
                .relationships
                .nudge_toward(to, target, params.relationship_rate);
        }
    }
}

/// Network influence: accumulated strength of good links (above 50),
/// scaled so ten perfect links saturate. Overall influence blends that
/// with leadership capacity and a bonus for leading a coalition.
fn refresh_influence(world: &mut World) {
    let leaders: Vec<AgentId> = world.coalitions.values().map(|c| c.leader).collect();
    for agent in world.agents.values_mut() {
        let quality: f64 = agent
            .relationships
            .strong(INFLUENCE_LINK_FLOOR)
            .map(|(_, s)| s - INFLUENCE_LINK_FLOOR)
            .sum();
        agent.network_influence = (quality / 5.0).clamp(0.0, 100.0);

        let leads = if leaders.contains(&agent.id) { 20.0 } else { 0.0 };
        agent.influence = (0.5 * agent.traits.get(TraitKind::LeadershipCapacity)
            + 0.4 * agent.network_influence
            + leads)
            .clamp(0.0, 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BehaviorCategory, Traits};
    use crate::testutil::{add_agent_at, tick_system};

    #[test]
    fn links_form_only_within_range() {
        let params = SimParams::default();
        let mut world = World::new();
        let a = add_agent_at(&mut world, BehaviorCategory::Follower, 100.0, 100.0);
        let b = add_agent_at(&mut world, BehaviorCategory::Follower, 150.0, 100.0);
        let far = add_agent_at(&mut world, BehaviorCategory::Follower, 700.0, 500.0);

        tick_system(&mut world, &params, &mut RelationshipSystem, 1);
        assert!(world.agents[&a].relationships.knows(b));
        assert!(world.agents[&b].relationships.knows(a));
        assert!(!world.agents[&a].relationships.knows(far));
    }

    #[test]
    fn compatible_pairs_strengthen_over_time() {
        let params = SimParams::default();
        let mut world = World::new();
        let leader = add_agent_at(&mut world, BehaviorCategory::Leader, 100.0, 100.0);
        let follower = add_agent_at(&mut world, BehaviorCategory::Follower, 120.0, 100.0);

        for seed in 0..200 {
            tick_system(&mut world, &params, &mut RelationshipSystem, seed);
        }
        // Target: 90 - 0 trust gap - 20 stress * 0.2 = 86.
        let s = world.agents[&leader].strength_toward(follower);
        assert!(s > 80.0 && s <= 86.0 + 1e-9, "strength {s}");
    }

    #[test]
    fn stress_and_trust_gap_lower_target() {
        let params = SimParams::default();
        let mut world = World::new();
        let a = add_agent_at(&mut world, BehaviorCategory::Mediator, 100.0, 100.0);
        add_agent_at(&mut world, BehaviorCategory::Mediator, 110.0, 100.0);
        let mut tense = Traits::default();
        tense.set(TraitKind::Stress, 100.0);
        tense.set(TraitKind::Trust, 0.0);
        world.agents.get_mut(&a).unwrap().traits = tense;

        let views = agent_views(&world);
        let target_ab = link_target(&params, &views[0], &views[1]);
        let target_ba = link_target(&params, &views[1], &views[0]);
        // 75 - 50*0.3 - 100*0.2 = 40 vs 75 - 15 - 4 = 56
        assert!((target_ab - 40.0).abs() < 1e-9);
        assert!((target_ba - 56.0).abs() < 1e-9);
        assert!(target_ab < target_ba);
    }

    #[test]
    fn strengths_stay_bounded() {
        let params = SimParams::default();
        let mut world = World::new();
        let a = add_agent_at(&mut world, BehaviorCategory::Leader, 100.0, 100.0);
        let b = add_agent_at(&mut world, BehaviorCategory::Leader, 101.0, 100.0);
        let mut hostile = Traits::default();
        hostile.set(TraitKind::Stress, 100.0);
        hostile.set(TraitKind::Trust, 100.0);
        world.agents.get_mut(&a).unwrap().traits = hostile;
        let mut other = Traits::default();
        other.set(TraitKind::Trust, 0.0);
        world.agents.get_mut(&b).unwrap().traits = other;

        for seed in 0..500 {
            tick_system(&mut world, &params, &mut RelationshipSystem, seed);
        }
        let s = world.agents[&a].strength_toward(b);
        assert!((0.0..=100.0).contains(&s));
        assert!(s < 1.0);
    }

    #[test]
    fn network_influence_tracks_good_links() {
        let params = SimParams::default();
        let mut world = World::new();
        let a = add_agent_at(&mut world, BehaviorCategory::Mediator, 100.0, 100.0);
        for i in 0..5 {
            let y = 10.0 + i as f64;
            let other = add_agent_at(&mut world, BehaviorCategory::Follower, 700.0, y);
            world.agents.get_mut(&a).unwrap().relationships.set(other, 100.0);
        }
        tick_system(&mut world, &params, &mut RelationshipSystem, 1);
        assert!((world.agents[&a].network_influence - 50.0).abs() < 1e-9);
        assert!(world.agents[&a].influence > 0.0);
    }
}
