use super::context::TickContext;
use super::system::{SimSystem, TickFrequency};
use crate::model::{TraitKind, TrendCategory};

/// Applies the last fetched advisory inputs as small per-tick nudges: the
/// cultural influence bundle (heavily damped) and every live cultural
/// trend on the categories it affects.
pub struct InfluenceSystem;

impl SimSystem for InfluenceSystem {
    fn name(&self) -> &str {
        "influence"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::EveryTick
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let params = ctx.params;
        let world = &mut *ctx.world;

        if let Some(bundle) = world.cultural_influence {
            let damping = params.influence_damping.max(1.0);
            for agent in world.agents.values_mut() {
                agent.traits.adjust(TraitKind::Trust, bundle.optimism / damping);
                agent
                    .traits
                    .adjust(TraitKind::Cooperation, bundle.social_cohesion / damping);
                agent
                    .traits
                    .adjust(TraitKind::Innovation, bundle.innovation_appetite / damping);
            }
        }

        for trend in &world.trends {
            let nudge = trend.intensity / 100.0 * params.trend_nudge;
            let targets = trend_traits(trend.category);
            for agent in world.agents.values_mut() {
                if !trend.affects(agent.category) {
                    continue;
                }
                for kind in targets {
                    agent.traits.adjust(kind, nudge);
                }
            }
        }
    }
}

/// Traits a trend of the given category pushes on.
pub fn trend_traits(category: TrendCategory) -> [TraitKind; 2] {
    match category {
        TrendCategory::Technological => [TraitKind::Innovation, TraitKind::Adaptability],
        TrendCategory::Social => [TraitKind::Cooperation, TraitKind::CulturalAlignment],
        TrendCategory::Economic => [TraitKind::Cooperation, TraitKind::Adaptability],
        TrendCategory::Political => [TraitKind::CulturalAlignment, TraitKind::Cooperation],
        TrendCategory::Cultural => [TraitKind::CulturalAlignment, TraitKind::Innovation],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BehaviorCategory, CulturalInfluence, CulturalTrend, World};
    use crate::params::SimParams;
    use crate::testutil::{add_agent_at, tick_system};

    #[test]
    fn no_advisory_input_changes_nothing() {
        let params = SimParams::default();
        let mut world = World::new();
        let a = add_agent_at(&mut world, BehaviorCategory::Follower, 1.0, 1.0);
        let before = world.agents[&a].traits.clone();
        tick_system(&mut world, &params, &mut InfluenceSystem, 1);
        assert_eq!(world.agents[&a].traits, before);
    }

    #[test]
    fn cultural_bundle_is_damped() {
        let params = SimParams::default();
        let mut world = World::new();
        let a = add_agent_at(&mut world, BehaviorCategory::Follower, 1.0, 1.0);
        world.cultural_influence = Some(CulturalInfluence {
            innovation_appetite: 100.0,
            social_cohesion: 50.0,
            optimism: 100.0,
        });
        tick_system(&mut world, &params, &mut InfluenceSystem, 1);
        let traits = &world.agents[&a].traits;
        assert!((traits.trust() - 50.02).abs() < 1e-9);
        assert!((traits.cooperation() - 50.01).abs() < 1e-9);
        assert!((traits.innovation() - 50.02).abs() < 1e-9);
    }

    #[test]
    fn trends_only_touch_affected_categories() {
        let params = SimParams::default();
        let mut world = World::new();
        let innovator = add_agent_at(&mut world, BehaviorCategory::Innovator, 1.0, 1.0);
        let follower = add_agent_at(&mut world, BehaviorCategory::Follower, 2.0, 1.0);
        world.trends.push(CulturalTrend {
            name: "open_tools".into(),
            category: TrendCategory::Technological,
            intensity: 100.0,
            growth_rate: 0.0,
            affects: vec![BehaviorCategory::Innovator],
            peak_tick: 1000,
        });
        tick_system(&mut world, &params, &mut InfluenceSystem, 1);
        assert!(world.agents[&innovator].traits.innovation() > 50.0);
        assert!(world.agents[&innovator].traits.adaptability() > 50.0);
        assert_eq!(world.agents[&follower].traits.innovation(), 50.0);
    }
}
