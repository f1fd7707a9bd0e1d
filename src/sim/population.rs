use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::names::generate_agent_name;
use crate::model::{Agent, BehaviorCategory, BehaviorMix, Position, TraitKind, Traits, World};
use crate::params::SimParams;

/// Category-specific trait emphasis laid on top of the random baseline.
fn bias(category: BehaviorCategory) -> &'static [(TraitKind, f64)] {
    match category {
        BehaviorCategory::Leader => &[
            (TraitKind::LeadershipCapacity, 25.0),
            (TraitKind::SocialIntelligence, 10.0),
        ],
        BehaviorCategory::Follower => &[(TraitKind::Cooperation, 20.0), (TraitKind::Trust, 10.0)],
        BehaviorCategory::Innovator => &[
            (TraitKind::Innovation, 25.0),
            (TraitKind::InnovationPotential, 20.0),
        ],
        BehaviorCategory::Mediator => &[
            (TraitKind::SocialIntelligence, 20.0),
            (TraitKind::Trust, 10.0),
        ],
        BehaviorCategory::Explorer => &[(TraitKind::Adaptability, 20.0), (TraitKind::Energy, 10.0)],
    }
}

/// Random traits for a fresh agent of `category`. Baselines are drawn from
/// `[30, 70)`, energy and stress start near their resting levels.
pub fn generate_traits(category: BehaviorCategory, rng: &mut dyn RngCore) -> Traits {
    let mut traits = Traits::default();
    for kind in TraitKind::ALL {
        let base = match kind {
            TraitKind::Energy => rng.random_range(60.0..80.0),
            TraitKind::Stress => rng.random_range(10.0..30.0),
            TraitKind::CognitiveLoad => rng.random_range(20.0..40.0),
            _ => rng.random_range(30.0..70.0),
        };
        traits.set(*kind, base);
    }
    for (kind, bonus) in bias(category) {
        traits.adjust(*kind, *bonus);
    }
    traits
}

/// Replace the whole population (and everything derived from it) with `n`
/// fresh agents split according to `mix`.
pub fn populate(
    world: &mut World,
    params: &SimParams,
    mix: &BehaviorMix,
    n: usize,
    rng: &mut dyn RngCore,
) {
    world.coalitions.clear();
    world.agents.clear();
    world.zones.clear();
    world.coalition_births.clear();

    let mut categories: Vec<BehaviorCategory> = mix
        .counts(n)
        .into_iter()
        .flat_map(|(c, k)| std::iter::repeat_n(c, k))
        .collect();
    categories.shuffle(rng);

    for category in categories {
        let id = world.id_gen.agent();
        let position = Position::new(
            rng.random_range(0.0..params.world_width),
            rng.random_range(0.0..params.world_height),
        );
        let name = generate_agent_name(category, id.0, rng);
        let traits = generate_traits(category, rng);
        world.add_agent(Agent::new(id, name, category, position, traits));
    }
}
