use tracing::info;

use super::context::TickContext;
use super::system::{SimSystem, TickFrequency};
use crate::model::TraitKind;

/// Advances the generation counter. Agents that have lived through enough
/// to fill their memory get a small adaptability bonus.
pub struct EvolutionSystem;

impl SimSystem for EvolutionSystem {
    fn name(&self) -> &str {
        "evolution"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::Generational
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let params = ctx.params;
        let world = &mut *ctx.world;
        world.generation += 1;

        let mut adapted = 0usize;
        for agent in world.agents.values_mut() {
            if agent.memory.len() >= params.rich_memory_threshold {
                agent
                    .traits
                    .adjust(TraitKind::Adaptability, params.adaptability_bonus);
                adapted += 1;
            }
        }

        info!(
            generation = world.generation,
            tick = world.tick,
            adapted,
            "generation advanced"
        );
    }
}
