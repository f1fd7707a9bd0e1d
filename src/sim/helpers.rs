use rand::{Rng, RngCore};

use crate::id::{AgentId, CoalitionId};
use crate::model::{BehaviorCategory, Coalition, Position, World};

/// Read-only copy of the agent fields pairwise scans need, taken before
/// any mutation in the same pass.
#[derive(Debug, Clone)]
pub struct AgentView {
    pub id: AgentId,
    pub category: BehaviorCategory,
    pub position: Position,
    pub trust: f64,
    pub stress: f64,
    pub coalition: Option<CoalitionId>,
}

/// Views of every agent, in id order.
pub fn agent_views(world: &World) -> Vec<AgentView> {
    world
        .agents
        .values()
        .map(|a| AgentView {
            id: a.id,
            category: a.category,
            position: a.position,
            trust: a.traits.trust(),
            stress: a.traits.stress(),
            coalition: a.coalition,
        })
        .collect()
}

/// Member positions of a coalition (members missing from the population
/// are skipped).
pub fn member_positions(world: &World, coalition: &Coalition) -> Vec<Position> {
    coalition
        .members
        .iter()
        .filter_map(|m| world.agents.get(m))
        .map(|a| a.position)
        .collect()
}

/// Mean distance over every unordered member pair. `None` with fewer than
/// two positions.
pub fn mean_pairwise_distance(positions: &[Position]) -> Option<f64> {
    if positions.len() < 2 {
        return None;
    }
    let mut total = 0.0;
    let mut pairs = 0usize;
    for (i, a) in positions.iter().enumerate() {
        for b in &positions[i + 1..] {
            total += a.distance(*b);
            pairs += 1;
        }
    }
    Some(total / pairs as f64)
}

/// Arithmetic mean, 0 for an empty iterator.
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Pick a random element from a non-empty static pool.
pub fn pick<'a>(pool: &[&'a str], rng: &mut dyn RngCore) -> &'a str {
    pool[rng.random_range(0..pool.len())]
}
