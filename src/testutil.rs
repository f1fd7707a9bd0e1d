use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::id::AgentId;
use crate::model::{Agent, BehaviorCategory, Position, Traits, World};
use crate::params::SimParams;
use crate::sim::{Signal, SimSystem, TickContext};

// --- World builders ---

/// Add an agent with default traits at `(x, y)`. Returns its id.
pub fn add_agent_at(world: &mut World, category: BehaviorCategory, x: f64, y: f64) -> AgentId {
    let id = world.id_gen.agent();
    let name = format!("{category}-{}", id.0);
    world.add_agent(Agent::new(
        id,
        name,
        category,
        Position::new(x, y),
        Traits::default(),
    ));
    id
}

/// Set the relationship strength in both directions.
pub fn bond(world: &mut World, a: AgentId, b: AgentId, strength: f64) {
    if let Some(agent) = world.agents.get_mut(&a) {
        agent.relationships.set(b, strength);
    }
    if let Some(agent) = world.agents.get_mut(&b) {
        agent.relationships.set(a, strength);
    }
}

// --- Tick execution helpers ---

/// Run a single system's tick pass without advancing `world.tick`.
/// Returns emitted signals.
pub fn tick_system(
    world: &mut World,
    params: &SimParams,
    system: &mut dyn SimSystem,
    seed: u64,
) -> Vec<Signal> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut signals = Vec::new();
    let mut ctx = TickContext {
        world,
        params,
        rng: &mut rng,
        signals: &mut signals,
        inbox: &[],
    };
    system.tick(&mut ctx);
    signals
}

/// Run a system's handle_signals with the given inbox. Returns newly
/// emitted signals.
pub fn deliver_signals(
    world: &mut World,
    params: &SimParams,
    system: &mut dyn SimSystem,
    inbox: &[Signal],
    seed: u64,
) -> Vec<Signal> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut signals = Vec::new();
    let mut ctx = TickContext {
        world,
        params,
        rng: &mut rng,
        signals: &mut signals,
        inbox,
    };
    system.handle_signals(&mut ctx);
    signals
}

// --- Invariant checks ---

/// Every agent's coalition back-reference points at a live coalition that
/// lists it, and every coalition member points back.
pub fn assert_membership_consistent(world: &World) {
    for agent in world.agents.values() {
        if let Some(cid) = agent.coalition {
            let coalition = world
                .coalitions
                .get(&cid)
                .unwrap_or_else(|| panic!("{} references dead {cid}", agent.id));
            assert!(
                coalition.contains(agent.id),
                "{} not listed in {cid}",
                agent.id
            );
        }
    }
    for coalition in world.coalitions.values() {
        for member in &coalition.members {
            let agent = &world.agents[member];
            assert_eq!(agent.coalition, Some(coalition.id), "{member} lost its back-reference");
        }
    }
}
