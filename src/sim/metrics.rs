use super::context::TickContext;
use super::names::NORMS;
use super::system::{SimSystem, TickFrequency};
use crate::model::{Agent, MetricsRecord, TraitKind, World};
use crate::params::SimParams;

/// Innovation above which an agent counts toward diffusion.
const INNOVATIVE_FLOOR: f64 = 60.0;

/// Coarse-cadence snapshot of derived indicators. Detects emergent
/// phenomena first (the emergence index depends on them), then appends one
/// record to the bounded history.
pub struct MetricsSystem;

impl SimSystem for MetricsSystem {
    fn name(&self) -> &str {
        "metrics"
    }

    fn frequency(&self) -> TickFrequency {
        TickFrequency::Coarse
    }

    fn tick(&mut self, ctx: &mut TickContext) {
        let params = ctx.params;
        let world = &mut *ctx.world;

        world.prune_births(params.formation_window);
        world.emergent_phenomena = detect_phenomena(world, params);

        let record = compute_metrics(world, params);
        world.system_stability = record.system_stability;
        world.push_metrics(record, params.metrics_history_cap);
    }
}

// --- Emergent phenomena ---

pub const TRUST_NETWORK: &str = "trust_network";
pub const INNOVATION_CASCADE: &str = "innovation_cascade";
pub const COALITION_FEDERATION: &str = "coalition_federation";
pub const CRISIS_SOLIDARITY: &str = "crisis_solidarity";
pub const CULTURAL_CONVERGENCE: &str = "cultural_convergence";
pub const LEADERSHIP_VACUUM: &str = "leadership_vacuum";

/// Tags for every phenomenon currently visible in the world, in a fixed
/// order.
pub fn detect_phenomena(world: &World, params: &SimParams) -> Vec<String> {
    if world.agents.is_empty() {
        return Vec::new();
    }
    let mut found = Vec::new();

    if network_density(world, params.strong_link_threshold) > 10.0
        && world.mean_trait(TraitKind::Trust) > 60.0
    {
        found.push(TRUST_NETWORK);
    }
    if innovation_diffusion(world) > 40.0 {
        found.push(INNOVATION_CASCADE);
    }
    if world.coalitions.len() >= 3 && world.mean_cohesion().is_some_and(|c| c > 60.0) {
        found.push(COALITION_FEDERATION);
    }
    if world.disruptions.any_active() && world.mean_cohesion().is_some_and(|c| c > 50.0) {
        found.push(CRISIS_SOLIDARITY);
    }
    if world.std_dev_trait(TraitKind::CulturalAlignment) < 8.0 {
        found.push(CULTURAL_CONVERGENCE);
    }
    let weak_leadership = world.coalitions.values().any(|c| {
        world
            .agents
            .get(&c.leader)
            .is_none_or(|a| a.traits.leadership_capacity() < 35.0)
    });
    if weak_leadership {
        found.push(LEADERSHIP_VACUUM);
    }

    found.into_iter().map(String::from).collect()
}

// --- Indicators ---

/// Directed links stronger than `threshold` as a percentage of the n(n-1)
/// possible links.
pub fn network_density(world: &World, threshold: f64) -> f64 {
    let n = world.agents.len();
    if n < 2 {
        return 0.0;
    }
    let strong: usize = world
        .agents
        .values()
        .map(|a| a.relationships.strong(threshold).count())
        .sum();
    (strong as f64 / (n * (n - 1)) as f64 * 100.0).clamp(0.0, 100.0)
}

/// Percentage of agents whose innovation is above the diffusion floor.
pub fn innovation_diffusion(world: &World) -> f64 {
    percent_of(world, |a| a.traits.innovation() > INNOVATIVE_FLOOR)
}

fn percent_of(world: &World, pred: impl Fn(&Agent) -> bool) -> f64 {
    if world.agents.is_empty() {
        return 0.0;
    }
    let hits = world.agents.values().filter(|a| pred(a)).count();
    hits as f64 / world.agents.len() as f64 * 100.0
}

fn mean_link_strength(world: &World) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;
    for agent in world.agents.values() {
        for (_, s) in agent.relationships.iter() {
            total += s;
            count += 1;
        }
    }
    if count == 0 { 0.0 } else { total / count as f64 }
}

/// Build a metrics record from the current world. Reads only.
pub fn compute_metrics(world: &World, params: &SimParams) -> MetricsRecord {
    let trust = world.mean_trait(TraitKind::Trust);
    let cooperation = world.mean_trait(TraitKind::Cooperation);
    let innovation = world.mean_trait(TraitKind::Innovation);
    let energy = world.mean_trait(TraitKind::Energy);
    let stress = world.mean_trait(TraitKind::Stress);
    let adaptability = world.mean_trait(TraitKind::Adaptability);
    let density = network_density(world, params.strong_link_threshold);

    let cohesion_or_cooperation = world.mean_cohesion().unwrap_or(cooperation);
    let resilience = 0.3 * adaptability
        + 0.25 * energy
        + 0.25 * (100.0 - stress)
        + 0.2 * cohesion_or_cooperation;

    let rich_memory = percent_of(world, |a| a.memory.len() >= params.rich_memory_threshold);

    let distinct_norms = NORMS
        .iter()
        .filter(|n| world.agents.values().any(|a| a.norms.contains(**n)))
        .count();

    let governance = if world.coalitions.is_empty() {
        0.0
    } else {
        let sum: f64 = world
            .coalitions
            .values()
            .map(|c| {
                let leadership = world
                    .agents
                    .get(&c.leader)
                    .map_or(0.0, |a| a.traits.leadership_capacity());
                0.6 * c.cohesion() + 0.4 * leadership
            })
            .sum();
        sum / world.coalitions.len() as f64
    };

    let intensity_load = (world.disruptions.total_intensity() * 10.0).min(100.0);
    let window = params.formation_window.max(1);

    let clamp = |v: f64| v.clamp(0.0, 100.0);
    MetricsRecord {
        tick: world.tick,
        generation: world.generation,
        population: world.agents.len(),
        coalition_count: world.coalitions.len(),
        active_disruptions: world.disruptions.active.len(),

        average_trust: trust,
        average_cooperation: cooperation,
        average_innovation: innovation,
        average_energy: energy,
        average_stress: stress,

        network_density: density,
        trust_propagation: clamp(100.0 - world.std_dev_trait(TraitKind::Trust)),
        trust_network_strength: clamp(mean_link_strength(world)),
        social_coherence: world.mean_trait(TraitKind::CulturalAlignment),
        collective_intelligence: clamp(0.6 * innovation + 0.4 * density),
        resilience: clamp(resilience),
        adaptation_rate: clamp(0.7 * adaptability + 0.3 * rich_memory),
        cultural_diversity: clamp(distinct_norms as f64 / NORMS.len() as f64 * 100.0),
        innovation_diffusion: innovation_diffusion(world),
        governance_effectiveness: clamp(governance),
        evolutionary_pressure: clamp(0.6 * intensity_load + 0.4 * (100.0 - adaptability)),
        emergence_index: clamp(world.emergent_phenomena.len() as f64 * params.phenomenon_weight),
        coalition_formation_rate: world.coalition_births.len() as f64 / window as f64,
        system_stability: clamp(world.stability_average()),
    }
}
