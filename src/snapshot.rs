use serde::{Deserialize, Serialize};

use crate::model::{
    Agent, BehaviorMix, Coalition, CulturalTrend, DisruptiveEvent, InfluenceZone, MetricsRecord,
    World,
};

/// Read-only copy of the simulation for external consumers. Owns all of
/// its data; nothing in it aliases live state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub tick: u64,
    pub generation: u32,
    pub running: bool,
    pub agents: Vec<Agent>,
    pub coalitions: Vec<Coalition>,
    pub metrics: Vec<MetricsRecord>,
    pub active_disruptions: Vec<DisruptiveEvent>,
    pub disruption_history: Vec<DisruptiveEvent>,
    pub knowledge: Vec<String>,
    pub emergent_phenomena: Vec<String>,
    pub system_stability: f64,
    pub zones: Vec<InfluenceZone>,
    pub trends: Vec<CulturalTrend>,
    pub behavior_mix: BehaviorMix,
}

impl SimulationState {
    pub fn capture(world: &World, running: bool, mix: &BehaviorMix) -> Self {
        Self {
            tick: world.tick,
            generation: world.generation,
            running,
            agents: world.agents.values().cloned().collect(),
            coalitions: world.coalitions.values().cloned().collect(),
            metrics: world.metrics.iter().cloned().collect(),
            active_disruptions: world.disruptions.active.clone(),
            disruption_history: world.disruptions.history.iter().cloned().collect(),
            knowledge: world.knowledge.clone(),
            emergent_phenomena: world.emergent_phenomena.clone(),
            system_stability: world.system_stability,
            zones: world.zones.clone(),
            trends: world.trends.clone(),
            behavior_mix: mix.clone(),
        }
    }

    pub fn latest_metrics(&self) -> Option<&MetricsRecord> {
        self.metrics.last()
    }
}
