use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use super::agent::{Agent, TraitKind};
use super::coalition::Coalition;
use super::culture::{CulturalInfluence, CulturalTrend};
use super::disruption::DisruptionState;
use super::metrics::MetricsRecord;
use super::territory::InfluenceZone;
use crate::id::{AgentId, CoalitionId, IdGenerator};

/// All mutable simulation state. Owned by the orchestrator and handed to
/// systems through `TickContext`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub tick: u64,
    pub generation: u32,
    pub agents: BTreeMap<AgentId, Agent>,
    pub coalitions: BTreeMap<CoalitionId, Coalition>,
    pub disruptions: DisruptionState,
    pub metrics: VecDeque<MetricsRecord>,
    pub knowledge: Vec<String>,
    pub emergent_phenomena: Vec<String>,
    pub system_stability: f64,
    pub zones: Vec<InfluenceZone>,
    /// Formation ticks of recent coalitions, dissolved ones included.
    pub coalition_births: VecDeque<u64>,
    /// Last successfully fetched advisory bundle.
    pub cultural_influence: Option<CulturalInfluence>,
    pub trends: Vec<CulturalTrend>,
    pub id_gen: IdGenerator,
}

impl World {
    pub fn new() -> Self {
        Self {
            tick: 0,
            generation: 1,
            agents: BTreeMap::new(),
            coalitions: BTreeMap::new(),
            disruptions: DisruptionState::default(),
            metrics: VecDeque::new(),
            knowledge: Vec::new(),
            emergent_phenomena: Vec::new(),
            system_stability: 50.0,
            zones: Vec::new(),
            coalition_births: VecDeque::new(),
            cultural_influence: None,
            trends: Vec::new(),
            id_gen: IdGenerator::new(),
        }
    }

    pub fn add_agent(&mut self, agent: Agent) {
        self.agents.insert(agent.id, agent);
    }

    /// Register a coalition and point every member back at it.
    pub fn add_coalition(&mut self, coalition: Coalition) {
        for member in &coalition.members {
            if let Some(agent) = self.agents.get_mut(member) {
                agent.coalition = Some(coalition.id);
            }
        }
        self.coalition_births.push_back(coalition.formed_at);
        self.coalitions.insert(coalition.id, coalition);
    }

    /// Remove a coalition, its influence zone, and every member's
    /// back-reference.
    pub fn dissolve_coalition(&mut self, id: CoalitionId) -> Option<Coalition> {
        let coalition = self.coalitions.remove(&id)?;
        self.zones.retain(|z| z.coalition != id);
        for member in &coalition.members {
            if let Some(agent) = self.agents.get_mut(member)
                && agent.coalition == Some(id)
            {
                agent.coalition = None;
            }
        }
        Some(coalition)
    }

    /// Population mean of a trait (0 for an empty population).
    pub fn mean_trait(&self, kind: TraitKind) -> f64 {
        if self.agents.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.agents.values().map(|a| a.traits.get(kind)).sum();
        sum / self.agents.len() as f64
    }

    /// Population standard deviation of a trait.
    pub fn std_dev_trait(&self, kind: TraitKind) -> f64 {
        if self.agents.is_empty() {
            return 0.0;
        }
        let mean = self.mean_trait(kind);
        let var: f64 = self
            .agents
            .values()
            .map(|a| (a.traits.get(kind) - mean).powi(2))
            .sum::<f64>()
            / self.agents.len() as f64;
        var.sqrt()
    }

    pub fn mean_cohesion(&self) -> Option<f64> {
        if self.coalitions.is_empty() {
            return None;
        }
        let sum: f64 = self.coalitions.values().map(|c| c.cohesion()).sum();
        Some(sum / self.coalitions.len() as f64)
    }

    /// Mean of population trust, population cooperation, and mean coalition
    /// cohesion. With no coalitions the cohesion term is left out.
    pub fn stability_average(&self) -> f64 {
        let trust = self.mean_trait(TraitKind::Trust);
        let cooperation = self.mean_trait(TraitKind::Cooperation);
        match self.mean_cohesion() {
            Some(cohesion) => (trust + cooperation + cohesion) / 3.0,
            None => (trust + cooperation) / 2.0,
        }
    }

    /// Append a metrics record, evicting the oldest past `cap`.
    pub fn push_metrics(&mut self, record: MetricsRecord, cap: usize) {
        while self.metrics.len() >= cap.max(1) {
            self.metrics.pop_front();
        }
        self.metrics.push_back(record);
    }

    /// Drop coalition births older than `window` ticks.
    pub fn prune_births(&mut self, window: u64) {
        let cutoff = self.tick.saturating_sub(window);
        while self.coalition_births.front().is_some_and(|&t| t < cutoff) {
            self.coalition_births.pop_front();
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
