use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::agent::clamp_trait;
use crate::id::{AgentId, CoalitionId};

/// How a coalition reacts when a disruption breaks out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CrisisResponse {
    Cooperative,
    Competitive,
    Isolationist,
}

string_enum!(CrisisResponse {
    Cooperative => "cooperative",
    Competitive => "competitive",
    Isolationist => "isolationist",
});

/// A named group of agents under one leader.
///
/// The coalition owns its member set; agents only hold the id back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coalition {
    pub id: CoalitionId,
    pub name: String,
    pub leader: AgentId,
    pub members: BTreeSet<AgentId>,
    cohesion: f64,
    /// Tick on which the coalition formed.
    pub formed_at: u64,
    pub goals: Vec<String>,
    pub strategies: Vec<String>,
    pub crisis_response: CrisisResponse,
}

impl Coalition {
    pub fn new(
        id: CoalitionId,
        name: String,
        leader: AgentId,
        members: BTreeSet<AgentId>,
        cohesion: f64,
        formed_at: u64,
        crisis_response: CrisisResponse,
    ) -> Self {
        Self {
            id,
            name,
            leader,
            members,
            cohesion: clamp_trait(cohesion),
            formed_at,
            goals: Vec::new(),
            strategies: Vec::new(),
            crisis_response,
        }
    }

    pub fn cohesion(&self) -> f64 {
        self.cohesion
    }

    pub fn set_cohesion(&mut self, value: f64) {
        self.cohesion = clamp_trait(value);
    }

    pub fn scale_cohesion(&mut self, factor: f64) {
        self.set_cohesion(self.cohesion * factor);
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.members.contains(&agent)
    }
}
