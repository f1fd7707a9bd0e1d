use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::agent::clamp_trait;
use crate::id::AgentId;

/// Strength given to a link the first time two agents meet.
pub const INITIAL_STRENGTH: f64 = 50.0;

/// One agent's outgoing links: other agent → strength in `[0, 100]`.
///
/// Links are asymmetric and created lazily on first encounter. Nothing
/// removes a link short of rebuilding the population.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Relationships {
    links: BTreeMap<AgentId, f64>,
}

impl Relationships {
    /// Stored strength toward `other`, or 0 if the two have never met.
    pub fn strength(&self, other: AgentId) -> f64 {
        self.links.get(&other).copied().unwrap_or(0.0)
    }

    pub fn knows(&self, other: AgentId) -> bool {
        self.links.contains_key(&other)
    }

    /// Exponentially smooth the link toward `target` by `rate` of the gap,
    /// creating it at [`INITIAL_STRENGTH`] first if needed.
    pub fn nudge_toward(&mut self, other: AgentId, target: f64, rate: f64) -> f64 {
        let entry = self.links.entry(other).or_insert(INITIAL_STRENGTH);
        *entry = clamp_trait(*entry + (target - *entry) * rate);
        *entry
    }

    /// Overwrite a link, clamped. Used by population seeding and tests.
    pub fn set(&mut self, other: AgentId, strength: f64) {
        self.links.insert(other, clamp_trait(strength));
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentId, f64)> + '_ {
        self.links.iter().map(|(id, s)| (*id, *s))
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Links strictly above `threshold`.
    pub fn strong(&self, threshold: f64) -> impl Iterator<Item = (AgentId, f64)> + '_ {
        self.iter().filter(move |(_, s)| *s > threshold)
    }
}
