use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::position::Position;
use super::relationship::Relationships;
use crate::id::{AgentId, CoalitionId};

/// Lower bound shared by every scalar trait.
pub const TRAIT_MIN: f64 = 0.0;
/// Upper bound shared by every scalar trait.
pub const TRAIT_MAX: f64 = 100.0;

pub fn clamp_trait(value: f64) -> f64 {
    if value.is_nan() {
        return TRAIT_MIN;
    }
    value.clamp(TRAIT_MIN, TRAIT_MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BehaviorCategory {
    Leader,
    Follower,
    Innovator,
    Mediator,
    Explorer,
}

string_enum!(BehaviorCategory {
    Leader => "leader",
    Follower => "follower",
    Innovator => "innovator",
    Mediator => "mediator",
    Explorer => "explorer",
});

impl BehaviorCategory {
    pub fn movement_pattern(self) -> MovementPattern {
        match self {
            BehaviorCategory::Leader => MovementPattern::Territorial,
            BehaviorCategory::Follower | BehaviorCategory::Mediator => MovementPattern::Social,
            BehaviorCategory::Innovator => MovementPattern::Strategic,
            BehaviorCategory::Explorer => MovementPattern::Nomadic,
        }
    }

    /// Distance within which this category notices and bonds with others.
    pub fn social_range(self) -> f64 {
        match self {
            BehaviorCategory::Leader => 120.0,
            BehaviorCategory::Follower => 80.0,
            BehaviorCategory::Innovator => 90.0,
            BehaviorCategory::Mediator => 140.0,
            BehaviorCategory::Explorer => 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum MovementPattern {
    Territorial,
    Nomadic,
    Social,
    Strategic,
}

string_enum!(MovementPattern {
    Territorial => "territorial",
    Nomadic => "nomadic",
    Social => "social",
    Strategic => "strategic",
});

/// Addressable scalar traits. Every one of them lives in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TraitKind {
    Trust,
    Cooperation,
    Innovation,
    Energy,
    Stress,
    Adaptability,
    CulturalAlignment,
    InnovationPotential,
    LeadershipCapacity,
    CognitiveLoad,
    SocialIntelligence,
}

string_enum!(TraitKind {
    Trust => "trust",
    Cooperation => "cooperation",
    Innovation => "innovation",
    Energy => "energy",
    Stress => "stress",
    Adaptability => "adaptability",
    CulturalAlignment => "cultural_alignment",
    InnovationPotential => "innovation_potential",
    LeadershipCapacity => "leadership_capacity",
    CognitiveLoad => "cognitive_load",
    SocialIntelligence => "social_intelligence",
});

/// The clamped scalar traits of an agent.
///
/// Fields are private so that every write goes through [`Traits::set`] or
/// [`Traits::adjust`], both of which clamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    trust: f64,
    cooperation: f64,
    innovation: f64,
    energy: f64,
    stress: f64,
    adaptability: f64,
    cultural_alignment: f64,
    innovation_potential: f64,
    leadership_capacity: f64,
    cognitive_load: f64,
    social_intelligence: f64,
}

impl Default for Traits {
    fn default() -> Self {
        Self {
            trust: 50.0,
            cooperation: 50.0,
            innovation: 50.0,
            energy: 70.0,
            stress: 20.0,
            adaptability: 50.0,
            cultural_alignment: 50.0,
            innovation_potential: 50.0,
            leadership_capacity: 50.0,
            cognitive_load: 30.0,
            social_intelligence: 50.0,
        }
    }
}

impl Traits {
    fn slot(&mut self, kind: TraitKind) -> &mut f64 {
        match kind {
            TraitKind::Trust => &mut self.trust,
            TraitKind::Cooperation => &mut self.cooperation,
            TraitKind::Innovation => &mut self.innovation,
            TraitKind::Energy => &mut self.energy,
            TraitKind::Stress => &mut self.stress,
            TraitKind::Adaptability => &mut self.adaptability,
            TraitKind::CulturalAlignment => &mut self.cultural_alignment,
            TraitKind::InnovationPotential => &mut self.innovation_potential,
            TraitKind::LeadershipCapacity => &mut self.leadership_capacity,
            TraitKind::CognitiveLoad => &mut self.cognitive_load,
            TraitKind::SocialIntelligence => &mut self.social_intelligence,
        }
    }

    pub fn get(&self, kind: TraitKind) -> f64 {
        match kind {
            TraitKind::Trust => self.trust,
            TraitKind::Cooperation => self.cooperation,
            TraitKind::Innovation => self.innovation,
            TraitKind::Energy => self.energy,
            TraitKind::Stress => self.stress,
            TraitKind::Adaptability => self.adaptability,
            TraitKind::CulturalAlignment => self.cultural_alignment,
            TraitKind::InnovationPotential => self.innovation_potential,
            TraitKind::LeadershipCapacity => self.leadership_capacity,
            TraitKind::CognitiveLoad => self.cognitive_load,
            TraitKind::SocialIntelligence => self.social_intelligence,
        }
    }

    pub fn set(&mut self, kind: TraitKind, value: f64) {
        *self.slot(kind) = clamp_trait(value);
    }

    /// Add `delta` and clamp. A non-finite delta is ignored.
    pub fn adjust(&mut self, kind: TraitKind, delta: f64) {
        if !delta.is_finite() {
            return;
        }
        let slot = self.slot(kind);
        *slot = clamp_trait(*slot + delta);
    }

    /// Move `kind` a fraction `rate` of the way toward `target`.
    pub fn relax_toward(&mut self, kind: TraitKind, target: f64, rate: f64) {
        let current = self.get(kind);
        self.set(kind, current + (target - current) * rate);
    }

    pub fn trust(&self) -> f64 {
        self.trust
    }

    pub fn cooperation(&self) -> f64 {
        self.cooperation
    }

    pub fn innovation(&self) -> f64 {
        self.innovation
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn stress(&self) -> f64 {
        self.stress
    }

    pub fn adaptability(&self) -> f64 {
        self.adaptability
    }

    pub fn cultural_alignment(&self) -> f64 {
        self.cultural_alignment
    }

    pub fn leadership_capacity(&self) -> f64 {
        self.leadership_capacity
    }

    pub fn social_intelligence(&self) -> f64 {
        self.social_intelligence
    }
}

/// Bounded FIFO of short textual tags. Oldest entries are evicted first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    entries: VecDeque<String>,
}

impl Memory {
    pub fn remember(&mut self, tag: impl Into<String>, capacity: usize) {
        if capacity == 0 {
            return;
        }
        while self.entries.len() >= capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(tag.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.iter().any(|e| e == tag)
    }
}

/// An autonomous social unit ("primatom").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub category: BehaviorCategory,
    pub movement: MovementPattern,
    pub position: Position,
    pub target: Position,
    pub traits: Traits,
    pub influence: f64,
    pub network_influence: f64,
    /// Weak reference: the coalition this agent belongs to, if any.
    pub coalition: Option<CoalitionId>,
    pub relationships: Relationships,
    pub memory: Memory,
    pub norms: BTreeSet<String>,
    pub age: f64,
}

impl Agent {
    pub fn new(
        id: AgentId,
        name: String,
        category: BehaviorCategory,
        position: Position,
        traits: Traits,
    ) -> Self {
        Self {
            id,
            name,
            category,
            movement: category.movement_pattern(),
            position,
            target: position,
            traits,
            influence: 0.0,
            network_influence: 0.0,
            coalition: None,
            relationships: Relationships::default(),
            memory: Memory::default(),
            norms: BTreeSet::new(),
            age: 0.0,
        }
    }

    pub fn is_unattached(&self) -> bool {
        self.coalition.is_none()
    }

    /// Outgoing relationship strength toward `other` (0 when never met).
    pub fn strength_toward(&self, other: AgentId) -> f64 {
        self.relationships.strength(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_ignores_non_finite_delta() {
        let mut traits = Traits::default();
        traits.adjust(TraitKind::Innovation, f64::NAN);
        traits.adjust(TraitKind::Innovation, f64::NEG_INFINITY);
        assert_eq!(traits.innovation(), 50.0);
    }

    #[test]
    fn adjust_clamps_both_ends() {
        let mut traits = Traits::default();
        traits.adjust(TraitKind::Trust, 500.0);
        assert_eq!(traits.trust(), 100.0);
        traits.adjust(TraitKind::Trust, -1000.0);
        assert_eq!(traits.trust(), 0.0);
    }

    #[test]
    fn set_rejects_nan() {
        let mut traits = Traits::default();
        traits.set(TraitKind::Stress, f64::NAN);
        assert_eq!(traits.stress(), 0.0);
    }

    #[test]
    fn relax_toward_moves_fractionally() {
        let mut traits = Traits::default();
        traits.set(TraitKind::Energy, 50.0);
        traits.relax_toward(TraitKind::Energy, 100.0, 0.1);
        assert!((traits.energy() - 55.0).abs() < 1e-9);
    }

    #[test]
    fn memory_evicts_oldest_first() {
        let mut memory = Memory::default();
        for i in 0..5 {
            memory.remember(format!("tag-{i}"), 3);
        }
        let tags: Vec<&str> = memory.iter().collect();
        assert_eq!(tags, vec!["tag-2", "tag-3", "tag-4"]);
    }

    #[test]
    fn movement_pattern_follows_category() {
        assert_eq!(
            BehaviorCategory::Explorer.movement_pattern(),
            MovementPattern::Nomadic
        );
        assert_eq!(
            BehaviorCategory::Leader.movement_pattern(),
            MovementPattern::Territorial
        );
    }

    #[test]
    fn category_string_round_trip() {
        let json = serde_json::to_string(&BehaviorCategory::Mediator).unwrap();
        assert_eq!(json, "\"mediator\"");
        assert!(BehaviorCategory::try_from("warlord".to_string()).is_err());
        assert_eq!(BehaviorCategory::ALL.len(), 5);
        assert_eq!(BehaviorCategory::Innovator.index(), 2);
    }
}
