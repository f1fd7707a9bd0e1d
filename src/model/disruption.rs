use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::id::DisruptionId;

pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DisruptionKind {
    GovernanceCrisis,
    InnovationCatalyst,
    ResourceScarcity,
    SocialUpheaval,
    ExternalThreat,
    CulturalShift,
}

string_enum!(DisruptionKind {
    GovernanceCrisis => "governance_crisis",
    InnovationCatalyst => "innovation_catalyst",
    ResourceScarcity => "resource_scarcity",
    SocialUpheaval => "social_upheaval",
    ExternalThreat => "external_threat",
    CulturalShift => "cultural_shift",
});

impl DisruptionKind {
    /// Multiplier applied to every coalition's cohesion on each tick the
    /// event is active.
    pub fn cohesion_factor(self) -> Option<f64> {
        match self {
            DisruptionKind::GovernanceCrisis => Some(0.8),
            DisruptionKind::InnovationCatalyst => Some(1.1),
            _ => None,
        }
    }

    /// Projected change in coalition stability per unit intensity, used by
    /// impact previews.
    pub fn stability_bias(self) -> f64 {
        match self {
            DisruptionKind::GovernanceCrisis => -2.0,
            DisruptionKind::InnovationCatalyst => 1.0,
            DisruptionKind::ResourceScarcity => -0.8,
            DisruptionKind::SocialUpheaval => -1.2,
            DisruptionKind::ExternalThreat => 0.5,
            DisruptionKind::CulturalShift => -0.3,
        }
    }
}

/// Per-unit-intensity trait deltas an event applies each tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Effects {
    pub trust: f64,
    pub energy: f64,
    pub cooperation: f64,
    pub innovation: f64,
}

/// Gates a catalog event must pass before it may fire.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmergenceConditions {
    pub min_generation: u32,
    pub required_coalitions: usize,
    pub stability_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisruptiveEvent {
    pub id: DisruptionId,
    pub kind: DisruptionKind,
    pub name: String,
    pub description: String,
    pub intensity: u8,
    /// Ticks left before the event expires.
    pub duration: u32,
    pub effects: Effects,
    pub conditions: EmergenceConditions,
    pub is_active: bool,
    /// Tick on which the event became active.
    pub started_at: Option<u64>,
}

impl DisruptiveEvent {
    /// `intensity / 10`, the scale applied to every modifier.
    pub fn intensity_scale(&self) -> f64 {
        f64::from(self.intensity) / f64::from(MAX_INTENSITY)
    }

    pub fn activate(&mut self, tick: u64) {
        self.is_active = true;
        self.started_at = Some(tick);
    }
}

/// Caller-supplied partial event. Missing fields take defaults
/// (intensity 5, duration 30, zero effects, zero conditions).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisruptionSpec {
    pub kind: Option<DisruptionKind>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub intensity: Option<u8>,
    pub duration: Option<u32>,
    pub effects: Option<Effects>,
    pub conditions: Option<EmergenceConditions>,
}

pub const DEFAULT_INTENSITY: u8 = 5;
pub const DEFAULT_DURATION: u32 = 30;

impl DisruptionSpec {
    pub fn into_event(self, id: DisruptionId) -> DisruptiveEvent {
        let kind = self.kind.unwrap_or(DisruptionKind::SocialUpheaval);
        DisruptiveEvent {
            id,
            kind,
            name: self.name.unwrap_or_else(|| format!("Manual {kind}")),
            description: self.description.unwrap_or_default(),
            intensity: self
                .intensity
                .unwrap_or(DEFAULT_INTENSITY)
                .clamp(MIN_INTENSITY, MAX_INTENSITY),
            duration: self.duration.unwrap_or(DEFAULT_DURATION),
            effects: self.effects.unwrap_or_default(),
            conditions: self.conditions.unwrap_or_default(),
            is_active: false,
            started_at: None,
        }
    }
}

/// Projected outcome of firing an event now. Pure preview data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactPrediction {
    pub trust: f64,
    pub cooperation: f64,
    pub innovation: f64,
    pub coalition_stability: f64,
    pub emergence_probability: f64,
}

/// Dormant catalog, active set, and expired history of disruptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisruptionState {
    pub dormant: Vec<DisruptiveEvent>,
    pub active: Vec<DisruptiveEvent>,
    pub history: VecDeque<DisruptiveEvent>,
}

impl DisruptionState {
    pub fn with_catalog(dormant: Vec<DisruptiveEvent>) -> Self {
        Self {
            dormant,
            ..Self::default()
        }
    }

    pub fn any_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Sum of the intensities of every active event.
    pub fn total_intensity(&self) -> f64 {
        self.active.iter().map(|e| f64::from(e.intensity)).sum()
    }

    /// Append an expired event, evicting the oldest past `cap`.
    pub fn archive(&mut self, event: DisruptiveEvent, cap: usize) {
        while self.history.len() >= cap.max(1) {
            self.history.pop_front();
        }
        self.history.push_back(event);
    }

    /// Serialize into an opaque buffer the orchestrator can checkpoint.
    pub fn save(&self) -> Result<Vec<u8>, SimError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn restore(bytes: &[u8]) -> Result<Self, SimError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
