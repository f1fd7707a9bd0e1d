use serde::{Deserialize, Serialize};

use super::agent::BehaviorCategory;

/// Advisory bundle of `[0, 100]` scalars from an external cultural feed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CulturalInfluence {
    pub innovation_appetite: f64,
    pub social_cohesion: f64,
    pub optimism: f64,
}

impl CulturalInfluence {
    /// Copy with every scalar forced into `[0, 100]` (NaN reads as 0).
    pub fn clamped(self) -> Self {
        let c = |v: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0) };
        Self {
            innovation_appetite: c(self.innovation_appetite),
            social_cohesion: c(self.social_cohesion),
            optimism: c(self.optimism),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum TrendCategory {
    Technological,
    Social,
    Economic,
    Political,
    Cultural,
}

string_enum!(TrendCategory {
    Technological => "technological",
    Social => "social",
    Economic => "economic",
    Political => "political",
    Cultural => "cultural",
});

/// A named cultural trend nudging the agents of the categories it affects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalTrend {
    pub name: String,
    pub category: TrendCategory,
    /// Strength on `[0, 100]`.
    pub intensity: f64,
    /// Fractional change of `intensity` per coarse tick until the peak.
    pub growth_rate: f64,
    pub affects: Vec<BehaviorCategory>,
    /// Tick after which the trend ages out.
    pub peak_tick: u64,
}

impl CulturalTrend {
    pub fn affects(&self, category: BehaviorCategory) -> bool {
        self.affects.contains(&category)
    }
}

/// What an insight feed proposes; the tick it was received anchors the
/// peak time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendProposal {
    pub name: String,
    pub category: TrendCategory,
    pub intensity: f64,
    pub growth_rate: f64,
    pub affects: Vec<BehaviorCategory>,
    pub peak_in_ticks: u64,
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

impl TrendProposal {
    pub fn into_trend(self, now: u64) -> CulturalTrend {
        CulturalTrend {
            name: self.name,
            category: self.category,
            intensity: finite_or_zero(self.intensity).clamp(0.0, 100.0),
            growth_rate: finite_or_zero(self.growth_rate),
            affects: self.affects,
            peak_tick: now.saturating_add(self.peak_in_ticks),
        }
    }
}
