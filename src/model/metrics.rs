use serde::{Deserialize, Serialize};

/// One coarse-cadence sample of derived population indicators.
///
/// Every scalar except the counts and `coalition_formation_rate` is on the
/// `[0, 100]` scale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricsRecord {
    pub tick: u64,
    pub generation: u32,
    pub population: usize,
    pub coalition_count: usize,
    pub active_disruptions: usize,

    pub average_trust: f64,
    pub average_cooperation: f64,
    pub average_innovation: f64,
    pub average_energy: f64,
    pub average_stress: f64,

    pub network_density: f64,
    pub trust_propagation: f64,
    pub trust_network_strength: f64,
    pub social_coherence: f64,
    pub collective_intelligence: f64,
    pub resilience: f64,
    pub adaptation_rate: f64,
    pub cultural_diversity: f64,
    pub innovation_diffusion: f64,
    pub governance_effectiveness: f64,
    pub evolutionary_pressure: f64,
    pub emergence_index: f64,
    /// Coalitions formed per tick over the trailing window.
    pub coalition_formation_rate: f64,
    pub system_stability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StabilityTrend {
    Stable,
    Rising,
    Declining,
    Volatile,
}

string_enum!(StabilityTrend {
    Stable => "stable",
    Rising => "rising",
    Declining => "declining",
    Volatile => "volatile",
});

/// How many records back the trend comparison looks.
pub const TREND_LOOKBACK: usize = 5;

impl StabilityTrend {
    /// Discretize a resilience change.
    pub fn from_delta(delta: f64) -> Self {
        if delta.abs() < 2.0 {
            StabilityTrend::Stable
        } else if delta > 5.0 {
            StabilityTrend::Rising
        } else if delta < -5.0 {
            StabilityTrend::Declining
        } else {
            StabilityTrend::Volatile
        }
    }

    /// Classify the latest resilience against the value [`TREND_LOOKBACK`]
    /// records earlier (or the oldest available). Fewer than two records is
    /// stable.
    pub fn classify<'a>(history: impl IntoIterator<Item = &'a MetricsRecord>) -> Self {
        let resilience: Vec<f64> = history.into_iter().map(|r| r.resilience).collect();
        let Some(&latest) = resilience.last() else {
            return StabilityTrend::Stable;
        };
        if resilience.len() < 2 {
            return StabilityTrend::Stable;
        }
        let base_idx = resilience.len().saturating_sub(TREND_LOOKBACK + 1);
        Self::from_delta(latest - resilience[base_idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_resilience(values: &[f64]) -> Vec<MetricsRecord> {
        values
            .iter()
            .map(|&r| MetricsRecord {
                resilience: r,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn delta_thresholds() {
        assert_eq!(StabilityTrend::from_delta(1.9), StabilityTrend::Stable);
        assert_eq!(StabilityTrend::from_delta(-1.9), StabilityTrend::Stable);
        assert_eq!(StabilityTrend::from_delta(5.1), StabilityTrend::Rising);
        assert_eq!(StabilityTrend::from_delta(-5.1), StabilityTrend::Declining);
        assert_eq!(StabilityTrend::from_delta(3.0), StabilityTrend::Volatile);
        assert_eq!(StabilityTrend::from_delta(-3.0), StabilityTrend::Volatile);
    }

    #[test]
    fn short_history_is_stable() {
        let empty: Vec<MetricsRecord> = Vec::new();
        assert_eq!(StabilityTrend::classify(&empty), StabilityTrend::Stable);
        assert_eq!(
            StabilityTrend::classify(&with_resilience(&[80.0])),
            StabilityTrend::Stable
        );
    }

    #[test]
    fn classify_uses_lookback_window() {
        // Only the last six values matter: 50 -> 62.
        let history = with_resilience(&[10.0, 50.0, 52.0, 55.0, 58.0, 60.0, 62.0]);
        assert_eq!(StabilityTrend::classify(&history), StabilityTrend::Rising);

        let history = with_resilience(&[70.0, 66.0, 60.0]);
        assert_eq!(StabilityTrend::classify(&history), StabilityTrend::Declining);
    }
}
