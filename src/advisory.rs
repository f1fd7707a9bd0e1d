//! Optional external inputs. Each port is polled once per coarse tick and
//! either hands back a value or reports itself unavailable; the tick never
//! waits on one.

use thiserror::Error;

use crate::model::{
    BehaviorCategory, CulturalInfluence, CulturalTrend, TrendCategory, TrendProposal,
};

/// An advisory collaborator could not produce a value this round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("advisory source {source_name} unavailable: {reason}")]
pub struct AdvisoryUnavailable {
    pub source_name: String,
    pub reason: String,
}

impl AdvisoryUnavailable {
    pub fn new(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// Supplies the damped cultural-influence bundle.
pub trait CulturalAdvisor: Send {
    fn poll(&mut self) -> Result<CulturalInfluence, AdvisoryUnavailable>;
}

/// Supplies named cultural trends.
pub trait InsightAdvisor: Send {
    fn poll(&mut self) -> Result<Vec<TrendProposal>, AdvisoryUnavailable>;
}

/// Always answers with the same bundle. Handy for headless runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedInfluence(pub CulturalInfluence);

impl CulturalAdvisor for FixedInfluence {
    fn poll(&mut self) -> Result<CulturalInfluence, AdvisoryUnavailable> {
        Ok(self.0)
    }
}

const FALLBACK_PEAK: u64 = 200;

/// Trends installed when the insight feed is down. Same input, same output.
pub fn fallback_trends(now: u64) -> Vec<CulturalTrend> {
    use BehaviorCategory::*;

    let proposals = [
        TrendProposal {
            name: "collaborative_tooling".into(),
            category: TrendCategory::Technological,
            intensity: 40.0,
            growth_rate: 0.02,
            affects: vec![Innovator, Explorer],
            peak_in_ticks: FALLBACK_PEAK,
        },
        TrendProposal {
            name: "community_gatherings".into(),
            category: TrendCategory::Social,
            intensity: 35.0,
            growth_rate: 0.01,
            affects: vec![Follower, Mediator],
            peak_in_ticks: FALLBACK_PEAK,
        },
        TrendProposal {
            name: "shared_stewardship".into(),
            category: TrendCategory::Political,
            intensity: 30.0,
            growth_rate: 0.0,
            affects: vec![Leader, Mediator],
            peak_in_ticks: FALLBACK_PEAK,
        },
    ];
    proposals.into_iter().map(|p| p.into_trend(now)).collect()
}

/// Fold freshly proposed trends into the live set. A proposal replaces a
/// live trend of the same name.
pub fn merge_trends(live: &mut Vec<CulturalTrend>, proposals: Vec<TrendProposal>, now: u64) {
    for proposal in proposals {
        let trend = proposal.into_trend(now);
        match live.iter_mut().find(|t| t.name == trend.name) {
            Some(existing) => *existing = trend,
            None => live.push(trend),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_deterministic() {
        assert_eq!(fallback_trends(40), fallback_trends(40));
        assert!(fallback_trends(40).iter().all(|t| t.peak_tick == 240));
    }

    #[test]
    fn merge_replaces_by_name() {
        let mut live = fallback_trends(0);
        let count = live.len();
        merge_trends(
            &mut live,
            vec![TrendProposal {
                name: "community_gatherings".into(),
                category: TrendCategory::Cultural,
                intensity: 90.0,
                growth_rate: 0.0,
                affects: vec![BehaviorCategory::Leader],
                peak_in_ticks: 10,
            }],
            5,
        );
        assert_eq!(live.len(), count);
        let merged = live.iter().find(|t| t.name == "community_gatherings").unwrap();
        assert_eq!(merged.intensity, 90.0);
        assert_eq!(merged.peak_tick, 15);
    }

    #[test]
    fn unavailable_describes_source() {
        let err = AdvisoryUnavailable::new("insight", "timed out");
        assert_eq!(err.to_string(), "advisory source insight unavailable: timed out");
    }
}
