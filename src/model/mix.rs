use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::agent::BehaviorCategory;

/// Normalized share of each behavior category in a generated population.
/// Shares are non-negative and sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BehaviorMix {
    shares: BTreeMap<BehaviorCategory, f64>,
}

impl Default for BehaviorMix {
    fn default() -> Self {
        Self::from_weights_unchecked(&[
            (BehaviorCategory::Leader, 0.15),
            (BehaviorCategory::Follower, 0.35),
            (BehaviorCategory::Innovator, 0.20),
            (BehaviorCategory::Mediator, 0.15),
            (BehaviorCategory::Explorer, 0.15),
        ])
    }
}

impl BehaviorMix {
    fn from_weights_unchecked(weights: &[(BehaviorCategory, f64)]) -> Self {
        Self {
            shares: weights.iter().copied().collect(),
        }
    }

    /// Normalize an arbitrary weight table. Negative and NaN weights count
    /// as zero, missing categories get zero share, and a table summing to
    /// zero falls back to the default mix.
    pub fn from_weights(weights: &BTreeMap<BehaviorCategory, f64>) -> Self {
        let clean = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        let total: f64 = weights.values().map(|w| clean(*w)).sum();
        if total <= 0.0 {
            return Self::default();
        }
        let shares = BehaviorCategory::ALL
            .iter()
            .map(|c| (*c, weights.get(c).map_or(0.0, |w| clean(*w)) / total))
            .collect();
        Self { shares }
    }

    pub fn share(&self, category: BehaviorCategory) -> f64 {
        self.shares.get(&category).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BehaviorCategory, f64)> + '_ {
        self.shares.iter().map(|(c, s)| (*c, *s))
    }

    /// Split `n` agents across categories by largest remainder, so the
    /// counts always sum to exactly `n`. Ties go to the earlier category.
    pub fn counts(&self, n: usize) -> Vec<(BehaviorCategory, usize)> {
        let mut counts: Vec<(BehaviorCategory, usize, f64)> = BehaviorCategory::ALL
            .iter()
            .map(|c| {
                let exact = self.share(*c) * n as f64;
                let floor = exact.floor();
                (*c, floor as usize, exact - floor)
            })
            .collect();

        let assigned: usize = counts.iter().map(|(_, k, _)| k).sum();
        let mut order: Vec<usize> = (0..counts.len()).collect();
        order.sort_by(|a, b| counts[*b].2.total_cmp(&counts[*a].2).then(a.cmp(b)));
        for idx in order.into_iter().take(n.saturating_sub(assigned)) {
            counts[idx].1 += 1;
        }

        counts.into_iter().map(|(c, k, _)| (c, k)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mix_sums_to_one() {
        let total: f64 = BehaviorMix::default().iter().map(|(_, s)| s).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn weights_are_normalized() {
        let weights = BTreeMap::from([
            (BehaviorCategory::Leader, 2.0),
            (BehaviorCategory::Explorer, 6.0),
        ]);
        let mix = BehaviorMix::from_weights(&weights);
        assert_eq!(mix.share(BehaviorCategory::Leader), 0.25);
        assert_eq!(mix.share(BehaviorCategory::Explorer), 0.75);
        assert_eq!(mix.share(BehaviorCategory::Follower), 0.0);
    }

    #[test]
    fn zero_or_invalid_weights_fall_back_to_default() {
        let weights = BTreeMap::from([
            (BehaviorCategory::Leader, 0.0),
            (BehaviorCategory::Mediator, -3.0),
            (BehaviorCategory::Innovator, f64::NAN),
        ]);
        assert_eq!(BehaviorMix::from_weights(&weights), BehaviorMix::default());
    }

    #[test]
    fn counts_sum_exactly() {
        let mix = BehaviorMix::default();
        for n in [50, 73, 120, 499] {
            let total: usize = mix.counts(n).iter().map(|(_, k)| k).sum();
            assert_eq!(total, n);
        }
        let counts: BTreeMap<_, _> = mix.counts(120).into_iter().collect();
        assert_eq!(counts[&BehaviorCategory::Leader], 18);
        assert_eq!(counts[&BehaviorCategory::Follower], 42);
        assert_eq!(counts[&BehaviorCategory::Innovator], 24);
    }
}
