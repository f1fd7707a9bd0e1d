use crate::model::BehaviorCategory;

/// Symmetric behavior-compatibility matrix, indexed in
/// [`BehaviorCategory::ALL`] order: leader, follower, innovator, mediator,
/// explorer.
pub const COMPATIBILITY: [[f64; 5]; 5] = [
    [25.0, 90.0, 60.0, 75.0, 45.0],
    [90.0, 70.0, 55.0, 80.0, 40.0],
    [60.0, 55.0, 65.0, 70.0, 85.0],
    [75.0, 80.0, 70.0, 75.0, 60.0],
    [45.0, 40.0, 85.0, 60.0, 50.0],
];

/// Every tunable coefficient of the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimParams {
    /// RNG seed. `None` seeds from the operating system.
    pub seed: Option<u64>,

    // --- World & population ---
    pub world_width: f64,
    pub world_height: f64,
    pub min_population: usize,
    pub max_population: usize,
    pub default_population: usize,
    /// Maximum memory tags an agent keeps.
    pub memory_capacity: usize,

    // --- Cadence ---
    /// Metrics, culture, and advisory polling run every this many ticks.
    pub coarse_interval: u64,
    /// The generation counter advances every this many ticks.
    pub generation_interval: u64,

    // --- Movement ---
    pub step_size: f64,
    pub arrive_epsilon: f64,
    pub territorial_jitter: f64,
    pub social_link_threshold: f64,
    pub nomad_retarget_chance: f64,
    pub nomad_radius: f64,
    pub threat_radius: f64,
    /// Same-category neighbors below this mutual strength count as threats.
    pub threat_strength_ceiling: f64,
    pub repel_distance: f64,
    /// Compatibility an unconnected agent needs to attract a strategist.
    pub attraction_compatibility: f64,

    // --- Relationships ---
    pub compatibility: [[f64; 5]; 5],
    pub relationship_rate: f64,
    pub trust_gap_penalty: f64,
    pub stress_penalty: f64,

    // --- Coalitions ---
    pub formation_radius: f64,
    pub alliance_threshold: f64,
    pub formation_chance: f64,
    pub disruption_formation_boost: f64,
    pub leader_formation_boost: f64,
    pub max_founding_allies: usize,
    pub dissolution_threshold: f64,
    pub cohesion_rate: f64,
    /// Average member spread at which compactness reaches zero.
    pub compactness_scale: f64,
    pub crisis_cohesion_bonus: f64,
    pub crisis_cohesion_penalty: f64,
    /// Leadership capacity a competitive coalition's leader gains per crisis.
    pub crisis_leader_boost: f64,

    // --- Disruptions ---
    pub trigger_base: f64,
    pub trigger_cap: f64,
    pub generation_margin: u32,
    pub generation_boost: f64,
    pub coalition_margin: usize,
    pub coalition_boost: f64,
    pub effect_variance: f64,
    pub disruption_memory_chance: f64,
    pub disruption_history_cap: usize,

    // --- Metrics ---
    pub metrics_history_cap: usize,
    pub strong_link_threshold: f64,
    pub formation_window: u64,
    pub phenomenon_weight: f64,

    // --- Culture & advisory ---
    pub influence_damping: f64,
    pub trend_nudge: f64,
    pub trend_floor: f64,
    pub knowledge_cap: usize,
    pub max_norms: usize,
    pub reelection_margin: f64,

    // --- Generations ---
    pub rich_memory_threshold: usize,
    pub adaptability_bonus: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            seed: None,

            world_width: 800.0,
            world_height: 600.0,
            min_population: 50,
            max_population: 500,
            default_population: 100,
            memory_capacity: 10,

            coarse_interval: 10,
            generation_interval: 300,

            step_size: 1.5,
            arrive_epsilon: 1.0,
            territorial_jitter: 10.0,
            social_link_threshold: 60.0,
            nomad_retarget_chance: 0.02,
            nomad_radius: 100.0,
            threat_radius: 60.0,
            threat_strength_ceiling: 30.0,
            repel_distance: 40.0,
            attraction_compatibility: 70.0,

            compatibility: COMPATIBILITY,
            relationship_rate: 0.05,
            trust_gap_penalty: 0.3,
            stress_penalty: 0.2,

            formation_radius: 80.0,
            alliance_threshold: 65.0,
            formation_chance: 0.05,
            disruption_formation_boost: 1.5,
            leader_formation_boost: 2.0,
            max_founding_allies: 4,
            dissolution_threshold: 25.0,
            cohesion_rate: 0.1,
            compactness_scale: 200.0,
            crisis_cohesion_bonus: 3.0,
            crisis_cohesion_penalty: 2.0,
            crisis_leader_boost: 2.0,

            trigger_base: 0.02,
            trigger_cap: 0.1,
            generation_margin: 5,
            generation_boost: 1.5,
            coalition_margin: 3,
            coalition_boost: 1.3,
            effect_variance: 0.1,
            disruption_memory_chance: 0.3,
            disruption_history_cap: 50,

            metrics_history_cap: 200,
            strong_link_threshold: 70.0,
            formation_window: 100,
            phenomenon_weight: 20.0,

            influence_damping: 5000.0,
            trend_nudge: 0.02,
            trend_floor: 5.0,
            knowledge_cap: 20,
            max_norms: 3,
            reelection_margin: 10.0,

            rich_memory_threshold: 5,
            adaptability_bonus: 2.0,
        }
    }
}

impl SimParams {
    /// Default parameters with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn compatibility(&self, a: BehaviorCategory, b: BehaviorCategory) -> f64 {
        self.compatibility[a.index()][b.index()]
    }

    pub fn population_in_range(&self, n: usize) -> bool {
        (self.min_population..=self.max_population).contains(&n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compatibility_matrix_is_symmetric_and_bounded() {
        for (i, row) in COMPATIBILITY.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                assert_eq!(v, COMPATIBILITY[j][i], "asymmetric at ({i}, {j})");
                assert!((25.0..=90.0).contains(&v));
            }
        }
    }

    #[test]
    fn compatibility_lookup_by_category() {
        let params = SimParams::default();
        assert_eq!(
            params.compatibility(BehaviorCategory::Leader, BehaviorCategory::Follower),
            90.0
        );
        assert_eq!(
            params.compatibility(BehaviorCategory::Leader, BehaviorCategory::Leader),
            25.0
        );
    }

    #[test]
    fn population_range_is_inclusive() {
        let params = SimParams::default();
        assert!(params.population_in_range(50));
        assert!(params.population_in_range(500));
        assert!(!params.population_in_range(49));
        assert!(!params.population_in_range(501));
    }
}
