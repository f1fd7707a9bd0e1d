pub mod advisory;
pub mod driver;
pub mod error;
pub mod flush;
pub mod id;
pub mod model;
pub mod params;
pub mod sim;
pub mod simulation;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod testutil;

pub use advisory::{AdvisoryUnavailable, CulturalAdvisor, InsightAdvisor};
pub use driver::Driver;
pub use error::SimError;
pub use id::{AgentId, CoalitionId, DisruptionId, IdGenerator};
pub use model::{
    Agent, BehaviorCategory, BehaviorMix, Coalition, DisruptionKind, DisruptionSpec,
    ImpactPrediction, MetricsRecord, StabilityTrend, World,
};
pub use params::SimParams;
pub use simulation::Simulation;
pub use snapshot::SimulationState;
