#[macro_use]
mod macros;

pub mod agent;
pub mod coalition;
pub mod culture;
pub mod disruption;
pub mod metrics;
pub mod mix;
pub mod position;
pub mod relationship;
pub mod territory;
pub mod world;

pub use agent::{Agent, BehaviorCategory, Memory, MovementPattern, TraitKind, Traits};
pub use coalition::{Coalition, CrisisResponse};
pub use culture::{CulturalInfluence, CulturalTrend, TrendCategory, TrendProposal};
pub use disruption::{
    DisruptionKind, DisruptionSpec, DisruptionState, DisruptiveEvent, Effects,
    EmergenceConditions, ImpactPrediction,
};
pub use metrics::{MetricsRecord, StabilityTrend};
pub use mix::BehaviorMix;
pub use position::Position;
pub use relationship::Relationships;
pub use territory::InfluenceZone;
pub use world::World;
