mod coalition;
mod context;
mod culture;
pub mod disruption;
mod evolution;
mod helpers;
mod influence;
pub mod metrics;
mod movement;
pub mod names;
pub mod population;
mod relationships;
mod runner;
mod signal;
mod system;
pub mod territory;

pub use coalition::CoalitionSystem;
pub use context::TickContext;
pub use culture::CultureSystem;
pub use disruption::DisruptionSystem;
pub use evolution::EvolutionSystem;
pub use influence::InfluenceSystem;
pub use metrics::MetricsSystem;
pub use movement::MovementSystem;
pub use relationships::RelationshipSystem;
pub use runner::{default_systems, dispatch_systems, should_fire};
pub use signal::Signal;
pub use system::{SimSystem, TickFrequency};
pub use territory::TerritorySystem;
