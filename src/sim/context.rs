use rand::RngCore;

use super::signal::Signal;
use crate::model::World;
use crate::params::SimParams;

/// Context passed to each system on every tick.
pub struct TickContext<'a> {
    pub world: &'a mut World,
    pub params: &'a SimParams,
    pub rng: &'a mut dyn RngCore,
    /// Systems push signals here during tick/handle_signals.
    pub signals: &'a mut Vec<Signal>,
    /// Signals emitted by other systems in the tick pass (read-only).
    pub inbox: &'a [Signal],
}
