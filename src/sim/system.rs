use super::context::TickContext;

/// How often a simulation system runs.
///
/// Ordered finest-to-coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TickFrequency {
    /// Every tick.
    EveryTick,
    /// Every `SimParams::coarse_interval` ticks (metrics, culture).
    Coarse,
    /// Every `SimParams::generation_interval` ticks.
    Generational,
}

/// A pluggable simulation system that runs each tick.
///
/// Object-safe so systems can be stored as `Box<dyn SimSystem>`.
pub trait SimSystem: Send {
    fn name(&self) -> &str;
    fn frequency(&self) -> TickFrequency;
    fn tick(&mut self, ctx: &mut TickContext);

    /// React to signals emitted by other systems during the tick pass.
    ///
    /// Called once per dispatch with the full signal buffer in `ctx.inbox`.
    /// Signals pushed here are **not** re-delivered. Default: no-op.
    fn handle_signals(&mut self, ctx: &mut TickContext) {
        let _ = ctx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_ordering_finest_to_coarsest() {
        assert!(TickFrequency::EveryTick < TickFrequency::Coarse);
        assert!(TickFrequency::Coarse < TickFrequency::Generational);
    }
}
