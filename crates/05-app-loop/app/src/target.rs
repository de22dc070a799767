use arbiter::{Arbiter, TickSummary};

use crate::shared::SharedArbiter;

/// Anything that ages its state once per control-loop step.
pub trait TickTarget: Send {
    /// Unique name within a control loop.
    fn name(&self) -> &'static str;
    /// Ages the target by exactly one step.
    fn tick(&mut self) -> TickSummary;
}

impl<V: Send> TickTarget for Arbiter<V> {
    fn name(&self) -> &'static str {
        self.label()
    }

    fn tick(&mut self) -> TickSummary {
        Arbiter::tick(self)
    }
}

impl<V: Send> TickTarget for SharedArbiter<V> {
    fn name(&self) -> &'static str {
        self.label()
    }

    fn tick(&mut self) -> TickSummary {
        SharedArbiter::tick(self)
    }
}
