//! Per-step and cumulative bookkeeping for the control loop.
//!
//! Each step reports how many claims its tick boundary retired across all
//! registered arbiters. Totals accumulate for the lifetime of the loop so the
//! host can surface churn (claims timing out versus sources stopping).

use arbiter::TickSummary;

/// Outcome of one control-loop step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopStats {
    /// Step number, starting at 1.
    pub step: u64,
    /// Number of tick targets that were ticked.
    pub targets: usize,
    /// Claims whose countdown ran out during this step.
    pub expired: usize,
    /// Claims dropped because their source stopped.
    pub invalidated: usize,
    /// Claims still stored across all targets after the step.
    pub retained: usize,
}

impl LoopStats {
    pub(crate) fn begin(step: u64) -> Self {
        Self {
            step,
            ..Self::default()
        }
    }

    /// Folds one target's tick summary into the step.
    pub fn absorb(&mut self, summary: &TickSummary) {
        self.targets += 1;
        self.expired += summary.expired;
        self.invalidated += summary.invalidated;
        self.retained += summary.retained;
    }
}

/// Running totals across every completed step.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopTotals {
    pub steps: u64,
    pub expired: u64,
    pub invalidated: u64,
}

impl LoopTotals {
    /// Adds one step's counts to the totals.
    pub fn record(&mut self, stats: &LoopStats) {
        self.steps = stats.step;
        self.expired = self.expired.saturating_add(stats.expired as u64);
        self.invalidated = self.invalidated.saturating_add(stats.invalidated as u64);
    }
}
