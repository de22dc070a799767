//! Host control loop that fires one tick boundary per simulation step.
//!
//! Feature components submit to their arbiters freely between steps; the
//! [`ControlLoop`] then ticks every registered arbiter exactly once, in
//! registration order, so lifetimes are measured in loop steps.

use anyhow::{anyhow, Result};
use log::debug;
use smallvec::SmallVec;

pub mod shared;
pub mod stats;
pub mod target;

pub use shared::SharedArbiter;
pub use stats::{LoopStats, LoopTotals};
pub use target::TickTarget;

/// Ordered set of tick targets advanced together once per step.
pub struct ControlLoop {
    targets: Vec<Box<dyn TickTarget>>,
    totals: LoopTotals,
}

impl ControlLoop {
    /// Creates a new builder for assembling a loop.
    pub fn builder() -> ControlLoopBuilder {
        ControlLoopBuilder::new()
    }

    /// Names of the registered tick targets in tick order.
    pub fn target_names(&self) -> SmallVec<[&'static str; 8]> {
        self.targets.iter().map(|target| target.name()).collect()
    }

    /// Number of completed steps.
    pub fn steps(&self) -> u64 {
        self.totals.steps
    }

    /// Purge counts accumulated over every completed step.
    pub fn totals(&self) -> LoopTotals {
        self.totals
    }

    /// Runs one step: a single tick for every registered target.
    pub fn run_once(&mut self) -> LoopStats {
        let mut stats = LoopStats::begin(self.totals.steps + 1);
        for target in self.targets.iter_mut() {
            let summary = target.tick();
            stats.absorb(&summary);
        }
        self.totals.record(&stats);
        debug!(
            "control loop step {} targets={} expired={} invalidated={} retained={}",
            stats.step, stats.targets, stats.expired, stats.invalidated, stats.retained
        );
        stats
    }

    /// Runs `steps` consecutive steps and returns the stats of the last one.
    pub fn run_steps(&mut self, steps: u64) -> Option<LoopStats> {
        let mut last = None;
        for _ in 0..steps {
            last = Some(self.run_once());
        }
        last
    }
}

/// Builder for assembling a [`ControlLoop`] from individual tick targets.
pub struct ControlLoopBuilder {
    targets: Vec<Box<dyn TickTarget>>,
}

impl ControlLoopBuilder {
    /// Creates an empty builder with no targets attached.
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// Appends a target; targets tick in the order they are added.
    pub fn target<T>(mut self, target: T) -> Self
    where
        T: TickTarget + 'static,
    {
        self.targets.push(Box::new(target));
        self
    }

    /// Builds the loop, returning an error if no target was added or two
    /// targets share a name.
    pub fn build(self) -> Result<ControlLoop> {
        if self.targets.is_empty() {
            return Err(anyhow!("no tick targets registered"));
        }
        for (index, target) in self.targets.iter().enumerate() {
            let name = target.name();
            if self.targets[..index].iter().any(|other| other.name() == name) {
                return Err(anyhow!("duplicate tick target name: {name}"));
            }
        }
        Ok(ControlLoop {
            targets: self.targets,
            totals: LoopTotals::default(),
        })
    }
}

impl Default for ControlLoopBuilder {
    fn default() -> Self {
        Self::new()
    }
}
