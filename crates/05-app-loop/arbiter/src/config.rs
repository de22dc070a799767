use serde::Serialize;

use crate::error::{ArbiterError, ArbiterResult};

/// Rule applied when several valid requests share the top priority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum TieBreak {
    /// The most recently submitted request wins.
    #[default]
    MostRecent,
    /// The oldest surviving submission wins.
    LeastRecent,
}

impl TieBreak {
    /// Returns `true` when a request with submission sequence `candidate`
    /// beats the current best at `best` under an equal priority.
    pub(crate) fn prefers(self, candidate: u64, best: u64) -> bool {
        match self {
            TieBreak::MostRecent => candidate > best,
            TieBreak::LeastRecent => candidate < best,
        }
    }
}

/// Arbiter construction parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArbiterConfig {
    /// Name used in log lines and by the control loop to identify the arbiter.
    pub label: &'static str,
    /// Equal-priority resolution rule.
    pub tie_break: TieBreak,
    /// Registry capacity reserved up front (roughly the number of features).
    pub initial_capacity: usize,
}

impl ArbiterConfig {
    pub fn labeled(label: &'static str) -> Self {
        Self {
            label,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ArbiterResult<()> {
        if self.label.trim().is_empty() {
            return Err(ArbiterError::InvalidConfig("label must not be empty"));
        }
        Ok(())
    }
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            label: "arbiter",
            tie_break: TieBreak::default(),
            initial_capacity: 8,
        }
    }
}
