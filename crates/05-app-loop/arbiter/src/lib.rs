//! Priority arbitration between self-expiring claims on a shared output.
//!
//! Independent feature components each hold at most one claim on an
//! [`Arbiter`]; the highest-priority claim whose countdown is still running and
//! whose source is still live decides the output. The arbiter only decides; it
//! never performs the winner's side effects, and it carries no locking of its
//! own. Hosts that share one across threads wrap it in a single mutex.

/// Registry, decay clock and selector.
pub mod arbiter;
/// Construction parameters and the equal-priority rule.
pub mod config;
mod error;
/// Source identity keys and liveness probes.
pub mod source;

pub use crate::arbiter::{Arbiter, EntrySnapshot, Request, TickSummary, Winner};
pub use crate::config::{ArbiterConfig, TieBreak};
pub use crate::error::{ArbiterError, ArbiterResult};
pub use crate::source::{AliveFlag, Liveness, Source, SourceId};
