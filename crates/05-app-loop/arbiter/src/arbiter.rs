//! Priority-arbitrated, time-decaying request registry.
//!
//! Feature components [`submit`](Arbiter::submit) claims on a shared output
//! value; the host calls [`tick`](Arbiter::tick) once per simulation step to
//! age every claim; anyone may [`query`](Arbiter::query) the current winner.
//! A claim stays selectable only while its countdown is positive and its
//! source's liveness probe reports it as running.

use std::collections::HashMap;

use log::{debug, trace, warn};
use serde::Serialize;
use smallvec::SmallVec;

use crate::config::{ArbiterConfig, TieBreak};
use crate::error::{ArbiterError, ArbiterResult};
use crate::source::{Source, SourceId};

/// A stored claim. At most one exists per source.
#[derive(Debug)]
pub struct Request<V> {
    source: Source,
    priority: i32,
    remaining_ticks: u32,
    value: V,
    seq: u64,
}

impl<V> Request<V> {
    /// Identity of the submitting component.
    pub fn source(&self) -> SourceId {
        self.source.id()
    }

    /// Priority the claim was submitted with.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Ticks left before the claim expires.
    pub fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    /// Payload handed to the winner's consumer.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Countdown still running and the source still live.
    pub fn is_valid(&self) -> bool {
        self.remaining_ticks > 0 && self.source.is_alive()
    }
}

/// The currently authoritative request, borrowed from the arbiter.
#[derive(Debug, PartialEq, Eq)]
pub struct Winner<'a, V> {
    pub source: SourceId,
    pub priority: i32,
    pub remaining_ticks: u32,
    pub value: &'a V,
}

impl<V> Clone for Winner<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Winner<'_, V> {}

/// What a single tick boundary removed from the registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    /// Tick counter after this boundary (first tick is 1).
    pub tick: u64,
    /// Entries whose countdown reached zero.
    pub expired: usize,
    /// Entries dropped because their source stopped.
    pub invalidated: usize,
    /// Entries still stored after the purge.
    pub retained: usize,
}

impl TickSummary {
    /// Entries removed for either reason.
    pub fn purged(&self) -> usize {
        self.expired + self.invalidated
    }
}

/// Serializable debug view of one stored entry. The payload is omitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntrySnapshot {
    pub source: SourceId,
    pub priority: i32,
    pub remaining_ticks: u32,
    pub alive: bool,
    pub winning: bool,
}

/// Registry of at most one claim per source, aged by [`Arbiter::tick`].
#[derive(Debug)]
pub struct Arbiter<V> {
    config: ArbiterConfig,
    entries: HashMap<SourceId, Request<V>>,
    next_seq: u64,
    ticks: u64,
}

impl<V> Arbiter<V> {
    /// Creates an empty arbiter with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ArbiterConfig::default())
    }

    /// Creates an empty arbiter; the configuration is not validated.
    pub fn with_config(config: ArbiterConfig) -> Self {
        Self {
            entries: HashMap::with_capacity(config.initial_capacity),
            config,
            next_seq: 0,
            ticks: 0,
        }
    }

    /// Like [`Arbiter::with_config`], but rejects an invalid configuration.
    pub fn try_with_config(config: ArbiterConfig) -> ArbiterResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Active configuration.
    pub fn config(&self) -> &ArbiterConfig {
        &self.config
    }

    /// Name used in log lines and by the control loop.
    pub fn label(&self) -> &'static str {
        self.config.label
    }

    /// Inserts or replaces the claim held by `source`.
    ///
    /// The previous claim of the same source is discarded unconditionally,
    /// even if it had a higher priority or more time left. A zero lifetime is
    /// rejected and leaves the registry untouched.
    pub fn submit(
        &mut self,
        source: &Source,
        priority: i32,
        ticks_to_live: u32,
        value: V,
    ) -> ArbiterResult<()> {
        if ticks_to_live == 0 {
            warn!(
                "{}: rejected request from {} with zero lifetime",
                self.config.label,
                source.id()
            );
            return Err(ArbiterError::InvalidDuration {
                ticks: ticks_to_live,
            });
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let replaced = self
            .entries
            .insert(
                source.id(),
                Request {
                    source: source.clone(),
                    priority,
                    remaining_ticks: ticks_to_live,
                    value,
                    seq,
                },
            )
            .is_some();
        trace!(
            "{}: submit {} priority={} ticks={} replaced={}",
            self.config.label,
            source.id(),
            priority,
            ticks_to_live,
            replaced
        );
        Ok(())
    }

    /// Advances every countdown by one tick and purges dead entries.
    ///
    /// All entries are decremented before any is removed, so a purge never
    /// skews the countdown of another source.
    pub fn tick(&mut self) -> TickSummary {
        self.ticks += 1;

        for entry in self.entries.values_mut() {
            entry.remaining_ticks = entry.remaining_ticks.saturating_sub(1);
        }

        let mut expired: SmallVec<[SourceId; 8]> = SmallVec::new();
        let mut invalidated: SmallVec<[SourceId; 8]> = SmallVec::new();
        for (id, entry) in &self.entries {
            if entry.remaining_ticks == 0 {
                expired.push(*id);
            } else if !entry.source.is_alive() {
                invalidated.push(*id);
            }
        }
        for id in expired.iter().chain(invalidated.iter()) {
            self.entries.remove(id);
        }

        let summary = TickSummary {
            tick: self.ticks,
            expired: expired.len(),
            invalidated: invalidated.len(),
            retained: self.entries.len(),
        };
        if summary.purged() > 0 {
            debug!(
                "{}: tick {} expired={:?} invalidated={:?} retained={}",
                self.config.label, summary.tick, expired, invalidated, summary.retained
            );
        }
        summary
    }

    /// Value of the highest-priority valid request, if any.
    pub fn query(&self) -> Option<&V> {
        self.select().map(|entry| &entry.value)
    }

    /// Like [`Arbiter::query`], with the winner's identity and standing.
    pub fn winner(&self) -> Option<Winner<'_, V>> {
        self.select().map(|entry| Winner {
            source: entry.source.id(),
            priority: entry.priority,
            remaining_ticks: entry.remaining_ticks,
            value: &entry.value,
        })
    }

    /// Drops the claim held by `source`. Returns whether one was stored.
    pub fn cancel(&mut self, source: SourceId) -> bool {
        let removed = self.entries.remove(&source).is_some();
        if removed {
            trace!("{}: cancel {}", self.config.label, source);
        }
        removed
    }

    /// Drops every claim, returning how many were stored.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        if removed > 0 {
            debug!("{}: cleared {} entries", self.config.label, removed);
        }
        removed
    }

    /// Number of stored entries, valid or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no entry is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` when `source` has a stored entry, valid or not.
    pub fn contains(&self, source: SourceId) -> bool {
        self.entries.contains_key(&source)
    }

    /// Stored entry of `source`, valid or not.
    pub fn get(&self, source: SourceId) -> Option<&Request<V>> {
        self.entries.get(&source)
    }

    /// Countdown of the stored entry of `source`.
    pub fn remaining_ticks(&self, source: SourceId) -> Option<u32> {
        self.entries.get(&source).map(|entry| entry.remaining_ticks)
    }

    /// Number of tick boundaries processed since construction.
    pub fn ticks_elapsed(&self) -> u64 {
        self.ticks
    }

    /// Every stored entry, best first.
    pub fn snapshot(&self) -> Vec<EntrySnapshot> {
        let winner = self.select().map(|entry| entry.source.id());
        let mut rows: Vec<&Request<V>> = self.entries.values().collect();
        let tie_break = self.config.tie_break;
        rows.sort_by(|a, b| {
            b.priority.cmp(&a.priority).then_with(|| match tie_break {
                TieBreak::MostRecent => b.seq.cmp(&a.seq),
                TieBreak::LeastRecent => a.seq.cmp(&b.seq),
            })
        });
        rows.into_iter()
            .map(|entry| EntrySnapshot {
                source: entry.source.id(),
                priority: entry.priority,
                remaining_ticks: entry.remaining_ticks,
                alive: entry.source.is_alive(),
                winning: Some(entry.source.id()) == winner,
            })
            .collect()
    }

    fn select(&self) -> Option<&Request<V>> {
        let tie_break = self.config.tie_break;
        let mut best: Option<&Request<V>> = None;
        for entry in self.entries.values().filter(|entry| entry.is_valid()) {
            best = match best {
                None => Some(entry),
                Some(current) => {
                    let better = entry.priority > current.priority
                        || (entry.priority == current.priority
                            && tie_break.prefers(entry.seq, current.seq));
                    Some(if better { entry } else { current })
                }
            };
        }
        best
    }
}

impl<V> Default for Arbiter<V> {
    fn default() -> Self {
        Self::new()
    }
}
