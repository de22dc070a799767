//! Mutex-guarded arbiter handle for hosts that submit from several threads.
//!
//! The arbiter itself has no locking. A host that lets feature components run
//! on other threads hands each of them a clone of one [`SharedArbiter`]; every
//! call takes the same lock, so submits, queries and the tick boundary are
//! serialized in lock order.

use std::sync::Arc;

use arbiter::{
    Arbiter, ArbiterConfig, ArbiterResult, EntrySnapshot, Source, SourceId, TickSummary,
};
use parking_lot::Mutex;

/// Cloneable handle to one arbiter behind a single lock.
pub struct SharedArbiter<V> {
    label: &'static str,
    inner: Arc<Mutex<Arbiter<V>>>,
}

impl<V> Clone for SharedArbiter<V> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> SharedArbiter<V> {
    /// Moves `arbiter` behind a fresh lock.
    pub fn new(arbiter: Arbiter<V>) -> Self {
        Self {
            label: arbiter.label(),
            inner: Arc::new(Mutex::new(arbiter)),
        }
    }

    /// Creates an empty shared arbiter; the configuration is not validated.
    pub fn with_config(config: ArbiterConfig) -> Self {
        Self::new(Arbiter::with_config(config))
    }

    /// Label of the wrapped arbiter, read without locking.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Locks and submits; see [`Arbiter::submit`].
    pub fn submit(
        &self,
        source: &Source,
        priority: i32,
        ticks_to_live: u32,
        value: V,
    ) -> ArbiterResult<()> {
        self.inner
            .lock()
            .submit(source, priority, ticks_to_live, value)
    }

    /// Locks and runs one tick boundary.
    pub fn tick(&self) -> TickSummary {
        self.inner.lock().tick()
    }

    /// Locks and drops the claim of `source`, if any.
    pub fn cancel(&self, source: SourceId) -> bool {
        self.inner.lock().cancel(source)
    }

    /// Locks and drops every claim, returning how many were stored.
    pub fn clear(&self) -> usize {
        self.inner.lock().clear()
    }

    /// Identity of the current winner, if any.
    pub fn winner_source(&self) -> Option<SourceId> {
        self.inner.lock().winner().map(|winner| winner.source)
    }

    /// Number of stored entries, valid or not.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` when no entry is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Debug view of every stored entry, best first.
    pub fn snapshot(&self) -> Vec<EntrySnapshot> {
        self.inner.lock().snapshot()
    }

    /// Runs `f` against the arbiter while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&Arbiter<V>) -> R) -> R {
        let guard = self.inner.lock();
        f(&*guard)
    }

    /// Runs `f` against the arbiter mutably while holding the lock.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Arbiter<V>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }
}

impl<V: Clone> SharedArbiter<V> {
    /// Copy of the winning value; the lock is released before returning.
    pub fn query_cloned(&self) -> Option<V> {
        self.inner.lock().query().cloned()
    }
}

impl<V> From<Arbiter<V>> for SharedArbiter<V> {
    fn from(arbiter: Arbiter<V>) -> Self {
        Self::new(arbiter)
    }
}
