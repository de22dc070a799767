//! Source identity and liveness probes.
//!
//! A source is the feature component behind a request. The arbiter keys its
//! registry by [`SourceId`] only and asks the attached [`Liveness`] probe, on
//! demand, whether the component is still running.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

static NEXT_SOURCE_ID: AtomicU64 = AtomicU64::new(1);

/// Explicit identity key of a submitting component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SourceId(u64);

impl SourceId {
    /// Allocates a process-wide unique identifier.
    pub fn next() -> Self {
        Self(NEXT_SOURCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Adopts an identifier minted by the host (e.g. a component handle).
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Underlying integer, e.g. for the host's own bookkeeping.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "src#{}", self.0)
    }
}

/// On-demand answer to "is my source still running?".
pub trait Liveness {
    fn is_alive(&self) -> bool;
}

impl<F> Liveness for F
where
    F: Fn() -> bool,
{
    fn is_alive(&self) -> bool {
        self()
    }
}

/// Shared on/off switch a feature component flips as it starts and stops.
///
/// Clones observe the same flag, so the component keeps one clone and hands
/// another to its [`Source`].
#[derive(Clone, Debug)]
pub struct AliveFlag(Arc<AtomicBool>);

impl AliveFlag {
    /// Creates a flag with the given initial state.
    pub fn new(alive: bool) -> Self {
        Self(Arc::new(AtomicBool::new(alive)))
    }

    /// Marks the component as running or stopped.
    pub fn set(&self, alive: bool) {
        self.0.store(alive, Ordering::Release);
    }

    /// Current state of the flag.
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for AliveFlag {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Liveness for AliveFlag {
    fn is_alive(&self) -> bool {
        self.get()
    }
}

/// Probe handle stored alongside each request.
type ProbeHandle = Arc<dyn Liveness + Send + Sync>;

/// Identity plus liveness probe of a submitting component.
#[derive(Clone)]
pub struct Source {
    id: SourceId,
    probe: ProbeHandle,
}

impl Source {
    /// Creates a source with a freshly allocated identity.
    pub fn new<L>(probe: L) -> Self
    where
        L: Liveness + Send + Sync + 'static,
    {
        Self::with_id(SourceId::next(), probe)
    }

    /// Creates a source with a host-provided identity.
    pub fn with_id<L>(id: SourceId, probe: L) -> Self
    where
        L: Liveness + Send + Sync + 'static,
    {
        Self {
            id,
            probe: Arc::new(probe),
        }
    }

    /// Creates a source whose probe never reports it as stopped.
    pub fn always_alive() -> Self {
        Self::new(|| true)
    }

    /// Identity key used by the registry.
    pub fn id(&self) -> SourceId {
        self.id
    }

    /// Asks the probe; never cached.
    pub fn is_alive(&self) -> bool {
        self.probe.is_alive()
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("id", &self.id)
            .field("alive", &self.is_alive())
            .finish()
    }
}
