//! Lazily constructed, process-wide comparator.
//!
//! The engine grabs the comparator once when it opens a database and hands
//! the reference to every reader, writer and compaction thread. Shutdown
//! drops the registry's reference exactly once when the database closes.
//!
//! ```text
//!   Uninitialized ──get()──► Ready ──shutdown()──► Uninitialized
//!                            │  ▲
//!                            └──┘ get()
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{RwLock, const_rwlock};
use tracing::debug;

use crate::comparator::TermComparator;

static GLOBAL: Registry<TermComparator> = Registry::new(TermComparator::new);

/// Shared [`TermComparator`], constructed on first call.
pub fn comparator() -> Arc<TermComparator> {
    GLOBAL.get()
}

/// Release the shared comparator. Returns `false` if none was live.
///
/// Call once, at process shutdown, after the last comparison. References
/// already handed out stay valid; a later [`comparator`] call builds a new
/// instance.
pub fn shutdown() -> bool {
    GLOBAL.shutdown()
}

/// The registry behind [`comparator`] and [`shutdown`].
pub fn global() -> &'static Registry<TermComparator> {
    &GLOBAL
}

/// Run-once holder for a single shared `T`.
///
/// Reads go through a shared lock. Only a caller that finds the slot empty
/// takes the write lock, and it re-checks before constructing, so racing
/// first callers produce exactly one instance and all of them see it.
pub struct Registry<T> {
    slot: RwLock<Option<Arc<T>>>,
    init: fn() -> T,
    constructions: AtomicUsize,
}

impl<T> Registry<T> {
    pub const fn new(init: fn() -> T) -> Self {
        Registry {
            slot: const_rwlock(None),
            init,
            constructions: AtomicUsize::new(0),
        }
    }

    /// Shared instance, constructing it if needed.
    pub fn get(&self) -> Arc<T> {
        if let Some(inst) = &*self.slot.read() {
            return Arc::clone(inst);
        }

        let mut slot = self.slot.write();
        if let Some(inst) = &*slot {
            return Arc::clone(inst);
        }

        let inst = Arc::new((self.init)());
        let n = self.constructions.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(constructions = n, "comparator constructed");

        *slot = Some(Arc::clone(&inst));
        inst
    }

    /// Drop the registry's instance.
    ///
    /// Not meant to race with [`get`](Self::get): the engine tears down after
    /// its last comparison.
    pub fn shutdown(&self) -> bool {
        let prev = self.slot.write().take();
        let was_live = prev.is_some();
        debug!(was_live, "comparator released");
        was_live
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Number of times the constructor has run.
    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::Relaxed)
    }
}
