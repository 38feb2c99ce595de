use std::sync::atomic::{AtomicU64, Ordering};

/// Stamp handed to one search invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// Counter used to discard responses of searches that have been superseded.
///
/// Every search takes a stamp before it starts; when its response arrives it is
/// applied only if no newer search has begun since.
#[derive(Debug, Default)]
pub struct SearchGenerations {
    latest: AtomicU64,
}

impl SearchGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, superseding every earlier one.
    pub fn begin(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::Acquire) == generation.0
    }
}
