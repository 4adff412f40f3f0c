//! Injectable time source.
//!
//! Invariant checks compare entry timestamps against "now". That instant is
//! always read once per validation call and handed down explicitly, so two
//! rules never observe different clock values within one validation.

use chrono::{DateTime, Utc};

/// Source of the current instant.
///
/// Embedders pass a `Clock` at the call sites that need one; tests use
/// [`FixedClock`] for deterministic time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
