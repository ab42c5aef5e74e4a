//! Pluggable locking policy.
//!
//! Every public array operation acquires the policy's guard as its first
//! action and holds it for the whole operation; RAII releases it on every
//! exit path, early returns and panics included. The default policy is a
//! no-op with a zero-sized guard, so single-threaded use pays nothing.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Strategy wrapping each public operation in a critical section.
pub trait LockPolicy: Default {
    /// RAII guard held for the duration of one operation.
    type Guard<'a>
    where
        Self: 'a;

    fn enter(&self) -> Self::Guard<'_>;
}

/// No-op policy for single-threaded use. The default.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLock;

impl LockPolicy for NoLock {
    type Guard<'a>
        = ()
    where
        Self: 'a;

    #[inline(always)]
    fn enter(&self) -> Self::Guard<'_> {}
}

/// Mutual-exclusion policy: one mutex per array, taken around every
/// public operation.
///
/// The mutex is never acquired twice by one operation, so it does not need
/// to be re-entrant. Two caveats follow from that: user callbacks
/// (comparators, element destructors) run inside the critical section and
/// must not call back into the same array, and operations that touch two
/// arrays (`swap_with`, `extend_from`) take both guards in argument order,
/// so callers coordinating such calls from multiple threads are
/// responsible for a consistent order.
#[derive(Debug, Default)]
pub struct MutexLock {
    inner: Mutex<()>,
}

impl LockPolicy for MutexLock {
    type Guard<'a>
        = MutexGuard<'a, ()>
    where
        Self: 'a;

    fn enter(&self) -> Self::Guard<'_> {
        // The mutex guards no data of its own, so a poisoned guard is
        // still a valid guard.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
