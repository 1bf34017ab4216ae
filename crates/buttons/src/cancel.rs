//! Cooperative cancellation for wait operations.

use core::sync::atomic::{AtomicBool, Ordering};

/// Cancellation token observed by the `wait_for_*` operations.
///
/// A wait checks the token after each poll sleep. Once the token is
/// cancelled the wait returns its zero / empty sentinel and the flag *stays
/// set* so an enclosing loop can observe the cancellation and terminate —
/// it is never silently cleared by the monitor.
pub struct CancelToken {
    flag: AtomicBool,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// Request cancellation of the current (and any future) wait.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Clear the flag after the caller has observed the cancellation.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
