//! Cooperative shutdown signal shared by every agent thread.
//!
//! # Why this exists
//!
//! The maintenance truck's circuit loop has no natural exit, and residents
//! ride until told otherwise, so "wait for all agents" would never return.
//! Every simulated delay instead goes through [`ShutdownToken::sleep`], which
//! wakes early the moment the orchestrator cancels the run.  Agent loops
//! check the token at every suspension point and unwind cleanly.

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

struct Inner {
    cancelled: Mutex<bool>,
    signal:    Condvar,
}

/// Cloneable cancellation handle.
///
/// All clones share one flag; cancelling any of them wakes every sleeper.
#[derive(Clone)]
pub struct ShutdownToken {
    inner: Arc<Inner>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: Mutex::new(false),
                signal:    Condvar::new(),
            }),
        }
    }

    /// Signal shutdown and wake every thread blocked in [`sleep`][Self::sleep].
    pub fn cancel(&self) {
        let mut cancelled = self.lock();
        *cancelled = true;
        self.inner.signal.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.lock()
    }

    /// Sleep for `duration` unless cancelled first.
    ///
    /// Returns `true` if the full duration elapsed and the simulation is
    /// still running, `false` if the token was (or becomes) cancelled.
    /// A zero duration never blocks and only reports the current state.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        let mut cancelled = self.lock();
        while !*cancelled {
            let now = Instant::now();
            let Some(remaining) = deadline.checked_duration_since(now).filter(|r| !r.is_zero())
            else {
                return true;
            };
            let (guard, _timeout) = self
                .inner
                .signal
                .wait_timeout(cancelled, remaining)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            cancelled = guard;
        }
        false
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, bool> {
        // A poisoned lock only means some holder panicked; the flag itself
        // is always valid.
        self.inner
            .cancelled
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ShutdownToken {
    fn default() -> Self {
        Self::new()
    }
}
