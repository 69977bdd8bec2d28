#![forbid(unsafe_code)]

//! One-way stop flag for the frame loop.
//!
//! The loop checks the signal once per frame and sleeps between frames with
//! [`StopSignal::wait_timeout`], so a stop request cuts the pacing sleep short
//! instead of waiting out the remainder of the frame.

use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

type Flag = Arc<(Mutex<bool>, Condvar)>;

/// Loop side of the stop flag.
#[derive(Clone)]
pub struct StopSignal {
    inner: Flag,
}

impl std::fmt::Debug for StopSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopSignal")
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

impl StopSignal {
    /// Create a new (signal, trigger) pair.
    pub fn new() -> (Self, StopTrigger) {
        let inner: Flag = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: Arc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    /// Whether the stop has been requested.
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleep for up to `duration`, waking early on stop.
    ///
    /// Returns whether the stop was requested by the time the sleep ended.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let flag = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (flag, _) = cvar
            .wait_timeout_while(flag, duration, |stopped| !*stopped)
            .unwrap_or_else(PoisonError::into_inner);
        *flag
    }
}

/// Host side of the stop flag.
#[derive(Debug)]
pub struct StopTrigger {
    inner: Flag,
}

impl StopTrigger {
    /// Request the stop and wake any sleeping waiter. Idempotent.
    pub fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(PoisonError::into_inner);
        *stopped = true;
        cvar.notify_all();
    }
}
