//! Process-wide shutdown coordination.
//! A flag set by the ctrlc handler so a running transfer can stop between chunks.
//!
//! Relaxed atomics are sufficient for a one-way "stop" flag, and `request()`
//! is safe to call from the signal thread.

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown. Returns true if one was already requested.
#[inline]
pub fn request() -> bool {
    SHUTDOWN.swap(true, Ordering::Relaxed)
}

/// Check whether a shutdown has been requested.
#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

