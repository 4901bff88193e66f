//! # Invalidation Manager
//!
//! Debounced readiness gate: defers work until a quiet period has elapsed
//! since the most recent request.
//!
//! ## Contract
//!
//! - Each call resets the quiet-period timer
//! - Only the latest call registered within a quiet window runs
//! - Superseded calls resolve without running their callback
//! - Callbacks run on the awaiting task, never concurrently with another
//!   callback from the same manager
//! - Cancellation is dropping the future

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug)]
pub struct InvalidationManager {
    delay: Duration,
    generation: AtomicU64,
}

impl InvalidationManager {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    /// Wait out the quiet period. Returns `true` if this request is still
    /// the latest one once the period elapses.
    pub async fn ready(&self) -> bool {
        let claimed = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.generation.load(Ordering::SeqCst) == claimed
    }

    /// Run `callback` once the quiet period elapses with no newer call
    /// superseding this one. Returns whether the callback ran.
    pub async fn call_when_ready<F: FnOnce()>(&self, callback: F) -> bool {
        if self.ready().await {
            callback();
            true
        } else {
            false
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
