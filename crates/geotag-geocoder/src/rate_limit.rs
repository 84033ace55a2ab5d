//! Serializing rate limiter for outbound geocoding requests.
//!
//! One [`RateLimiter`] is shared (behind an `Arc`) by every geocoder handle
//! that talks to the same provider. Callers queue on a fair async mutex, so
//! dispatch order is submission order, and no two dispatches start less than
//! `min_interval` apart.
//!
//! The lock is held only while waiting for the slot. The operation itself
//! runs after the lock is released, so a slow or failing request never
//! delays or poisons the callers queued behind it, and a caller dropped
//! while waiting simply gives up its place.

use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_dispatch: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits for the next dispatch slot and returns the instant it was
    /// granted. The slot is recorded before this returns.
    pub async fn wait_for_slot(&self) -> Instant {
        let mut last = self.last_dispatch.lock().await;

        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            if ready_at > Instant::now() {
                tracing::debug!(
                    wait = ?ready_at.saturating_duration_since(Instant::now()),
                    "throttling geocoding request"
                );
                tokio::time::sleep_until(ready_at).await;
            }
        }

        let now = Instant::now();
        *last = Some(now);
        now
    }

    /// Runs `operation` once its dispatch slot arrives and returns its
    /// output unchanged.
    pub async fn throttle<F, Fut, T>(&self, operation: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        self.wait_for_slot().await;
        operation().await
    }
}
