//! Minimum spacing between outbound completion requests.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Minimum time between two dispatches through the same limiter.
pub const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1000);

static GLOBAL_LIMITER: Lazy<Arc<RateLimiter>> = Lazy::new(|| Arc::new(RateLimiter::new()));

/// Spaces dispatches so that consecutive ones are at least `min_interval`
/// apart.
///
/// The lock is held across the wait, so concurrent callers queue up and are
/// released one interval after another.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_interval(MIN_REQUEST_INTERVAL)
    }

    pub fn with_interval(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_dispatch: Mutex::new(None),
        }
    }

    /// The process-wide limiter shared by every bridge that does not bring
    /// its own.
    pub fn global() -> Arc<RateLimiter> {
        Arc::clone(&GLOBAL_LIMITER)
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Waits until a dispatch is allowed and records it.
    ///
    /// Returns how long the caller was held back.
    pub async fn acquire(&self) -> Duration {
        let mut last_dispatch = self.last_dispatch.lock().await;
        let mut waited = Duration::ZERO;

        if let Some(last) = *last_dispatch {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                waited = self.min_interval - elapsed;
                tracing::debug!(
                    wait_ms = waited.as_millis() as u64,
                    "Rate limiting completion request"
                );
                tokio::time::sleep(waited).await;
            }
        }

        *last_dispatch = Some(Instant::now());
        waited
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}
