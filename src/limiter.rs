//! Process-wide admission control for weather provider calls.
//!
//! Two limits apply to every call no matter which request issued it: at most
//! `max_concurrent` calls in flight, and consecutive call starts at least
//! `min_spacing` apart. Admission is strictly first come, first served.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter as GovLimiter};
use std::future::Future;
use std::time::Duration;
use tokio::sync::{Mutex, Semaphore};

use crate::error::UpstreamError;

pub const DEFAULT_MAX_CONCURRENT: usize = 5;
pub const DEFAULT_MIN_SPACING: Duration = Duration::from_millis(200);

pub struct RateLimiter {
    // Held while a caller waits for a permit and its start slot. Tokio's mutex
    // is fair, so starts happen in submission order.
    admission: Mutex<()>,
    permits: Semaphore,
    spacing: Option<DefaultDirectRateLimiter>,
    max_concurrent: usize,
    min_spacing: Duration,
}

impl RateLimiter {
    /// `max_concurrent` is raised to 1 if zero. A zero `min_spacing` disables spacing.
    pub fn new(max_concurrent: usize, min_spacing: Duration) -> Self {
        let max_concurrent = max_concurrent.max(1);
        let spacing = Quota::with_period(min_spacing).map(GovLimiter::direct);

        Self {
            admission: Mutex::new(()),
            permits: Semaphore::new(max_concurrent),
            spacing,
            max_concurrent,
            min_spacing,
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    pub fn min_spacing(&self) -> Duration {
        self.min_spacing
    }

    /// Calls currently holding a permit.
    pub fn in_flight(&self) -> usize {
        self.max_concurrent - self.permits.available_permits()
    }

    /// Waits for admission, then runs `task` while holding a concurrency permit.
    pub async fn schedule<F, Fut, T>(&self, task: F) -> Result<T, UpstreamError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        let permit = {
            let _admission = self.admission.lock().await;
            let permit = self
                .permits
                .acquire()
                .await
                .map_err(|_| UpstreamError::LimiterClosed)?;
            if let Some(spacing) = &self.spacing {
                spacing.until_ready().await;
            }
            permit
        };

        let result = task().await;
        drop(permit);
        result
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENT, DEFAULT_MIN_SPACING)
    }
}
