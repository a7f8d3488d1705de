use std::sync::Arc;
use std::time::Duration;

use crate::error::UpstreamError;
use crate::limiter::RateLimiter;
use crate::models::{Coordinate, WeatherSnapshot};
use crate::weather::WeatherProvider;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Issues provider calls through the shared [`RateLimiter`].
///
/// Does not touch the weather cache. Failures are returned as-is, never retried.
#[derive(Clone)]
pub struct RateLimitedFetcher {
    provider: Arc<dyn WeatherProvider>,
    limiter: Arc<RateLimiter>,
    timeout: Duration,
}

impl RateLimitedFetcher {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        limiter: Arc<RateLimiter>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            limiter,
            timeout,
        }
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// The timeout covers the provider call only, not the wait for admission.
    pub async fn fetch(&self, coordinate: &Coordinate) -> Result<WeatherSnapshot, UpstreamError> {
        self.limiter
            .schedule(|| async {
                tokio::time::timeout(self.timeout, self.provider.current_weather(coordinate))
                    .await
                    .unwrap_or(Err(UpstreamError::Timeout {
                        timeout_ms: self.timeout.as_millis() as u64,
                    }))
            })
            .await
    }
}
