use std::sync::Arc;

use crate::cache::WeatherCache;
use crate::config::Config;
use crate::db::FlightSource;
use crate::enrichment::{Enricher, FailurePolicy};
use crate::error::UpstreamError;
use crate::fetcher::RateLimitedFetcher;
use crate::limiter::RateLimiter;
use crate::utils::PaginationDefaults;
use crate::weather::{OpenWeatherClient, WeatherProvider};

/// Handles shared by every worker. The cache and limiter are created once per
/// process and cloned into each worker by reference count.
#[derive(Clone)]
pub struct AppState {
    pub flights: Arc<dyn FlightSource>,
    pub enricher: Enricher,
    pub pagination: PaginationDefaults,
}

impl AppState {
    pub fn new(
        flights: Arc<dyn FlightSource>,
        provider: Arc<dyn WeatherProvider>,
        cache: Arc<WeatherCache>,
        limiter: Arc<RateLimiter>,
        settings: StateSettings,
    ) -> Self {
        let fetcher = RateLimitedFetcher::new(provider, limiter, settings.timeout);
        Self {
            flights,
            enricher: Enricher::new(cache, fetcher, settings.failure_policy),
            pagination: settings.pagination,
        }
    }

    /// Wires the production provider, cache and limiter from `config`.
    pub fn from_config(config: &Config, flights: Arc<dyn FlightSource>) -> Result<Self, UpstreamError> {
        let weather = &config.weather;
        let provider = OpenWeatherClient::new(
            weather.api_url.clone(),
            weather.api_key.clone(),
            weather.units.clone(),
            weather.lang.clone(),
            weather.timeout,
        )?;

        Ok(Self::new(
            flights,
            Arc::new(provider),
            Arc::new(WeatherCache::new(weather.cache_ttl)),
            Arc::new(RateLimiter::new(weather.max_concurrent, weather.min_spacing)),
            StateSettings {
                timeout: weather.timeout,
                failure_policy: config.failure_policy,
                pagination: config.pagination,
            },
        ))
    }

    pub fn cache(&self) -> &Arc<WeatherCache> {
        self.enricher.cache()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StateSettings {
    pub timeout: std::time::Duration,
    pub failure_policy: FailurePolicy,
    pub pagination: PaginationDefaults,
}

impl Default for StateSettings {
    fn default() -> Self {
        Self {
            timeout: crate::fetcher::DEFAULT_TIMEOUT,
            failure_policy: FailurePolicy::default(),
            pagination: PaginationDefaults::default(),
        }
    }
}
