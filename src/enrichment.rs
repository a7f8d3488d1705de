//! Weather enrichment for a page of flights.
//!
//! A page is reduced to its distinct coordinates, each coordinate is resolved
//! once (cache hit or rate-limited fetch) in its own task, and every flight is
//! then rebuilt with the weather for both of its ends.

use futures::future::join_all;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use crate::cache::WeatherCache;
use crate::dedup::dedup_coordinates;
use crate::error::{ApiError, UpstreamError};
use crate::fetcher::RateLimitedFetcher;
use crate::models::{
    Coordinate, CoordinateKey, EnrichedFlight, FlightRecord, WeatherField, WeatherSnapshot,
};

/// What to do with a page when some coordinates could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Mark the affected weather fields unresolved and return the page.
    #[default]
    Degrade,
    /// Reject the whole page with `AggregateEnrichmentFailure`.
    FailRequest,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "degrade" => Ok(FailurePolicy::Degrade),
            "fail" | "fail_request" => Ok(FailurePolicy::FailRequest),
            other => Err(format!("expected 'degrade' or 'fail', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Cache,
    Provider,
}

#[derive(Clone)]
pub struct Enricher {
    cache: Arc<WeatherCache>,
    fetcher: RateLimitedFetcher,
    policy: FailurePolicy,
}

impl Enricher {
    pub fn new(cache: Arc<WeatherCache>, fetcher: RateLimitedFetcher, policy: FailurePolicy) -> Self {
        Self {
            cache,
            fetcher,
            policy,
        }
    }

    pub fn cache(&self) -> &Arc<WeatherCache> {
        &self.cache
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Attaches origin and destination weather to every flight, keeping input order.
    ///
    /// The provider is called at most once per distinct coordinate that misses
    /// the cache. Resolutions run as spawned tasks, so they finish and populate
    /// the cache even if the caller stops waiting.
    pub async fn enrich(&self, flights: Vec<FlightRecord>) -> Result<Vec<EnrichedFlight>, ApiError> {
        let page = dedup_coordinates(&flights);
        let unique = page.coordinates.len();

        let tasks = page.coordinates.into_iter().map(|coordinate| {
            let cache = Arc::clone(&self.cache);
            let fetcher = self.fetcher.clone();
            let key = coordinate.key();
            let handle = tokio::spawn(async move { resolve(&cache, &fetcher, &coordinate).await });
            async move { (key, handle.await) }
        });
        let resolved = join_all(tasks).await;

        let mut weather: HashMap<CoordinateKey, WeatherField> = HashMap::with_capacity(unique);
        let (mut hits, mut fetched, mut failed) = (0usize, 0usize, 0usize);
        for (key, outcome) in resolved {
            let field = match outcome {
                Ok(Ok((snapshot, source))) => {
                    match source {
                        Source::Cache => hits += 1,
                        Source::Provider => fetched += 1,
                    }
                    WeatherField::Resolved(snapshot)
                }
                Ok(Err(e)) => {
                    log::warn!("Weather unavailable for {key}: {e}");
                    failed += 1;
                    WeatherField::Unresolved
                }
                Err(e) => {
                    log::error!("Weather resolution task for {key} did not complete: {e}");
                    failed += 1;
                    WeatherField::Unresolved
                }
            };
            weather.insert(key, field);
        }

        log::info!(
            "Enriched {} flights: {unique} locations, {hits} cached, {fetched} fetched, {failed} failed",
            flights.len()
        );

        if failed > 0 && self.policy == FailurePolicy::FailRequest {
            return Err(ApiError::AggregateEnrichmentFailure {
                failed,
                total: unique,
            });
        }

        let lookup = |key: &CoordinateKey| {
            weather
                .get(key)
                .cloned()
                .unwrap_or(WeatherField::Unresolved)
        };

        Ok(flights
            .into_iter()
            .zip(page.legs)
            .map(|(flight, legs)| EnrichedFlight {
                origin_weather: lookup(&legs.origin),
                destination_weather: lookup(&legs.destination),
                flight,
            })
            .collect())
    }
}

async fn resolve(
    cache: &WeatherCache,
    fetcher: &RateLimitedFetcher,
    coordinate: &Coordinate,
) -> Result<(WeatherSnapshot, Source), UpstreamError> {
    let key = coordinate.key();
    if let Some(snapshot) = cache.get(&key) {
        log::debug!("Weather cache hit for {key}");
        return Ok((snapshot, Source::Cache));
    }

    log::debug!("Weather cache miss for {key}");
    let snapshot = fetcher.fetch(coordinate).await?;
    cache.set(key, snapshot.clone());
    Ok((snapshot, Source::Provider))
}
