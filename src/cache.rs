use dashmap::DashMap;
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

use crate::models::{CoordinateKey, WeatherSnapshot};

pub const DEFAULT_TTL: Duration = Duration::from_secs(3600); // 1 hour

#[derive(Clone)]
pub struct CacheEntry {
    pub value: WeatherSnapshot,
    pub expires_at: Instant,
}

impl CacheEntry {
    pub fn new(value: WeatherSnapshot, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CacheStats {
    pub entries: usize,
    pub ttl_seconds: u64,
}

/// Process-wide weather cache keyed by coordinate.
///
/// Expired entries are never returned; they are dropped lazily when read.
pub struct WeatherCache {
    entries: DashMap<CoordinateKey, CacheEntry>,
    ttl: Duration,
}

impl WeatherCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &CoordinateKey) -> Option<WeatherSnapshot> {
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired() {
                return Some(entry.value.clone());
            }
        }
        // The read guard must be released before removing.
        self.entries.remove_if(key, |_, entry| entry.is_expired());
        None
    }

    pub fn set(&self, key: CoordinateKey, value: WeatherSnapshot) {
        self.set_with_ttl(key, value, self.ttl);
    }

    pub fn set_with_ttl(&self, key: CoordinateKey, value: WeatherSnapshot, ttl: Duration) {
        self.entries.insert(key, CacheEntry::new(value, ttl));
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Physically stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sweeps expired entries first so `entries` only counts live ones.
    pub fn stats(&self) -> CacheStats {
        self.entries.retain(|_, entry| !entry.is_expired());
        CacheStats {
            entries: self.len(),
            ttl_seconds: self.ttl.as_secs(),
        }
    }
}

impl Default for WeatherCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
