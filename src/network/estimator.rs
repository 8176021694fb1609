use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::models::PointsCache;
use crate::network::PointsProvider;

/// Where the current estimate came from, surfaced to the UI as an
/// informational notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateSource {
    Live,
    Cached,
    Fallback,
}

impl EstimateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimateSource::Live => "live",
            EstimateSource::Cached => "cached",
            EstimateSource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PointsEstimate {
    pub value: f64,
    pub source: EstimateSource,
}

impl PointsEstimate {
    pub fn fallback(value: f64) -> Self {
        Self {
            value,
            source: EstimateSource::Fallback,
        }
    }
}

/// Wraps a provider with a TTL cache and a constant fallback. Provider
/// failures never escape: the caller always gets a usable number.
pub struct GlobalPointsEstimator {
    provider: Arc<dyn PointsProvider>,
    cache: PointsCache,
    fallback: f64,
}

impl GlobalPointsEstimator {
    pub fn new(provider: Arc<dyn PointsProvider>, cache_ttl: Duration, fallback: f64) -> Self {
        Self {
            provider,
            cache: PointsCache::new(cache_ttl),
            fallback,
        }
    }

    pub fn fallback_value(&self) -> f64 {
        self.fallback
    }

    /// Drops whatever is cached and fetches again.
    pub async fn refresh(&self) -> PointsEstimate {
        self.cache.clear();
        self.current_estimate().await
    }

    pub async fn current_estimate(&self) -> PointsEstimate {
        if let Some(value) = self.cache.get() {
            debug!(value, "Using cached network point estimate");
            return PointsEstimate {
                value,
                source: EstimateSource::Cached,
            };
        }

        match self.provider.fetch_estimate().await {
            Ok(value) => {
                info!(value, "Fetched network point estimate");
                self.cache.set(value);
                PointsEstimate {
                    value,
                    source: EstimateSource::Live,
                }
            }
            Err(e) => {
                warn!("Could not fetch network estimate, using fallback: {}", e);
                // Cache the fallback too, so a dead endpoint is not hammered
                // on every recomputation within the TTL window.
                self.cache.set(self.fallback);
                PointsEstimate {
                    value: self.fallback,
                    source: EstimateSource::Fallback,
                }
            }
        }
    }
}
