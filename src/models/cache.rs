use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Cache entry with TTL
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub created_at: Instant,
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, ttl: Duration) -> Self {
        Self::new_at(value, ttl, Instant::now())
    }

    pub fn new_at(value: T, ttl: Duration, created_at: Instant) -> Self {
        Self {
            value,
            created_at,
            ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Expiry check against a caller-supplied instant, so tests can move
    /// time without sleeping.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) > self.ttl
    }
}

/// Single-value cache for the network-wide point estimate.
#[derive(Debug)]
pub struct PointsCache {
    entry: RwLock<Option<CacheEntry<f64>>>,
    ttl: Duration,
}

impl PointsCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: RwLock::new(None),
            ttl,
        }
    }

    pub fn get(&self) -> Option<f64> {
        self.get_at(Instant::now())
    }

    pub fn get_at(&self, now: Instant) -> Option<f64> {
        let entry = self.entry.read().ok()?;
        let entry = entry.as_ref()?;

        if entry.is_expired_at(now) {
            return None;
        }

        Some(entry.value)
    }

    pub fn set(&self, value: f64) {
        self.set_at(value, Instant::now());
    }

    pub fn set_at(&self, value: f64, now: Instant) {
        if let Ok(mut entry) = self.entry.write() {
            *entry = Some(CacheEntry::new_at(value, self.ttl, now));
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entry) = self.entry.write() {
            *entry = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_expiration_at_injected_instants() {
        let start = Instant::now();
        let entry = CacheEntry::new_at(42.0, Duration::from_secs(300), start);

        assert!(!entry.is_expired_at(start));
        assert!(!entry.is_expired_at(start + Duration::from_secs(300)));
        assert!(entry.is_expired_at(start + Duration::from_secs(301)));
    }

    #[test]
    fn test_points_cache_roundtrip() {
        let cache = PointsCache::new(Duration::from_secs(300));
        assert!(cache.get().is_none());

        cache.set(500_000_000.0);
        assert_eq!(cache.get(), Some(500_000_000.0));

        cache.clear();
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_points_cache_expiry() {
        let cache = PointsCache::new(Duration::from_secs(60));
        let start = Instant::now();

        cache.set_at(123.0, start);
        assert_eq!(cache.get_at(start + Duration::from_secs(59)), Some(123.0));
        assert!(cache.get_at(start + Duration::from_secs(61)).is_none());
    }
}
