// WHY: time-limited store of finished reports keyed by request token
// Expired entries are evicted lazily on every touch and never returned

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

/// Default time-to-live for cached reports
pub const DEFAULT_TTL: Duration = Duration::from_secs(600);

struct Entry<T> {
    created: Instant,
    payload: Arc<T>,
}

pub struct ReportCache<T> {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry<T>>>,
}

impl<T> ReportCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store a payload under `token`, replacing any previous entry
    pub fn store(&self, token: impl Into<String>, payload: T) -> Arc<T> {
        self.store_at(token.into(), payload, Instant::now())
    }

    /// Payload for `token` if present and not expired
    pub fn fetch(&self, token: &str) -> Option<Arc<T>> {
        self.fetch_at(token, Instant::now())
    }

    /// Drop every expired entry, returning how many were removed
    pub fn evict_expired(&self) -> usize {
        let mut entries = self.lock();
        Self::evict_locked(&mut entries, self.ttl, Instant::now())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn store_at(&self, token: String, payload: T, now: Instant) -> Arc<T> {
        let payload = Arc::new(payload);
        let mut entries = self.lock();
        Self::evict_locked(&mut entries, self.ttl, now);
        entries.insert(
            token,
            Entry {
                created: now,
                payload: Arc::clone(&payload),
            },
        );
        payload
    }

    fn fetch_at(&self, token: &str, now: Instant) -> Option<Arc<T>> {
        let mut entries = self.lock();
        Self::evict_locked(&mut entries, self.ttl, now);
        entries.get(token).map(|entry| Arc::clone(&entry.payload))
    }

    fn evict_locked(entries: &mut HashMap<String, Entry<T>>, ttl: Duration, now: Instant) -> usize {
        let before = entries.len();
        // Entries exactly ttl old are still served
        entries.retain(|_, entry| now.saturating_duration_since(entry.created) <= ttl);
        let evicted = before - entries.len();
        if evicted > 0 {
            debug!("Evicted {} expired reports", evicted);
        }
        evicted
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry<T>>> {
        // A panic while holding the lock cannot leave the map half-updated
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> Default for ReportCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
