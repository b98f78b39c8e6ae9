// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory cache whose entries expire after a maximum age.

use std::collections::HashMap;
use std::time::{Duration, Instant};

struct CacheItem<V> {
    value: V,
    stored_at: Instant,
}

/// String-keyed cache with per-entry expiry.
///
/// Entries older than the max age are treated as absent and removed
/// lazily: `get` evicts the expired entry it finds, and `set` sweeps the
/// whole store before inserting. There is no background task; time only
/// advances on the caller's stack.
///
/// ```rust
/// use canopy::cache::ExpireCache;
/// use std::time::Duration;
///
/// let mut cache = ExpireCache::with_max_age(Duration::from_secs(60));
/// cache.set("token", "abc123");
/// assert_eq!(cache.get("token"), Some(&"abc123"));
/// assert_eq!(cache.get("missing"), None);
/// ```
pub struct ExpireCache<V> {
    max_age: Duration,
    store: HashMap<String, CacheItem<V>>,
}

/// Default max age, matching the original's 999 ms.
const DEFAULT_MAX_AGE: Duration = Duration::from_millis(999);

impl<V> ExpireCache<V> {
    /// Cache with the default max age (999 ms).
    pub fn new() -> Self {
        Self::with_max_age(DEFAULT_MAX_AGE)
    }

    /// Cache with an explicit default max age.
    pub fn with_max_age(max_age: Duration) -> Self {
        Self {
            max_age,
            store: HashMap::new(),
        }
    }

    /// Store `value` under `name`, sweeping expired entries first.
    pub fn set(&mut self, name: impl Into<String>, value: V) {
        self.clean(None);
        self.store.insert(
            name.into(),
            CacheItem {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    /// Fetch a live entry, or `None` if absent or expired.
    pub fn get(&mut self, name: &str) -> Option<&V> {
        self.get_with_max_age(name, self.max_age)
    }

    /// Fetch with a one-off max age overriding the default.
    pub fn get_with_max_age(&mut self, name: &str, max_age: Duration) -> Option<&V> {
        let live = self
            .store
            .get(name)
            .map(|item| item.stored_at.elapsed() <= max_age);
        match live {
            Some(true) => self.store.get(name).map(|item| &item.value),
            Some(false) => {
                self.store.remove(name);
                None
            }
            None => None,
        }
    }

    /// Sweep every entry older than the cutoff.
    ///
    /// `None` uses the default max age. A zero cutoff clears everything:
    /// a same-instant store-then-sweep must still count as expired.
    pub fn clean(&mut self, max_age: Option<Duration>) {
        let cutoff = max_age.unwrap_or(self.max_age);
        if cutoff.is_zero() {
            self.store.clear();
        } else {
            self.store
                .retain(|_, item| item.stored_at.elapsed() <= cutoff);
        }
    }

    /// Number of entries currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl<V> Default for ExpireCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_set_then_get_within_max_age() {
        let mut cache = ExpireCache::with_max_age(Duration::from_secs(60));
        cache.set("a", 1);
        assert_eq!(cache.get("a"), Some(&1));
    }

    #[test]
    fn test_missing_entry_is_none() {
        let mut cache: ExpireCache<i32> = ExpireCache::new();
        assert_eq!(cache.get("nope"), None);
    }

    #[test]
    fn test_expired_entry_is_evicted_on_get() {
        let mut cache = ExpireCache::with_max_age(Duration::from_millis(1));
        cache.set("a", 1);
        sleep(Duration::from_millis(5));
        assert_eq!(cache.get("a"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_with_override_max_age() {
        let mut cache = ExpireCache::with_max_age(Duration::from_millis(1));
        cache.set("a", 1);
        sleep(Duration::from_millis(5));
        // A generous one-off max age still sees the entry.
        assert_eq!(cache.get_with_max_age("a", Duration::from_secs(60)), Some(&1));
    }

    #[test]
    fn test_set_sweeps_expired_entries() {
        let mut cache = ExpireCache::with_max_age(Duration::from_millis(1));
        cache.set("old", 1);
        sleep(Duration::from_millis(5));
        cache.set("fresh", 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("fresh"), Some(&2));
    }

    #[test]
    fn test_clean_with_zero_cutoff_clears_everything() {
        let mut cache = ExpireCache::with_max_age(Duration::from_secs(60));
        cache.set("a", 1);
        cache.set("b", 2);
        cache.clean(Some(Duration::ZERO));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_overwrite_refreshes_entry() {
        let mut cache = ExpireCache::with_max_age(Duration::from_secs(60));
        cache.set("a", 1);
        cache.set("a", 2);
        assert_eq!(cache.get("a"), Some(&2));
        assert_eq!(cache.len(), 1);
    }
}
