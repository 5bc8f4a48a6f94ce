//! Memoization with time-based expiry
//!
//! Each result is stored with the instant it was computed. A lookup inside
//! the expiry window is served from the cache; a stale entry is recomputed
//! and its timestamp refreshed.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::decorators::{Args, CacheStats, CallRecord};
use crate::error::{BoxError, DecoratorError, Result};

// == Timed Entry ==
/// A cached result together with the instant it was stored.
#[derive(Debug, Clone)]
pub struct TimedEntry<V> {
    pub value: V,
    pub stored_at: Instant,
}

impl<V> TimedEntry<V> {
    pub fn new(value: V, stored_at: Instant) -> Self {
        Self { value, stored_at }
    }

    /// An entry is fresh while its age is strictly below `expiry`.
    pub fn is_fresh(&self, now: Instant, expiry: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) < expiry
    }
}

// == Expiring Memoize ==
/// Memoization whose entries are valid for a fixed duration.
#[derive(Debug)]
pub struct ExpiringMemoize<K, V, C = SystemClock> {
    name: String,
    expiry: Duration,
    entries: HashMap<K, TimedEntry<V>>,
    stats: CacheStats,
    clock: C,
}

impl<K, V> ExpiringMemoize<K, V, SystemClock>
where
    K: Hash + Eq,
    V: Clone,
{
    /// Creates a cache whose results expire `expiry` after they were computed.
    pub fn new(name: impl Into<String>, expiry: Duration) -> Self {
        Self::with_clock(name, expiry, SystemClock::new())
    }

    /// Uses the configured `CACHE_EXPIRY_SECS`.
    pub fn from_config(name: impl Into<String>, config: &Config) -> Self {
        Self::new(name, config.cache_expiry())
    }
}

impl<K, V, C> ExpiringMemoize<K, V, C>
where
    K: Hash + Eq,
    V: Clone,
    C: Clock,
{
    pub fn with_clock(name: impl Into<String>, expiry: Duration, clock: C) -> Self {
        Self {
            name: name.into(),
            expiry,
            entries: HashMap::new(),
            stats: CacheStats::new(),
            clock,
        }
    }

    // == Call ==
    /// Serves `key` from the cache if its entry is still fresh, otherwise
    /// runs `f` and stores the result with a new timestamp.
    ///
    /// Errors from `f` are returned unchanged; a stale entry stays in place
    /// when the recompute fails.
    pub fn call<E, F>(&mut self, key: K, f: F) -> std::result::Result<V, E>
    where
        F: FnOnce(&K) -> std::result::Result<V, E>,
    {
        let now = self.clock.now();
        if let Some(entry) = self.entries.get(&key) {
            if entry.is_fresh(now, self.expiry) {
                self.stats.record_hit();
                debug!("{}: cache hit", self.name);
                return Ok(entry.value.clone());
            }
            self.stats.record_expiration();
            debug!("{}: cached result expired, recomputing", self.name);
        }

        self.stats.record_miss();
        let value = f(&key)?;
        let stored_at = self.clock.now();
        self.entries
            .insert(key, TimedEntry::new(value.clone(), stored_at));
        self.stats.set_total_entries(self.entries.len());
        Ok(value)
    }

    // == Purge ==
    /// Removes every stale entry and returns how many were dropped.
    ///
    /// Lookups already replace stale entries lazily; this reclaims memory for
    /// keys that are never asked for again.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let expiry = self.expiry;
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(now, expiry));
        let removed = before - self.entries.len();

        for _ in 0..removed {
            self.stats.record_expiration();
        }
        self.stats.set_total_entries(self.entries.len());
        if removed > 0 {
            debug!("{}: purged {} expired entries", self.name, removed);
        }
        removed
    }

    /// When the result for `key` was last stored.
    pub fn stored_at(&self, key: &K) -> Option<Instant> {
        self.entries.get(key).map(|entry| entry.stored_at)
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl<V, C> ExpiringMemoize<CallRecord, V, C>
where
    V: Clone,
    C: Clock,
{
    /// Memoizes a call described by `args`; see [`Memoize::call_args`].
    ///
    /// [`Memoize::call_args`]: crate::decorators::Memoize::call_args
    pub fn call_args<E, F>(&mut self, args: &Args, f: F) -> Result<V>
    where
        E: Into<BoxError>,
        F: FnOnce(&Args) -> std::result::Result<V, E>,
    {
        let key = CallRecord::from_args(args)?;
        self.call(key, |_| f(args).map_err(DecoratorError::function))
    }
}
