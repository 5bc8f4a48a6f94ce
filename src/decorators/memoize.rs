//! Plain memoization
//!
//! Results are kept for the lifetime of the decorator instance; nothing is
//! ever evicted.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::debug;

use crate::decorators::{Args, CacheStats, CallRecord};
use crate::error::{BoxError, DecoratorError, Result};

// == Memoize ==
/// Caches the result of each distinct call forever.
#[derive(Debug)]
pub struct Memoize<K, V> {
    name: String,
    entries: HashMap<K, V>,
    stats: CacheStats,
}

impl<K, V> Memoize<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    /// Creates an empty cache for the function called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
            stats: CacheStats::new(),
        }
    }

    // == Call ==
    /// Returns the cached result for `key`, or runs `f` and caches its
    /// success. Errors from `f` are returned unchanged and not cached.
    pub fn call<E, F>(&mut self, key: K, f: F) -> std::result::Result<V, E>
    where
        F: FnOnce(&K) -> std::result::Result<V, E>,
    {
        if let Some(value) = self.entries.get(&key) {
            self.stats.record_hit();
            debug!("{}: cache hit", self.name);
            return Ok(value.clone());
        }

        self.stats.record_miss();
        debug!("{}: cache miss, computing", self.name);
        let value = f(&key)?;
        self.entries.insert(key, value.clone());
        self.stats.set_total_entries(self.entries.len());
        Ok(value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every cached result. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<V: Clone> Memoize<CallRecord, V> {
    /// Memoizes a call described by `args`.
    ///
    /// Fails with `CacheKey` (without running `f`) if the arguments contain a
    /// list or a map. Errors from `f` come back as `Function`.
    pub fn call_args<E, F>(&mut self, args: &Args, f: F) -> Result<V>
    where
        E: Into<BoxError>,
        F: FnOnce(&Args) -> std::result::Result<V, E>,
    {
        let key = CallRecord::from_args(args)?;
        self.call(key, |_| f(args).map_err(DecoratorError::function))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::Cell;

    #[test]
    fn test_second_call_is_cached() {
        let calls = Cell::new(0);
        let mut square = Memoize::new("square");

        let compute = |x: &u64| {
            calls.set(calls.get() + 1);
            Ok::<_, String>(x * x)
        };

        assert_eq!(square.call(7, compute), Ok(49));
        assert_eq!(square.call(7, compute), Ok(49));
        assert_eq!(calls.get(), 1);

        assert_eq!(square.call(8, compute), Ok(64));
        assert_eq!(calls.get(), 2);
        assert_eq!(square.len(), 2);
        assert_eq!(square.stats().hits, 1);
        assert_eq!(square.stats().misses, 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let calls = Cell::new(0);
        let mut cache: Memoize<u32, i32> = Memoize::new("parse");

        let failing = |_: &u32| {
            calls.set(calls.get() + 1);
            Err::<i32, _>("boom")
        };

        assert_eq!(cache.call(1, failing), Err("boom"));
        assert_eq!(cache.call(1, failing), Err("boom"));
        assert_eq!(calls.get(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_forces_recompute() {
        let calls = Cell::new(0);
        let mut cache = Memoize::new("id");
        let f = |k: &i32| {
            calls.set(calls.get() + 1);
            Ok::<_, ()>(*k)
        };

        cache.call(1, f).unwrap();
        cache.clear();
        assert!(!cache.contains(&1));
        cache.call(1, f).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_call_args_uses_call_record() {
        let calls = Cell::new(0);
        let mut cache = Memoize::new("greet");
        let greet = |args: &Args| {
            calls.set(calls.get() + 1);
            let name = args.get(0).and_then(|v| v.as_str()).unwrap_or("nobody");
            Ok::<_, std::io::Error>(format!("hello {name}"))
        };

        let a = Args::new().arg("ada").kwarg("loud", false).kwarg("times", 1);
        let b = Args::new().arg("ada").kwarg("times", 1).kwarg("loud", false);

        assert_eq!(cache.call_args(&a, greet).unwrap(), "hello ada");
        assert_eq!(cache.call_args(&b, greet).unwrap(), "hello ada");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_call_args_rejects_unhashable() {
        let calls = Cell::new(0);
        let mut cache: Memoize<CallRecord, usize> = Memoize::new("count");
        let args = Args::new().kwarg("items", json!([1, 2, 3]));

        let result = cache.call_args(&args, |_| {
            calls.set(calls.get() + 1);
            Ok::<_, std::io::Error>(3)
        });

        assert!(matches!(result, Err(DecoratorError::CacheKey(_))));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_call_args_wraps_function_error() {
        let mut cache: Memoize<CallRecord, i32> = Memoize::new("fail");
        let result = cache.call_args(&Args::new(), |_| {
            Err::<i32, _>(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
        });

        match result {
            Err(DecoratorError::Function(inner)) => {
                let io = inner.downcast_ref::<std::io::Error>().unwrap();
                assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
