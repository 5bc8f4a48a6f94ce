//! Fixed-window rate limiting
//!
//! Every call is stamped into a log. The log is pruned to the trailing
//! window, and when it then holds more than `max_calls` stamps the call is
//! refused without running the wrapped function.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{BoxError, DecoratorError, Result};

// == Rate Limiter ==
/// Admits at most `max_calls` calls per trailing `window`.
#[derive(Debug)]
pub struct RateLimiter<C = SystemClock> {
    name: String,
    max_calls: usize,
    window: Duration,
    calls: VecDeque<Instant>,
    clock: C,
}

impl RateLimiter<SystemClock> {
    /// Creates a limiter for the function called `name`.
    ///
    /// Both `max_calls` and `window` must be non-zero.
    pub fn new(name: impl Into<String>, max_calls: usize, window: Duration) -> Result<Self> {
        Self::with_clock(name, max_calls, window, SystemClock::new())
    }

    /// Uses `RATE_LIMIT_MAX_CALLS` and `RATE_LIMIT_WINDOW_SECS`.
    pub fn from_config(name: impl Into<String>, config: &Config) -> Result<Self> {
        Self::new(name, config.rate_limit_max_calls, config.rate_limit_window())
    }
}

impl<C: Clock> RateLimiter<C> {
    pub fn with_clock(
        name: impl Into<String>,
        max_calls: usize,
        window: Duration,
        clock: C,
    ) -> Result<Self> {
        if max_calls == 0 {
            return Err(DecoratorError::InvalidConfig(
                "max_calls must be at least 1".to_string(),
            ));
        }
        if window.is_zero() {
            return Err(DecoratorError::InvalidConfig(
                "rate limit window must be longer than zero".to_string(),
            ));
        }

        Ok(Self {
            name: name.into(),
            max_calls,
            window,
            calls: VecDeque::new(),
            clock,
        })
    }

    // == Admit ==
    /// Records a call attempt and decides whether it may proceed.
    ///
    /// The attempt is logged even when refused, so a caller that keeps
    /// hammering stays limited until it backs off for a full window.
    pub fn admit(&mut self) -> Result<()> {
        let now = self.clock.now();
        self.calls.push_back(now);
        while let Some(&oldest) = self.calls.front() {
            if now.saturating_duration_since(oldest) < self.window {
                break;
            }
            self.calls.pop_front();
        }

        if self.calls.len() > self.max_calls {
            warn!(
                "{}: rate limit exceeded ({} calls within {:?})",
                self.name,
                self.calls.len(),
                self.window
            );
            return Err(DecoratorError::RateLimitExceeded {
                max_calls: self.max_calls,
                window: self.window,
            });
        }
        Ok(())
    }

    // == Call ==
    /// Runs `f` if the call is admitted.
    ///
    /// Fails with `RateLimitExceeded` without running `f` otherwise; an
    /// error from `f` itself comes back as `Function`.
    pub fn call<T, E, F>(&mut self, f: F) -> Result<T>
    where
        E: Into<BoxError>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        self.admit()?;
        f().map_err(DecoratorError::function)
    }

    /// Number of stamps currently in the log.
    pub fn recent_calls(&self) -> usize {
        self.calls.len()
    }

    pub fn max_calls(&self) -> usize {
        self.max_calls
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
