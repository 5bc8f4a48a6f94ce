//! Bounded retry with a fixed pause between attempts

use std::fmt::Display;
use std::thread;
use std::time::Duration;

use tracing::{error, warn};

use crate::config::Config;
use crate::error::{DecoratorError, Result};

// == Retry ==
/// Re-runs a failing function up to `attempts` times.
#[derive(Debug, Clone)]
pub struct Retry {
    name: String,
    attempts: u32,
    delay: Duration,
}

impl Retry {
    /// `attempts` counts the first call and must be at least 1.
    pub fn new(name: impl Into<String>, attempts: u32, delay: Duration) -> Result<Self> {
        if attempts == 0 {
            return Err(DecoratorError::InvalidConfig(
                "retry attempts must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            name: name.into(),
            attempts,
            delay,
        })
    }

    /// Uses `RETRY_ATTEMPTS` and `RETRY_DELAY_MS`.
    pub fn from_config(name: impl Into<String>, config: &Config) -> Result<Self> {
        Self::new(name, config.retry_attempts, config.retry_delay())
    }

    // == Call ==
    /// Returns the first successful result, or `None` once every attempt has
    /// failed. The final failure is logged, not returned; use
    /// [`Retry::try_call`] to get it back as an error.
    pub fn call<T, E, F>(&self, f: F) -> Option<T>
    where
        E: Display,
        F: FnMut() -> std::result::Result<T, E>,
    {
        self.try_call(f).ok()
    }

    /// Like [`Retry::call`], but exhaustion yields `RetryExhausted` carrying
    /// the attempt count and the last error message.
    pub fn try_call<T, E, F>(&self, mut f: F) -> Result<T>
    where
        E: Display,
        F: FnMut() -> std::result::Result<T, E>,
    {
        let mut last_error = String::new();
        for attempt in 1..=self.attempts {
            match f() {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(
                        "{}: attempt {}/{} failed: {}",
                        self.name, attempt, self.attempts, e
                    );
                    last_error = e.to_string();
                }
            }

            if attempt < self.attempts && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }

        error!(
            "{}: giving up after {} attempts",
            self.name, self.attempts
        );
        Err(DecoratorError::RetryExhausted {
            attempts: self.attempts,
            last_error,
        })
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
