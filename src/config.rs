//! Configuration Module
//!
//! Loads decorator defaults and webhook receiver settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Decorator and receiver configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Webhook receiver HTTP port
    pub server_port: u16,
    /// Maximum number of notifications the receiver retains
    pub max_notifications: usize,
    /// Retry attempts (including the first call)
    pub retry_attempts: u32,
    /// Pause between retry attempts in milliseconds
    pub retry_delay_ms: u64,
    /// Expiring memoization validity in seconds
    pub cache_expiry_secs: u64,
    /// Calls allowed per rate-limit window
    pub rate_limit_max_calls: usize,
    /// Rate-limit window in seconds
    pub rate_limit_window_secs: u64,
    /// Target URL of the webhook notifier
    pub webhook_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - Receiver HTTP port (default: 3000)
    /// - `MAX_NOTIFICATIONS` - Receiver log capacity (default: 1000)
    /// - `RETRY_ATTEMPTS` - Retry attempts (default: 3)
    /// - `RETRY_DELAY_MS` - Delay between attempts (default: 1000)
    /// - `CACHE_EXPIRY_SECS` - Expiring cache validity (default: 60)
    /// - `RATE_LIMIT_MAX_CALLS` - Calls per window (default: 10)
    /// - `RATE_LIMIT_WINDOW_SECS` - Window length (default: 60)
    /// - `WEBHOOK_URL` - Notifier target (default: http://127.0.0.1:3000/webhook)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            max_notifications: env_or("MAX_NOTIFICATIONS", defaults.max_notifications),
            retry_attempts: env_or("RETRY_ATTEMPTS", defaults.retry_attempts),
            retry_delay_ms: env_or("RETRY_DELAY_MS", defaults.retry_delay_ms),
            cache_expiry_secs: env_or("CACHE_EXPIRY_SECS", defaults.cache_expiry_secs),
            rate_limit_max_calls: env_or("RATE_LIMIT_MAX_CALLS", defaults.rate_limit_max_calls),
            rate_limit_window_secs: env_or(
                "RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit_window_secs,
            ),
            webhook_url: env::var("WEBHOOK_URL").unwrap_or(defaults.webhook_url),
        }
    }

    /// Delay between retry attempts.
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    /// Validity period of the expiring cache.
    pub fn cache_expiry(&self) -> Duration {
        Duration::from_secs(self.cache_expiry_secs)
    }

    /// Length of the rate-limit window.
    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            max_notifications: 1000,
            retry_attempts: 3,
            retry_delay_ms: 1000,
            cache_expiry_secs: 60,
            rate_limit_max_calls: 10,
            rate_limit_window_secs: 60,
            webhook_url: "http://127.0.0.1:3000/webhook".to_string(),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
