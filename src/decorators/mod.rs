//! Decorators Module
//!
//! Function-wrapping policies, each an explicit struct that owns its
//! configuration and any private state (cache, call log) and exposes a
//! `call` operation taking the inner function.
//!
//! Stateful wrappers take `&mut self`; share one instance across threads by
//! putting it behind a mutex.

mod args;
mod conditions;
mod expiring;
mod hooks;
mod memoize;
mod rate_limit;
mod retry;
mod stats;
mod timing;
mod webhook;


// Re-export public types
pub use args::{Args, CallRecord, KeyValue};
pub use conditions::{ConditionOutcome, ConditionTracer};
pub use expiring::{ExpiringMemoize, TimedEntry};
pub use hooks::{Bracket, Deprecated};
pub use memoize::Memoize;
pub use rate_limit::RateLimiter;
pub use retry::Retry;
pub use stats::CacheStats;
pub use timing::{Logged, Timed};
pub use webhook::{Notified, Webhook, WEBHOOK_TIMEOUT};
