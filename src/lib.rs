//! Mini Decorators - function-wrapping policies
//!
//! Timing, call logging, retry, memoization (plain and expiring), rate
//! limiting, deprecation warnings, before/after bracketing, conditional
//! tracing and webhook notification, plus a small HTTP receiver for the
//! webhook notifications.

pub mod api;
pub mod clock;
pub mod config;
pub mod decorators;
pub mod error;
pub mod mocks;
pub mod models;

pub use api::AppState;
pub use config::Config;
pub use decorators::*;
pub use error::{DecoratorError, Result};
