//! Deprecation warnings and before/after bracketing
//!
//! Neither hook changes what the wrapped function returns.

use tracing::{info, warn};

// == Deprecated ==
/// Warns on every call that the function is deprecated.
#[derive(Debug, Clone)]
pub struct Deprecated {
    name: String,
    message: String,
}

impl Deprecated {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn call<R, F>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        warn!("{} is deprecated: {}", self.name, self.message);
        f()
    }
}

// == Bracket ==
/// Emits a "starting" marker before the call and a "committing" marker
/// after it. The markers are informational only: nothing is rolled back if
/// the function fails.
#[derive(Debug, Clone)]
pub struct Bracket {
    name: String,
}

impl Bracket {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn call<R, F>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        info!("starting {}", self.name);
        let result = f();
        info!("committing {}", self.name);
        result
    }
}
