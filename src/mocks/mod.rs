//! Test doubles for time and log output.
//!
//! Exposed publicly so integration tests and downstream crates can drive the
//! decorators deterministically.

mod clock;
mod layer;

pub use clock::MockClock;
pub use layer::{CaptureLayer, CapturedEvent};
