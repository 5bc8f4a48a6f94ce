//! Timing and call/return logging
//!
//! Both wrappers are transparent: the wrapped function's value, including
//! any `Err`, is handed back untouched.

use std::fmt::Debug;
use std::time::Duration;

use tracing::info;

use crate::clock::{Clock, SystemClock};
use crate::decorators::Args;

// == Timed ==
/// Reports how long each call took.
#[derive(Debug, Clone)]
pub struct Timed<C = SystemClock> {
    name: String,
    clock: C,
}

impl Timed<SystemClock> {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_clock(name, SystemClock::new())
    }
}

impl<C: Clock> Timed<C> {
    pub fn with_clock(name: impl Into<String>, clock: C) -> Self {
        Self {
            name: name.into(),
            clock,
        }
    }

    pub fn call<R, F>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.call_measured(f).0
    }

    /// Runs `f` and also returns the measured duration.
    pub fn call_measured<R, F>(&self, f: F) -> (R, Duration)
    where
        F: FnOnce() -> R,
    {
        let start = self.clock.now();
        let result = f();
        let elapsed = self.clock.now().saturating_duration_since(start);
        info!("{} executed in {:.6}s", self.name, elapsed.as_secs_f64());
        (result, elapsed)
    }
}

// == Logged ==
/// Reports the arguments before a call and the returned value after it.
#[derive(Debug, Clone)]
pub struct Logged {
    name: String,
}

impl Logged {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn call<R, F>(&self, args: &Args, f: F) -> R
    where
        R: Debug,
        F: FnOnce(&Args) -> R,
    {
        info!("calling {}{}", self.name, args);
        let result = f(args);
        info!("{} returned {:?}", self.name, result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{CaptureLayer, MockClock};
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_timed_returns_value_and_reports() {
        let capture = CaptureLayer::new();
        let subscriber = tracing_subscriber::registry().with(capture.clone());

        let (value, elapsed) = tracing::subscriber::with_default(subscriber, || {
            Timed::new("nap").call_measured(|| {
                std::thread::sleep(Duration::from_millis(20));
                42
            })
        });

        assert_eq!(value, 42);
        assert!(elapsed >= Duration::from_millis(20));
        let messages = capture.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("nap executed in "));
    }

    #[test]
    fn test_timed_passes_errors_through() {
        let result: Result<(), String> = Timed::new("fails").call(|| Err("nope".to_string()));
        assert_eq!(result, Err("nope".to_string()));
    }

    #[test]
    fn test_timed_measures_with_clock() {
        let capture = CaptureLayer::new();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let clock = MockClock::start();
        let timed = Timed::with_clock("report", clock.clone());

        let (value, elapsed) = tracing::subscriber::with_default(subscriber, || {
            timed.call_measured(|| {
                clock.advance(Duration::from_millis(1500));
                "done"
            })
        });

        assert_eq!(value, "done");
        assert_eq!(elapsed, Duration::from_millis(1500));
        assert_eq!(capture.messages(), vec!["report executed in 1.500000s".to_string()]);
    }

    #[test]
    fn test_logged_passes_errors_through() {
        let capture = CaptureLayer::new();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let args = Args::new().arg("abc");

        let result = tracing::subscriber::with_default(subscriber, || {
            Logged::new("parse").call(&args, |a| {
                a.get(0)
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .parse::<i32>()
                    .map_err(|e| e.to_string())
            })
        });

        assert_eq!(result, Err("invalid digit found in string".to_string()));
        let messages = capture.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[1],
            r#"parse returned Err("invalid digit found in string")"#
        );
    }

    #[test]
    fn test_logged_reports_args_and_result() {
        let capture = CaptureLayer::new();
        let subscriber = tracing_subscriber::registry().with(capture.clone());

        let args = Args::new().arg(2).arg(3).kwarg("scale", 10);
        let total = tracing::subscriber::with_default(subscriber, || {
            Logged::new("add").call(&args, |a| {
                let sum: i64 = a.positional.iter().filter_map(|v| v.as_i64()).sum();
                sum * a.get_kw("scale").and_then(|v| v.as_i64()).unwrap_or(1)
            })
        });

        assert_eq!(total, 50);
        assert_eq!(
            capture.messages(),
            vec!["calling add(2, 3, scale=10)".to_string(), "add returned 50".to_string()]
        );
    }

    #[test]
    fn test_composition_reports_outer_to_inner() {
        let capture = CaptureLayer::new();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let args = Args::new().arg("x");

        tracing::subscriber::with_default(subscriber, || {
            let outer = Logged::new("outer");
            let inner = Logged::new("inner");
            outer.call(&args, |a| inner.call(a, |_| "done"))
        });

        assert_eq!(
            capture.messages(),
            vec![
                r#"calling outer("x")"#.to_string(),
                r#"calling inner("x")"#.to_string(),
                r#"inner returned "done""#.to_string(),
                r#"outer returned "done""#.to_string(),
            ]
        );
    }
}
