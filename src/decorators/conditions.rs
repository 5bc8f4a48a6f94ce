//! Conditional tracing
//!
//! A set of named predicates is evaluated against the arguments of every
//! call; the ones that hold are reported and the full outcome list is kept
//! for inspection.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

type Predicate<A> = Box<dyn Fn(&A) -> bool + Send + Sync>;

/// Whether one named condition held for the latest call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionOutcome {
    pub label: String,
    pub held: bool,
}

struct Condition<A> {
    label: String,
    predicate: Predicate<A>,
}

// == Condition Tracer ==
/// Evaluates labelled predicates over a call's arguments before running it.
pub struct ConditionTracer<A> {
    name: String,
    conditions: Vec<Condition<A>>,
    last_report: Vec<ConditionOutcome>,
}

impl<A> ConditionTracer<A> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conditions: Vec::new(),
            last_report: Vec::new(),
        }
    }

    /// Adds a condition; conditions are evaluated in insertion order.
    pub fn condition<P>(mut self, label: impl Into<String>, predicate: P) -> Self
    where
        P: Fn(&A) -> bool + Send + Sync + 'static,
    {
        self.conditions.push(Condition {
            label: label.into(),
            predicate: Box::new(predicate),
        });
        self
    }

    // == Call ==
    /// Evaluates every condition against `args`, then runs `f` unchanged.
    pub fn call<R, F>(&mut self, args: &A, f: F) -> R
    where
        F: FnOnce(&A) -> R,
    {
        self.last_report = self
            .conditions
            .iter()
            .map(|c| ConditionOutcome {
                label: c.label.clone(),
                held: (c.predicate)(args),
            })
            .collect();

        for outcome in &self.last_report {
            if outcome.held {
                info!("{}: condition `{}` held", self.name, outcome.label);
            } else {
                debug!("{}: condition `{}` did not hold", self.name, outcome.label);
            }
        }

        f(args)
    }

    /// Outcomes recorded by the most recent call.
    pub fn last_report(&self) -> &[ConditionOutcome] {
        &self.last_report
    }

    /// Labels of the conditions that held on the most recent call.
    pub fn held(&self) -> Vec<&str> {
        self.last_report
            .iter()
            .filter(|o| o.held)
            .map(|o| o.label.as_str())
            .collect()
    }
}

impl<A> fmt::Debug for ConditionTracer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.conditions.iter().map(|c| c.label.as_str()).collect();
        f.debug_struct("ConditionTracer")
            .field("name", &self.name)
            .field("conditions", &labels)
            .field("last_report", &self.last_report)
            .finish()
    }
}
