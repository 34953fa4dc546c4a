// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Threshold-based fault detection for flow samples.

use serde::Serialize;
use std::collections::VecDeque;
use std::fmt::Display;

/// The severity of a detected fault.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultSeverity {
    Warning,
    Error,
}

impl Display for FaultSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaultSeverity::Warning => write!(f, "warning"),
            FaultSeverity::Error => write!(f, "error"),
        }
    }
}

/// A detected anomaly tied to one flow sample.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Fault {
    pub severity: FaultSeverity,
    pub message: String,
}

impl Fault {
    /// Creates a warning-severity fault with the given message.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: FaultSeverity::Warning,
            message: message.into(),
        }
    }

    /// Creates an error-severity fault with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: FaultSeverity::Error,
            message: message.into(),
        }
    }
}

/// Evaluates the threshold rules against one flow reading.
///
/// The two rules are independent checks, not an either/or classification.
/// Evaluation is a pure function of the reading: the same value always
/// yields the same faults.
pub fn evaluate_sample(current_kw: f64, warning_above_kw: f64, error_below_kw: f64) -> Vec<Fault> {
    let mut faults = Vec::new();

    if current_kw > warning_above_kw {
        faults.push(Fault::warning("High energy flow detected"));
    }
    if current_kw < error_below_kw {
        faults.push(Fault::error("Critical: Low energy flow"));
    }

    faults
}

/// A bounded FIFO log of the faults recorded for one edge, oldest evicted
/// first.
#[derive(Clone, Debug)]
pub struct FaultLog {
    faults: VecDeque<Fault>,
    cap: usize,
}

impl FaultLog {
    /// Creates an empty log retaining at most `cap` faults.  `cap` must be
    /// at least 1.
    pub fn new(cap: usize) -> Self {
        Self {
            faults: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Appends a fault, evicting the oldest one if the log is full.
    pub fn push(&mut self, fault: Fault) {
        if self.faults.len() == self.cap {
            self.faults.pop_front();
        }
        self.faults.push_back(fault);
    }

    /// Returns true if any retained fault has error severity.
    pub fn has_error(&self) -> bool {
        self.faults.iter().any(|f| f.severity == FaultSeverity::Error)
    }

    /// Returns true if any retained fault has warning severity.
    pub fn has_warning(&self) -> bool {
        self.faults
            .iter()
            .any(|f| f.severity == FaultSeverity::Warning)
    }

    /// Returns an iterator over the retained faults, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Fault> {
        self.faults.iter()
    }

    pub fn len(&self) -> usize {
        self.faults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Receives critical-fault notifications from the sampling loop.
///
/// The monitor calls this once per recorded error-severity fault, naming
/// the affected edge.  Implementations forward the notification to whatever
/// user-visible channel the embedding application has.
pub trait FaultNotifier {
    fn critical_fault(&mut self, edge_id: &str, fault: &Fault);
}

/// A [`FaultNotifier`] that reports critical faults through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl FaultNotifier for TracingNotifier {
    fn critical_fault(&mut self, edge_id: &str, fault: &Fault) {
        tracing::error!("Edge {} has reported critical faults: {}", edge_id, fault.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_high_flow_raises_warning() {
        let faults = evaluate_sample(900.0, 800.0, 200.0);
        assert_eq!(faults, vec![Fault::warning("High energy flow detected")]);
    }

    #[test]
    fn test_low_flow_raises_error() {
        let faults = evaluate_sample(150.0, 800.0, 200.0);
        assert_eq!(faults, vec![Fault::error("Critical: Low energy flow")]);
    }

    #[test]
    fn test_nominal_flow_raises_nothing() {
        assert!(evaluate_sample(500.0, 800.0, 200.0).is_empty());
        // Threshold values themselves are not violations.
        assert!(evaluate_sample(800.0, 800.0, 200.0).is_empty());
        assert!(evaluate_sample(200.0, 800.0, 200.0).is_empty());
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        for value in [0.0, 150.0, 200.0, 500.0, 800.0, 900.0] {
            let first = evaluate_sample(value, 800.0, 200.0);
            let second = evaluate_sample(value, 800.0, 200.0);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_log_eviction() {
        let mut log = FaultLog::new(3);
        log.push(Fault::error("a"));
        log.push(Fault::warning("b"));
        log.push(Fault::warning("c"));
        log.push(Fault::warning("d"));

        assert_eq!(log.len(), 3);
        // The only error was evicted first.
        assert!(!log.has_error());
        assert!(log.has_warning());
        assert_eq!(log.iter().next().unwrap().message, "b");
    }

    #[test]
    fn test_log_severity_queries() {
        let mut log = FaultLog::new(10);
        assert!(!log.has_error());
        assert!(!log.has_warning());

        log.push(Fault::warning("w"));
        assert!(log.has_warning());
        assert!(!log.has_error());

        log.push(Fault::error("e"));
        assert!(log.has_error());
    }

    proptest! {
        #[test]
        fn rules_never_both_fire_with_default_thresholds(current_kw in 0.0..10_000.0f64) {
            let faults = evaluate_sample(current_kw, 800.0, 200.0);
            prop_assert!(faults.len() <= 1);
        }

        #[test]
        fn both_rules_fire_when_thresholds_overlap(current_kw in 300.0..400.0f64) {
            // With an inverted threshold pair each rule still fires on its
            // own, which is what keeps them independent checks.
            let faults = evaluate_sample(current_kw, 250.0, 450.0);
            prop_assert_eq!(faults.len(), 2);
            prop_assert_eq!(faults[0].severity, FaultSeverity::Warning);
            prop_assert_eq!(faults[1].severity, FaultSeverity::Error);
        }
    }
}
