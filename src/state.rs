// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The owned per-edge telemetry store.
//!
//! All sampling state lives in one [`GraphState`] value owned by the
//! monitor, keyed by edge id.  Readers get borrows or snapshots; there is
//! no shared mutable state outside the owner.

use serde::Serialize;
use std::collections::HashMap;

use crate::efficiency::EfficiencyMetric;
use crate::fault::{Fault, FaultLog};
use crate::flow::{FlowSample, SampleHistory};

/// Per-edge sample histories, fault logs and efficiency metrics.
#[derive(Clone, Debug)]
pub struct GraphState {
    histories: HashMap<String, SampleHistory>,
    faults: HashMap<String, FaultLog>,
    metrics: HashMap<String, EfficiencyMetric>,
    history_cap: usize,
    fault_log_cap: usize,
}

impl GraphState {
    /// Creates an empty store with the given per-edge retention caps.
    pub fn new(history_cap: usize, fault_log_cap: usize) -> Self {
        Self {
            histories: HashMap::new(),
            faults: HashMap::new(),
            metrics: HashMap::new(),
            history_cap,
            fault_log_cap,
        }
    }

    /// Appends a sample to the history of the given edge.
    pub fn record_sample(&mut self, edge_id: &str, sample: FlowSample) {
        self.histories
            .entry(edge_id.to_owned())
            .or_insert_with(|| SampleHistory::new(self.history_cap))
            .push(sample);
    }

    /// Appends a fault to the log of the given edge.
    pub fn record_fault(&mut self, edge_id: &str, fault: Fault) {
        self.faults
            .entry(edge_id.to_owned())
            .or_insert_with(|| FaultLog::new(self.fault_log_cap))
            .push(fault);
    }

    /// Replaces the efficiency metric of the given edge.  No metric history
    /// is retained.
    pub fn set_metric(&mut self, edge_id: &str, metric: EfficiencyMetric) {
        self.metrics.insert(edge_id.to_owned(), metric);
    }

    /// Returns the sample history of the given edge, if any samples were
    /// recorded.
    pub fn history(&self, edge_id: &str) -> Option<&SampleHistory> {
        self.histories.get(edge_id)
    }

    /// Returns the most recent sample of the given edge, if any.
    pub fn latest_sample(&self, edge_id: &str) -> Option<&FlowSample> {
        self.histories.get(edge_id).and_then(|h| h.latest())
    }

    /// Returns the fault log of the given edge, if any faults were
    /// recorded.
    pub fn fault_log(&self, edge_id: &str) -> Option<&FaultLog> {
        self.faults.get(edge_id)
    }

    /// Returns the efficiency metric of the given edge, if one was
    /// recorded.
    pub fn metric(&self, edge_id: &str) -> Option<&EfficiencyMetric> {
        self.metrics.get(edge_id)
    }

    /// Drops the state of every edge for which `keep` returns false.  Used
    /// on graph rebuilds to prune state keyed by edges that no longer
    /// exist.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.histories.retain(|id, _| keep(id));
        self.faults.retain(|id, _| keep(id));
        self.metrics.retain(|id, _| keep(id));
    }

    /// Builds the detail snapshot for one edge, defaulting the metric to
    /// `fallback_efficiency_pct` when none was recorded yet.
    pub fn detail(&self, edge_id: &str, fallback_efficiency_pct: f64) -> EdgeDetail {
        EdgeDetail {
            edge_id: edge_id.to_owned(),
            latest: self.latest_sample(edge_id).cloned(),
            history: self
                .history(edge_id)
                .map(|h| h.iter().cloned().collect())
                .unwrap_or_default(),
            faults: self
                .fault_log(edge_id)
                .map(|log| log.iter().cloned().collect())
                .unwrap_or_default(),
            metric: self
                .metric(edge_id)
                .cloned()
                .unwrap_or_else(|| EfficiencyMetric::fallback(fallback_efficiency_pct)),
        }
    }
}

/// A point-in-time snapshot of one edge's telemetry, backing the edge
/// detail dialog.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeDetail {
    pub edge_id: String,
    pub latest: Option<FlowSample>,
    /// Retained samples, oldest first.
    pub history: Vec<FlowSample>,
    /// Retained faults, oldest first.
    pub faults: Vec<Fault>,
    pub metric: EfficiencyMetric,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn ts() -> DateTime<Utc> {
        "2024-06-01T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_record_and_read_back() {
        let mut state = GraphState::new(50, 50);

        state.record_sample("a-to-b", FlowSample::at(300.0, ts()));
        state.record_sample("a-to-b", FlowSample::at(400.0, ts()));
        state.record_fault("a-to-b", Fault::warning("High energy flow detected"));
        state.set_metric("a-to-b", EfficiencyMetric::fallback(90.0));

        assert_eq!(state.latest_sample("a-to-b").unwrap().current_kw, 400.0);
        assert_eq!(state.history("a-to-b").unwrap().len(), 2);
        assert!(state.fault_log("a-to-b").unwrap().has_warning());
        assert_eq!(state.metric("a-to-b").unwrap().efficiency_pct, 90.0);

        assert!(state.latest_sample("b-to-c").is_none());
        assert!(state.fault_log("b-to-c").is_none());
        assert!(state.metric("b-to-c").is_none());
    }

    #[test]
    fn test_history_cap_applies_per_edge() {
        let mut state = GraphState::new(3, 3);

        for i in 0..5 {
            state.record_sample("a-to-b", FlowSample::at(i as f64, ts()));
        }
        state.record_sample("b-to-c", FlowSample::at(99.0, ts()));

        assert_eq!(state.history("a-to-b").unwrap().len(), 3);
        assert_eq!(state.latest_sample("a-to-b").unwrap().current_kw, 4.0);
        assert_eq!(state.history("b-to-c").unwrap().len(), 1);
    }

    #[test]
    fn test_retain_prunes_dropped_edges() {
        let mut state = GraphState::new(50, 50);
        state.record_sample("keep", FlowSample::at(1.0, ts()));
        state.record_sample("drop", FlowSample::at(2.0, ts()));
        state.record_fault("drop", Fault::error("Critical: Low energy flow"));
        state.set_metric("drop", EfficiencyMetric::fallback(95.0));

        state.retain(|id| id == "keep");

        assert!(state.history("keep").is_some());
        assert!(state.history("drop").is_none());
        assert!(state.fault_log("drop").is_none());
        assert!(state.metric("drop").is_none());
    }

    #[test]
    fn test_detail_defaults_for_unknown_edge() {
        let state = GraphState::new(50, 50);
        let detail = state.detail("missing", 95.0);

        assert_eq!(detail.edge_id, "missing");
        assert_eq!(detail.latest, None);
        assert!(detail.history.is_empty());
        assert!(detail.faults.is_empty());
        assert_eq!(detail.metric, EfficiencyMetric::fallback(95.0));
    }
}
