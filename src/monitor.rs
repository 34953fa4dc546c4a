// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The sampling loop core: owns the graph and all derived telemetry.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::MonitorConfig;
use crate::efficiency::{self, EfficiencyMetric};
use crate::fault::{self, FaultNotifier, FaultSeverity, TracingNotifier};
use crate::flow::FlowSample;
use crate::graph::{FlowGraph, FlowNode};
use crate::state::{EdgeDetail, GraphState};
use crate::style::{self, StyledEdge};
use crate::Error;

/// The time-range selection of the dashboard.  Only
/// [`Realtime`][TimeRange::Realtime] drives the sampling loop; the other
/// ranges are served from recorded data by the embedding application.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "realtime")]
    Realtime,
    #[serde(rename = "15min")]
    Min15,
    #[serde(rename = "1hour")]
    Hour1,
    #[serde(rename = "24hours")]
    Hours24,
    #[serde(rename = "custom")]
    Custom,
}

/// Samples every edge of a [`FlowGraph`] and derives the render-ready
/// styled edges.
///
/// The monitor is the single owner of all per-edge telemetry state.  The
/// sampling RNG is injected so that tests can drive the whole pipeline
/// with a seeded or scripted generator.
pub struct Monitor<R: Rng, N: FaultNotifier = TracingNotifier> {
    graph: FlowGraph,
    state: GraphState,
    config: MonitorConfig,
    rng: R,
    notifier: N,
    time_range: TimeRange,
    paused: bool,
}

impl<R: Rng> Monitor<R, TracingNotifier> {
    /// Creates a monitor reporting critical faults through `tracing`.
    pub fn new(graph: FlowGraph, config: MonitorConfig, rng: R) -> Self {
        Self::with_notifier(graph, config, rng, TracingNotifier)
    }
}

impl<R: Rng, N: FaultNotifier> Monitor<R, N> {
    /// Creates a monitor with a custom critical-fault notifier.
    pub fn with_notifier(graph: FlowGraph, config: MonitorConfig, rng: R, notifier: N) -> Self {
        let state = GraphState::new(config.history_cap, config.fault_log_cap);
        Self {
            graph,
            state,
            config,
            rng,
            notifier,
            time_range: TimeRange::Realtime,
            paused: false,
        }
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn state(&self) -> &GraphState {
        &self.state
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    /// Selects the active time range.  Leaving `Realtime` stops sampling
    /// but keeps the accumulated histories.
    pub fn set_time_range(&mut self, time_range: TimeRange) {
        self.time_range = time_range;
    }

    /// Suspends sampling without clearing any state.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes sampling after [`pause`][Monitor::pause].
    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns true while the sampling loop should advance: the realtime
    /// range is selected and the monitor is not paused.
    pub fn is_live(&self) -> bool {
        self.time_range == TimeRange::Realtime && !self.paused
    }

    /// Replaces the graph, pruning telemetry of edges that no longer
    /// exist.  Topology changes always go through a full rebuild.
    pub fn set_graph(&mut self, graph: FlowGraph) {
        self.graph = graph;
        let graph = &self.graph;
        self.state.retain(|edge_id| graph.contains_edge(edge_id));
    }

    /// Advances the pipeline by one sampling tick.
    ///
    /// For every edge: draw a sample, append it to the bounded history,
    /// evaluate the fault rules (notifying on error-severity faults) and
    /// re-estimate the efficiency.  Returns the freshly resolved
    /// styled-edge list, one entry per edge in edge order.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<StyledEdge> {
        let edge_ids: Vec<String> = self.graph.edges().map(|e| e.id.clone()).collect();
        tracing::debug!("Sampling {} edges.", edge_ids.len());

        for edge_id in &edge_ids {
            let sample = FlowSample::generate(&mut self.rng, self.config.max_sample_kw, now);
            let faults = fault::evaluate_sample(
                sample.current_kw,
                self.config.warning_above_kw,
                self.config.error_below_kw,
            );
            self.state.record_sample(edge_id, sample);

            for fault in faults {
                if fault.severity == FaultSeverity::Error {
                    self.notifier.critical_fault(edge_id, &fault);
                }
                self.state.record_fault(edge_id, fault);
            }

            let metric = self.estimate_metric(edge_id);
            self.state.set_metric(edge_id, metric);
        }

        self.styled_edges()
    }

    fn estimate_metric(&mut self, edge_id: &str) -> EfficiencyMetric {
        match self.state.history(edge_id) {
            Some(history) => efficiency::estimate_efficiency(
                &mut self.rng,
                history,
                self.config.fallback_efficiency_pct,
            ),
            None => EfficiencyMetric::fallback(self.config.fallback_efficiency_pct),
        }
    }

    /// Resolves the styled-edge list from the current state without
    /// sampling.
    pub fn styled_edges(&self) -> Vec<StyledEdge> {
        style::resolve_styles(
            self.graph.edges(),
            &self.state,
            self.config.fallback_efficiency_pct,
        )
    }

    /// Returns the telemetry snapshot backing the edge detail dialog.
    ///
    /// Edges that exist but were never sampled yield the defaulted
    /// snapshot; an unknown edge id is an error.
    pub fn edge_detail(&self, edge_id: &str) -> Result<EdgeDetail, Error> {
        self.graph.edge(edge_id)?;
        Ok(self
            .state
            .detail(edge_id, self.config.fallback_efficiency_pct))
    }

    /// Returns the node backing the node detail dialog.
    pub fn node_detail(&self, node_id: &str) -> Result<&FlowNode, Error> {
        self.graph.node(node_id)
    }
}
