// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Frequenz Energy Flow Monitor

This is a library for representing the energy flow paths of a site as a
directed graph and deriving render-ready edge styles from live flow
telemetry.

The graph side is deliberately static: a [`FlowGraph`] is built once by
one of the deterministic layout builders
([`site_overview`][FlowGraph::site_overview],
[`plant_overview`][FlowGraph::plant_overview],
[`panel_detail`][FlowGraph::panel_detail]) or assembled from externally
provided nodes and edges with [`try_new`][FlowGraph::try_new], and only
replaced wholesale.  Edge ids are stable for the lifetime of the graph and
key all telemetry state.

## The sampling pipeline

A [`Monitor`] owns the graph and a [`GraphState`] store.  Each
[`tick`][Monitor::tick] draws a [`FlowSample`] per edge, appends it to a
bounded history, evaluates the fault threshold rules, re-estimates the
transfer efficiency, and resolves one [`StyledEdge`] per edge for the
rendering layer.  Every derivation stage defaults missing inputs, so a
single unsampled edge never blocks styling of the rest of the graph.

The sampling RNG is injected (any [`rand::Rng`]), which makes the whole
pipeline reproducible in tests with a seeded generator.

## Driving the loop

[`MonitorRunner`] runs the tick on a background thread at a fixed interval
(5 s by default), publishing each new styled-edge list to a callback.  The
loop only advances while the monitor is [live][Monitor::is_live]: the
realtime range is selected and the monitor is not paused.  Stopping the
runner is unconditional and idempotent, and dropping it stops it.

## Fault notifications

Error-severity faults are surfaced through the [`FaultNotifier`] trait as
user-visible notifications naming the affected edge; the default
[`TracingNotifier`] reports them through `tracing`.  Faults never abort the
pipeline.
*/

mod config;
pub use config::MonitorConfig;

mod node_kind;
pub use node_kind::{ConsumerKind, NodeKind};

mod graph;
pub use graph::{iterators, FlowEdge, FlowGraph, FlowNode, Position};

mod flow;
pub use flow::{FlowSample, SampleHistory};

mod fault;
pub use fault::{evaluate_sample, Fault, FaultLog, FaultNotifier, FaultSeverity, TracingNotifier};

mod efficiency;
pub use efficiency::{estimate_efficiency, EfficiencyMetric, Loss, LossKind};

mod style;
pub use style::{resolve_styles, FlowTier, StyledEdge};

mod state;
pub use state::{EdgeDetail, GraphState};

mod monitor;
pub use monitor::{Monitor, TimeRange};

mod runner;
pub use runner::MonitorRunner;

mod error;
pub use error::Error;
