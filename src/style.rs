// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Resolution of render-ready edge styles from the current telemetry.

use serde::Serialize;

use crate::graph::FlowEdge;
use crate::state::GraphState;

/// Flows above this value are classified as high tier.
pub const HIGH_FLOW_KW: f64 = 500.0;
/// Flows above this value (and not high) are classified as medium tier.
pub const MEDIUM_FLOW_KW: f64 = 200.0;

/// Base color of high-tier edges.
pub const HIGH_FLOW_COLOR: &str = "#22c55e";
/// Base color of medium-tier edges.
pub const MEDIUM_FLOW_COLOR: &str = "#eab308";
/// Base color of low-tier edges, also used for error-fault overrides.
pub const LOW_FLOW_COLOR: &str = "#ef4444";
/// Override color of edges with warning faults.
pub const WARNING_COLOR: &str = "#f59e0b";

/// Opacity of every rendered edge line.
pub const EDGE_OPACITY: f64 = 0.8;

/// Flow-magnitude classification of an edge, used to pick its base display
/// color and stroke width.
///
/// Tiers are evaluated in priority order high → medium → low; a high flow
/// also satisfies the medium threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowTier {
    High,
    Medium,
    Low,
}

impl FlowTier {
    /// Classifies an instantaneous flow reading.
    pub fn classify(current_kw: f64) -> Self {
        if current_kw > HIGH_FLOW_KW {
            FlowTier::High
        } else if current_kw > MEDIUM_FLOW_KW {
            FlowTier::Medium
        } else {
            FlowTier::Low
        }
    }

    /// The base color of edges in this tier.
    pub fn color(&self) -> &'static str {
        match self {
            FlowTier::High => HIGH_FLOW_COLOR,
            FlowTier::Medium => MEDIUM_FLOW_COLOR,
            FlowTier::Low => LOW_FLOW_COLOR,
        }
    }

    /// The stroke width of edges in this tier.
    pub fn stroke_width(&self) -> u32 {
        match self {
            FlowTier::High => 3,
            FlowTier::Medium => 2,
            FlowTier::Low => 1,
        }
    }
}

/// The render-ready projection of an edge and its latest telemetry.
///
/// Recomputed every sampling tick and handed to the rendering layer; never
/// persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StyledEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub color: &'static str,
    pub stroke_width: u32,
    pub opacity: f64,
    pub label: String,
    /// The flow entering the edge, in kW.
    pub current_kw: f64,
    /// The flow leaving the edge after efficiency losses, in kW.
    pub output_kw: f64,
    pub efficiency_pct: f64,
}

/// Derives the styled-edge list for the given edges from the current
/// telemetry state.
///
/// The output mirrors the input edge order one-to-one.  Edges without
/// recorded telemetry default to a flow of 0 kW, no faults and the given
/// fallback efficiency, so one unsampled edge never blocks styling of the
/// rest.  The resolution itself is deterministic: identical inputs produce
/// identical output.
pub fn resolve_styles<'a>(
    edges: impl IntoIterator<Item = &'a FlowEdge>,
    state: &GraphState,
    fallback_efficiency_pct: f64,
) -> Vec<StyledEdge> {
    edges
        .into_iter()
        .map(|edge| {
            let current_kw = state
                .latest_sample(&edge.id)
                .map(|s| s.current_kw)
                .unwrap_or(0.0);
            let efficiency_pct = state
                .metric(&edge.id)
                .map(|m| m.efficiency_pct)
                .unwrap_or(fallback_efficiency_pct);
            let output_kw = current_kw * efficiency_pct / 100.0;

            let tier = FlowTier::classify(current_kw);
            let log = state.fault_log(&edge.id);
            let color = if log.is_some_and(|log| log.has_error()) {
                LOW_FLOW_COLOR
            } else if log.is_some_and(|log| log.has_warning()) {
                WARNING_COLOR
            } else {
                tier.color()
            };

            StyledEdge {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                color,
                stroke_width: tier.stroke_width(),
                opacity: EDGE_OPACITY,
                label: format!("{:.1} kW ({:.1}%)", current_kw, efficiency_pct),
                current_kw,
                output_kw,
                efficiency_pct,
            }
        })
        .collect()
}
