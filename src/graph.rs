// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A graph representation of the energy flow paths of a site, and the
//! telemetry-carrying edges between them.

mod creation;
mod layout;
mod retrieval;

pub mod iterators;

use crate::NodeKind;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `FlowNode`s stored in a `DiGraph` instance can be addressed with
/// `NodeIndex`es.
///
/// `NodeIndexMap` stores the corresponding `NodeIndex` for any node id, so
/// that nodes in the `DiGraph` can be retrieved from their ids.
pub(crate) type NodeIndexMap = HashMap<String, NodeIndex>;

/// `FlowEdge`s are not stored in the `DiGraph` instance, so we need to store
/// them separately.
///
/// `EdgeMap` can be used to lookup the `FlowEdge` for any pair of source and
/// destination `NodeIndex` values.
pub(crate) type EdgeMap = HashMap<(NodeIndex, NodeIndex), FlowEdge>;

/// A 2D layout coordinate.  Layout-only, it has no physical meaning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in the energy flow graph.
///
/// Nodes are created once per graph instantiation and are immutable
/// afterwards, except for `specs`, which the embedding application may
/// refresh through [`FlowGraph::update_specs`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    /// Unique id of the node within its graph.
    pub id: String,
    /// The kind of the node.
    pub kind: NodeKind,
    /// Where the rendering layer places the node.
    pub position: Position,
    /// Kind-dependent display attributes (capacity, output, charge, …).
    /// Opaque to this library; passed through to the rendering layer.
    #[serde(default)]
    pub specs: serde_json::Value,
}

impl FlowNode {
    /// Creates a node without display specs.
    pub fn new(id: impl Into<String>, kind: NodeKind, position: Position) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            specs: serde_json::Value::Null,
        }
    }

    /// Attaches display specs to the node.
    pub fn with_specs(mut self, specs: serde_json::Value) -> Self {
        self.specs = specs;
        self
    }
}

/// A directed connection between two nodes, representing a possible energy
/// transfer path.
///
/// The id is stable for the lifetime of the graph and keys all per-edge
/// telemetry state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    /// Id of the node the energy flows out of.
    pub source: String,
    /// Id of the node the energy flows into.
    pub target: String,
}

impl FlowEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A graph representation of the energy flow paths of a site.
///
/// Instances come from one of the deterministic layout builders
/// ([`site_overview`][FlowGraph::site_overview],
/// [`plant_overview`][FlowGraph::plant_overview],
/// [`panel_detail`][FlowGraph::panel_detail]) or from
/// [`try_new`][FlowGraph::try_new] for externally assembled topologies.
pub struct FlowGraph {
    graph: DiGraph<FlowNode, ()>,
    node_indices: NodeIndexMap,
    edges: EdgeMap,
}
