// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for creating [`FlowGraph`] instances from given nodes and edges.

use petgraph::graph::DiGraph;
use std::collections::HashSet;

use crate::{Error, FlowEdge, FlowNode};

use super::{EdgeMap, FlowGraph, NodeIndexMap};

/// `FlowGraph` instantiation.
impl FlowGraph {
    /// Creates a new [`FlowGraph`] from the given nodes and edges.
    ///
    /// Returns an error if node or edge ids are duplicated, if an edge
    /// connects a node to itself, or if an edge endpoint does not name an
    /// existing node.
    pub fn try_new(
        nodes: impl IntoIterator<Item = FlowNode>,
        edges: impl IntoIterator<Item = FlowEdge>,
    ) -> Result<Self, Error> {
        let (graph, indices) = Self::create_nodes(nodes)?;

        let mut fg = Self {
            graph,
            node_indices: indices,
            edges: EdgeMap::new(),
        };
        fg.add_edges(edges)?;

        Ok(fg)
    }

    /// Assembles a graph from nodes and edges that are valid by
    /// construction.  Only the deterministic layout builders use this;
    /// callers must guarantee unique ids and existing endpoints.
    pub(crate) fn assemble(nodes: Vec<FlowNode>, edges: Vec<FlowEdge>) -> Self {
        match Self::try_new(nodes, edges) {
            Ok(fg) => fg,
            // Layout builders only emit valid topologies.
            Err(err) => panic!("layout builder produced an invalid graph: {}", err),
        }
    }

    fn create_nodes(
        nodes: impl IntoIterator<Item = FlowNode>,
    ) -> Result<(DiGraph<FlowNode, ()>, NodeIndexMap), Error> {
        let mut graph = DiGraph::new();
        let mut indices = NodeIndexMap::new();

        for node in nodes {
            if indices.contains_key(&node.id) {
                return Err(Error::invalid_graph(format!(
                    "Duplicate node ID found: {}",
                    node.id
                )));
            }

            let id = node.id.clone();
            let idx = graph.add_node(node);
            indices.insert(id, idx);
        }

        Ok((graph, indices))
    }

    fn add_edges(&mut self, edges: impl IntoIterator<Item = FlowEdge>) -> Result<(), Error> {
        let mut seen_ids = HashSet::new();

        for edge in edges {
            if edge.source == edge.target {
                return Err(Error::invalid_connection(format!(
                    "Edge:{} Can't connect a node to itself.",
                    edge.id
                )));
            }
            for endpoint in [&edge.source, &edge.target] {
                if !self.node_indices.contains_key(endpoint) {
                    return Err(Error::invalid_connection(format!(
                        "Edge:{} Can't find a node with ID {}",
                        edge.id, endpoint
                    )));
                }
            }
            if !seen_ids.insert(edge.id.clone()) {
                return Err(Error::invalid_graph(format!(
                    "Duplicate edge ID found: {}",
                    edge.id
                )));
            }

            let source_idx = self.node_indices[&edge.source];
            let target_idx = self.node_indices[&edge.target];
            self.edges.insert((source_idx, target_idx), edge);
            self.graph.update_edge(source_idx, target_idx, ());
        }

        Ok(())
    }

    /// Replaces the display specs of the node with the given id.
    ///
    /// Returns an error if the node does not exist.  This is the only
    /// mutation a graph supports after construction; topology changes
    /// require a full rebuild.
    pub fn update_specs(
        &mut self,
        node_id: &str,
        specs: serde_json::Value,
    ) -> Result<(), Error> {
        let idx = self.node_indices.get(node_id).ok_or_else(|| {
            Error::node_not_found(format!("Node with id {} not found.", node_id))
        })?;
        self.graph[*idx].specs = specs;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeKind, Position};

    fn nodes_and_edges() -> (Vec<FlowNode>, Vec<FlowEdge>) {
        let nodes = vec![
            FlowNode::new("source-1", NodeKind::Source, Position::new(50.0, 50.0)),
            FlowNode::new("storage", NodeKind::Storage, Position::new(300.0, 100.0)),
            FlowNode::new("grid", NodeKind::Grid, Position::new(800.0, 200.0)),
        ];
        let edges = vec![
            FlowEdge::new("source-1-to-storage", "source-1", "storage"),
            FlowEdge::new("storage-to-grid", "storage", "grid"),
        ];

        (nodes, edges)
    }

    #[test]
    fn test_node_validation() {
        let (mut nodes, edges) = nodes_and_edges();

        assert!(FlowGraph::try_new(nodes.clone(), edges.clone()).is_ok());

        nodes.push(FlowNode::new(
            "storage",
            NodeKind::Bess,
            Position::new(0.0, 0.0),
        ));
        assert!(FlowGraph::try_new(nodes.clone(), edges.clone())
            .is_err_and(|e| e == Error::invalid_graph("Duplicate node ID found: storage")));
    }

    #[test]
    fn test_edge_validation() {
        let (nodes, mut edges) = nodes_and_edges();

        edges.push(FlowEdge::new("loop", "grid", "grid"));
        assert!(FlowGraph::try_new(nodes.clone(), edges.clone()).is_err_and(
            |e| e == Error::invalid_connection("Edge:loop Can't connect a node to itself.")
        ));

        edges.pop();
        edges.push(FlowEdge::new("dangling", "storage", "meter-9"));
        assert!(FlowGraph::try_new(nodes.clone(), edges.clone()).is_err_and(
            |e| e == Error::invalid_connection("Edge:dangling Can't find a node with ID meter-9")
        ));

        edges.pop();
        edges.push(FlowEdge::new("storage-to-grid", "grid", "storage"));
        assert!(FlowGraph::try_new(nodes.clone(), edges.clone())
            .is_err_and(|e| e == Error::invalid_graph("Duplicate edge ID found: storage-to-grid")));

        edges.pop();
        assert!(FlowGraph::try_new(nodes, edges).is_ok());
    }

    #[test]
    fn test_update_specs() {
        let (nodes, edges) = nodes_and_edges();
        let mut graph = FlowGraph::try_new(nodes, edges).unwrap();

        let specs = serde_json::json!({ "capacity": 500, "currentCharge": 350 });
        graph.update_specs("storage", specs.clone()).unwrap();
        assert_eq!(graph.node("storage").unwrap().specs, specs);

        assert!(graph
            .update_specs("meter-9", serde_json::Value::Null)
            .is_err_and(|e| e == Error::node_not_found("Node with id meter-9 not found.")));
    }
}
