// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving nodes and edges from a [`FlowGraph`].

use crate::iterators::{Edges, Neighbors, Nodes};
use crate::{Error, FlowEdge, FlowGraph, FlowNode};

/// Node and edge retrieval.
impl FlowGraph {
    /// Returns the node with the given id, if it exists.
    pub fn node(&self, node_id: &str) -> Result<&FlowNode, Error> {
        self.node_indices
            .get(node_id)
            .map(|i| &self.graph[*i])
            .ok_or_else(|| Error::node_not_found(format!("Node with id {} not found.", node_id)))
    }

    /// Returns the edge with the given id, if it exists.
    pub fn edge(&self, edge_id: &str) -> Result<&FlowEdge, Error> {
        self.edges
            .values()
            .find(|e| e.id == edge_id)
            .ok_or_else(|| Error::edge_not_found(format!("Edge with id {} not found.", edge_id)))
    }

    /// Returns true if an edge with the given id exists.
    pub fn contains_edge(&self, edge_id: &str) -> bool {
        self.edges.values().any(|e| e.id == edge_id)
    }

    /// Returns an iterator over the nodes in the graph, in insertion order.
    pub fn nodes(&self) -> Nodes {
        Nodes {
            iter: self.graph.raw_nodes().iter(),
        }
    }

    /// Returns an iterator over the edges in the graph, in insertion order.
    ///
    /// This order is the canonical one: the styled-edge list mirrors it
    /// one-to-one.
    pub fn edges(&self) -> Edges {
        Edges {
            fg: self,
            iter: self.graph.raw_edges().iter(),
        }
    }

    /// Returns an iterator over the *predecessors* of the node with the
    /// given id.
    ///
    /// Returns an error if the given id does not exist.
    pub fn predecessors(&self, node_id: &str) -> Result<Neighbors, Error> {
        self.node_indices
            .get(node_id)
            .map(|&index| Neighbors {
                graph: &self.graph,
                iter: self
                    .graph
                    .neighbors_directed(index, petgraph::Direction::Incoming),
            })
            .ok_or_else(|| Error::node_not_found(format!("Node with id {} not found.", node_id)))
    }

    /// Returns an iterator over the *successors* of the node with the given
    /// id.
    ///
    /// Returns an error if the given id does not exist.
    pub fn successors(&self, node_id: &str) -> Result<Neighbors, Error> {
        self.node_indices
            .get(node_id)
            .map(|&index| Neighbors {
                graph: &self.graph,
                iter: self
                    .graph
                    .neighbors_directed(index, petgraph::Direction::Outgoing),
            })
            .ok_or_else(|| Error::node_not_found(format!("Node with id {} not found.", node_id)))
    }
}
