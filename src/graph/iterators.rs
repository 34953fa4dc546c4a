// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Iterators over nodes and edges in a `FlowGraph`.

use petgraph::graph::DiGraph;

use crate::{FlowEdge, FlowGraph, FlowNode};

/// An iterator over the nodes in a `FlowGraph`.
pub struct Nodes<'a> {
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Node<FlowNode>>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a FlowNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|n| &n.weight)
    }
}

/// An iterator over the edges in a `FlowGraph`, in insertion order.
pub struct Edges<'a> {
    pub(crate) fg: &'a FlowGraph,
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Edge<()>>,
}

impl<'a> Iterator for Edges<'a> {
    type Item = &'a FlowEdge;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter
            .next()
            .and_then(|e| self.fg.edges.get(&(e.source(), e.target())))
    }
}

/// An iterator over the neighbors of a node in a `FlowGraph`.
pub struct Neighbors<'a> {
    pub(crate) graph: &'a DiGraph<FlowNode, ()>,
    pub(crate) iter: petgraph::graph::Neighbors<'a, ()>,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = &'a FlowNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|i| &self.graph[i])
    }
}
