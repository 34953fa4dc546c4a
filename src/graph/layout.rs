// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Deterministic layout builders for the graphs the dashboard renders.
//!
//! Each builder produces the same node ids and positions on every call with
//! the same input, so edge ids stay valid as sampling-history keys for the
//! lifetime of the graph.

use serde_json::json;

use crate::{ConsumerKind, FlowEdge, FlowNode, NodeKind, Position};

use super::FlowGraph;

/// The consumer categories of the site overview, in display order.
const CONSUMERS: [(&str, ConsumerKind, f64); 3] = [
    ("residential", ConsumerKind::Residential, 50.0),
    ("industrial", ConsumerKind::Industrial, 200.0),
    ("commercial", ConsumerKind::Commercial, 350.0),
];

/// Deterministic layout builders.
impl FlowGraph {
    /// Builds the site overview graph for a site with `source_count` energy
    /// sources.
    ///
    /// Sources feed the storage node, storage feeds every consumer
    /// category, and every consumer is backed by the grid node.  A
    /// `source_count` of zero yields the fixed storage/consumer/grid
    /// skeleton with no sources.
    pub fn site_overview(source_count: usize) -> Self {
        let mut nodes = Vec::with_capacity(source_count + 5);
        let mut edges = Vec::with_capacity(source_count + 6);

        for i in 1..=source_count {
            let id = format!("source-{i}");
            nodes.push(FlowNode::new(
                id.clone(),
                NodeKind::Source,
                Position::new(50.0, 50.0 + 120.0 * (i - 1) as f64),
            ));
            edges.push(FlowEdge::new(format!("{id}-to-storage"), id, "storage"));
        }

        nodes.push(FlowNode::new(
            "storage",
            NodeKind::Storage,
            Position::new(300.0, 100.0),
        ));
        for (id, kind, y) in CONSUMERS {
            nodes.push(FlowNode::new(
                id,
                NodeKind::Consumer(kind),
                Position::new(550.0, y),
            ));
        }
        nodes.push(FlowNode::new(
            "grid",
            NodeKind::Grid,
            Position::new(800.0, 200.0),
        ));

        for (id, _, _) in CONSUMERS {
            edges.push(FlowEdge::new(format!("storage-to-{id}"), "storage", id));
        }
        for (id, _, _) in CONSUMERS {
            edges.push(FlowEdge::new(format!("{id}-to-grid"), id, "grid"));
        }

        Self::assemble(nodes, edges)
    }

    /// Builds the fixed plant overview graph: solar and wind feeding an
    /// inverter/transformer conversion chain into two battery storage
    /// systems, which serve the grid and the consumer areas.
    pub fn plant_overview() -> Self {
        let nodes = vec![
            FlowNode::new("source-solar", NodeKind::Source, Position::new(0.0, 0.0))
                .with_specs(json!({ "capacity": 500, "power": 350, "efficiency": 98 })),
            FlowNode::new("source-wind", NodeKind::Source, Position::new(0.0, 150.0))
                .with_specs(json!({ "capacity": 300, "power": 250, "efficiency": 95 })),
            FlowNode::new("inverter-1", NodeKind::Inverter, Position::new(400.0, 75.0))
                .with_specs(json!({ "inputPower": 600, "outputPower": 580, "efficiency": 96.7 })),
            FlowNode::new(
                "transformer-1",
                NodeKind::Transformer,
                Position::new(600.0, 75.0),
            )
            .with_specs(json!({ "inputPower": 720, "outputPower": 230, "efficiency": 98 })),
            FlowNode::new("grid-1", NodeKind::Grid, Position::new(400.0, 300.0))
                .with_specs(json!({ "inputPower": 200, "outputPower": 150 })),
            FlowNode::new("bess-1", NodeKind::Bess, Position::new(800.0, 0.0)).with_specs(json!({
                "maxCapacity": 1000,
                "currentCharge": 750,
                "stateOfCharge": 75,
                "chargingPower": 250,
            })),
            FlowNode::new("bess-2", NodeKind::Bess, Position::new(800.0, 150.0)).with_specs(
                json!({
                    "maxCapacity": 1000,
                    "currentCharge": 850,
                    "stateOfCharge": 85,
                    "chargingPower": 250,
                }),
            ),
            FlowNode::new(
                "consumer-residential",
                NodeKind::Consumer(ConsumerKind::Residential),
                Position::new(1200.0, 0.0),
            )
            .with_specs(json!({ "consumption": 150, "connectedLoad": 200, "peakDemand": 180 })),
            FlowNode::new(
                "consumer-industrial",
                NodeKind::Consumer(ConsumerKind::Industrial),
                Position::new(1200.0, 150.0),
            )
            .with_specs(json!({ "consumption": 450, "connectedLoad": 600, "peakDemand": 550 })),
        ];

        let edges = vec![
            FlowEdge::new("solar-to-inverter", "source-solar", "inverter-1"),
            FlowEdge::new("wind-to-inverter", "source-wind", "inverter-1"),
            FlowEdge::new("inverter-to-transformer", "inverter-1", "transformer-1"),
            FlowEdge::new("bess-1-to-grid", "bess-1", "grid-1"),
            FlowEdge::new("bess-2-to-grid", "bess-2", "grid-1"),
            FlowEdge::new("transformer-to-bess-1", "transformer-1", "bess-1"),
            FlowEdge::new("transformer-to-bess-2", "transformer-1", "bess-2"),
            FlowEdge::new("bess-1-to-residential", "bess-1", "consumer-residential"),
            FlowEdge::new("bess-2-to-industrial", "bess-2", "consumer-industrial"),
        ];

        Self::assemble(nodes, edges)
    }

    /// Builds the solar array detail graph: `strings` panel strings of
    /// `cells_per_string` cells each, combined through the inverter and
    /// transformer into main/backup storage, with grid-backed consumers.
    pub fn panel_detail(strings: usize, cells_per_string: usize) -> Self {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();

        for s in 1..=strings {
            let string_id = format!("string-{s}");
            nodes.push(FlowNode::new(
                string_id.clone(),
                NodeKind::PanelString,
                Position::new(200.0, 80.0 * (s - 1) as f64),
            ));
            for c in 1..=cells_per_string {
                let cell_id = format!("cell-{s}-{c}");
                nodes.push(FlowNode::new(
                    cell_id.clone(),
                    NodeKind::Cell,
                    Position::new(0.0, 120.0 * (s - 1) as f64 + 30.0 * (c - 1) as f64),
                ));
                edges.push(FlowEdge::new(
                    format!("{cell_id}-to-{string_id}"),
                    cell_id,
                    string_id.clone(),
                ));
            }
        }
        for s in 1..=strings {
            edges.push(FlowEdge::new(
                format!("string-{s}-to-inverter"),
                format!("string-{s}"),
                "inverter-1",
            ));
        }

        nodes.push(FlowNode::new(
            "inverter-1",
            NodeKind::Inverter,
            Position::new(400.0, 100.0),
        ));
        nodes.push(FlowNode::new(
            "transformer-1",
            NodeKind::Transformer,
            Position::new(600.0, 100.0),
        ));
        nodes.push(FlowNode::new(
            "storage-main",
            NodeKind::Storage,
            Position::new(800.0, 50.0),
        ));
        nodes.push(FlowNode::new(
            "storage-backup",
            NodeKind::Storage,
            Position::new(800.0, 250.0),
        ));
        nodes.push(FlowNode::new(
            "grid",
            NodeKind::Grid,
            Position::new(400.0, 400.0),
        ));

        edges.push(FlowEdge::new(
            "inverter-to-transformer",
            "inverter-1",
            "transformer-1",
        ));
        for storage in ["main", "backup"] {
            edges.push(FlowEdge::new(
                format!("transformer-to-storage-{storage}"),
                "transformer-1",
                format!("storage-{storage}"),
            ));
        }

        for (i, (consumer, kind, _)) in CONSUMERS.iter().enumerate() {
            let consumer_id = format!("consumer-{consumer}");
            nodes.push(FlowNode::new(
                consumer_id.clone(),
                NodeKind::Consumer(*kind),
                Position::new(1000.0, 150.0 * i as f64),
            ));

            // Residential is served by the main storage, the rest by backup.
            let storage = if i == 0 { "storage-main" } else { "storage-backup" };
            edges.push(FlowEdge::new(
                format!("{storage}-to-{consumer_id}"),
                storage,
                consumer_id.clone(),
            ));
            edges.push(FlowEdge::new(
                format!("grid-to-{consumer_id}"),
                "grid",
                consumer_id,
            ));
        }

        Self::assemble(nodes, edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_overview_shape() {
        let graph = FlowGraph::site_overview(2);

        assert_eq!(graph.nodes().count(), 7);
        assert_eq!(graph.edges().count(), 8);

        assert_eq!(graph.node("source-1").unwrap().kind, NodeKind::Source);
        assert_eq!(
            graph.node("source-2").unwrap().position,
            Position::new(50.0, 170.0)
        );
        assert_eq!(graph.node("storage").unwrap().kind, NodeKind::Storage);
        assert_eq!(
            graph.node("residential").unwrap().kind,
            NodeKind::Consumer(ConsumerKind::Residential)
        );
        assert_eq!(graph.node("grid").unwrap().kind, NodeKind::Grid);

        assert!(graph.edge("source-1-to-storage").is_ok());
        assert!(graph.edge("storage-to-industrial").is_ok());
        assert!(graph.edge("commercial-to-grid").is_ok());
    }

    #[test]
    fn test_site_overview_without_sources_keeps_skeleton() {
        let graph = FlowGraph::site_overview(0);

        assert_eq!(graph.nodes().count(), 5);
        assert_eq!(graph.edges().count(), 6);
        assert!(graph.nodes().all(|n| !n.kind.is_source()));
    }

    #[test]
    fn test_site_overview_is_reproducible() {
        let first = FlowGraph::site_overview(3);
        let second = FlowGraph::site_overview(3);

        let first_nodes: Vec<_> = first.nodes().cloned().collect();
        let second_nodes: Vec<_> = second.nodes().cloned().collect();
        assert_eq!(first_nodes, second_nodes);

        let first_edges: Vec<_> = first.edges().cloned().collect();
        let second_edges: Vec<_> = second.edges().cloned().collect();
        assert_eq!(first_edges, second_edges);
    }

    #[test]
    fn test_plant_overview_shape() {
        let graph = FlowGraph::plant_overview();

        assert_eq!(graph.nodes().count(), 9);
        assert_eq!(graph.edges().count(), 9);
        assert_eq!(graph.node("bess-1").unwrap().kind, NodeKind::Bess);
        assert_eq!(
            graph.node("transformer-1").unwrap().kind,
            NodeKind::Transformer
        );
        assert_eq!(
            graph.node("source-solar").unwrap().specs["capacity"],
            serde_json::json!(500)
        );

        // Edge order is the canonical styling order.
        let ids: Vec<_> = graph.edges().map(|e| e.id.as_str()).collect();
        assert_eq!(ids[0], "solar-to-inverter");
        assert_eq!(ids[1], "wind-to-inverter");
        assert_eq!(ids[2], "inverter-to-transformer");
    }

    #[test]
    fn test_panel_detail_shape() {
        let graph = FlowGraph::panel_detail(2, 3);

        // 6 cells + 2 strings + inverter, transformer, two storages, grid,
        // three consumers.
        assert_eq!(graph.nodes().count(), 16);
        // 6 cell edges + 2 string edges + inverter-transformer + 2 storage
        // feeds + 3 storage-consumer + 3 grid-consumer.
        assert_eq!(graph.edges().count(), 17);

        assert_eq!(graph.node("cell-2-3").unwrap().kind, NodeKind::Cell);
        assert_eq!(graph.node("string-1").unwrap().kind, NodeKind::PanelString);
        assert!(graph.edge("cell-1-2-to-string-1").is_ok());
        assert!(graph.edge("storage-backup-to-consumer-commercial").is_ok());
        assert!(graph.edge("grid-to-consumer-residential").is_ok());
    }

    #[test]
    fn test_panel_detail_is_reproducible() {
        let first = FlowGraph::panel_detail(3, 4);
        let second = FlowGraph::panel_detail(3, 4);

        assert!(first.nodes().eq(second.nodes()));
        assert!(first.edges().eq(second.edges()));
    }
}
