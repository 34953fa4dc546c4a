// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module defines the `NodeKind` enum, which represents the kind of a
//! node in the energy flow graph.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Represents the category of a consumer node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsumerKind {
    Residential,
    Industrial,
    Commercial,
}

impl Display for ConsumerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsumerKind::Residential => write!(f, "Residential"),
            ConsumerKind::Industrial => write!(f, "Industrial"),
            ConsumerKind::Commercial => write!(f, "Commercial"),
        }
    }
}

/// Represents the kind of a node in the energy flow graph.
///
/// The kind decides how the rendering layer draws a node; the graph itself
/// only uses it to classify endpoints of flow edges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Source,
    Storage,
    Consumer(ConsumerKind),
    Grid,
    Inverter,
    Transformer,
    Cell,
    #[serde(rename = "string")]
    PanelString,
    Bess,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeKind::Source => write!(f, "Source"),
            NodeKind::Storage => write!(f, "Storage"),
            NodeKind::Consumer(consumer_kind) => write!(f, "{}Consumer", consumer_kind),
            NodeKind::Grid => write!(f, "Grid"),
            NodeKind::Inverter => write!(f, "Inverter"),
            NodeKind::Transformer => write!(f, "Transformer"),
            NodeKind::Cell => write!(f, "Cell"),
            NodeKind::PanelString => write!(f, "PanelString"),
            NodeKind::Bess => write!(f, "BESS"),
        }
    }
}

/// Predicates for checking the kind of a node.
impl NodeKind {
    pub fn is_source(&self) -> bool {
        *self == NodeKind::Source
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, NodeKind::Storage | NodeKind::Bess)
    }

    pub fn is_consumer(&self) -> bool {
        matches!(self, NodeKind::Consumer(_))
    }

    pub fn is_grid(&self) -> bool {
        *self == NodeKind::Grid
    }

    pub fn is_conversion(&self) -> bool {
        matches!(self, NodeKind::Inverter | NodeKind::Transformer)
    }

    pub fn is_generation(&self) -> bool {
        matches!(self, NodeKind::Source | NodeKind::Cell | NodeKind::PanelString)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(NodeKind::Source.to_string(), "Source");
        assert_eq!(
            NodeKind::Consumer(ConsumerKind::Residential).to_string(),
            "ResidentialConsumer"
        );
        assert_eq!(NodeKind::Bess.to_string(), "BESS");
        assert_eq!(NodeKind::PanelString.to_string(), "PanelString");
    }

    #[test]
    fn test_predicates() {
        assert!(NodeKind::Source.is_source());
        assert!(NodeKind::Storage.is_storage());
        assert!(NodeKind::Bess.is_storage());
        assert!(NodeKind::Consumer(ConsumerKind::Industrial).is_consumer());
        assert!(NodeKind::Grid.is_grid());
        assert!(NodeKind::Inverter.is_conversion());
        assert!(NodeKind::Transformer.is_conversion());
        assert!(NodeKind::Cell.is_generation());
        assert!(!NodeKind::Grid.is_consumer());
        assert!(!NodeKind::Source.is_storage());
    }
}
