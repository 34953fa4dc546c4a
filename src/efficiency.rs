// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Per-edge transfer efficiency estimation.

use crate::flow::SampleHistory;
use rand::Rng;
use serde::Serialize;
use std::fmt::Display;

/// Base efficiency of an energy transfer, in percent.
const BASE_EFFICIENCY_PCT: f64 = 85.0;
/// Width of the randomized perturbation added to the base efficiency.
const EFFICIENCY_SPREAD_PCT: f64 = 10.0;

const TRANSMISSION_LOSS_CAP_PCT: f64 = 2.0;
const CONVERSION_LOSS_CAP_PCT: f64 = 3.0;
const RESISTIVE_LOSS_CAP_PCT: f64 = 1.5;

/// The category of a loss component.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum LossKind {
    Transmission,
    Conversion,
    Resistive,
}

impl Display for LossKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LossKind::Transmission => write!(f, "Transmission"),
            LossKind::Conversion => write!(f, "Conversion"),
            LossKind::Resistive => write!(f, "Resistive"),
        }
    }
}

/// One loss component of an efficiency estimate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Loss {
    pub kind: LossKind,
    /// Loss share in percent.  Non-negative.
    pub pct: f64,
}

/// The derived efficiency summary for one edge.
///
/// The loss breakdown is sampled independently of the headline efficiency
/// and is not required to sum to `100 - efficiency_pct`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EfficiencyMetric {
    /// Efficiency in percent, within `[0, 100]`.
    pub efficiency_pct: f64,
    /// Ordered loss components: Transmission, Conversion, Resistive.
    pub losses: Vec<Loss>,
}

impl EfficiencyMetric {
    /// The metric assumed for edges that have no recorded samples yet:
    /// the given efficiency and no loss breakdown.
    pub fn fallback(efficiency_pct: f64) -> Self {
        Self {
            efficiency_pct,
            losses: Vec::new(),
        }
    }
}

/// Estimates the transfer efficiency for an edge from its sample history.
///
/// An empty history yields [`EfficiencyMetric::fallback`]; otherwise the
/// efficiency lies in `[85, 95)` and the breakdown contains exactly three
/// loss components.  Never fails.
pub fn estimate_efficiency<R: Rng>(
    rng: &mut R,
    history: &SampleHistory,
    fallback_pct: f64,
) -> EfficiencyMetric {
    if history.is_empty() {
        return EfficiencyMetric::fallback(fallback_pct);
    }

    let efficiency_pct = BASE_EFFICIENCY_PCT + rng.gen::<f64>() * EFFICIENCY_SPREAD_PCT;
    let losses = vec![
        Loss {
            kind: LossKind::Transmission,
            pct: rng.gen::<f64>() * TRANSMISSION_LOSS_CAP_PCT,
        },
        Loss {
            kind: LossKind::Conversion,
            pct: rng.gen::<f64>() * CONVERSION_LOSS_CAP_PCT,
        },
        Loss {
            kind: LossKind::Resistive,
            pct: rng.gen::<f64>() * RESISTIVE_LOSS_CAP_PCT,
        },
    ];

    EfficiencyMetric {
        efficiency_pct,
        losses,
    }
}
