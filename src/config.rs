// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for the flow monitor.

use std::time::Duration;

/// Configuration options for the [Monitor][crate::Monitor] and its
/// sampling loop.
#[derive(Clone, Debug)]
pub struct MonitorConfig {
    /// The interval between two sampling ticks.
    pub sample_interval: Duration,

    /// How many samples to retain per edge.  When the cap is reached, the
    /// oldest sample is evicted first.
    pub history_cap: usize,

    /// How many faults to retain per edge, with the same eviction order as
    /// the sample history.
    pub fault_log_cap: usize,

    /// Flow readings above this value raise a warning-severity fault.
    pub warning_above_kw: f64,

    /// Flow readings below this value raise an error-severity fault.
    pub error_below_kw: f64,

    /// The efficiency assumed for edges that have no recorded metric yet.
    pub fallback_efficiency_pct: f64,

    /// Upper bound of the flow range drawn by the sample generator.
    pub max_sample_kw: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sample_interval: Duration::from_millis(5000),
            history_cap: 50,
            fault_log_cap: 50,
            warning_above_kw: 800.0,
            error_below_kw: 200.0,
            fallback_efficiency_pct: 95.0,
            max_sample_kw: 1000.0,
        }
    }
}
