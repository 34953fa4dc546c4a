// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Flow samples and the bounded per-edge sample history.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::collections::VecDeque;

/// One instantaneous flow reading for an edge.
///
/// The envelope values are fixed functions of the instantaneous reading:
/// `min_kw = 0.8 × current_kw`, `max_kw = 1.2 × current_kw` and
/// `avg_kw = current_kw`.  Consumers of serialized samples rely on this
/// relationship, so it is kept instead of a true rolling window.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlowSample {
    /// Instantaneous flow in kW.  Non-negative.
    pub current_kw: f64,
    /// Lower envelope bound in kW.
    pub min_kw: f64,
    /// Upper envelope bound in kW.
    pub max_kw: f64,
    /// Average flow in kW.
    pub avg_kw: f64,
    /// The instant the sample was captured.
    pub timestamp: DateTime<Utc>,
}

impl FlowSample {
    /// Creates a sample for the given instantaneous reading, deriving the
    /// envelope values from it.
    pub fn at(current_kw: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            current_kw,
            min_kw: current_kw * 0.8,
            max_kw: current_kw * 1.2,
            avg_kw: current_kw,
            timestamp,
        }
    }

    /// Draws a new sample with a flow value uniformly distributed in
    /// `[0, max_kw)`.
    pub fn generate<R: Rng>(rng: &mut R, max_kw: f64, timestamp: DateTime<Utc>) -> Self {
        Self::at(rng.gen::<f64>() * max_kw, timestamp)
    }
}

/// A bounded FIFO history of the most recent samples for one edge.
///
/// Pushing beyond the cap evicts the oldest sample first.
#[derive(Clone, Debug)]
pub struct SampleHistory {
    samples: VecDeque<FlowSample>,
    cap: usize,
}

impl SampleHistory {
    /// Creates an empty history retaining at most `cap` samples.  `cap` must
    /// be at least 1.
    pub fn new(cap: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Appends a sample, evicting the oldest one if the history is full.
    pub fn push(&mut self, sample: FlowSample) {
        if self.samples.len() == self.cap {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Returns the most recent sample, if any.
    pub fn latest(&self) -> Option<&FlowSample> {
        self.samples.back()
    }

    /// Returns an iterator over the retained samples, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &FlowSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
