use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Planar map coordinate. Ordered floats make it usable as a graph key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: OrderedFloat<f64>,
    pub y: OrderedFloat<f64>,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x: OrderedFloat(x), y: OrderedFloat(y) }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x.0, self.y.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSearchRequest {
    pub request_id: String,
    /// Name of the map known to the graph source.
    pub graph: String,
    pub source: Coord,
    pub destination: Coord,
    /// Fixed seed for a reproducible run; a fresh one is drawn otherwise.
    pub seed: Option<u64>,
}

impl PathSearchRequest {
    pub fn new(graph: impl Into<String>, source: Coord, destination: Coord) -> Self {
        Self {
            request_id: format!("req-{}", uuid::Uuid::new_v4()),
            graph: graph.into(),
            source,
            destination,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
