//! Ant Colony System path search.
//!
//! - graph: the contract a searchable graph fulfils
//! - ant / groups: per-ant state and the path-prefix partition
//! - choice / pheromone: next-edge selection and pheromone dynamics
//! - colony: the iteration driver
//! - observer / stop: debug hooks and cancellation

pub mod ant;
pub mod choice;
pub mod colony;
pub mod graph;
pub mod groups;
pub mod observer;
pub mod pheromone;
pub mod ports;
pub mod settings;
pub mod stop;
pub mod types;

pub use ant::*;
pub use choice::*;
pub use colony::*;
pub use graph::*;
pub use groups::*;
pub use observer::*;
pub use pheromone::*;
pub use ports::*;
pub use settings::*;
pub use stop::*;
pub use types::*;
