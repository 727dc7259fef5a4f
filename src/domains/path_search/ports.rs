use crate::common::DomainResult;

use super::graph::PheromoneGraph;
use super::types::Coord;

/// Port the path_search domain depends on for map graphs.
/// Every call hands out a fresh graph, so concurrent searches never share pheromone state.
pub trait GraphSource: Send + Sync {
    type Graph: PheromoneGraph<Node = Coord> + Send + 'static;

    fn load_graph(&self, name: &str) -> DomainResult<Self::Graph>;
}
