use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::domains::path_search::PheromoneGraph;

/// Directed graph whose edge weights are pheromone levels, keyed by caller nodes.
///
/// Each node is stored once; `index` is the inverse of the node weights, which
/// keeps `vertex_for` and `node_for` a bijection.
#[derive(Debug, Clone)]
pub struct PheromoneMap<N> {
    graph: DiGraph<N, f32>,
    index: HashMap<N, NodeIndex>,
}

/// Cell of a 4-connected grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl<N: Clone + Eq + Hash + Debug> Default for PheromoneMap<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Clone + Eq + Hash + Debug> PheromoneMap<N> {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Build from node pairs, each pair connected in both directions.
    pub fn from_undirected_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut map = Self::new();
        for (a, b) in edges {
            map.add_undirected_edge(a, b);
        }
        map
    }

    /// Insert `node` if it is not present yet and return its vertex.
    pub fn add_node(&mut self, node: N) -> NodeIndex {
        if let Some(&existing) = self.index.get(&node) {
            return existing;
        }
        let vertex = self.graph.add_node(node.clone());
        self.index.insert(node, vertex);
        vertex
    }

    /// Directed edge with zero pheromone. Parallel edges are collapsed.
    pub fn add_edge(&mut self, from: N, to: N) -> EdgeIndex {
        let a = self.add_node(from);
        let b = self.add_node(to);
        match self.graph.find_edge(a, b) {
            Some(edge) => edge,
            None => self.graph.add_edge(a, b, 0.0),
        }
    }

    pub fn add_undirected_edge(&mut self, a: N, b: N) {
        self.add_edge(a.clone(), b.clone());
        self.add_edge(b, a);
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.graph.node_weights()
    }

    pub fn pheromone_between(&self, from: &N, to: &N) -> Option<f32> {
        let a = *self.index.get(from)?;
        let b = *self.index.get(to)?;
        self.graph.find_edge(a, b).map(|edge| self.graph[edge])
    }

    /// Pheromone of every edge, ordered by edge index.
    pub fn pheromone_snapshot(&self) -> Vec<f32> {
        self.graph.edge_weights().copied().collect()
    }

    pub fn total_pheromone(&self) -> f32 {
        self.graph.edge_weights().sum()
    }

    /// Summed pheromone on the edges leaving `node`.
    pub fn outgoing_pheromone(&self, node: &N) -> f32 {
        match self.index.get(node) {
            Some(&vertex) => self.graph.edges(vertex).map(|edge| *edge.weight()).sum(),
            None => 0.0,
        }
    }

    pub fn reset_pheromone(&mut self, value: f32) {
        for weight in self.graph.edge_weights_mut() {
            *weight = value;
        }
    }
}

impl PheromoneMap<GridCell> {
    /// `width` x `height` grid, 4-connected, without the `blocked` cells.
    pub fn grid(width: i32, height: i32, blocked: &[GridCell]) -> Self {
        let mut map = Self::new();
        let open = |cell: &GridCell| !blocked.contains(cell);
        for y in 0..height {
            for x in 0..width {
                let cell = GridCell::new(x, y);
                if !open(&cell) {
                    continue;
                }
                map.add_node(cell);
                let right = GridCell::new(x + 1, y);
                if x + 1 < width && open(&right) {
                    map.add_undirected_edge(cell, right);
                }
                let down = GridCell::new(x, y + 1);
                if y + 1 < height && open(&down) {
                    map.add_undirected_edge(cell, down);
                }
            }
        }
        map
    }
}

impl<N: Clone + Eq + Hash + Debug> PheromoneGraph for PheromoneMap<N> {
    type Node = N;
    type Vertex = NodeIndex;
    type Edge = EdgeIndex;

    fn vertex_for(&self, node: &N) -> Option<NodeIndex> {
        self.index.get(node).copied()
    }

    fn node_for(&self, vertex: NodeIndex) -> Option<N> {
        self.graph.node_weight(vertex).cloned()
    }

    fn for_each_out_edge<F>(&self, vertex: NodeIndex, mut visit: F)
    where
        F: FnMut(EdgeIndex, NodeIndex),
    {
        for edge in self.graph.edges(vertex) {
            visit(edge.id(), edge.target());
        }
    }

    fn for_each_edge<F>(&self, mut visit: F)
    where
        F: FnMut(EdgeIndex),
    {
        for edge in self.graph.edge_indices() {
            visit(edge);
        }
    }

    fn pheromone(&self, edge: EdgeIndex) -> f32 {
        self.graph.edge_weight(edge).copied().unwrap_or(0.0)
    }

    fn set_pheromone(&mut self, edge: EdgeIndex, value: f32) {
        if let Some(weight) = self.graph.edge_weight_mut(edge) {
            *weight = value;
        }
    }

    fn max_out_degree(&self) -> usize {
        self.graph
            .node_indices()
            .map(|vertex| self.graph.edges(vertex).count())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_lookup_is_bijective() {
        let map = PheromoneMap::grid(4, 3, &[GridCell::new(1, 1)]);
        assert_eq!(map.node_count(), 11);
        for node in map.nodes() {
            let vertex = map.vertex_for(node).unwrap();
            assert_eq!(map.node_for(vertex).as_ref(), Some(node));
        }
        assert!(map.vertex_for(&GridCell::new(1, 1)).is_none());
    }

    #[test]
    fn test_adding_a_node_twice_returns_the_same_vertex() {
        let mut map: PheromoneMap<u32> = PheromoneMap::new();
        let first = map.add_node(3);
        let second = map.add_node(3);
        assert_eq!(first, second);
        assert_eq!(map.node_count(), 1);
    }

    #[test]
    fn test_undirected_edges_are_stored_both_ways() {
        let map = PheromoneMap::from_undirected_edges([(0u32, 1u32), (1, 2), (1, 2)]);
        assert_eq!(map.edge_count(), 4);
        assert_eq!(map.pheromone_between(&2, &1), Some(0.0));
        assert_eq!(map.pheromone_between(&0, &2), None);
        assert_eq!(map.max_out_degree(), 2);
    }

    #[test]
    fn test_out_edges_point_at_neighbours() {
        let map = PheromoneMap::grid(3, 3, &[]);
        let centre = map.vertex_for(&GridCell::new(1, 1)).unwrap();
        let mut targets = Vec::new();
        map.for_each_out_edge(centre, |_, target| targets.push(map.node_for(target).unwrap()));
        targets.sort();
        assert_eq!(
            targets,
            vec![GridCell::new(0, 1), GridCell::new(1, 0), GridCell::new(1, 2), GridCell::new(2, 1)]
        );
        assert_eq!(map.max_out_degree(), 4);
    }

    #[test]
    fn test_pheromone_reads_back_what_was_written() {
        let mut map = PheromoneMap::from_undirected_edges([(0u32, 1u32)]);
        let mut edges = Vec::new();
        map.for_each_edge(|edge| edges.push(edge));
        map.set_pheromone(edges[0], 0.25);
        assert_eq!(map.pheromone(edges[0]), 0.25);
        assert!((map.total_pheromone() - 0.25).abs() < 1e-6);
        map.reset_pheromone(1.0);
        assert_eq!(map.pheromone_snapshot(), vec![1.0, 1.0]);
    }
}
