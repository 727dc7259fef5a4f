use std::fmt::Debug;
use std::hash::Hash;

/// Graph contract consumed by the colony.
///
/// A node is the caller's coordinate type; a vertex is the graph's own handle.
/// `vertex_for` and `node_for` must be inverse to each other for the lifetime of
/// one search. Out-edge enumeration order must not change while a search runs.
///
/// Sharing one annotated graph between several colonies would need a per-graph
/// `RwLock` around the pheromone reads and writes; the colony itself assumes
/// exclusive access through `&mut`.
pub trait PheromoneGraph {
    type Node: Clone + Eq + Hash + Debug;
    type Vertex: Copy + Eq + Debug;
    type Edge: Copy + Eq + Debug;

    fn vertex_for(&self, node: &Self::Node) -> Option<Self::Vertex>;

    fn node_for(&self, vertex: Self::Vertex) -> Option<Self::Node>;

    /// Visit every `(edge, target)` leaving `vertex`. A dead end visits nothing.
    fn for_each_out_edge<F>(&self, vertex: Self::Vertex, visit: F)
    where
        F: FnMut(Self::Edge, Self::Vertex);

    /// Visit every edge of the graph.
    fn for_each_edge<F>(&self, visit: F)
    where
        F: FnMut(Self::Edge);

    fn pheromone(&self, edge: Self::Edge) -> f32;

    fn set_pheromone(&mut self, edge: Self::Edge, value: f32);

    /// Largest out-degree of any vertex; sizes the candidate scratch buffer.
    fn max_out_degree(&self) -> usize;
}
