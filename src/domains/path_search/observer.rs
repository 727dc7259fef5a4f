use super::ant::Ant;
use super::graph::PheromoneGraph;
use super::groups::PathGroups;

/// Read-only view handed to observers after a scheduled step.
pub struct StepSnapshot<'a, G: PheromoneGraph> {
    pub iteration: usize,
    pub step: usize,
    pub ants: &'a [Ant<G::Vertex, G::Edge>],
    pub groups: &'a PathGroups,
    pub graph: &'a G,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationSummary {
    pub iteration: usize,
    pub steps: usize,
    pub entropy: f32,
    pub ants_at_destination: usize,
    pub best_length: Option<usize>,
}

/// Debug hooks, e.g. for a pheromone heatmap. Observers only ever see shared
/// references, so they cannot disturb the search.
pub trait SearchObserver<G: PheromoneGraph> {
    fn on_search_begin(&mut self, _max_steps: usize, _max_iterations: usize) {}

    fn on_step_complete(&mut self, _snapshot: &StepSnapshot<'_, G>) {}

    fn on_iteration_complete(&mut self, _summary: &IterationSummary) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl<G: PheromoneGraph> SearchObserver<G> for NoopObserver {}
