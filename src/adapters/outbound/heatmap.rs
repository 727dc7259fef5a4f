use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use serde::Serialize;

use super::pheromone_map::PheromoneMap;
use crate::common::DomainResult;
use crate::domains::path_search::{IterationSummary, PheromoneGraph, SearchObserver, StepSnapshot};

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapFrame<N> {
    pub iteration: usize,
    pub step: usize,
    /// Ants standing on each occupied node.
    pub density: Vec<(N, u32)>,
    /// Pheromone summed over each node's out-edges.
    pub pheromone: Vec<(N, f32)>,
}

/// Records ant density and pheromone snapshots for a later heatmap render.
#[derive(Debug, Clone, Serialize)]
pub struct HeatmapRecorder<N> {
    pub max_steps: usize,
    pub max_iterations: usize,
    pub frames: Vec<HeatmapFrame<N>>,
    pub entropy: Vec<f32>,
}

impl<N> Default for HeatmapRecorder<N> {
    fn default() -> Self {
        Self { max_steps: 0, max_iterations: 0, frames: Vec::new(), entropy: Vec::new() }
    }
}

impl<N: Serialize> HeatmapRecorder<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> DomainResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<N> SearchObserver<PheromoneMap<N>> for HeatmapRecorder<N>
where
    N: Clone + Eq + Hash + Ord + Debug,
{
    fn on_search_begin(&mut self, max_steps: usize, max_iterations: usize) {
        self.max_steps = max_steps;
        self.max_iterations = max_iterations;
        self.frames.clear();
        self.entropy.clear();
    }

    fn on_step_complete(&mut self, snapshot: &StepSnapshot<'_, PheromoneMap<N>>) {
        let graph = snapshot.graph;
        let mut counts: HashMap<N, u32> = HashMap::new();
        for ant in snapshot.ants {
            if let Some(node) = graph.node_for(ant.current_vertex) {
                *counts.entry(node).or_insert(0) += 1;
            }
        }
        let mut density: Vec<(N, u32)> = counts.into_iter().collect();
        density.sort();

        let mut pheromone: Vec<(N, f32)> = graph
            .nodes()
            .map(|node| (node.clone(), graph.outgoing_pheromone(node)))
            .collect();
        pheromone.sort_by(|a, b| a.0.cmp(&b.0));

        self.frames.push(HeatmapFrame {
            iteration: snapshot.iteration,
            step: snapshot.step,
            density,
            pheromone,
        });
    }

    fn on_iteration_complete(&mut self, summary: &IterationSummary) {
        self.entropy.push(summary.entropy);
    }
}
