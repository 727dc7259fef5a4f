use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info};

use super::ant::Ant;
use super::choice::{EdgeScorer, PheromoneScore, StepChoice, StepChooser};
use super::graph::PheromoneGraph;
use super::groups::PathGroups;
use super::observer::{IterationSummary, NoopObserver, SearchObserver, StepSnapshot};
use super::pheromone::PheromoneEngine;
use super::settings::AcsConfig;
use super::stop::{Never, StopCondition};
use crate::common::{ConfigError, SearchError, SearchResult};

/// Best complete path seen during the whole run. Only a strictly shorter path
/// replaces it, so its length never grows back.
#[derive(Debug, Clone)]
pub struct ShortestPath<V, E> {
    pub steps: Vec<V>,
    pub edges: Vec<E>,
    pub length: usize,
    pub found: bool,
}

impl<V: Copy + Eq, E: Copy> ShortestPath<V, E> {
    pub fn with_capacity(max_steps: usize) -> Self {
        Self {
            steps: Vec::with_capacity(max_steps + 1),
            edges: Vec::with_capacity(max_steps),
            length: 0,
            found: false,
        }
    }

    /// Record the ant's path if it beats the current best.
    pub fn offer(&mut self, ant: &Ant<V, E>) -> bool {
        if self.found && ant.steps_taken >= self.length {
            return false;
        }
        self.steps.clear();
        self.steps.extend_from_slice(ant.path());
        self.edges.clear();
        self.edges.extend_from_slice(ant.path_edges());
        self.length = ant.steps_taken;
        self.found = true;
        true
    }

    pub fn found_length(&self) -> Option<usize> {
        self.found.then_some(self.length)
    }
}

/// Consecutive-iteration convergence test on the best path length.
#[derive(Debug, Clone)]
pub(crate) struct Convergence {
    tolerance: f32,
    required: usize,
    last_length: Option<usize>,
    satisfactory: usize,
}

impl Convergence {
    pub(crate) fn new(tolerance: f32, required: usize) -> Self {
        Self { tolerance, required, last_length: None, satisfactory: 0 }
    }

    /// Feed one finished iteration; true once the run may stop.
    pub(crate) fn update(&mut self, found_this_iteration: bool, best_length: Option<usize>) -> bool {
        let satisfied = match (self.last_length, best_length) {
            (Some(last), Some(best)) if found_this_iteration => {
                (last as f32 - best as f32).abs() <= self.tolerance
            }
            _ => false,
        };
        if satisfied {
            self.satisfactory += 1;
        } else {
            self.satisfactory = 0;
        }
        self.last_length = best_length;
        self.required > 0 && self.satisfactory >= self.required
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The best length stopped changing for `break_on_iterations` iterations.
    Converged,
    /// `max_iterations` ran out.
    Exhausted,
    /// A stop condition fired.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathOutcome<N> {
    Found { nodes: Vec<N>, length: usize },
    /// No ant reached the destination within the budget. A normal result for a heuristic.
    NotFound,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport<N> {
    pub outcome: PathOutcome<N>,
    pub termination: Termination,
    pub iterations: usize,
    /// Entropy of the last completed iteration.
    pub entropy: f32,
    pub degenerate_choices: u64,
    /// Best length after each iteration.
    pub best_length_history: Vec<Option<usize>>,
}

impl<N> SearchReport<N> {
    pub fn path(&self) -> Option<&[N]> {
        match &self.outcome {
            PathOutcome::Found { nodes, .. } => Some(nodes.as_slice()),
            PathOutcome::NotFound => None,
        }
    }

    pub fn length(&self) -> Option<usize> {
        match &self.outcome {
            PathOutcome::Found { length, .. } => Some(*length),
            PathOutcome::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self.outcome, PathOutcome::Found { .. })
    }
}

/// Ant Colony System search with a validated configuration.
#[derive(Debug, Clone)]
pub struct AntColonySearch<S = PheromoneScore> {
    config: AcsConfig,
    scorer: S,
}

impl AntColonySearch<PheromoneScore> {
    pub fn new(config: AcsConfig) -> Result<Self, ConfigError> {
        Self::with_scorer(config, PheromoneScore)
    }
}

impl<S: EdgeScorer + Clone> AntColonySearch<S> {
    pub fn with_scorer(config: AcsConfig, scorer: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, scorer })
    }

    pub fn config(&self) -> &AcsConfig {
        &self.config
    }

    pub fn find_path<G, R>(
        &self,
        graph: &mut G,
        source: &G::Node,
        destination: &G::Node,
        rng: &mut R,
    ) -> SearchResult<SearchReport<G::Node>>
    where
        G: PheromoneGraph,
        R: Rng + ?Sized,
    {
        self.run(graph, source, destination, rng, &mut NoopObserver, &mut Never)
    }

    /// Run the colony to convergence, exhaustion or cancellation.
    ///
    /// The graph's pheromone levels are updated in place and stay there after
    /// the run. Ants, groups and the candidate buffer are sized once here and
    /// reused by every iteration.
    pub fn run<G, R, O, C>(
        &self,
        graph: &mut G,
        source: &G::Node,
        destination: &G::Node,
        rng: &mut R,
        observer: &mut O,
        stop: &mut C,
    ) -> SearchResult<SearchReport<G::Node>>
    where
        G: PheromoneGraph,
        R: Rng + ?Sized,
        O: SearchObserver<G> + ?Sized,
        C: StopCondition + ?Sized,
    {
        let config = &self.config;
        let source_vertex = resolve(graph, source)?;
        let destination_vertex = resolve(graph, destination)?;

        if source_vertex == destination_vertex {
            return Ok(SearchReport {
                outcome: PathOutcome::Found { nodes: vec![source.clone()], length: 0 },
                termination: Termination::Converged,
                iterations: 0,
                entropy: 0.0,
                degenerate_choices: 0,
                best_length_history: Vec::new(),
            });
        }

        let ant_count = config.ant_count;
        let mut ants: Vec<Ant<G::Vertex, G::Edge>> = (0..ant_count)
            .map(|_| Ant::new(source_vertex, config.max_steps))
            .collect();
        let mut moved = vec![false; ant_count];
        let mut groups = PathGroups::with_capacity(ant_count);
        let mut chooser = StepChooser::new(self.scorer.clone(), graph.max_out_degree());
        let engine = PheromoneEngine::new(&*graph, config.local, config.global);
        engine.bootstrap(graph);

        let mut best = ShortestPath::with_capacity(config.max_steps);
        let mut convergence = Convergence::new(config.break_on_path_change, config.break_on_iterations);
        let mut history = Vec::with_capacity(config.max_iterations);
        let mut entropy = 0.0f32;
        let mut iterations = 0;
        let mut termination = Termination::Exhausted;

        info!(
            ants = ant_count,
            max_steps = config.max_steps,
            max_iterations = config.max_iterations,
            edges = engine.edge_count(),
            "colony search started"
        );
        observer.on_search_begin(config.max_steps, config.max_iterations);

        for iteration in 0..config.max_iterations {
            if stop.should_stop(iteration) {
                termination = Termination::Cancelled;
                break;
            }
            let _span = debug_span!("iteration", iteration).entered();

            for ant in ants.iter_mut() {
                ant.reset(source_vertex);
            }
            groups.reset(ant_count);
            let exploitation_factor = config.exploitation.factor(entropy);
            let mut found_this_iteration = false;
            let mut steps = 0;

            for step in 0..config.max_steps {
                for (index, ant) in ants.iter_mut().enumerate() {
                    moved[index] = !ant.found_destination;
                    if ant.found_destination {
                        continue;
                    }
                    match chooser.choose(&*graph, ant, exploitation_factor, rng) {
                        StepChoice::Advance { edge, target } => {
                            engine.local_update(graph, edge);
                            ant.advance(edge, target);
                            if target == destination_vertex {
                                ant.found_destination = true;
                                found_this_iteration = true;
                                if best.offer(ant) {
                                    debug!(iteration, step, ant = index, length = best.length, "new shortest path");
                                }
                            }
                        }
                        StepChoice::NoCandidates => {
                            if !ant.backstep() {
                                return Err(SearchError::GraphIntegrity {
                                    vertex: format!("{:?}", source),
                                });
                            }
                        }
                    }
                }

                groups.regroup(&mut ants, &moved);
                steps = step + 1;

                if config.debug.wants(iteration, step) {
                    observer.on_step_complete(&StepSnapshot {
                        iteration,
                        step,
                        ants: &ants,
                        groups: &groups,
                        graph: &*graph,
                    });
                }

                if ants.iter().all(|ant| ant.found_destination) {
                    break;
                }
            }

            entropy = groups.entropy(ant_count);
            engine.global_update(graph, best.found.then_some(best.edges.as_slice()));
            history.push(best.found_length());
            iterations = iteration + 1;

            let summary = IterationSummary {
                iteration,
                steps,
                entropy,
                ants_at_destination: ants.iter().filter(|ant| ant.found_destination).count(),
                best_length: best.found_length(),
            };
            debug!(
                steps,
                entropy,
                arrived = summary.ants_at_destination,
                groups = groups.group_count(),
                best = ?summary.best_length,
                "iteration complete"
            );
            observer.on_iteration_complete(&summary);

            if convergence.update(found_this_iteration, best.found_length()) {
                termination = Termination::Converged;
                break;
            }
        }

        let outcome = if best.found {
            let nodes = best
                .steps
                .iter()
                .map(|&vertex| {
                    graph.node_for(vertex).ok_or_else(|| SearchError::UnknownNode {
                        node: format!("{:?}", vertex),
                    })
                })
                .collect::<SearchResult<Vec<_>>>()?;
            PathOutcome::Found { nodes, length: best.length }
        } else {
            PathOutcome::NotFound
        };

        info!(
            ?termination,
            iterations,
            found = best.found,
            length = best.length,
            degenerate_choices = chooser.degenerate_choices(),
            "colony search finished"
        );

        Ok(SearchReport {
            outcome,
            termination,
            iterations,
            entropy,
            degenerate_choices: chooser.degenerate_choices(),
            best_length_history: history,
        })
    }
}

/// One-shot search with a default pheromone score.
pub fn find_path<G, R>(
    graph: &mut G,
    source: &G::Node,
    destination: &G::Node,
    config: &AcsConfig,
    rng: &mut R,
) -> SearchResult<SearchReport<G::Node>>
where
    G: PheromoneGraph,
    R: Rng + ?Sized,
{
    AntColonySearch::new(config.clone())?.find_path(graph, source, destination, rng)
}

fn resolve<G: PheromoneGraph>(graph: &G, node: &G::Node) -> SearchResult<G::Vertex> {
    graph
        .vertex_for(node)
        .ok_or_else(|| SearchError::UnknownNode { node: format!("{:?}", node) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_found_length_never_counts_as_converged() {
        let mut convergence = Convergence::new(1000.0, 1);
        assert!(!convergence.update(true, Some(7)));
        assert!(convergence.update(true, Some(7)));
    }

    #[test]
    fn test_a_change_beyond_tolerance_resets_the_counter() {
        let mut convergence = Convergence::new(0.0, 2);
        assert!(!convergence.update(true, Some(9)));
        assert!(!convergence.update(true, Some(9)));
        assert!(!convergence.update(true, Some(6)));
        assert!(!convergence.update(true, Some(6)));
        assert!(convergence.update(true, Some(6)));
    }

    #[test]
    fn test_iterations_without_arrivals_are_not_satisfactory() {
        let mut convergence = Convergence::new(0.0, 1);
        assert!(!convergence.update(true, Some(4)));
        assert!(!convergence.update(false, Some(4)));
        assert!(convergence.update(true, Some(4)));
    }

    #[test]
    fn test_zero_required_iterations_never_converges() {
        let mut convergence = Convergence::new(10.0, 0);
        for _ in 0..5 {
            assert!(!convergence.update(true, Some(3)));
        }
    }

    #[test]
    fn test_shortest_path_only_improves() {
        let mut best: ShortestPath<u32, u32> = ShortestPath::with_capacity(8);
        let mut long = Ant::new(0, 8);
        for v in 1..=5 {
            long.advance(v, v);
        }
        let mut short = Ant::new(0, 8);
        short.advance(10, 9);
        short.advance(11, 5);

        assert!(best.offer(&long));
        assert_eq!(best.found_length(), Some(5));
        assert!(best.offer(&short));
        assert_eq!(best.found_length(), Some(2));
        assert_eq!(best.steps, vec![0, 9, 5]);
        assert_eq!(best.edges, vec![10, 11]);
        assert!(!best.offer(&long));
        assert!(!best.offer(&short));
        assert_eq!(best.length, 2);
    }
}
