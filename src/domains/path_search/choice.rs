use rand::Rng;
use tracing::warn;

use super::ant::Ant;
use super::graph::PheromoneGraph;

/// Desirability of an edge. The colony's hot path is generic over this so a
/// different score does not cost a dynamic call per candidate.
pub trait EdgeScorer {
    fn score<G: PheromoneGraph>(&self, graph: &G, edge: G::Edge, target: G::Vertex) -> f32;
}

/// Score an edge by its pheromone level alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct PheromoneScore;

impl EdgeScorer for PheromoneScore {
    fn score<G: PheromoneGraph>(&self, graph: &G, edge: G::Edge, _target: G::Vertex) -> f32 {
        graph.pheromone(edge)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<E, V> {
    pub edge: E,
    pub target: V,
    pub score: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepChoice<E, V> {
    Advance { edge: E, target: V },
    /// Every out-edge was excluded; the ant has to backstep.
    NoCandidates,
}

/// Picks the next edge for an ant: exploit the best-scored candidate with
/// probability `exploitation_factor`, otherwise draw one proportionally to score.
#[derive(Debug)]
pub struct StepChooser<E, V, S = PheromoneScore> {
    scorer: S,
    candidates: Vec<Candidate<E, V>>,
    degenerate_choices: u64,
}

impl<E: Copy, V: Copy + Eq, S: EdgeScorer> StepChooser<E, V, S> {
    /// `capacity` should be the graph's maximum out-degree.
    pub fn new(scorer: S, capacity: usize) -> Self {
        Self {
            scorer,
            candidates: Vec::with_capacity(capacity),
            degenerate_choices: 0,
        }
    }

    /// Roulette draws that fell off the wheel and used the last candidate.
    pub fn degenerate_choices(&self) -> u64 {
        self.degenerate_choices
    }

    pub fn choose<G, R>(
        &mut self,
        graph: &G,
        ant: &Ant<V, E>,
        exploitation_factor: f32,
        rng: &mut R,
    ) -> StepChoice<E, V>
    where
        G: PheromoneGraph<Edge = E, Vertex = V>,
        R: Rng + ?Sized,
    {
        self.candidates.clear();
        let scorer = &self.scorer;
        let candidates = &mut self.candidates;
        graph.for_each_out_edge(ant.current_vertex, |edge, target| {
            if !ant.is_excluded(target) {
                let score = scorer.score(graph, edge, target);
                candidates.push(Candidate { edge, target, score });
            }
        });
        if self.candidates.is_empty() {
            return StepChoice::NoCandidates;
        }

        let mut total = 0.0f32;
        let mut best = 0;
        for (i, candidate) in self.candidates.iter().enumerate() {
            total += candidate.score;
            if candidate.score > self.candidates[best].score {
                best = i;
            }
        }

        let index = if rng.gen::<f32>() < exploitation_factor {
            best
        } else {
            self.roulette(total, rng)
        };
        let chosen = self.candidates[index];
        StepChoice::Advance { edge: chosen.edge, target: chosen.target }
    }

    fn roulette<R: Rng + ?Sized>(&mut self, total: f32, rng: &mut R) -> usize {
        let draw = rng.gen::<f32>() * total;
        let mut cumulative = 0.0f32;
        for (i, candidate) in self.candidates.iter().enumerate() {
            cumulative += candidate.score;
            if cumulative >= draw {
                return i;
            }
        }
        self.degenerate_choices += 1;
        warn!(
            draw,
            total,
            candidates = self.candidates.len(),
            "roulette draw selected nothing, falling back to the last candidate"
        );
        self.candidates.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::PheromoneMap;
    use petgraph::graph::{EdgeIndex, NodeIndex};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    type Chooser = StepChooser<EdgeIndex, NodeIndex>;

    fn star() -> PheromoneMap<u32> {
        // 0 is the hub, 1..=3 are leaves
        PheromoneMap::from_undirected_edges([(0u32, 1u32), (0, 2), (0, 3)])
    }

    fn set(map: &mut PheromoneMap<u32>, from: u32, to: u32, value: f32) {
        let a = map.vertex_for(&from).unwrap();
        let mut found = None;
        map.for_each_out_edge(a, |edge, target| {
            if map.node_for(target) == Some(to) {
                found = Some(edge);
            }
        });
        map.set_pheromone(found.unwrap(), value);
    }

    fn target_node(map: &PheromoneMap<u32>, choice: StepChoice<EdgeIndex, NodeIndex>) -> u32 {
        match choice {
            StepChoice::Advance { target, .. } => map.node_for(target).unwrap(),
            StepChoice::NoCandidates => panic!("Expected an advance"),
        }
    }

    #[test]
    fn test_full_exploitation_takes_the_strongest_edge() {
        let mut map = star();
        set(&mut map, 0, 1, 0.1);
        set(&mut map, 0, 2, 0.9);
        set(&mut map, 0, 3, 0.3);
        let ant = Ant::new(map.vertex_for(&0).unwrap(), 4);
        let mut chooser = Chooser::new(PheromoneScore, map.max_out_degree());
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            assert_eq!(target_node(&map, chooser.choose(&map, &ant, 1.0, &mut rng)), 2);
        }
    }

    #[test]
    fn test_ties_go_to_the_first_enumerated_candidate() {
        let mut map = star();
        map.reset_pheromone(0.5);
        let hub = map.vertex_for(&0).unwrap();
        let mut first = None;
        map.for_each_out_edge(hub, |_, target| {
            if first.is_none() {
                first = map.node_for(target);
            }
        });
        let ant = Ant::new(hub, 4);
        let mut chooser = Chooser::new(PheromoneScore, 3);
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(Some(target_node(&map, chooser.choose(&map, &ant, 1.0, &mut rng))), first);
    }

    #[test]
    fn test_exploration_never_picks_a_zero_scored_edge() {
        let mut map = star();
        set(&mut map, 0, 1, 0.0);
        set(&mut map, 0, 2, 1.0);
        set(&mut map, 0, 3, 0.0);
        let ant = Ant::new(map.vertex_for(&0).unwrap(), 4);
        let mut chooser = Chooser::new(PheromoneScore, 3);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            assert_eq!(target_node(&map, chooser.choose(&map, &ant, 0.0, &mut rng)), 2);
        }
        assert_eq!(chooser.degenerate_choices(), 0);
    }

    #[test]
    fn test_exploration_follows_pheromone_proportions() {
        let mut map = star();
        set(&mut map, 0, 1, 1.0);
        set(&mut map, 0, 2, 3.0);
        set(&mut map, 0, 3, 0.0);
        let ant = Ant::new(map.vertex_for(&0).unwrap(), 4);
        let mut chooser = Chooser::new(PheromoneScore, 3);
        let mut rng = StdRng::seed_from_u64(42);
        let mut heavy = 0;
        for _ in 0..4000 {
            if target_node(&map, chooser.choose(&map, &ant, 0.0, &mut rng)) == 2 {
                heavy += 1;
            }
        }
        // expected 3000
        assert!((2700..3300).contains(&heavy), "heavy edge chosen {} times", heavy);
        assert_eq!(chooser.degenerate_choices(), 0);
    }

    #[test]
    fn test_the_previous_vertex_is_never_a_candidate() {
        let map = PheromoneMap::from_undirected_edges([(0u32, 1u32), (1, 2)]);
        let mut ant = Ant::new(map.vertex_for(&0).unwrap(), 4);
        let mut first_edge = None;
        map.for_each_out_edge(ant.current_vertex, |edge, _| first_edge = Some(edge));
        ant.advance(first_edge.unwrap(), map.vertex_for(&1).unwrap());

        let mut chooser = Chooser::new(PheromoneScore, 2);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            assert_eq!(target_node(&map, chooser.choose(&map, &ant, 0.0, &mut rng)), 2);
        }
    }

    #[test]
    fn test_dead_end_reports_no_candidates() {
        let map = PheromoneMap::from_undirected_edges([(0u32, 1u32)]);
        let mut ant = Ant::new(map.vertex_for(&0).unwrap(), 4);
        let mut edge = None;
        map.for_each_out_edge(ant.current_vertex, |e, _| edge = Some(e));
        ant.advance(edge.unwrap(), map.vertex_for(&1).unwrap());

        let mut chooser = Chooser::new(PheromoneScore, 1);
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(chooser.choose(&map, &ant, 0.5, &mut rng), StepChoice::NoCandidates);
    }

    #[test]
    fn test_a_backstepped_ant_does_not_return_where_it_came_from() {
        // 0 - 1 - 2 and 1 - 3; the ant went 0 -> 1 -> 2, then backstepped to 1
        let map = PheromoneMap::from_undirected_edges([(0u32, 1u32), (1, 2), (1, 3)]);
        let v = |n: u32| map.vertex_for(&n).unwrap();
        let mut ant = Ant::new(v(0), 4);
        let mut edges = Vec::new();
        map.for_each_edge(|e| edges.push(e));
        ant.advance(edges[0], v(1));
        ant.advance(edges[2], v(2));
        assert!(ant.backstep());

        let mut chooser = Chooser::new(PheromoneScore, 3);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            assert_eq!(target_node(&map, chooser.choose(&map, &ant, 0.0, &mut rng)), 3);
        }
    }

    /// Scores every edge as NaN, so no roulette slot can ever be reached.
    #[derive(Debug, Clone, Copy)]
    struct Unscorable;

    impl EdgeScorer for Unscorable {
        fn score<G: PheromoneGraph>(&self, _graph: &G, _edge: G::Edge, _target: G::Vertex) -> f32 {
            f32::NAN
        }
    }

    #[test]
    fn test_unreachable_roulette_falls_back_to_the_last_candidate() {
        let map = star();
        let hub = map.vertex_for(&0).unwrap();
        let mut last = None;
        map.for_each_out_edge(hub, |edge, target| last = Some((edge, target)));
        let (last_edge, last_target) = last.unwrap();

        let ant = Ant::new(hub, 4);
        let mut chooser: StepChooser<EdgeIndex, NodeIndex, Unscorable> = StepChooser::new(Unscorable, 3);
        let mut rng = StdRng::seed_from_u64(13);
        assert_eq!(
            chooser.choose(&map, &ant, 0.0, &mut rng),
            StepChoice::Advance { edge: last_edge, target: last_target }
        );
        assert_eq!(chooser.degenerate_choices(), 1);

        chooser.choose(&map, &ant, 0.0, &mut rng);
        assert_eq!(chooser.degenerate_choices(), 2);
    }
}
