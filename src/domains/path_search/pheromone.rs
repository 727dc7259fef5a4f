use super::graph::PheromoneGraph;
use super::settings::PheromoneRule;

/// Local, global and bootstrap pheromone updates.
///
/// The edge list is taken once when the engine is built; global evaporation
/// walks it instead of re-enumerating the graph every iteration.
#[derive(Debug, Clone)]
pub struct PheromoneEngine<E> {
    local: PheromoneRule,
    global: PheromoneRule,
    edges: Vec<E>,
}

impl<E: Copy> PheromoneEngine<E> {
    pub fn new<G>(graph: &G, local: PheromoneRule, global: PheromoneRule) -> Self
    where
        G: PheromoneGraph<Edge = E>,
    {
        let mut edges = Vec::new();
        graph.for_each_edge(|edge| edges.push(edge));
        Self { local, global, edges }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Give every edge one local increment so the first ants see a non-zero wheel.
    pub fn bootstrap<G>(&self, graph: &mut G)
    where
        G: PheromoneGraph<Edge = E>,
    {
        for &edge in &self.edges {
            let level = graph.pheromone(edge);
            graph.set_pheromone(edge, level + self.local.increment);
        }
    }

    /// Pull the traversed edge toward `local.increment`.
    pub fn local_update<G>(&self, graph: &mut G, edge: E)
    where
        G: PheromoneGraph<Edge = E>,
    {
        let rate = self.local.evaporation;
        let level = graph.pheromone(edge);
        let updated = (1.0 - rate) * level + rate * self.local.increment;
        graph.set_pheromone(edge, updated.max(0.0));
    }

    /// Evaporate everywhere, then reinforce the all-time best path if there is one.
    pub fn global_update<G>(&self, graph: &mut G, best_path: Option<&[E]>)
    where
        G: PheromoneGraph<Edge = E>,
    {
        let rate = self.global.evaporation;
        for &edge in &self.edges {
            let level = graph.pheromone(edge);
            graph.set_pheromone(edge, (level * (1.0 - rate)).max(0.0));
        }

        let Some(path) = best_path.filter(|path| !path.is_empty()) else {
            return;
        };
        let deposit = rate * (self.global.increment / path.len() as f32);
        for &edge in path {
            let level = graph.pheromone(edge);
            graph.set_pheromone(edge, level + deposit);
        }
    }
}
