/// Search state of one ant within the current iteration.
///
/// `previous_vertices[steps_taken]` is always `current_vertex`. Entries past
/// `steps_taken` survive a backstep so the ant remembers the vertex it just
/// retreated from.
#[derive(Debug, Clone)]
pub struct Ant<V, E> {
    pub current_vertex: V,
    pub previous_vertices: Vec<V>,
    /// `previous_edges[i]` is the edge that led to `previous_vertices[i + 1]`.
    pub previous_edges: Vec<E>,
    pub steps_taken: usize,
    pub found_destination: bool,
    pub did_backstep: bool,
    pub group_id: usize,
}

impl<V: Copy + Eq, E: Copy> Ant<V, E> {
    pub fn new(source: V, max_steps: usize) -> Self {
        let mut previous_vertices = Vec::with_capacity(max_steps + 1);
        previous_vertices.push(source);
        Self {
            current_vertex: source,
            previous_vertices,
            previous_edges: Vec::with_capacity(max_steps),
            steps_taken: 0,
            found_destination: false,
            did_backstep: false,
            group_id: 0,
        }
    }

    /// Put the ant back on `source` without releasing its buffers.
    pub fn reset(&mut self, source: V) {
        self.current_vertex = source;
        self.previous_vertices.clear();
        self.previous_vertices.push(source);
        self.previous_edges.clear();
        self.steps_taken = 0;
        self.found_destination = false;
        self.did_backstep = false;
        self.group_id = 0;
    }

    /// The vertex occupied one step ago, if any.
    pub fn last_vertex(&self) -> Option<V> {
        self.steps_taken
            .checked_sub(1)
            .map(|i| self.previous_vertices[i])
    }

    /// The vertex the ant just retreated from, when its last move was a backstep.
    pub fn retreated_from(&self) -> Option<V> {
        if self.did_backstep {
            self.previous_vertices.get(self.steps_taken + 1).copied()
        } else {
            None
        }
    }

    pub fn is_excluded(&self, target: V) -> bool {
        self.last_vertex() == Some(target) || self.retreated_from() == Some(target)
    }

    pub fn advance(&mut self, edge: E, target: V) {
        self.steps_taken += 1;
        self.did_backstep = false;
        self.current_vertex = target;
        record(&mut self.previous_vertices, self.steps_taken, target);
        record(&mut self.previous_edges, self.steps_taken - 1, edge);
    }

    /// Retreat to the previous vertex. Returns false when the ant is already at the source.
    pub fn backstep(&mut self) -> bool {
        if self.steps_taken == 0 {
            return false;
        }
        self.steps_taken -= 1;
        self.did_backstep = true;
        self.current_vertex = self.previous_vertices[self.steps_taken];
        true
    }

    /// Vertices from the source to the current vertex.
    pub fn path(&self) -> &[V] {
        &self.previous_vertices[..=self.steps_taken]
    }

    /// Edges traversed from the source to the current vertex.
    pub fn path_edges(&self) -> &[E] {
        &self.previous_edges[..self.steps_taken]
    }
}

fn record<T>(buffer: &mut Vec<T>, index: usize, value: T) {
    if index < buffer.len() {
        buffer[index] = value;
    } else {
        buffer.push(value);
    }
}
