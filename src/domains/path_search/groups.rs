use super::ant::Ant;

/// Partition of the ant population by identical path prefix.
///
/// Groups are rebuilt after every step from the previous step's partition: two
/// ants that shared a group and moved to the same vertex stay together, so no
/// path comparison is needed. The companion scan is quadratic in the size of a
/// group, which keeps the useful population in the tens to low hundreds.
///
/// Group ids come from a counter that only grows within an iteration. The
/// backing vectors keep their capacity across iterations.
#[derive(Debug, Default)]
pub struct PathGroups {
    groups: Vec<Vec<usize>>,
    next: Vec<Vec<usize>>,
    assigned: Vec<usize>,
    allocated: usize,
}

impl PathGroups {
    pub fn with_capacity(ant_count: usize) -> Self {
        let mut groups = Self::default();
        groups.assigned = Vec::with_capacity(ant_count);
        groups.reset(ant_count);
        groups
    }

    /// Every ant back into group 0.
    pub fn reset(&mut self, ant_count: usize) {
        for group in self.groups.iter_mut().chain(self.next.iter_mut()) {
            group.clear();
        }
        if self.groups.is_empty() {
            self.groups.push(Vec::with_capacity(ant_count));
            self.next.push(Vec::with_capacity(ant_count));
        }
        self.groups[0].extend(0..ant_count);
        self.assigned.clear();
        self.assigned.resize(ant_count, 0);
        self.allocated = 1;
    }

    /// Rebuild the partition after a step. `moved[i]` is false for ants that
    /// were already frozen at the destination before this step; they keep
    /// their group.
    pub fn regroup<V: Copy + Eq, E>(&mut self, ants: &mut [Ant<V, E>], moved: &[bool]) {
        let Self { groups, next, assigned, allocated } = self;
        for group in next.iter_mut().take(*allocated) {
            group.clear();
        }

        for index in 0..ants.len() {
            let previous = ants[index].group_id;
            if !moved[index] {
                assigned[index] = previous;
                next[previous].push(index);
                continue;
            }

            let position = ants[index].current_vertex;
            let mut joined = None;
            let mut needs_new_group = false;
            // Members are stored in index order, so the processed companions come first.
            for &companion in groups[previous].iter().take_while(|&&c| c < index) {
                if !moved[companion] {
                    continue;
                }
                if ants[companion].current_vertex == position {
                    joined = Some(assigned[companion]);
                    break;
                }
                needs_new_group = true;
            }

            let target = match joined {
                Some(group) => group,
                None if needs_new_group => {
                    let fresh = *allocated;
                    *allocated += 1;
                    if groups.len() < *allocated {
                        groups.push(Vec::new());
                        next.push(Vec::new());
                    }
                    next[fresh].clear();
                    fresh
                }
                None => previous,
            };
            assigned[index] = target;
            next[target].push(index);
        }

        std::mem::swap(groups, next);
        for (ant, &group) in ants.iter_mut().zip(assigned.iter()) {
            ant.group_id = group;
        }
    }

    /// Group ids handed out this iteration, empty groups included.
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    pub fn members(&self, group: usize) -> &[usize] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Non-empty groups of the current partition.
    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.groups
            .iter()
            .take(self.allocated)
            .filter(|group| !group.is_empty())
            .map(Vec::as_slice)
    }

    pub fn group_count(&self) -> usize {
        self.iter().count()
    }

    /// Normalised Shannon entropy of the partition: 0 when every ant shares
    /// one path, 1 when every ant walked its own. A single ant has entropy 0.
    pub fn entropy(&self, total_ants: usize) -> f32 {
        if total_ants <= 1 {
            return 0.0;
        }
        let total = total_ants as f64;
        let sum: f64 = self
            .iter()
            .map(|group| {
                let popularity = group.len() as f64 / total;
                popularity * popularity.ln()
            })
            .sum();
        let normalized = sum * (1.0 / (1.0 / total).ln());
        normalized.clamp(0.0, 1.0) as f32
    }

    /// True when every ant in `0..ant_count` appears in exactly one group.
    pub fn is_partition_of(&self, ant_count: usize) -> bool {
        let mut seen = vec![false; ant_count];
        for group in self.iter() {
            for &ant in group {
                if ant >= ant_count || seen[ant] {
                    return false;
                }
                seen[ant] = true;
            }
        }
        seen.into_iter().all(|s| s)
    }
}
