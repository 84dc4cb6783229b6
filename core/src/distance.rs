use std::collections::VecDeque;
use std::fmt;

use crate::error::{MostarError, Result};
use crate::graph::{Graph, VertexId};

/// Shortest-path distance in edge hops.
///
/// Variant order gives the comparison: every `Hops(_)` sorts below
/// `Unreachable`, and two unreachable distances compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Hops(u32),
    Unreachable,
}

impl Distance {
    pub fn hops(self) -> Option<u32> {
        match self {
            Distance::Hops(n) => Some(n),
            Distance::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, Distance::Hops(_))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Hops(n) => write!(f, "{n}"),
            Distance::Unreachable => f.write_str("inf"),
        }
    }
}

/// Distances from one source to every vertex of a graph, indexed by the
/// graph's dense vertex index.
#[derive(Debug, Clone)]
pub struct DistanceVector<'g> {
    graph: &'g Graph,
    distances: Vec<Distance>,
}

impl<'g> DistanceVector<'g> {
    /// Distance to `id`, or None if `id` is not a vertex of the graph.
    pub fn get(&self, id: VertexId) -> Option<Distance> {
        self.graph.index_of(id).map(|idx| self.distances[idx])
    }

    /// `(vertex, distance)` pairs in the graph's insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Distance)> + '_ {
        self.graph
            .vertices()
            .iter()
            .copied()
            .zip(self.distances.iter().copied())
    }

    /// Number of vertices with a finite distance, the source included.
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_reachable()).count()
    }

    pub(crate) fn as_slice(&self) -> &[Distance] {
        &self.distances
    }
}

/// BFS distances from `source` to every vertex of `graph`.
///
/// Each vertex is enqueued at most once, at its minimum distance, so the
/// run is O(V + E). Vertices outside the source's component stay
/// [`Distance::Unreachable`].
pub fn bfs_distances(graph: &Graph, source: VertexId) -> Result<DistanceVector<'_>> {
    let start = graph
        .index_of(source)
        .ok_or(MostarError::VertexNotFound(source))?;

    let mut distances = vec![Distance::Unreachable; graph.vertex_count()];
    let mut queue: VecDeque<(usize, u32)> = VecDeque::new();

    distances[start] = Distance::Hops(0);
    queue.push_back((start, 0));

    while let Some((current, depth)) = queue.pop_front() {
        for &next in graph.neighbor_indices(current) {
            if distances[next] == Distance::Unreachable {
                distances[next] = Distance::Hops(depth + 1);
                queue.push_back((next, depth + 1));
            }
        }
    }

    Ok(DistanceVector { graph, distances })
}
