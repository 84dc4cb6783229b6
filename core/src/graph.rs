use std::collections::HashMap;

use tracing::warn;

use crate::config::VertexCheck;
use crate::error::{MostarError, Result};
use crate::input::EdgeList;

/// Vertex identifier as it appears in the input edge list.
pub type VertexId = i64;

/// Accumulates edges and produces an immutable [`Graph`].
///
/// Vertices are interned on first reference: `vertices[i]` holds the id
/// and `index` maps it back to `i`, so iteration follows the order in
/// which vertices first appeared in the input.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    vertices: Vec<VertexId>,
    index: HashMap<VertexId, usize>,
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            index: HashMap::with_capacity(vertex_count),
            adjacency: Vec::with_capacity(vertex_count),
            edge_count: 0,
        }
    }

    /// Insert `id` with an empty adjacency list if absent, returning its index.
    fn intern(&mut self, id: VertexId) -> usize {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.vertices.len();
        self.vertices.push(id);
        self.index.insert(id, idx);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Add an undirected edge. Self-loops and parallel edges are kept as given.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) {
        let ui = self.intern(u);
        let vi = self.intern(v);
        self.adjacency[ui].push(vi);
        self.adjacency[vi].push(ui);
        self.edge_count += 1;
    }

    pub fn build(self) -> Graph {
        Graph {
            vertices: self.vertices,
            index: self.index,
            adjacency: self.adjacency,
            edge_count: self.edge_count,
        }
    }
}

/// Undirected, unweighted graph held as insertion-ordered adjacency lists.
///
/// Read-only once built. Edge (u, v) is stored as v in u's list and u in
/// v's list; every vertex referenced by a list is also a key.
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: Vec<VertexId>,
    index: HashMap<VertexId, usize>,
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Build a graph directly from `(u, v)` pairs.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let mut builder = GraphBuilder::new();
        for (u, v) in edges {
            builder.add_edge(u, v);
        }
        builder.build()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of input pairs, parallel edges and self-loops included.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.index.contains_key(&id)
    }

    /// Vertices in first-appearance order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Dense index of a vertex, stable for the lifetime of the graph.
    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub(crate) fn vertex_at(&self, idx: usize) -> VertexId {
        self.vertices[idx]
    }

    pub(crate) fn neighbor_indices(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }

    /// Adjacent vertices in insertion order. Empty for unknown ids.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        let list: &[usize] = match self.index_of(id) {
            Some(idx) => self.adjacency[idx].as_slice(),
            None => &[],
        };
        list.iter().map(move |&n| self.vertices[n])
    }

    pub fn degree(&self, id: VertexId) -> usize {
        self.index_of(id).map(|idx| self.adjacency[idx].len()).unwrap_or(0)
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let vertex_mem = self.vertices.len() * (size_of::<VertexId>() * 2 + size_of::<usize>() + 16);
        let list_mem: usize = self
            .adjacency
            .iter()
            .map(|l| size_of::<Vec<usize>>() + l.len() * size_of::<usize>())
            .sum();

        vertex_mem + list_mem
    }
}

/// Build a graph from parsed input, checking the declared vertex count per `check`.
pub fn build_graph(list: &EdgeList, check: VertexCheck) -> Result<Graph> {
    // The declared count is untrusted; never reserve more than the edges can name.
    let declared = usize::try_from(list.declared_vertices).unwrap_or(0);
    let capacity = declared.min(list.edges.len().saturating_mul(2));
    let mut builder = GraphBuilder::with_capacity(capacity);
    for &(u, v) in &list.edges {
        builder.add_edge(u, v);
    }
    let graph = builder.build();
    check_declared_vertices(&graph, list.declared_vertices, check)?;
    Ok(graph)
}

fn check_declared_vertices(graph: &Graph, declared: i64, check: VertexCheck) -> Result<()> {
    if check == VertexCheck::Off {
        return Ok(());
    }

    let actual = graph.vertex_count();
    let count_matches = usize::try_from(declared).map_or(false, |d| d == actual);

    // A negative count leaves no valid id range; report it as a count mismatch only.
    if declared >= 0 {
        let out_of_range = graph
            .vertices()
            .iter()
            .copied()
            .find(|&v| v < 0 || v >= declared);

        if let Some(vertex) = out_of_range {
            if check == VertexCheck::Strict {
                return Err(MostarError::VertexOutOfRange { vertex, declared });
            }
            warn!(vertex, declared, "vertex id outside declared range");
        }
    }

    if !count_matches {
        if check == VertexCheck::Strict {
            return Err(MostarError::VertexCountMismatch { declared, actual });
        }
        warn!(declared, actual, "declared vertex count differs from vertices in edge list");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(declared: i64, edges: &[(VertexId, VertexId)]) -> EdgeList {
        EdgeList {
            declared_vertices: declared,
            edges: edges.to_vec(),
        }
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let g = Graph::from_edges(vec![(0, 1), (1, 2)]);
        assert_eq!(g.neighbors(0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(g.neighbors(1).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(g.neighbors(2).collect::<Vec<_>>(), vec![1]);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_insertion_order() {
        let g = Graph::from_edges(vec![(5, 3), (9, 5), (1, 3)]);
        assert_eq!(g.vertices(), &[5, 3, 9, 1]);
        assert_eq!(g.index_of(9), Some(2));
    }

    #[test]
    fn test_parallel_edges_kept() {
        let g = Graph::from_edges(vec![(0, 1), (0, 1)]);
        assert_eq!(g.neighbors(0).collect::<Vec<_>>(), vec![1, 1]);
        assert_eq!(g.degree(1), 2);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_self_loop_appears_twice() {
        let g = Graph::from_edges(vec![(4, 4)]);
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.neighbors(4).collect::<Vec<_>>(), vec![4, 4]);
    }

    #[test]
    fn test_unknown_vertex_has_no_neighbors() {
        let g = Graph::from_edges(vec![(0, 1)]);
        assert!(!g.contains(7));
        assert_eq!(g.neighbors(7).count(), 0);
        assert_eq!(g.degree(7), 0);
    }

    #[test]
    fn test_negative_ids() {
        let g = Graph::from_edges(vec![(-1, 2)]);
        assert!(g.contains(-1));
        assert_eq!(g.neighbors(2).collect::<Vec<_>>(), vec![-1]);
    }

    #[test]
    fn test_memory_usage_nonzero() {
        let g = Graph::from_edges(vec![(0, 1)]);
        assert!(g.memory_usage() > 0);
    }

    #[test]
    fn test_build_graph_off_ignores_declared() {
        let g = build_graph(&list(2, &[(0, 10), (10, 20)]), VertexCheck::Off).unwrap();
        assert_eq!(g.vertex_count(), 3);
    }

    #[test]
    fn test_build_graph_warn_continues() {
        let g = build_graph(&list(1, &[(0, 5)]), VertexCheck::Warn).unwrap();
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn test_build_graph_strict_out_of_range() {
        let err = build_graph(&list(3, &[(0, 3)]), VertexCheck::Strict).unwrap_err();
        assert!(matches!(
            err,
            MostarError::VertexOutOfRange { vertex: 3, declared: 3 }
        ));
    }

    #[test]
    fn test_build_graph_strict_negative_out_of_range() {
        let err = build_graph(&list(3, &[(-1, 0)]), VertexCheck::Strict).unwrap_err();
        assert!(matches!(err, MostarError::VertexOutOfRange { vertex: -1, .. }));
    }

    #[test]
    fn test_build_graph_strict_count_mismatch() {
        let err = build_graph(&list(4, &[(0, 1), (1, 2)]), VertexCheck::Strict).unwrap_err();
        assert!(matches!(
            err,
            MostarError::VertexCountMismatch { declared: 4, actual: 3 }
        ));
    }

    #[test]
    fn test_build_graph_strict_accepts_exact() {
        let g = build_graph(&list(3, &[(0, 1), (1, 2)]), VertexCheck::Strict).unwrap();
        assert_eq!(g.vertex_count(), 3);
    }

    #[test]
    fn test_build_graph_huge_declared_count() {
        let g = build_graph(&list(i64::MAX, &[(0, 1)]), VertexCheck::Off).unwrap();
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn test_build_graph_negative_declared() {
        let edges = [(0, 1), (1, 2)];
        let g = build_graph(&list(-1, &edges), VertexCheck::Off).unwrap();
        assert_eq!(g.vertex_count(), 3);
        assert!(build_graph(&list(-1, &edges), VertexCheck::Warn).is_ok());

        let err = build_graph(&list(-1, &edges), VertexCheck::Strict).unwrap_err();
        assert!(matches!(
            err,
            MostarError::VertexCountMismatch { declared: -1, actual: 3 }
        ));
    }
}
