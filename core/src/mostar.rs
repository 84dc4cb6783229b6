use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{EdgePolicy, MostarConfig};
use crate::distance::{bfs_distances, DistanceVector};
use crate::error::{MostarError, Result};
use crate::graph::{Graph, VertexId};

/// Vertex counts and imbalance for one processed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeImbalance {
    pub u: VertexId,
    pub v: VertexId,
    /// Vertices strictly closer to `u` than to `v`.
    pub closer_to_u: usize,
    /// Vertices strictly closer to `v` than to `u`.
    pub closer_to_v: usize,
    pub imbalance: usize,
}

/// Every processed edge in processing order, plus the Mostar index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MostarReport {
    pub edges: Vec<EdgeImbalance>,
    pub total: u64,
}

/// Count vertices strictly closer to each source.
///
/// Returns `(closer to from_u's source, closer to from_v's source)`.
/// Ties, including two unreachable distances, count for neither side.
pub fn edge_imbalance(from_u: &DistanceVector<'_>, from_v: &DistanceVector<'_>) -> (usize, usize) {
    let mut closer_to_u = 0;
    let mut closer_to_v = 0;
    for (du, dv) in from_u.as_slice().iter().zip(from_v.as_slice()) {
        match du.cmp(dv) {
            Ordering::Less => closer_to_u += 1,
            Ordering::Greater => closer_to_v += 1,
            Ordering::Equal => {}
        }
    }
    (closer_to_u, closer_to_v)
}

/// Mostar index of `graph` with the default configuration.
pub fn compute_mostar_index(graph: &Graph) -> Result<u64> {
    MostarIndexer::new(graph, MostarConfig::default()).run(|_| {})
}

/// Walks the edges of a graph and accumulates the Mostar index.
///
/// Edges are visited as adjacency entries: for each vertex `u` in
/// insertion order, each neighbor `v` in list order, keeping only
/// `u < v`. Each qualifying edge needs a BFS from both endpoints; with
/// `memoize` off these are recomputed for every edge.
pub struct MostarIndexer<'g> {
    graph: &'g Graph,
    config: MostarConfig,
    cache: HashMap<VertexId, DistanceVector<'g>>,
    bfs_runs: usize,
}

impl<'g> MostarIndexer<'g> {
    pub fn new(graph: &'g Graph, config: MostarConfig) -> Self {
        Self {
            graph,
            config,
            cache: HashMap::new(),
            bfs_runs: 0,
        }
    }

    pub fn config(&self) -> &MostarConfig {
        &self.config
    }

    /// BFS traversals performed so far by this indexer.
    pub fn bfs_runs(&self) -> usize {
        self.bfs_runs
    }

    /// Process every qualifying edge, handing each result to `sink` in
    /// processing order. Returns the Mostar index.
    pub fn run<F>(&mut self, mut sink: F) -> Result<u64>
    where
        F: FnMut(&EdgeImbalance),
    {
        self.try_run(|edge| {
            sink(edge);
            Ok(())
        })
    }

    /// Like [`run`](Self::run), but stops at the first error `sink` returns.
    pub fn try_run<F, E>(&mut self, mut sink: F) -> std::result::Result<u64, E>
    where
        F: FnMut(&EdgeImbalance) -> std::result::Result<(), E>,
        E: From<MostarError>,
    {
        let graph = self.graph;
        let mut total: u64 = 0;
        let mut processed = 0usize;
        let mut seen: HashSet<(VertexId, VertexId)> = HashSet::new();

        for (ui, &u) in graph.vertices().iter().enumerate() {
            for &vi in graph.neighbor_indices(ui) {
                let v = graph.vertex_at(vi);
                if u >= v {
                    continue;
                }
                if self.config.edge_policy == EdgePolicy::Distinct && !seen.insert((u, v)) {
                    continue;
                }

                let (closer_to_u, closer_to_v) = self.compare_endpoints(u, v)?;
                let edge = EdgeImbalance {
                    u,
                    v,
                    closer_to_u,
                    closer_to_v,
                    imbalance: closer_to_u.abs_diff(closer_to_v),
                };
                debug!(u, v, closer_to_u, closer_to_v, imbalance = edge.imbalance, "edge");

                total += edge.imbalance as u64;
                processed += 1;
                sink(&edge)?;
            }
        }

        info!(
            edges = processed,
            bfs_runs = self.bfs_runs,
            memoize = self.config.memoize,
            total,
            "mostar index computed"
        );
        Ok(total)
    }

    /// Run and collect every edge record.
    pub fn report(&mut self) -> Result<MostarReport> {
        let mut edges = Vec::new();
        let total = self.run(|edge| edges.push(*edge))?;
        Ok(MostarReport { edges, total })
    }

    fn compare_endpoints(&mut self, u: VertexId, v: VertexId) -> Result<(usize, usize)> {
        if !self.config.memoize {
            let from_u = bfs_distances(self.graph, u)?;
            let from_v = bfs_distances(self.graph, v)?;
            self.bfs_runs += 2;
            return Ok(edge_imbalance(&from_u, &from_v));
        }

        self.ensure_cached(u)?;
        self.ensure_cached(v)?;
        let from_u = self.cache.get(&u).ok_or(MostarError::VertexNotFound(u))?;
        let from_v = self.cache.get(&v).ok_or(MostarError::VertexNotFound(v))?;
        Ok(edge_imbalance(from_u, from_v))
    }

    fn ensure_cached(&mut self, source: VertexId) -> Result<()> {
        if !self.cache.contains_key(&source) {
            let distances = bfs_distances(self.graph, source)?;
            self.bfs_runs += 1;
            self.cache.insert(source, distances);
        }
        Ok(())
    }
}
