//! mostar-core: Mostar index of undirected, unweighted graphs.
//!
//! For every edge (u, v) the Mostar index counts the vertices strictly
//! closer to u than to v and vice versa, and sums the absolute
//! differences. This crate holds the graph builder, the BFS distance
//! engine and the edge aggregator, plus the line-oriented edge list
//! reader used by the `mostar` binary.

mod config;
mod distance;
mod error;
mod graph;
mod input;
mod mostar;

pub use config::{EdgePolicy, MostarConfig, UnknownSetting, VertexCheck};
pub use distance::{bfs_distances, Distance, DistanceVector};
pub use error::{MostarError, Result};
pub use graph::{build_graph, Graph, GraphBuilder, VertexId};
pub use input::{read_edge_list, read_edge_list_prompted, EdgeList, EDGE_PROMPT, VERTEX_PROMPT};
pub use mostar::{compute_mostar_index, edge_imbalance, EdgeImbalance, MostarIndexer, MostarReport};
