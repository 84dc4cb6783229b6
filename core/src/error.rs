use thiserror::Error;

use crate::graph::VertexId;

pub type Result<T> = std::result::Result<T, MostarError>;

#[derive(Debug, Error)]
pub enum MostarError {
    /// Malformed or missing input while reading the edge list.
    #[error("invalid input{}: {field}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Input {
        /// 1-based input line, when known.
        line: Option<u64>,
        field: String,
        message: String,
    },

    /// BFS source that is not a vertex of the graph.
    #[error("vertex {0} not found in graph")]
    VertexNotFound(VertexId),

    #[error("vertex {vertex} outside declared range [0, {declared})")]
    VertexOutOfRange { vertex: VertexId, declared: i64 },

    #[error("declared {declared} vertices but edge list names {actual}")]
    VertexCountMismatch { declared: i64, actual: usize },
}
