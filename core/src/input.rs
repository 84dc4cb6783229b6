//! Line-oriented edge list input.
//!
//! ```text
//! <vertex count>
//! <edge count m>
//! u v            (m lines)
//! ```
//!
//! Every line must hold exactly the expected integers. Anything after the
//! m-th edge line is left unread.

use std::io::{BufRead, Write};

use tracing::debug;
use whiteread::reader::Error as ReaderError;
use whiteread::Reader;

use crate::error::{MostarError, Result};
use crate::graph::VertexId;

pub const VERTEX_PROMPT: &str = "Enter number of nodes: ";
pub const EDGE_PROMPT: &str = "Enter number of edges: ";

/// Parsed input: declared vertex count and the edge pairs in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    /// As written in the input. Only `VertexCheck` looks at it, so any
    /// integer is accepted here.
    pub declared_vertices: i64,
    pub edges: Vec<(VertexId, VertexId)>,
}

impl EdgeList {
    pub fn declared_edges(&self) -> usize {
        self.edges.len()
    }
}

/// Read an edge list from `input`.
pub fn read_edge_list<R: BufRead>(input: R) -> Result<EdgeList> {
    read_lines(Reader::new(input), None)
}

/// Read an edge list, writing the count prompts to `prompts` first.
pub fn read_edge_list_prompted<R: BufRead, W: Write>(input: R, mut prompts: W) -> Result<EdgeList> {
    let prompts: &mut dyn Write = &mut prompts;
    read_lines(Reader::new(input), Some(prompts))
}

fn read_lines<R: BufRead>(mut reader: Reader<R>, mut prompts: Option<&mut dyn Write>) -> Result<EdgeList> {
    prompt(&mut prompts, VERTEX_PROMPT)?;
    let declared_vertices = reader
        .line::<i64>()
        .map_err(|e| input_error("vertex count", e))?;

    prompt(&mut prompts, EDGE_PROMPT)?;
    let edge_count = reader
        .line::<usize>()
        .map_err(|e| input_error("edge count", e))?;

    // Untrusted count; grow past this on demand.
    let mut edges = Vec::with_capacity(edge_count.min(1 << 16));
    for i in 1..=edge_count {
        let edge = reader
            .line::<(VertexId, VertexId)>()
            .map_err(|e| input_error(&format!("edge {i}"), e))?;
        edges.push(edge);
    }

    debug!(declared_vertices, edges = edges.len(), "edge list read");
    Ok(EdgeList {
        declared_vertices,
        edges,
    })
}

fn prompt(prompts: &mut Option<&mut dyn Write>, text: &str) -> Result<()> {
    if let Some(out) = prompts.as_mut() {
        out.write_all(text.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| MostarError::Input {
                line: None,
                field: "prompt".to_string(),
                message: e.to_string(),
            })?;
    }
    Ok(())
}

/// Location-tagged reader error to `MostarError::Input`. An I/O failure
/// carries no line.
fn input_error(field: &str, err: ReaderError) -> MostarError {
    let line = err.location().map(|(row, _col)| row);
    MostarError::Input {
        line,
        field: field.to_string(),
        message: err.into_inner().to_string(),
    }
}
