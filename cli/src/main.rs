use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mostar_core::{
    build_graph, read_edge_list, read_edge_list_prompted, EdgeList, EdgePolicy, MostarConfig,
    MostarIndexer, VertexCheck,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `u, v imbalance` per edge, then `Mostar Index: <total>`
    Text,
    /// One JSON document with every edge and the total
    Json,
}

/// Compute the Mostar index of an undirected graph read as an edge list.
///
/// Input: vertex count, edge count m, then m lines of `u v`.
#[derive(Parser, Debug)]
#[command(name = "mostar", version, long_about = None)]
struct Cli {
    /// Read the edge list from FILE instead of stdin
    #[arg(long, short, env = "MOSTAR_INPUT")]
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Text, env = "MOSTAR_FORMAT")]
    format: Format,

    /// per-occurrence counts a parallel edge once per input line; distinct counts it once
    #[arg(long, default_value_t = EdgePolicy::PerOccurrence, env = "MOSTAR_EDGE_POLICY")]
    edge_policy: EdgePolicy,

    /// How to treat a declared vertex count that disagrees with the edge list (off, warn, strict)
    #[arg(long, default_value_t = VertexCheck::Warn, env = "MOSTAR_VERTEX_CHECK")]
    vertex_check: VertexCheck,

    /// Reuse one BFS per source vertex across edges
    #[arg(long, env = "MOSTAR_MEMOIZE")]
    memoize: bool,

    /// Print the count prompts to stderr
    #[arg(long)]
    prompt: bool,
}

impl Cli {
    fn config(&self) -> MostarConfig {
        MostarConfig::default()
            .with_edge_policy(self.edge_policy)
            .with_vertex_check(self.vertex_check)
            .with_memoize(self.memoize)
    }
}

fn read_input(cli: &Cli) -> Result<EdgeList> {
    let list = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening input file {}", path.display()))?;
            read_edge_list(BufReader::new(file))
        }
        None if cli.prompt => read_edge_list_prompted(io::stdin().lock(), io::stderr()),
        None => read_edge_list(io::stdin().lock()),
    };
    list.context("reading edge list")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();
    let config = cli.config();

    let list = read_input(&cli)?;
    let graph = build_graph(&list, config.vertex_check).context("building graph")?;
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        declared_vertices = list.declared_vertices,
        declared_edges = list.declared_edges(),
        "graph built"
    );

    let mut indexer = MostarIndexer::new(&graph, config);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.format {
        Format::Text => {
            output::write_text(&mut indexer, &mut out)?;
        }
        Format::Json => {
            let report = indexer.report().context("computing mostar index")?;
            output::write_json(&report, &mut out)?;
        }
    }

    out.flush().context("flushing output")?;
    Ok(())
}
