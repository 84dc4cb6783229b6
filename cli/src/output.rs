use std::io::Write;

use anyhow::{Context, Result};
use mostar_core::{EdgeImbalance, MostarIndexer, MostarReport};

/// One edge line: `u, v imbalance`.
pub fn edge_line(edge: &EdgeImbalance) -> String {
    format!("{}, {} {}", edge.u, edge.v, edge.imbalance)
}

pub fn total_line(total: u64) -> String {
    format!("Mostar Index: {total}")
}

/// Stream edge lines as they are computed, then the total.
pub fn write_text<W: Write>(indexer: &mut MostarIndexer<'_>, out: &mut W) -> Result<u64> {
    let total = indexer.try_run(|edge| {
        writeln!(out, "{}", edge_line(edge)).context("writing edge output")
    })?;
    writeln!(out, "{}", total_line(total)).context("writing total")?;
    Ok(total)
}

/// Write the whole report as one JSON document.
pub fn write_json<W: Write>(report: &MostarReport, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report).context("serializing report")?;
    writeln!(out).context("writing report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mostar_core::{Graph, MostarConfig};
    use std::io;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_edge_line_format() {
        let edge = EdgeImbalance {
            u: -2,
            v: 7,
            closer_to_u: 4,
            closer_to_v: 1,
            imbalance: 3,
        };
        assert_eq!(edge_line(&edge), "-2, 7 3");
        assert_eq!(total_line(12), "Mostar Index: 12");
    }

    #[test]
    fn test_write_text_path() {
        let g = Graph::from_edges(vec![(0, 1), (1, 2)]);
        let mut indexer = MostarIndexer::new(&g, MostarConfig::default());
        let mut out = Vec::new();
        let total = write_text(&mut indexer, &mut out).unwrap();
        assert_eq!(total, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0, 1 1\n1, 2 1\nMostar Index: 2\n"
        );
    }

    #[test]
    fn test_write_text_empty_graph() {
        let g = Graph::from_edges(Vec::new());
        let mut indexer = MostarIndexer::new(&g, MostarConfig::default());
        let mut out = Vec::new();
        write_text(&mut indexer, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Mostar Index: 0\n");
    }

    #[test]
    fn test_write_json_fields() {
        let g = Graph::from_edges(vec![(0, 1), (1, 2)]);
        let report = MostarIndexer::new(&g, MostarConfig::default()).report().unwrap();
        let mut out = Vec::new();
        write_json(&report, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(value["edges"][0]["u"], 0);
        assert_eq!(value["edges"][0]["closer_to_v"], 2);
        assert_eq!(value["edges"][1]["imbalance"], 1);
    }

    #[test]
    fn test_write_text_stops_on_write_error() {
        let g = Graph::from_edges((0..50).map(|i| (i, i + 1)));
        let mut indexer = MostarIndexer::new(&g, MostarConfig::default());
        let err = write_text(&mut indexer, &mut BrokenPipe).unwrap_err();
        assert!(err.to_string().contains("writing edge output"));
        // Only the first edge was computed
        assert_eq!(indexer.bfs_runs(), 2);
    }
}
