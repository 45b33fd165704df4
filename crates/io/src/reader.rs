//! Reader for the whitespace-separated text graph format.
//!
//! ```text
//! 4            <- vertex count
//! 1 2 0.5      <- src dst weight
//! 1 1 0.5
//! 2 3 1.0
//! ...
//! ```
//!
//! Tokens may be split over lines in any way; line numbers are only used to
//! point at bad input.

use std::path::Path;

use ergo_graph::Graph;
use tracing::{debug, warn};

use crate::error::IoError;

/// Largest vertex count accepted from a graph file.
const MAX_VERTICES: i64 = 1 << 24;

/// Parses a graph from its text form.
///
/// The first token is the vertex count; every following group of three
/// tokens is an edge `src dst weight`. Edges naming a vertex outside
/// `1..=count` are skipped with a warning.
///
/// # Errors
///
/// Returns [`IoError::MissingVertexCount`] for blank input, or
/// [`IoError::Parse`] for a malformed token, a vertex count below 1 or above
/// 2^24, an incomplete trailing edge, or an invalid weight.
///
/// # Example
///
/// ```
/// let graph = ergo_io::parse_graph("2\n1 2 1.0\n2 1 1.0\n").unwrap();
/// assert_eq!(graph.size(), 2);
/// assert_eq!(graph.edge_count(), 2);
/// ```
pub fn parse_graph(text: &str) -> Result<Graph, IoError> {
    let mut tokens = text
        .lines()
        .enumerate()
        .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t)));

    let (line, token) = tokens.next().ok_or(IoError::MissingVertexCount)?;
    let size: i64 = parse_token(line, token, "vertex count")?;
    if size < 1 {
        return Err(IoError::Parse {
            line,
            reason: format!("vertex count must be >= 1, got {size}"),
        });
    }
    if size > MAX_VERTICES {
        return Err(IoError::Parse {
            line,
            reason: format!("vertex count {size} exceeds the limit of {MAX_VERTICES}"),
        });
    }
    let mut graph = Graph::new(size as usize)?;

    let mut skipped = 0usize;
    while let Some((line, src)) = tokens.next() {
        let (Some((_, dst)), Some((_, weight))) = (tokens.next(), tokens.next()) else {
            return Err(IoError::Parse {
                line,
                reason: "incomplete edge: expected 'src dst weight'".to_string(),
            });
        };
        let src: i64 = parse_token(line, src, "source vertex")?;
        let dst: i64 = parse_token(line, dst, "destination vertex")?;
        let weight: f64 = parse_token(line, weight, "weight")?;

        if src < 1 || dst < 1 || src > size || dst > size {
            warn!(line, src, dst, size, "edge with out-of-range vertex ignored");
            skipped += 1;
            continue;
        }
        graph
            .add_edge(src as usize, dst as usize, weight)
            .map_err(|e| IoError::Parse {
                line,
                reason: e.to_string(),
            })?;
    }

    debug!(
        n_vertices = graph.size(),
        n_edges = graph.edge_count(),
        skipped,
        "graph parsed"
    );
    Ok(graph)
}

/// Reads and parses a graph file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist,
/// [`IoError::Io`] if it cannot be read, or any error of [`parse_graph`].
pub fn read_graph(path: &Path) -> Result<Graph, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_graph(&text)
}

fn parse_token<T: std::str::FromStr>(line: usize, token: &str, what: &str) -> Result<T, IoError> {
    token.parse().map_err(|_| IoError::Parse {
        line,
        reason: format!("invalid {what} '{token}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vertex_count_and_edges() {
        let g = parse_graph("3\n1 2 0.5\n1 3 0.5\n2 2 1\n3 3 1\n").unwrap();
        assert_eq!(g.size(), 3);
        assert_eq!(g.edge_count(), 4);
        assert!(g.has_edge(1, 3));
        assert!((g.out_weight(1).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tokens_may_span_lines() {
        let g = parse_graph("2 1\n2\n0.25 2 1 1.0").unwrap();
        assert_eq!(g.edge_count(), 2);
        assert!(g.has_edge(1, 2));
        assert!(g.has_edge(2, 1));
    }

    #[test]
    fn skips_out_of_range_edges() {
        let g = parse_graph("2\n1 2 1.0\n1 3 0.5\n0 1 0.5\n-1 2 0.1\n2 1 1.0\n").unwrap();
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn blank_input() {
        assert!(matches!(
            parse_graph("  \n\n"),
            Err(IoError::MissingVertexCount)
        ));
    }

    #[test]
    fn rejects_bad_vertex_count() {
        let err = parse_graph("zero\n").unwrap_err();
        assert_eq!(err.to_string(), "line 1: invalid vertex count 'zero'");
        let err = parse_graph("\n0\n").unwrap_err();
        assert_eq!(err.to_string(), "line 2: vertex count must be >= 1, got 0");
    }

    #[test]
    fn rejects_oversized_vertex_count() {
        let err = parse_graph("9223372036854775807\n1 1 1.0\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1: vertex count 9223372036854775807 exceeds the limit of 16777216"
        );
        let err = parse_graph("\n16777217\n").unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 2, .. }));
    }

    #[test]
    fn reports_line_of_bad_token() {
        let err = parse_graph("2\n1 2 0.5\n2 x 1.0\n").unwrap_err();
        assert_eq!(err.to_string(), "line 3: invalid destination vertex 'x'");
    }

    #[test]
    fn rejects_incomplete_edge() {
        let err = parse_graph("2\n1 2 1.0\n2 1\n").unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 3, .. }));
    }

    #[test]
    fn rejects_negative_weight() {
        let err = parse_graph("2\n1 2 -0.5\n").unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 2, .. }));
        assert!(err.to_string().contains("invalid weight"));
    }

    #[test]
    fn missing_file() {
        let err = read_graph(Path::new("/nonexistent/ergo/graph.txt")).unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
