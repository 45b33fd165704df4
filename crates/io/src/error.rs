//! Error types for ergo-io.

use std::path::PathBuf;

use ergo_graph::GraphError;

/// Error type for all fallible operations in the ergo-io crate.
///
/// Covers filesystem failures, malformed graph text, and graph-layer
/// errors raised while building the parsed graph.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps a filesystem failure on a specific path.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Returned when graph text cannot be parsed.
    #[error("line {line}: {reason}")]
    Parse {
        /// 1-based line of the offending token.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the input holds no vertex count at all.
    #[error("missing vertex count")]
    MissingVertexCount,

    /// Wraps an error raised by the graph layer.
    #[error(transparent)]
    Graph(#[from] GraphError),
}
