//! File output for the Mermaid renderings.

use std::path::Path;

use ergo_graph::{Graph, HasseDiagram};
use tracing::info;

use crate::error::IoError;
use crate::mermaid::{graph_to_mermaid, hasse_to_mermaid};

/// Writes [`graph_to_mermaid`] output to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be written.
pub fn write_graph_mermaid(graph: &Graph, path: &Path) -> Result<(), IoError> {
    write_text(path, &graph_to_mermaid(graph))?;
    info!(path = %path.display(), n_vertices = graph.size(), "wrote graph flowchart");
    Ok(())
}

/// Writes [`hasse_to_mermaid`] output to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be written.
pub fn write_hasse_mermaid(hasse: &HasseDiagram<'_>, path: &Path) -> Result<(), IoError> {
    write_text(path, &hasse_to_mermaid(hasse))?;
    info!(
        path = %path.display(),
        n_classes = hasse.partition().len(),
        n_links = hasse.links().len(),
        "wrote hasse flowchart"
    );
    Ok(())
}

fn write_text(path: &Path, text: &str) -> Result<(), IoError> {
    std::fs::write(path, text).map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })
}
