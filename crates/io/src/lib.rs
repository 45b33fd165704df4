//! # ergo-io
//!
//! Read Markov chain graphs from whitespace-separated text files and export
//! graphs and Hasse diagrams as Mermaid flowcharts.

mod error;
mod label;
mod mermaid;
mod reader;
mod writer;

pub use error::IoError;
pub use label::vertex_label;
pub use mermaid::{graph_to_mermaid, hasse_to_mermaid};
pub use reader::{parse_graph, read_graph};
pub use writer::{write_graph_mermaid, write_hasse_mermaid};
