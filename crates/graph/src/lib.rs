//! Communicating classes of a finite Markov chain.
//!
//! The chain is a directed weighted [`Graph`] over the states `1..=n`. This
//! crate splits it into strongly connected components with Tarjan's
//! algorithm, then builds the class graph and reduces it to a Hasse diagram
//! from which transient, persistent and absorbing states are read off.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │    graph      │────▶│    tarjan      │────▶│      hasse       │
//!  │ (adjacency)   │     │  (partition)   │     │ (reduced links)  │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use ergo_graph::{Graph, HasseDiagram, strongly_connected_components};
//!
//! let mut graph = Graph::new(4).unwrap();
//! graph.add_edge(1, 2, 1.0).unwrap();
//! graph.add_edge(2, 3, 1.0).unwrap();
//! graph.add_edge(3, 4, 1.0).unwrap();
//! graph.add_edge(4, 1, 1.0).unwrap();
//!
//! let partition = strongly_connected_components(&graph);
//! let hasse = HasseDiagram::build(&graph, &partition).unwrap();
//! assert!(hasse.is_irreducible());
//! assert!(hasse.links().is_empty());
//! ```

pub mod error;
pub mod graph;
pub mod hasse;
pub mod partition;
pub mod period;
pub mod tarjan;

pub use error::GraphError;
pub use graph::{Edge, Graph, Neighbors};
pub use hasse::{ClassKind, HasseDiagram, Link};
pub use partition::{Class, Partition};
pub use period::class_period;
pub use tarjan::{Tarjan, strongly_connected_components};
