//! Directed weighted graph stored as one adjacency list per vertex.

use std::fmt;
use std::iter::Rev;
use std::slice;

use crate::error::GraphError;

/// An outgoing edge, stored on its source vertex's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// 1-based destination vertex.
    pub dst: usize,
    /// Transition weight (conventionally a probability).
    pub weight: f64,
}

/// Iterator over a vertex's outgoing edges, most recently added first.
pub type Neighbors<'a> = Rev<slice::Iter<'a, Edge>>;

/// A directed weighted graph over the vertices `1..=size`.
///
/// Parallel edges are kept as inserted. Neighbors are traversed newest
/// first, so the edge added last is the first one a traversal sees.
///
/// # Example
///
/// ```
/// use ergo_graph::Graph;
///
/// let mut graph = Graph::new(2).unwrap();
/// graph.add_edge(1, 2, 1.0).unwrap();
/// graph.add_edge(2, 1, 1.0).unwrap();
/// assert!(graph.has_edge(1, 2));
/// assert!(!graph.has_edge(1, 1));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Creates a graph with `size` vertices and no edges.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidSize`] if `size` is zero, or
    /// [`GraphError::AllocationFailed`] if the adjacency lists cannot be
    /// reserved.
    pub fn new(size: usize) -> Result<Self, GraphError> {
        if size < 1 {
            return Err(GraphError::InvalidSize { size });
        }
        let mut adjacency = Vec::new();
        adjacency
            .try_reserve_exact(size)
            .map_err(|_| GraphError::AllocationFailed { size })?;
        adjacency.resize_with(size, Vec::new);
        Ok(Self { adjacency })
    }

    /// Returns the zero-size graph.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of vertices.
    pub fn size(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Returns the total number of edges, parallel edges included.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Adds the edge `src -> dst` with the given weight.
    ///
    /// The graph is left untouched when an argument is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if either endpoint is outside
    /// `1..=size`, or [`GraphError::InvalidWeight`] if `weight` is negative
    /// or not finite.
    pub fn add_edge(&mut self, src: usize, dst: usize, weight: f64) -> Result<(), GraphError> {
        let src_index = self.index_of(src)?;
        self.index_of(dst)?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight { src, dst, weight });
        }
        self.adjacency[src_index].push(Edge { dst, weight });
        Ok(())
    }

    /// Returns the outgoing edges of `src`, most recently added first.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if `src` is outside `1..=size`.
    pub fn neighbors(&self, src: usize) -> Result<Neighbors<'_>, GraphError> {
        let index = self.index_of(src)?;
        Ok(self.adjacency[index].iter().rev())
    }

    /// Returns `true` if at least one edge `src -> dst` exists.
    ///
    /// Out-of-range vertices simply have no edges.
    pub fn has_edge(&self, src: usize, dst: usize) -> bool {
        self.neighbors(src)
            .map(|mut edges| edges.any(|e| e.dst == dst))
            .unwrap_or(false)
    }

    /// Returns the sum of the outgoing weights of `src`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if `src` is outside `1..=size`.
    pub fn out_weight(&self, src: usize) -> Result<f64, GraphError> {
        Ok(self.neighbors(src)?.map(|e| e.weight).sum())
    }

    /// Iterates every edge as `(src, edge)`, by increasing source vertex.
    pub fn edges(&self) -> impl Iterator<Item = (usize, &Edge)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(i, list)| list.iter().rev().map(move |e| (i + 1, e)))
    }

    /// Releases every adjacency list and leaves the graph empty.
    ///
    /// Calling this on an already empty graph is a no-op.
    pub fn clear(&mut self) {
        self.adjacency.clear();
        self.adjacency.shrink_to_fit();
    }

    /// Returns the outgoing edges of the vertex stored at `index`.
    pub(crate) fn out_edges(&self, index: usize) -> Neighbors<'_> {
        self.adjacency[index].iter().rev()
    }

    /// Converts a 1-based vertex id to its storage index.
    fn index_of(&self, vertex: usize) -> Result<usize, GraphError> {
        if vertex < 1 || vertex > self.size() {
            return Err(GraphError::VertexOutOfRange {
                vertex,
                size: self.size(),
            });
        }
        Ok(vertex - 1)
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, list) in self.adjacency.iter().enumerate() {
            write!(f, "List of vertex {}: [head @]", i + 1)?;
            for e in list.iter().rev() {
                write!(f, " -> ({}, {:.2})", e.dst, e.weight)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
