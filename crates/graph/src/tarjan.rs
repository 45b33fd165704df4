//! Tarjan's strongly connected components over a [`Graph`].
//!
//! The depth-first search runs on an explicit frame stack instead of the call
//! stack, so graphs with long chains of vertices cannot overflow it. Each
//! frame keeps the vertex and its pending neighbor iterator; low-link updates
//! happen in the same order a recursive implementation would perform them.

use tracing::{debug, trace};

use crate::error::GraphError;
use crate::graph::{Graph, Neighbors};
use crate::partition::{Class, Partition};

/// Per-vertex bookkeeping for one SCC computation.
#[derive(Debug, Clone, Copy, Default)]
struct TarjanVertex {
    /// Visit order; `None` while unvisited.
    discovery: Option<usize>,
    low_link: usize,
    on_stack: bool,
}

/// One pending DFS call: a vertex and the neighbors it has yet to inspect.
struct Frame<'g> {
    vertex: usize,
    edges: Neighbors<'g>,
}

/// Incremental Tarjan search over a borrowed graph.
///
/// Most callers want [`strongly_connected_components`]. This type is useful
/// when the search should start from chosen vertices only: classes reachable
/// from the visited roots are collected, the rest of the graph is left
/// untouched.
///
/// # Example
///
/// ```
/// use ergo_graph::{Graph, Tarjan};
///
/// let mut graph = Graph::new(3).unwrap();
/// graph.add_edge(1, 2, 1.0).unwrap();
/// graph.add_edge(2, 1, 1.0).unwrap();
///
/// let mut tarjan = Tarjan::new(&graph);
/// tarjan.visit(1).unwrap();
/// assert!(!tarjan.is_visited(3).unwrap());
/// let partition = tarjan.into_partition();
/// assert_eq!(partition.len(), 1);
/// assert_eq!(partition.class(0).unwrap().members(), &[1, 2]);
/// ```
pub struct Tarjan<'g> {
    graph: &'g Graph,
    vertices: Vec<TarjanVertex>,
    stack: Vec<usize>,
    counter: usize,
    partition: Partition,
}

impl<'g> Tarjan<'g> {
    /// Prepares a search with every vertex unvisited.
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            vertices: vec![TarjanVertex::default(); graph.size()],
            stack: Vec::with_capacity(graph.size()),
            counter: 0,
            partition: Partition::new(),
        }
    }

    /// Returns `true` if `vertex` has already been reached.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if `vertex` is outside
    /// `1..=size`.
    pub fn is_visited(&self, vertex: usize) -> Result<bool, GraphError> {
        let index = self.index_of(vertex)?;
        Ok(self.vertices[index].discovery.is_some())
    }

    /// Runs a DFS visit rooted at `vertex`, closing every class it completes.
    ///
    /// Visiting an already visited vertex does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if `vertex` is outside
    /// `1..=size`; no state changes in that case.
    pub fn visit(&mut self, vertex: usize) -> Result<(), GraphError> {
        let index = self.index_of(vertex)?;
        if self.vertices[index].discovery.is_none() {
            self.strong_connect(index);
        }
        Ok(())
    }

    /// Finishes the search and returns the classes found so far.
    pub fn into_partition(self) -> Partition {
        self.partition
    }

    fn index_of(&self, vertex: usize) -> Result<usize, GraphError> {
        if vertex < 1 || vertex > self.vertices.len() {
            return Err(GraphError::VertexOutOfRange {
                vertex,
                size: self.vertices.len(),
            });
        }
        Ok(vertex - 1)
    }

    /// Assigns discovery and low-link numbers and pushes the vertex.
    fn open(&mut self, index: usize) -> Frame<'g> {
        let graph = self.graph;
        let state = &mut self.vertices[index];
        state.discovery = Some(self.counter);
        state.low_link = self.counter;
        state.on_stack = true;
        self.counter += 1;
        self.stack.push(index);
        trace!(vertex = index + 1, discovery = state.low_link, "visit");
        Frame {
            vertex: index,
            edges: graph.out_edges(index),
        }
    }

    fn strong_connect(&mut self, root: usize) {
        let mut frames = vec![self.open(root)];

        while let Some(frame) = frames.last_mut() {
            let v = frame.vertex;
            match frame.edges.next() {
                Some(edge) => {
                    let w = edge.dst - 1;
                    let target = self.vertices[w];
                    match target.discovery {
                        None => {
                            let next = self.open(w);
                            frames.push(next);
                        }
                        Some(discovery) if target.on_stack => {
                            let low = &mut self.vertices[v].low_link;
                            *low = (*low).min(discovery);
                        }
                        // Already closed into another class.
                        Some(_) => {}
                    }
                }
                None => {
                    frames.pop();
                    let state = self.vertices[v];
                    if Some(state.low_link) == state.discovery {
                        self.close_class(v);
                    }
                    if let Some(parent) = frames.last() {
                        let low = &mut self.vertices[parent.vertex].low_link;
                        *low = (*low).min(state.low_link);
                    }
                }
            }
        }
    }

    /// Pops the stack down to and including `root` into a new class.
    fn close_class(&mut self, root: usize) {
        let mut members = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.vertices[w].on_stack = false;
            members.push(w + 1);
            if w == root {
                break;
            }
        }
        let class = Class::with_members(self.partition.next_class_id(), members);
        debug!(
            class = class.id(),
            root = root + 1,
            size = class.len(),
            "class closed"
        );
        self.partition.add_class(class);
    }
}

/// Partitions the graph into its strongly connected components.
///
/// Roots are tried in increasing vertex order. Classes are numbered in the
/// order they close, which is a reverse topological order of the class
/// graph: a class never has a link towards a class with a larger id.
///
/// # Example
///
/// ```
/// use ergo_graph::{Graph, strongly_connected_components};
///
/// let mut graph = Graph::new(3).unwrap();
/// graph.add_edge(1, 2, 0.5).unwrap();
/// graph.add_edge(1, 3, 0.5).unwrap();
/// graph.add_edge(2, 1, 1.0).unwrap();
/// graph.add_edge(3, 3, 1.0).unwrap();
///
/// let partition = strongly_connected_components(&graph);
/// assert_eq!(partition.len(), 2);
/// assert_eq!(partition.class(0).unwrap().members(), &[3]);
/// assert_eq!(partition.class(1).unwrap().members(), &[1, 2]);
/// ```
#[tracing::instrument(skip_all, fields(n_vertices = graph.size()))]
pub fn strongly_connected_components(graph: &Graph) -> Partition {
    let mut tarjan = Tarjan::new(graph);
    for index in 0..graph.size() {
        if tarjan.vertices[index].discovery.is_none() {
            tarjan.strong_connect(index);
        }
    }
    let partition = tarjan.into_partition();
    debug!(n_classes = partition.len(), "tarjan finished");
    partition
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_from(size: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::new(size).unwrap();
        for &(s, d) in edges {
            g.add_edge(s, d, 1.0).unwrap();
        }
        g
    }

    fn sorted_members(p: &Partition) -> Vec<Vec<usize>> {
        let mut out: Vec<Vec<usize>> = p.iter().map(|c| c.members().to_vec()).collect();
        out.sort();
        out
    }

    #[test]
    fn four_cycle_is_one_class() {
        let g = graph_from(4, &[(1, 2), (2, 3), (3, 4), (4, 1)]);
        let p = strongly_connected_components(&g);
        assert_eq!(sorted_members(&p), vec![vec![1, 2, 3, 4]]);
    }

    #[test]
    fn isolated_vertices_are_singletons() {
        let g = graph_from(3, &[]);
        let p = strongly_connected_components(&g);
        assert_eq!(sorted_members(&p), vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn empty_graph_has_no_class() {
        let p = strongly_connected_components(&Graph::empty());
        assert!(p.is_empty());
    }

    #[test]
    fn chain_closes_sink_first() {
        let g = graph_from(3, &[(1, 2), (2, 3)]);
        let p = strongly_connected_components(&g);
        let order: Vec<Vec<usize>> = p.iter().map(|c| c.members().to_vec()).collect();
        assert_eq!(order, vec![vec![3], vec![2], vec![1]]);
    }

    #[test]
    fn two_cycles_joined_by_bridge() {
        // {1,2} -> {3,4}
        let g = graph_from(4, &[(1, 2), (2, 1), (2, 3), (3, 4), (4, 3)]);
        let p = strongly_connected_components(&g);
        assert_eq!(sorted_members(&p), vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(p.class(0).unwrap().members(), &[3, 4]);
    }

    #[test]
    fn cross_edge_to_closed_class_is_ignored() {
        // 1 -> 2, 1 -> 3, 3 -> 2: vertex 2 closes before 3 sees it.
        let g = graph_from(3, &[(1, 2), (1, 3), (3, 2)]);
        let p = strongly_connected_components(&g);
        assert_eq!(sorted_members(&p), vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn nested_back_edges() {
        // 1 -> 2 -> 3 -> 1, 3 -> 4 -> 5 -> 4, 5 -> 2
        let g = graph_from(5, &[(1, 2), (2, 3), (3, 1), (3, 4), (4, 5), (5, 4), (5, 2)]);
        let p = strongly_connected_components(&g);
        assert_eq!(sorted_members(&p), vec![vec![1, 2, 3, 4, 5]]);
    }

    #[test]
    fn long_chain_does_not_overflow() {
        let n = 200_000;
        let mut g = Graph::new(n).unwrap();
        for v in 1..n {
            g.add_edge(v, v + 1, 1.0).unwrap();
        }
        g.add_edge(n, 1, 1.0).unwrap();
        let p = strongly_connected_components(&g);
        assert_eq!(p.len(), 1);
        assert_eq!(p.class(0).unwrap().len(), n);
    }

    #[test]
    fn visit_rejects_out_of_range() {
        let g = graph_from(2, &[(1, 2)]);
        let mut t = Tarjan::new(&g);
        assert_eq!(
            t.visit(3),
            Err(GraphError::VertexOutOfRange { vertex: 3, size: 2 })
        );
        assert_eq!(
            t.visit(0),
            Err(GraphError::VertexOutOfRange { vertex: 0, size: 2 })
        );
        assert!(!t.is_visited(1).unwrap());
        assert!(t.into_partition().is_empty());
    }

    #[test]
    fn visit_from_chosen_root_only() {
        let g = graph_from(4, &[(2, 3), (3, 2), (1, 2)]);
        let mut t = Tarjan::new(&g);
        t.visit(2).unwrap();
        assert!(t.is_visited(3).unwrap());
        assert!(!t.is_visited(1).unwrap());
        // second visit of the same root is a no-op
        t.visit(3).unwrap();
        let p = t.into_partition();
        assert_eq!(sorted_members(&p), vec![vec![2, 3]]);
    }

    #[test]
    fn rerun_is_deterministic() {
        let g = graph_from(6, &[(1, 2), (2, 1), (2, 3), (4, 5), (5, 6), (6, 4), (3, 6)]);
        let a = strongly_connected_components(&g);
        let b = strongly_connected_components(&g);
        assert_eq!(a, b);
    }
}
