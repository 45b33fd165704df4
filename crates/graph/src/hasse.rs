//! Quotient graph of communicating classes and its Hasse diagram.
//!
//! # Construction
//!
//! ```text
//!  graph edges ──▶ class links (dedup) ──▶ transitive reduction ──▶ classify
//!   u -> w          (C(u), C(w))            drop (a,b) when           persistent /
//!                   if C(u) != C(w)         (a,x) and (x,b) exist     transient
//! ```

use std::fmt;

use tracing::debug;

use crate::error::GraphError;
use crate::graph::Graph;
use crate::partition::Partition;

/// A directed link between two distinct classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link {
    /// Source class id.
    pub src: usize,
    /// Destination class id.
    pub dst: usize,
}

/// Long-run nature of a communicating class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// The chain eventually leaves the class for good.
    Transient,
    /// Closed class: no transition leaves it.
    Persistent,
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transient => f.write_str("transient"),
            Self::Persistent => f.write_str("persistent"),
        }
    }
}

/// Class graph of a partition with transitively implied links removed.
///
/// The diagram borrows the partition it was built from.
///
/// # Example
///
/// ```
/// use ergo_graph::{ClassKind, Graph, HasseDiagram, strongly_connected_components};
///
/// let mut graph = Graph::new(3).unwrap();
/// graph.add_edge(1, 2, 0.5).unwrap();
/// graph.add_edge(1, 3, 0.5).unwrap();
/// graph.add_edge(2, 3, 1.0).unwrap();
/// graph.add_edge(3, 3, 1.0).unwrap();
///
/// let partition = strongly_connected_components(&graph);
/// let hasse = HasseDiagram::build(&graph, &partition).unwrap();
///
/// // 1 -> 3 is implied by 1 -> 2 -> 3
/// assert_eq!(hasse.links().len(), 2);
/// assert!(hasse.is_absorbing_state(3).unwrap());
/// let c1 = hasse.class_of(1).unwrap();
/// assert_eq!(hasse.class_kind(c1).unwrap(), ClassKind::Transient);
/// ```
#[derive(Debug, Clone)]
pub struct HasseDiagram<'p> {
    partition: &'p Partition,
    vertex_classes: Vec<usize>,
    links: Vec<Link>,
}

impl<'p> HasseDiagram<'p> {
    /// Creates a diagram with the vertex-to-class table but no links yet.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UncoveredVertex`] or
    /// [`GraphError::VertexOutOfRange`] if `partition` does not cover the
    /// `size` vertices exactly.
    pub fn new(partition: &'p Partition, size: usize) -> Result<Self, GraphError> {
        Ok(Self {
            partition,
            vertex_classes: partition.vertex_classes(size)?,
            links: Vec::new(),
        })
    }

    /// Builds the reduced class graph of `graph` under `partition`.
    ///
    /// # Errors
    ///
    /// Returns an error if `partition` does not cover every vertex of
    /// `graph` exactly once.
    #[tracing::instrument(skip_all, fields(n_vertices = graph.size(), n_classes = partition.len()))]
    pub fn build(graph: &Graph, partition: &'p Partition) -> Result<Self, GraphError> {
        let mut hasse = Self::new(partition, graph.size())?;
        for (src, edge) in graph.edges() {
            let a = hasse.vertex_classes[src - 1];
            let b = hasse.vertex_classes[edge.dst - 1];
            hasse.add_link(a, b)?;
        }
        let before = hasse.links.len();
        hasse.remove_transitive_links();
        debug!(
            links = hasse.links.len(),
            removed = before - hasse.links.len(),
            "hasse diagram built"
        );
        Ok(hasse)
    }

    /// Adds the link `src -> dst` unless it is a self-loop or already present.
    ///
    /// Returns `true` if the link was inserted.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ClassOutOfRange`] if either class is unknown; the
    /// diagram is left unchanged.
    pub fn add_link(&mut self, src: usize, dst: usize) -> Result<bool, GraphError> {
        self.partition.class(src)?;
        self.partition.class(dst)?;
        if src == dst || self.link_exists(src, dst) {
            return Ok(false);
        }
        self.links.push(Link { src, dst });
        Ok(true)
    }

    /// Returns `true` if the link `src -> dst` is present.
    pub fn link_exists(&self, src: usize, dst: usize) -> bool {
        self.links.contains(&Link { src, dst })
    }

    /// Removes every link `(a, b)` for which links `(a, x)` and `(x, b)` exist.
    ///
    /// Passes repeat until one removes nothing. Removal swaps the last link
    /// into the freed slot, so link order is not preserved.
    pub fn remove_transitive_links(&mut self) {
        loop {
            let mut removed = false;
            let mut i = 0;
            while i < self.links.len() {
                if self.is_redundant(i) {
                    let link = self.links.swap_remove(i);
                    debug!(src = link.src, dst = link.dst, "transitive link removed");
                    removed = true;
                } else {
                    i += 1;
                }
            }
            if !removed {
                break;
            }
        }
    }

    /// Returns `true` if some other class bridges the link at `index`.
    fn is_redundant(&self, index: usize) -> bool {
        let Link { src, dst } = self.links[index];
        self.links.iter().enumerate().any(|(j, first)| {
            j != index
                && first.src == src
                && self
                    .links
                    .iter()
                    .enumerate()
                    .any(|(k, second)| k != index && second.src == first.dst && second.dst == dst)
        })
    }

    /// Returns the remaining links.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns the partition the diagram was built from.
    pub fn partition(&self) -> &'p Partition {
        self.partition
    }

    /// Returns the vertex-to-class table (entry `v - 1` is the class of `v`).
    pub fn vertex_classes(&self) -> &[usize] {
        &self.vertex_classes
    }

    /// Returns the class id of a 1-based vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if `vertex` is unknown.
    pub fn class_of(&self, vertex: usize) -> Result<usize, GraphError> {
        if vertex < 1 || vertex > self.vertex_classes.len() {
            return Err(GraphError::VertexOutOfRange {
                vertex,
                size: self.vertex_classes.len(),
            });
        }
        Ok(self.vertex_classes[vertex - 1])
    }

    /// Returns `true` if the class has no outgoing link.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ClassOutOfRange`] if `class` is unknown.
    pub fn is_persistent(&self, class: usize) -> Result<bool, GraphError> {
        self.partition.class(class)?;
        Ok(!self.links.iter().any(|l| l.src == class))
    }

    /// Returns whether the class is transient or persistent.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ClassOutOfRange`] if `class` is unknown.
    pub fn class_kind(&self, class: usize) -> Result<ClassKind, GraphError> {
        Ok(if self.is_persistent(class)? {
            ClassKind::Persistent
        } else {
            ClassKind::Transient
        })
    }

    /// Returns the kind of every class, indexed by class id.
    pub fn class_kinds(&self) -> Vec<ClassKind> {
        let mut kinds = vec![ClassKind::Persistent; self.partition.len()];
        for link in &self.links {
            kinds[link.src] = ClassKind::Transient;
        }
        kinds
    }

    /// Returns `true` if the vertex alone forms a persistent class.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] if `vertex` is unknown.
    pub fn is_absorbing_state(&self, vertex: usize) -> Result<bool, GraphError> {
        let class = self.class_of(vertex)?;
        Ok(self.partition.class(class)?.len() == 1 && self.is_persistent(class)?)
    }

    /// Returns the absorbing states in increasing order.
    pub fn absorbing_states(&self) -> Vec<usize> {
        let kinds = self.class_kinds();
        let mut states: Vec<usize> = self
            .partition
            .iter()
            .filter(|c| c.len() == 1 && kinds[c.id()] == ClassKind::Persistent)
            .map(|c| c.members()[0])
            .collect();
        states.sort_unstable();
        states
    }

    /// Returns `true` if the whole chain is a single class.
    pub fn is_irreducible(&self) -> bool {
        self.partition.len() == 1
    }
}

impl fmt::Display for HasseDiagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for link in &self.links {
            writeln!(f, "C{} -> C{}", link.src + 1, link.dst + 1)?;
        }
        Ok(())
    }
}
