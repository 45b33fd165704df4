//! Error types for the ergo-graph crate.

/// Error type for all fallible operations in the ergo-graph crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Returned when a graph is created with fewer than one vertex.
    #[error("invalid graph size: {size} (must be >= 1)")]
    InvalidSize {
        /// The requested number of vertices.
        size: usize,
    },

    /// Returned when a vertex id is outside `1..=size`.
    #[error("vertex {vertex} out of range [1..{size}]")]
    VertexOutOfRange {
        /// The offending 1-based vertex id.
        vertex: usize,
        /// Number of vertices in the graph.
        size: usize,
    },

    /// Returned when an edge weight is negative or not finite.
    #[error("invalid weight for edge {src} -> {dst}: {weight} (must be finite and >= 0)")]
    InvalidWeight {
        /// Source vertex.
        src: usize,
        /// Destination vertex.
        dst: usize,
        /// The rejected weight.
        weight: f64,
    },

    /// Returned when a class id does not exist in the partition.
    #[error("class {class} out of range (partition has {n_classes} classes)")]
    ClassOutOfRange {
        /// The offending class id.
        class: usize,
        /// Number of classes in the partition.
        n_classes: usize,
    },

    /// Returned when a partition does not assign a vertex to any class.
    #[error("vertex {vertex} is not covered by the partition")]
    UncoveredVertex {
        /// The 1-based vertex id left without a class.
        vertex: usize,
    },

    /// Returned when a partition puts one vertex in two classes.
    #[error("vertex {vertex} belongs to both class {first} and class {second}")]
    DuplicateVertex {
        /// The 1-based vertex id listed twice.
        vertex: usize,
        /// Class that claimed the vertex first.
        first: usize,
        /// Class that claimed it again.
        second: usize,
    },

    /// Returned when the adjacency storage for a graph cannot be reserved.
    #[error("cannot allocate a graph of {size} vertices")]
    AllocationFailed {
        /// The requested number of vertices.
        size: usize,
    },
}
