//! Error types for the ergo-matrix crate.

use ergo_graph::GraphError;

/// Error type for all fallible operations in the ergo-matrix crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatrixError {
    /// Returned when a matrix is created with a zero dimension.
    #[error("invalid dimensions: {rows}x{cols} (both must be > 0)")]
    InvalidDimensions {
        /// Requested number of rows.
        rows: usize,
        /// Requested number of columns.
        cols: usize,
    },

    /// Returned when two operands have incompatible shapes.
    #[error("shape mismatch in {op}: {left_rows}x{left_cols} vs {right_rows}x{right_cols}")]
    ShapeMismatch {
        /// Name of the failing operation.
        op: &'static str,
        /// Rows of the left operand.
        left_rows: usize,
        /// Columns of the left operand.
        left_cols: usize,
        /// Rows of the right operand.
        right_rows: usize,
        /// Columns of the right operand.
        right_cols: usize,
    },

    /// Returned when an operation needs a square matrix.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Returned when an element index is outside the matrix.
    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    IndexOutOfRange {
        /// Zero-based row.
        row: usize,
        /// Zero-based column.
        col: usize,
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Returned when raw data does not fill the matrix exactly.
    #[error("data length mismatch: expected {expected}, got {got}")]
    DataLength {
        /// `rows * cols`.
        expected: usize,
        /// Length actually supplied.
        got: usize,
    },

    /// Returned when a state id is outside `1..=size`.
    #[error("state {state} out of range [1..{size}]")]
    StateOutOfRange {
        /// The offending 1-based state.
        state: usize,
        /// Number of states.
        size: usize,
    },

    /// Returned when a convergence configuration is invalid.
    #[error("invalid convergence config: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Wraps an error raised by the graph layer.
    #[error(transparent)]
    Graph(#[from] GraphError),
}
