//! Dense row-major matrix with the handful of operations power iteration needs.

use std::fmt;

use ergo_graph::Graph;

use crate::error::MatrixError;

/// A dense `rows x cols` matrix of `f64`, stored row-major.
///
/// A freshly created matrix is zero-filled. The empty matrix (0x0, no
/// storage) is only reachable through [`Matrix::empty`] or [`Matrix::clear`];
/// every constructor rejects zero dimensions. Operations that change shape
/// return a new matrix.
///
/// # Example
///
/// ```
/// use ergo_matrix::Matrix;
///
/// let m = Matrix::from_row_major(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let sq = m.power(2).unwrap();
/// assert_eq!(sq.as_slice(), &[7.0, 10.0, 15.0, 22.0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Number of elements in a `rows x cols` matrix; both must be nonzero.
fn element_count(rows: usize, cols: usize) -> Result<usize, MatrixError> {
    if rows == 0 || cols == 0 {
        return Err(MatrixError::InvalidDimensions { rows, cols });
    }
    rows.checked_mul(cols)
        .ok_or(MatrixError::InvalidDimensions { rows, cols })
}

impl Matrix {
    /// Creates a zero-filled matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimensions`] if either dimension is zero,
    /// or if `rows * cols` overflows or cannot be allocated.
    pub fn new(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        let len = element_count(rows, cols)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| MatrixError::InvalidDimensions { rows, cols })?;
        data.resize(len, 0.0);
        Ok(Self { rows, cols, data })
    }

    /// Returns the empty 0x0 matrix.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the `n x n` identity matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimensions`] if `n` is zero.
    pub fn identity(n: usize) -> Result<Self, MatrixError> {
        let mut m = Self::new(n, n)?;
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        Ok(m)
    }

    /// Builds a matrix from row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimensions`] for a zero dimension, or
    /// [`MatrixError::DataLength`] if `data.len() != rows * cols`.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        let expected = element_count(rows, cols)?;
        if data.len() != expected {
            return Err(MatrixError::DataLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a `1 x n` row vector.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimensions`] if `values` is empty.
    pub fn row_vector(values: Vec<f64>) -> Result<Self, MatrixError> {
        let n = values.len();
        Self::from_row_major(1, n, values)
    }

    /// Builds the `1 x n` distribution concentrated on a 1-based state.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::StateOutOfRange`] if `state` is outside `1..=n`.
    pub fn unit_row(n: usize, state: usize) -> Result<Self, MatrixError> {
        if state < 1 || state > n {
            return Err(MatrixError::StateOutOfRange { state, size: n });
        }
        let mut m = Self::new(1, n)?;
        m.data[state - 1] = 1.0;
        Ok(m)
    }

    /// Builds the transition matrix of a graph: entry `(i-1, j-1)` is the
    /// total weight of the edges `i -> j`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidDimensions`] if the graph is empty.
    pub fn from_graph(graph: &Graph) -> Result<Self, MatrixError> {
        let n = graph.size();
        let mut m = Self::new(n, n)?;
        for (src, edge) in graph.edges() {
            m.data[(src - 1) * n + edge.dst - 1] += edge.weight;
        }
        Ok(m)
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` for the 0x0 matrix.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if rows equal columns.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the row-major values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the value at zero-based `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] if the index is outside.
    pub fn get(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        self.check_index(row, col)?;
        Ok(self.data[row * self.cols + col])
    }

    /// Sets the value at zero-based `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] if the index is outside.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MatrixError> {
        self.check_index(row, col)?;
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// Returns a zero-based row.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] if `row` is outside.
    pub fn row(&self, row: usize) -> Result<&[f64], MatrixError> {
        self.check_index(row, 0)?;
        Ok(&self.data[row * self.cols..(row + 1) * self.cols])
    }

    /// Computes `self x other`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeMismatch`] if `self.cols != other.rows`,
    /// or [`MatrixError::InvalidDimensions`] if either operand is empty.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols != other.rows {
            return Err(self.mismatch("multiply", other));
        }
        let mut out = Matrix::new(self.rows, other.cols)?;
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.data[i * self.cols + k];
                if a == 0.0 {
                    continue;
                }
                let b_row = &other.data[k * other.cols..(k + 1) * other.cols];
                let out_row = &mut out.data[i * other.cols..(i + 1) * other.cols];
                for (o, &b) in out_row.iter_mut().zip(b_row) {
                    *o += a * b;
                }
            }
        }
        Ok(out)
    }

    /// Raises a square matrix to the power `k`.
    ///
    /// `k = 0` gives the identity, `k = 1` a copy, and larger powers are
    /// built as `M x M^(k-1)`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquare`] if the matrix is not square, or
    /// [`MatrixError::InvalidDimensions`] if it is empty.
    pub fn power(&self, k: u32) -> Result<Matrix, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if k == 0 {
            return Matrix::identity(self.rows);
        }
        if self.is_empty() {
            return Err(MatrixError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let mut result = self.clone();
        for _ in 1..k {
            result = self.multiply(&result)?;
        }
        Ok(result)
    }

    /// Returns the sum of elementwise absolute differences.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ShapeMismatch`] if the shapes differ.
    pub fn abs_diff(&self, other: &Matrix) -> Result<f64, MatrixError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(self.mismatch("abs_diff", other));
        }
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .sum())
    }

    /// Restricts a square matrix to an ordered subset of 1-based states.
    ///
    /// Entry `(i, j)` of the result is entry `(states[i]-1, states[j]-1)` of
    /// `self`; the order of `states` is kept for rows and columns alike.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotSquare`] for a rectangular matrix,
    /// [`MatrixError::InvalidDimensions`] if `states` is empty, or
    /// [`MatrixError::StateOutOfRange`] for an unknown state.
    pub fn extract_submatrix(&self, states: &[usize]) -> Result<Matrix, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if let Some(&state) = states.iter().find(|&&s| s < 1 || s > self.rows) {
            return Err(MatrixError::StateOutOfRange {
                state,
                size: self.rows,
            });
        }
        let k = states.len();
        let mut sub = Matrix::new(k, k)?;
        for (i, &si) in states.iter().enumerate() {
            for (j, &sj) in states.iter().enumerate() {
                sub.data[i * k + j] = self.data[(si - 1) * self.cols + sj - 1];
            }
        }
        Ok(sub)
    }

    /// Releases the storage and leaves the 0x0 matrix. Idempotent.
    pub fn clear(&mut self) {
        self.rows = 0;
        self.cols = 0;
        self.data = Vec::new();
    }

    fn check_index(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    fn mismatch(&self, op: &'static str, other: &Matrix) -> MatrixError {
        MatrixError::ShapeMismatch {
            op,
            left_rows: self.rows,
            left_cols: self.cols,
            right_rows: other.rows,
            right_cols: other.cols,
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}x{} matrix:", self.rows, self.cols)?;
        if self.is_empty() {
            return writeln!(f, "NULL");
        }
        for row in self.data.chunks(self.cols) {
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{v:.2}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn m2(values: [f64; 4]) -> Matrix {
        Matrix::from_row_major(2, 2, values.to_vec()).unwrap()
    }

    #[test]
    fn new_is_zero_filled() {
        let m = Matrix::new(2, 3).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert!(m.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn new_rejects_zero_dimension() {
        assert_eq!(
            Matrix::new(0, 3),
            Err(MatrixError::InvalidDimensions { rows: 0, cols: 3 })
        );
        assert!(Matrix::new(3, 0).is_err());
    }

    #[test]
    fn new_rejects_oversized_dimensions() {
        assert_eq!(
            Matrix::new(usize::MAX, 2),
            Err(MatrixError::InvalidDimensions {
                rows: usize::MAX,
                cols: 2
            })
        );
        // Fits in usize but not in the address space.
        assert!(matches!(
            Matrix::new(usize::MAX / 4, 2),
            Err(MatrixError::InvalidDimensions { .. })
        ));
        assert!(Matrix::identity(usize::MAX).is_err());
        assert!(matches!(
            Matrix::from_row_major(usize::MAX, 3, vec![0.0; 3]),
            Err(MatrixError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn from_row_major_checks_length() {
        assert_eq!(
            Matrix::from_row_major(2, 2, vec![1.0; 3]),
            Err(MatrixError::DataLength {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn get_set_and_bounds() {
        let mut m = Matrix::new(2, 2).unwrap();
        m.set(1, 0, 0.5).unwrap();
        assert_abs_diff_eq!(m.get(1, 0).unwrap(), 0.5);
        assert!(matches!(
            m.get(2, 0),
            Err(MatrixError::IndexOutOfRange { row: 2, .. })
        ));
        assert!(m.set(0, 2, 1.0).is_err());
        assert_eq!(m.row(1).unwrap(), &[0.5, 0.0]);
    }

    #[test]
    fn multiply_known_product() {
        let a = Matrix::from_row_major(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let b = Matrix::from_row_major(3, 1, vec![1.0, 0.0, -1.0]).unwrap();
        let c = a.multiply(&b).unwrap();
        assert_eq!(c.rows(), 2);
        assert_eq!(c.cols(), 1);
        assert_eq!(c.as_slice(), &[-2.0, -2.0]);
    }

    #[test]
    fn multiply_shape_mismatch() {
        let a = Matrix::new(2, 3).unwrap();
        let b = Matrix::new(2, 3).unwrap();
        assert!(matches!(
            a.multiply(&b),
            Err(MatrixError::ShapeMismatch { op: "multiply", .. })
        ));
    }

    #[test]
    fn multiply_with_empty_fails() {
        let a = Matrix::empty();
        let b = Matrix::empty();
        assert!(a.multiply(&b).is_err());
    }

    #[test]
    fn power_two_of_known_matrix() {
        let m = m2([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m.power(2).unwrap(), m2([7.0, 10.0, 15.0, 22.0]));
    }

    #[test]
    fn power_zero_and_one() {
        let m = m2([0.3, 0.7, 0.6, 0.4]);
        assert_eq!(m.power(0).unwrap(), Matrix::identity(2).unwrap());
        assert_eq!(m.power(1).unwrap(), m);
    }

    #[test]
    fn power_rejects_rectangular() {
        let m = Matrix::new(2, 3).unwrap();
        assert_eq!(
            m.power(2),
            Err(MatrixError::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn abs_diff_sums_absolute_values() {
        let a = m2([1.0, 2.0, 3.0, 4.0]);
        let b = m2([1.5, 2.0, 2.0, 4.25]);
        assert_abs_diff_eq!(a.abs_diff(&b).unwrap(), 1.75, epsilon = 1e-12);
        assert_abs_diff_eq!(a.abs_diff(&a).unwrap(), 0.0);
        assert!(a.abs_diff(&Matrix::new(1, 4).unwrap()).is_err());
    }

    #[test]
    fn extract_submatrix_keeps_order() {
        let data: Vec<f64> = (0..100).map(f64::from).collect();
        let m = Matrix::from_row_major(10, 10, data).unwrap();
        let sub = m.extract_submatrix(&[2, 5, 9]).unwrap();
        assert_eq!(sub.rows(), 3);
        assert_abs_diff_eq!(sub.get(0, 1).unwrap(), m.get(1, 4).unwrap());
        assert_abs_diff_eq!(sub.get(2, 0).unwrap(), m.get(8, 1).unwrap());

        let rev = m.extract_submatrix(&[9, 2]).unwrap();
        assert_abs_diff_eq!(rev.get(0, 1).unwrap(), m.get(8, 1).unwrap());
    }

    #[test]
    fn extract_submatrix_errors() {
        let m = Matrix::identity(3).unwrap();
        assert_eq!(
            m.extract_submatrix(&[1, 4]),
            Err(MatrixError::StateOutOfRange { state: 4, size: 3 })
        );
        assert!(m.extract_submatrix(&[0]).is_err());
        assert!(matches!(
            m.extract_submatrix(&[]),
            Err(MatrixError::InvalidDimensions { rows: 0, cols: 0 })
        ));
        assert!(Matrix::new(2, 3).unwrap().extract_submatrix(&[1]).is_err());
    }

    #[test]
    fn from_graph_accumulates_parallel_edges() {
        let mut g = Graph::new(2).unwrap();
        g.add_edge(1, 2, 0.25).unwrap();
        g.add_edge(1, 2, 0.25).unwrap();
        g.add_edge(1, 1, 0.5).unwrap();
        g.add_edge(2, 2, 1.0).unwrap();
        let m = Matrix::from_graph(&g).unwrap();
        assert_eq!(m, m2([0.5, 0.5, 0.0, 1.0]));
        assert!(Matrix::from_graph(&Graph::empty()).is_err());
    }

    #[test]
    fn unit_row_and_row_vector() {
        let u = Matrix::unit_row(3, 2).unwrap();
        assert_eq!(u.as_slice(), &[0.0, 1.0, 0.0]);
        assert!(Matrix::unit_row(3, 4).is_err());
        assert!(Matrix::row_vector(Vec::new()).is_err());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut m = Matrix::identity(3).unwrap();
        m.clear();
        assert!(m.is_empty());
        assert_eq!((m.rows(), m.cols()), (0, 0));
        m.clear();
        assert_eq!(m, Matrix::empty());
    }

    #[test]
    fn display_formats_two_decimals() {
        let m = m2([1.0, 0.5, 0.25, 0.0]);
        assert_eq!(m.to_string(), "2x2 matrix:\n1.00 0.50\n0.25 0.00\n");
        assert_eq!(Matrix::empty().to_string(), "0x0 matrix:\nNULL\n");
    }
}
