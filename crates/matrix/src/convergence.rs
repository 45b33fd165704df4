//! Power iteration until successive iterates settle.

use tracing::debug;

use crate::config::ConvergenceConfig;
use crate::error::MatrixError;
use crate::matrix::Matrix;

/// Outcome of a convergence run.
///
/// Running out of iterations is an outcome, not an error: the last iterate
/// is still returned so callers can inspect it.
#[derive(Debug, Clone, PartialEq)]
pub enum Convergence {
    /// The iterate at `steps` differed from its predecessor by less than
    /// epsilon.
    Converged {
        /// Number of multiplications performed.
        steps: usize,
        /// The settled iterate.
        limit: Matrix,
    },
    /// `max_iter` multiplications were done without settling.
    Exhausted {
        /// Number of multiplications performed (`max_iter`).
        steps: usize,
        /// The final iterate.
        last: Matrix,
    },
}

impl Convergence {
    /// Returns `true` for [`Convergence::Converged`].
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }

    /// Returns the number of multiplications performed.
    pub fn steps(&self) -> usize {
        match self {
            Self::Converged { steps, .. } | Self::Exhausted { steps, .. } => *steps,
        }
    }

    /// Returns the final iterate, settled or not.
    pub fn matrix(&self) -> &Matrix {
        match self {
            Self::Converged { limit, .. } => limit,
            Self::Exhausted { last, .. } => last,
        }
    }

    /// Consumes the outcome and returns the final iterate.
    pub fn into_matrix(self) -> Matrix {
        match self {
            Self::Converged { limit, .. } => limit,
            Self::Exhausted { last, .. } => last,
        }
    }
}

/// Iterates `M^n` from `M^0 = I` until two consecutive powers differ by less
/// than epsilon.
///
/// # Errors
///
/// Returns [`MatrixError::InvalidConfig`] for an invalid `config`,
/// [`MatrixError::InvalidDimensions`] if `matrix` is empty, or
/// [`MatrixError::NotSquare`] if it is not square.
///
/// # Example
///
/// ```
/// use ergo_matrix::{ConvergenceConfig, Matrix, converge_powers};
///
/// let m = Matrix::from_row_major(2, 2, vec![0.5, 0.5, 0.5, 0.5]).unwrap();
/// let outcome = converge_powers(&m, &ConvergenceConfig::new()).unwrap();
/// assert!(outcome.is_converged());
/// assert_eq!(outcome.steps(), 2);
/// ```
#[tracing::instrument(skip_all, fields(n_states = matrix.rows()))]
pub fn converge_powers(
    matrix: &Matrix,
    config: &ConvergenceConfig,
) -> Result<Convergence, MatrixError> {
    ensure_square(matrix)?;
    iterate(Matrix::identity(matrix.rows())?, matrix, config)
}

/// Iterates `x_n = x_(n-1) * M` from `x_0 = initial` until two consecutive
/// distributions differ by less than epsilon.
///
/// # Errors
///
/// Returns [`MatrixError::InvalidConfig`] for an invalid `config`,
/// [`MatrixError::InvalidDimensions`] if `matrix` is empty,
/// [`MatrixError::NotSquare`] if it is not square, or
/// [`MatrixError::ShapeMismatch`] if `initial` has the wrong width.
#[tracing::instrument(skip_all, fields(n_states = matrix.rows()))]
pub fn converge_distribution(
    matrix: &Matrix,
    initial: &Matrix,
    config: &ConvergenceConfig,
) -> Result<Convergence, MatrixError> {
    ensure_square(matrix)?;
    iterate(initial.clone(), matrix, config)
}

/// Returns `initial * M^steps`, the distribution after `steps` transitions.
///
/// # Errors
///
/// Returns [`MatrixError::InvalidDimensions`] if `matrix` is empty,
/// [`MatrixError::NotSquare`] if it is not square, or
/// [`MatrixError::ShapeMismatch`] if `initial` has the wrong width.
pub fn distribution_after(
    matrix: &Matrix,
    initial: &Matrix,
    steps: u32,
) -> Result<Matrix, MatrixError> {
    initial.multiply(&matrix.power(steps)?)
}

fn ensure_square(matrix: &Matrix) -> Result<(), MatrixError> {
    if matrix.is_empty() {
        return Err(MatrixError::InvalidDimensions {
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }
    if !matrix.is_square() {
        return Err(MatrixError::NotSquare {
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }
    Ok(())
}

fn iterate(
    mut current: Matrix,
    matrix: &Matrix,
    config: &ConvergenceConfig,
) -> Result<Convergence, MatrixError> {
    config.validate()?;
    for step in 1..=config.max_iter() {
        let next = current.multiply(matrix)?;
        let diff = current.abs_diff(&next)?;
        current = next;
        if diff < config.epsilon() {
            debug!(step, diff, "converged");
            return Ok(Convergence::Converged {
                steps: step,
                limit: current,
            });
        }
    }
    debug!(steps = config.max_iter(), "iteration cap reached");
    Ok(Convergence::Exhausted {
        steps: config.max_iter(),
        last: current,
    })
}
