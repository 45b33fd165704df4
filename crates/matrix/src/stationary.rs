//! Long-run distribution of each communicating class.

use ergo_graph::{ClassKind, HasseDiagram};
use tracing::{debug, warn};

use crate::config::ConvergenceConfig;
use crate::convergence::{Convergence, converge_powers};
use crate::error::MatrixError;
use crate::matrix::Matrix;

/// Long-run behaviour of one class.
#[derive(Debug, Clone, PartialEq)]
pub enum StationaryOutcome {
    /// The chain leaves the class for good; carries a zero vector.
    Transient {
        /// One zero per member.
        zeros: Vec<f64>,
    },
    /// Powers of the class submatrix settled.
    Converged {
        /// Multiplications until the powers settled.
        steps: usize,
        /// Row 0 of the settled power, indexed like the class members.
        values: Vec<f64>,
    },
    /// Powers of the class submatrix kept moving (a periodic class).
    NotConverged {
        /// Multiplications performed.
        steps: usize,
        /// Row 0 of the last power.
        last: Vec<f64>,
    },
}

impl StationaryOutcome {
    /// Returns the distribution over the class members.
    ///
    /// Zero for transient classes, the last iterate for classes that did not
    /// settle.
    pub fn values(&self) -> &[f64] {
        match self {
            Self::Transient { zeros } => zeros,
            Self::Converged { values, .. } => values,
            Self::NotConverged { last, .. } => last,
        }
    }

    /// Returns `true` for [`StationaryOutcome::Converged`].
    pub fn is_converged(&self) -> bool {
        matches!(self, Self::Converged { .. })
    }
}

/// Stationary result for one class of the partition.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStationary {
    /// Class id in the partition.
    pub class: usize,
    /// Sorted 1-based members; `outcome.values()[i]` belongs to `members[i]`.
    pub members: Vec<usize>,
    /// What the class settles to.
    pub outcome: StationaryOutcome,
}

/// Computes the long-run distribution of every class of `hasse`.
///
/// Persistent classes run the powers form of the convergence loop on their
/// submatrix of `matrix` and report row 0 of the limit. Transient classes
/// report zeros without iterating.
///
/// # Errors
///
/// Returns [`MatrixError::InvalidConfig`] for an invalid `config`, or
/// [`MatrixError::ShapeMismatch`] if `matrix` is not `n x n` for the `n`
/// states of the diagram.
///
/// # Example
///
/// ```
/// use ergo_graph::{Graph, HasseDiagram, strongly_connected_components};
/// use ergo_matrix::{ConvergenceConfig, Matrix, stationary_distributions};
///
/// let mut graph = Graph::new(2).unwrap();
/// graph.add_edge(1, 2, 1.0).unwrap();
/// graph.add_edge(2, 2, 1.0).unwrap();
/// let partition = strongly_connected_components(&graph);
/// let hasse = HasseDiagram::build(&graph, &partition).unwrap();
/// let matrix = Matrix::from_graph(&graph).unwrap();
///
/// let results = stationary_distributions(&hasse, &matrix, &ConvergenceConfig::new()).unwrap();
/// let absorbing = results.iter().find(|r| r.members == [2]).unwrap();
/// assert_eq!(absorbing.outcome.values(), &[1.0]);
/// ```
#[tracing::instrument(skip_all, fields(n_states = matrix.rows(), n_classes = hasse.partition().len()))]
pub fn stationary_distributions(
    hasse: &HasseDiagram<'_>,
    matrix: &Matrix,
    config: &ConvergenceConfig,
) -> Result<Vec<ClassStationary>, MatrixError> {
    config.validate()?;
    let n = hasse.vertex_classes().len();
    if matrix.rows() != n || matrix.cols() != n {
        return Err(MatrixError::ShapeMismatch {
            op: "stationary_distributions",
            left_rows: matrix.rows(),
            left_cols: matrix.cols(),
            right_rows: n,
            right_cols: n,
        });
    }

    let kinds = hasse.class_kinds();
    let mut results = Vec::with_capacity(kinds.len());
    for class in hasse.partition() {
        let members = class.members().to_vec();
        let outcome = match kinds[class.id()] {
            ClassKind::Transient => StationaryOutcome::Transient {
                zeros: vec![0.0; members.len()],
            },
            ClassKind::Persistent => {
                let sub = matrix.extract_submatrix(&members)?;
                match converge_powers(&sub, config)? {
                    Convergence::Converged { steps, limit } => {
                        debug!(class = %class.name(), steps, "class settled");
                        StationaryOutcome::Converged {
                            steps,
                            values: limit.row(0)?.to_vec(),
                        }
                    }
                    Convergence::Exhausted { steps, last } => {
                        warn!(class = %class.name(), steps, "class did not settle");
                        StationaryOutcome::NotConverged {
                            steps,
                            last: last.row(0)?.to_vec(),
                        }
                    }
                }
            }
        };
        results.push(ClassStationary {
            class: class.id(),
            members,
            outcome,
        });
    }
    Ok(results)
}
