//! Transition matrices and long-run distributions.
//!
//! A [`Matrix`] is built from an [`ergo_graph::Graph`] and iterated by
//! repeated multiplication until successive iterates differ by less than a
//! tolerance. The same loop answers "where is the chain after n steps" and
//! "what does each closed class settle to".
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌───────────────────┐
//!  │    matrix     │────▶│  convergence   │────▶│    stationary     │
//!  │ (from graph)  │     │ (powers / x·M) │     │ (per-class rows)  │
//!  └──────────────┘     └────────────────┘     └───────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use ergo_matrix::{ConvergenceConfig, Matrix, converge_distribution};
//!
//! let m = Matrix::from_row_major(2, 2, vec![0.9, 0.1, 0.5, 0.5]).unwrap();
//! let start = Matrix::unit_row(2, 1).unwrap();
//! let outcome = converge_distribution(&m, &start, &ConvergenceConfig::new()).unwrap();
//! assert!(outcome.is_converged());
//! ```

pub mod config;
pub mod convergence;
pub mod error;
pub mod matrix;
pub mod stationary;

pub use config::{ConvergenceConfig, DEFAULT_EPSILON, DEFAULT_MAX_ITER};
pub use convergence::{Convergence, converge_distribution, converge_powers, distribution_after};
pub use error::MatrixError;
pub use matrix::Matrix;
pub use stationary::{ClassStationary, StationaryOutcome, stationary_distributions};
