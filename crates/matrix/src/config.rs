//! Configuration for the convergence loop.

use crate::error::MatrixError;

/// Default tolerance on the absolute difference between iterates.
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// Default cap on the number of multiplications.
pub const DEFAULT_MAX_ITER: usize = 2000;

/// Configuration for power iteration.
///
/// Iteration stops at the first step whose iterate differs from the
/// previous one by less than `epsilon` (sum of absolute differences), or
/// after `max_iter` steps.
///
/// # Example
///
/// ```
/// use ergo_matrix::ConvergenceConfig;
///
/// let config = ConvergenceConfig::new()
///     .with_epsilon(1e-6)
///     .with_max_iter(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ConvergenceConfig {
    epsilon: f64,
    max_iter: usize,
}

impl ConvergenceConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `epsilon = 1e-4`, `max_iter = 2000`.
    pub fn new() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_iter: DEFAULT_MAX_ITER,
        }
    }

    /// Sets the convergence tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Returns the convergence tolerance.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the iteration cap.
    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    /// Validates this configuration.
    ///
    /// `epsilon` must be finite and positive, `max_iter` at least 1.
    pub fn validate(&self) -> Result<(), MatrixError> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(MatrixError::InvalidConfig {
                reason: format!("epsilon must be finite and positive, got {}", self.epsilon),
            });
        }
        if self.max_iter == 0 {
            return Err(MatrixError::InvalidConfig {
                reason: "max_iter must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ConvergenceConfig::new();
        assert!((cfg.epsilon() - 1e-4).abs() < f64::EPSILON);
        assert_eq!(cfg.max_iter(), 2000);
        assert_eq!(cfg, ConvergenceConfig::default());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let cfg = ConvergenceConfig::new().with_epsilon(0.5).with_max_iter(7);
        assert!((cfg.epsilon() - 0.5).abs() < f64::EPSILON);
        assert_eq!(cfg.max_iter(), 7);
    }

    #[test]
    fn rejects_bad_epsilon() {
        for eps in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let cfg = ConvergenceConfig::new().with_epsilon(eps);
            assert!(
                matches!(cfg.validate(), Err(MatrixError::InvalidConfig { .. })),
                "epsilon {eps} accepted"
            );
        }
    }

    #[test]
    fn rejects_zero_max_iter() {
        let err = ConvergenceConfig::new()
            .with_max_iter(0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid convergence config: max_iter must be at least 1"
        );
    }
}
