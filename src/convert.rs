//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use ergo_matrix::ConvergenceConfig;

use crate::config::ConvergenceToml;

/// Builds a [`ConvergenceConfig`] from the TOML settings, letting CLI
/// overrides win.
pub fn build_convergence_config(
    convergence: &ConvergenceToml,
    epsilon: Option<f64>,
    max_iter: Option<usize>,
) -> Result<ConvergenceConfig> {
    let cfg = ConvergenceConfig::new()
        .with_epsilon(epsilon.unwrap_or(convergence.epsilon))
        .with_max_iter(max_iter.unwrap_or(convergence.max_iter));
    cfg.validate().context("invalid [convergence] settings")?;
    Ok(cfg)
}

/// Resolves the starting state of the `--steps` distribution.
pub fn resolve_start(start: Option<usize>, n_states: usize) -> Result<usize> {
    let start = start.unwrap_or(1);
    if start < 1 || start > n_states {
        bail!("start state {start} out of range [1..{n_states}]");
    }
    Ok(start)
}
