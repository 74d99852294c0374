//! Newton solver with backtracking line search.

use crate::error::{SolverError, SolverResult};
use crate::jacobian::JacobianMethod;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Newton solver configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Relative tolerance for residual norm (0 disables)
    pub rel_tol: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
    /// Jacobian evaluation method
    pub jacobian: JacobianMethod,
    /// Relative step for finite-difference Jacobians
    pub fd_epsilon: f64,
    /// Tolerance of the post-solve conservation and charge checks
    pub validation_tol: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            abs_tol: 1e-10,
            rel_tol: 0.0,
            line_search_beta: 0.5,
            max_line_search_iters: 40,
            jacobian: JacobianMethod::Analytic,
            fd_epsilon: 1e-7,
            validation_tol: 1e-8,
        }
    }
}

impl NewtonConfig {
    pub fn validate(&self) -> SolverResult<()> {
        let invalid = |what: &str| {
            Err(SolverError::InvalidConfig {
                what: what.to_string(),
            })
        };
        if self.max_iterations == 0 {
            return invalid("max_iterations must be at least 1");
        }
        if self.max_line_search_iters == 0 {
            return invalid("max_line_search_iters must be at least 1");
        }
        if !(self.abs_tol.is_finite() && self.abs_tol > 0.0) {
            return invalid("abs_tol must be finite and > 0");
        }
        if !(self.rel_tol.is_finite() && self.rel_tol >= 0.0) {
            return invalid("rel_tol must be finite and >= 0");
        }
        if !(self.line_search_beta > 0.0 && self.line_search_beta < 1.0) {
            return invalid("line_search_beta must lie in (0, 1)");
        }
        if !(self.fd_epsilon.is_finite() && self.fd_epsilon > 0.0) {
            return invalid("fd_epsilon must be finite and > 0");
        }
        if !(self.validation_tol.is_finite() && self.validation_tol > 0.0) {
            return invalid("validation_tol must be finite and > 0");
        }
        Ok(())
    }

    fn is_converged(&self, r_norm: f64, r0_norm: f64) -> bool {
        r_norm < self.abs_tol || (self.rel_tol > 0.0 && r_norm < self.rel_tol * r0_norm)
    }
}

/// Newton iteration result.
#[derive(Debug, Clone)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
}

/// Newton solver with backtracking line search.
///
/// A trial step is accepted only when its residual norm is finite and
/// smaller than the current one, so steps that overflow the exponentials
/// are cut back instead of poisoning the iterate.
pub fn newton_solve<F, J>(
    x0: DVector<f64>,
    residual_fn: F,
    jacobian_fn: J,
    config: &NewtonConfig,
) -> SolverResult<NewtonResult>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
    J: Fn(&DVector<f64>) -> SolverResult<DMatrix<f64>>,
{
    let mut x = x0;
    let mut r = residual_fn(&x)?;
    let mut r_norm = r.norm();
    if !r_norm.is_finite() {
        return Err(SolverError::overflow(format!(
            "initial residual is not finite ({})",
            r_norm
        )));
    }
    let r0_norm = r_norm;

    for iter in 0..config.max_iterations {
        debug!(iter, residual_norm = r_norm, "newton iteration");

        if config.is_converged(r_norm, r0_norm) {
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
            });
        }

        let jac = jacobian_fn(&x)?;

        // Solve J * dx = -r
        let dx = jac.lu().solve(&(-&r)).ok_or_else(|| {
            SolverError::not_converged(format!("singular Jacobian at iteration {}", iter))
        })?;
        if dx.iter().any(|v| !v.is_finite()) {
            return Err(SolverError::not_converged(format!(
                "non-finite Newton step at iteration {}",
                iter
            )));
        }

        let mut alpha = 1.0;
        let mut accepted = None;
        for _ in 0..config.max_line_search_iters {
            let x_trial = &x + alpha * &dx;
            let r_trial = residual_fn(&x_trial)?;
            let trial_norm = r_trial.norm();
            if trial_norm.is_finite() && trial_norm < r_norm {
                accepted = Some((x_trial, r_trial, trial_norm));
                break;
            }
            trace!(alpha, trial_norm, "backtracking");
            alpha *= config.line_search_beta;
        }

        let Some((x_new, r_new, r_new_norm)) = accepted else {
            return Err(SolverError::not_converged(format!(
                "line search stagnated at iteration {}, residual = {:e}",
                iter, r_norm
            )));
        };

        x = x_new;
        r = r_new;
        r_norm = r_new_norm;
    }

    if config.is_converged(r_norm, r0_norm) {
        return Ok(NewtonResult {
            x,
            residual_norm: r_norm,
            iterations: config.max_iterations,
        });
    }

    Err(SolverError::not_converged(format!(
        "maximum iterations {} reached, residual = {:e}",
        config.max_iterations, r_norm
    )))
}
