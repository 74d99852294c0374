//! Error types for equilibrium solving.

use nse_core::{NseError, ensure_finite};
use thiserror::Error;

/// Errors that can occur while solving for equilibrium.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Input outside the physical domain (T ≤ 0, ρ ≤ 0, Y_p ∉ (0,1), ...).
    #[error("Domain error: {0}")]
    Domain(#[from] NseError),

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Numeric overflow: {what}")]
    NumericOverflow { what: String },

    #[error("Invalid solver configuration: {what}")]
    InvalidConfig { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    pub(crate) fn overflow(what: impl Into<String>) -> Self {
        SolverError::NumericOverflow { what: what.into() }
    }

    pub(crate) fn not_converged(what: impl Into<String>) -> Self {
        SolverError::ConvergenceFailed { what: what.into() }
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, SolverError::Domain(_))
    }

    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, SolverError::ConvergenceFailed { .. })
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, SolverError::NumericOverflow { .. })
    }
}

/// Pass a finite value through, report anything else as overflow.
pub(crate) fn finite_or_overflow(value: f64, what: &'static str) -> SolverResult<f64> {
    ensure_finite(value, what).map_err(|e| SolverError::overflow(e.to_string()))
}
