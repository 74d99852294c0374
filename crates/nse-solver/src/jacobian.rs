//! Jacobian evaluation for the equilibrium residuals.

use crate::error::SolverResult;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// How the Newton iteration obtains its Jacobian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JacobianMethod {
    /// Closed-form derivatives of the residual system.
    Analytic,
    /// One extra residual evaluation per unknown.
    ForwardDifference,
    /// Two extra residual evaluations per unknown.
    CentralDifference,
}

impl Default for JacobianMethod {
    fn default() -> Self {
        JacobianMethod::Analytic
    }
}

/// Forward finite differences, step `epsilon·max(|x_j|, 1)` per column.
pub fn forward_difference_jacobian<F>(
    x: &DVector<f64>,
    f: F,
    epsilon: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let f_x = f(x)?;
    let mut jac = DMatrix::zeros(f_x.len(), x.len());

    for j in 0..x.len() {
        let h = column_step(x[j], epsilon);
        let mut shifted = x.clone();
        shifted[j] += h;
        let column = (f(&shifted)? - &f_x) / h;
        jac.set_column(j, &column);
    }

    Ok(jac)
}

/// Central finite differences; second-order accurate, twice the cost.
pub fn central_difference_jacobian<F>(
    x: &DVector<f64>,
    f: F,
    epsilon: f64,
) -> SolverResult<DMatrix<f64>>
where
    F: Fn(&DVector<f64>) -> SolverResult<DVector<f64>>,
{
    let mut jac: Option<DMatrix<f64>> = None;

    for j in 0..x.len() {
        let h = column_step(x[j], epsilon);

        let mut plus = x.clone();
        plus[j] += h;
        let mut minus = x.clone();
        minus[j] -= h;

        let column = (f(&plus)? - f(&minus)?) / (2.0 * h);
        jac.get_or_insert_with(|| DMatrix::zeros(column.len(), x.len()))
            .set_column(j, &column);
    }

    Ok(jac.unwrap_or_else(|| DMatrix::zeros(0, 0)))
}

fn column_step(xj: f64, epsilon: f64) -> f64 {
    epsilon * xj.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadratic(x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        Ok(DVector::from_column_slice(&[x[0] * x[0], x[0] * x[1]]))
    }

    #[test]
    fn forward_difference_quadratic() {
        let x = DVector::from_column_slice(&[3.0, -2.0]);
        let jac = forward_difference_jacobian(&x, quadratic, 1e-7).unwrap();
        assert!((jac[(0, 0)] - 6.0).abs() < 1e-5);
        assert!(jac[(0, 1)].abs() < 1e-9);
        assert!((jac[(1, 0)] + 2.0).abs() < 1e-5);
        assert!((jac[(1, 1)] - 3.0).abs() < 1e-5);
    }

    #[test]
    fn central_difference_is_exact_for_quadratics() {
        let x = DVector::from_column_slice(&[3.0, -2.0]);
        let jac = central_difference_jacobian(&x, quadratic, 1e-5).unwrap();
        assert!((jac[(0, 0)] - 6.0).abs() < 1e-8);
        assert!((jac[(1, 1)] - 3.0).abs() < 1e-8);
    }

    #[test]
    fn default_is_analytic() {
        assert_eq!(JacobianMethod::default(), JacobianMethod::Analytic);
    }
}
