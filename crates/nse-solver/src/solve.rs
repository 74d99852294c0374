//! High-level solver interface.

use crate::error::{SolverError, SolverResult};
use crate::guess::GuessStrategy;
use crate::jacobian::{JacobianMethod, central_difference_jacobian, forward_difference_jacobian};
use crate::newton::{NewtonConfig, newton_solve};
use crate::problem::EquilibriumProblem;
use crate::solution::{ChemicalPotentials, EquilibriumSolution, MassFractions};
use crate::validate::check_mass_fractions;
use nalgebra::{DMatrix, DVector};
use nse_core::StatePoint;
use tracing::{debug, debug_span, warn};

/// Solve NSE at (ρ [g/cm³], T [MeV], Y_p) with default settings.
///
/// Returns (X_p, X_n, X_α) or a typed failure: a domain error for invalid
/// inputs, a convergence failure when Newton or the post-solve checks fail,
/// or an overflow when the state is outside representable range.
pub fn solve_equilibrium(
    density: f64,
    temperature: f64,
    proton_fraction: f64,
) -> SolverResult<MassFractions> {
    let state = StatePoint::new(density, temperature, proton_fraction)?;
    let solution = EquilibriumSolver::default().solve(&state)?;
    Ok(solution.mass_fractions)
}

/// Stateless equilibrium solver holding only its configuration.
#[derive(Debug, Clone, Default)]
pub struct EquilibriumSolver {
    config: NewtonConfig,
}

impl EquilibriumSolver {
    pub fn new(config: NewtonConfig) -> SolverResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &NewtonConfig {
        &self.config
    }

    /// Solve from the guess picked by [`GuessStrategy::select`].
    pub fn solve(&self, state: &StatePoint) -> SolverResult<EquilibriumSolution> {
        let _span = span_for(state).entered();
        let (strategy, guess) = GuessStrategy::select(state)?;
        self.run(state, guess, Some(strategy))
    }

    /// Solve from a fixed strategy, bypassing the selection heuristic.
    pub fn solve_with_strategy(
        &self,
        state: &StatePoint,
        strategy: GuessStrategy,
    ) -> SolverResult<EquilibriumSolution> {
        let _span = span_for(state).entered();
        let guess = strategy.build(state)?;
        self.run(state, guess, Some(strategy))
    }

    /// Warm start from caller-supplied potentials, e.g. a neighbouring
    /// point of a sweep.
    pub fn solve_from(
        &self,
        state: &StatePoint,
        guess: &ChemicalPotentials,
    ) -> SolverResult<EquilibriumSolution> {
        let _span = span_for(state).entered();
        if !guess.is_finite() {
            return Err(SolverError::overflow(format!(
                "warm-start potentials are not finite: {:?}",
                guess
            )));
        }
        self.run(state, *guess, None)
    }

    fn run(
        &self,
        state: &StatePoint,
        guess: ChemicalPotentials,
        strategy: Option<GuessStrategy>,
    ) -> SolverResult<EquilibriumSolution> {
        let problem = EquilibriumProblem::new(*state)?;
        let cfg = &self.config;

        let residual_fn = |x: &DVector<f64>| -> SolverResult<DVector<f64>> { problem.residuals(x) };
        let jacobian_fn = |x: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
            match cfg.jacobian {
                JacobianMethod::Analytic => problem.jacobian(x),
                JacobianMethod::ForwardDifference => {
                    forward_difference_jacobian(x, residual_fn, cfg.fd_epsilon)
                }
                JacobianMethod::CentralDifference => {
                    central_difference_jacobian(x, residual_fn, cfg.fd_epsilon)
                }
            }
        };

        let result = newton_solve(guess.to_vector(), residual_fn, jacobian_fn, cfg)
            .inspect_err(|e| warn!(error = %e, "equilibrium solve failed"))?;

        let potentials = ChemicalPotentials::from_vector(&result.x)?;
        let mass_fractions = problem.mass_fractions(&potentials);
        let report = check_mass_fractions(&mass_fractions, state, cfg.validation_tol)
            .inspect_err(|e| warn!(error = %e, "converged root failed validation"))?;

        debug!(
            iterations = result.iterations,
            residual_norm = result.residual_norm,
            conservation = report.conservation_residual,
            charge = report.charge_residual,
            "equilibrium converged"
        );

        Ok(EquilibriumSolution {
            state: *state,
            mass_fractions,
            potentials,
            strategy,
            iterations: result.iterations,
            residual_norm: result.residual_norm,
        })
    }
}

fn span_for(state: &StatePoint) -> tracing::Span {
    debug_span!(
        "nse_solve",
        rho = state.density(),
        t = state.temperature(),
        yp = state.proton_fraction()
    )
}
