//! Sweep execution.
//!
//! Connects a [`SweepPlan`] to the equilibrium solver and collects one
//! outcome per point. A failed point never aborts the sweep; it is
//! recorded and the remaining points are still solved.

use crate::definition::SweepVariable;
use crate::error::SweepError;
use crate::plan::{ExecutionMode, SweepPlan};
use nse_core::{Species, StatePoint};
use nse_solver::{
    ChemicalPotentials, EquilibriumSolution, EquilibriumSolver, SolverError, SolverResult,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span, warn};

/// A point that did not converge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFailure {
    pub index: usize,
    pub value: f64,
    pub error: String,
}

/// Result of a sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepResult {
    /// Coordinate that was swept
    pub variable: SweepVariable,
    /// Values of the swept coordinate, in sweep order
    pub independent_values: Vec<f64>,
    /// One entry per point; `None` where the solve failed
    pub solutions: Vec<Option<EquilibriumSolution>>,
    pub failures: Vec<PointFailure>,
    pub num_successful: usize,
    pub num_failed: usize,
    /// Points recovered by a warm start after a cold failure
    pub num_warm_started: usize,
}

impl SweepResult {
    /// Mass fractions of `species` (excluding failed points).
    pub fn mass_fraction(&self, species: Species) -> Vec<f64> {
        self.converged()
            .map(|s| s.mass_fractions.get(species))
            .collect()
    }

    pub fn proton_mass_fraction(&self) -> Vec<f64> {
        self.mass_fraction(Species::Proton)
    }

    pub fn neutron_mass_fraction(&self) -> Vec<f64> {
        self.mass_fraction(Species::Neutron)
    }

    pub fn alpha_mass_fraction(&self) -> Vec<f64> {
        self.mass_fraction(Species::Alpha)
    }

    /// Newton iteration counts (excluding failed points).
    pub fn iterations(&self) -> Vec<usize> {
        self.converged().map(|s| s.iterations).collect()
    }

    /// Get independent values corresponding to successful states
    pub fn successful_independent_values(&self) -> Vec<f64> {
        self.independent_values
            .iter()
            .zip(&self.solutions)
            .filter_map(|(val, solution)| solution.as_ref().map(|_| *val))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.num_failed == 0
    }

    fn converged(&self) -> impl Iterator<Item = &EquilibriumSolution> {
        self.solutions.iter().flatten()
    }
}

/// Run every point of `plan`.
///
/// Fails up front only for an invalid plan; solver failures are collected
/// per point in the returned [`SweepResult`].
pub fn execute_sweep(plan: &SweepPlan) -> Result<SweepResult, SweepError> {
    plan.validate()?;
    let solver = EquilibriumSolver::new(plan.solver.clone())?;
    let values = plan.sweep.generate_points();
    let states = plan.states()?;

    let _span = info_span!(
        "sweep",
        variable = %plan.sweep.variable,
        points = states.len(),
        mode = ?plan.execution
    )
    .entered();

    let (outcomes, num_warm_started) = match plan.execution {
        ExecutionMode::Sequential => run_sequential(&solver, &states, plan.warm_start),
        ExecutionMode::Parallel => (run_parallel(&solver, &states), 0),
    };

    let mut solutions = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for (index, (value, outcome)) in values.iter().zip(outcomes).enumerate() {
        match outcome {
            Ok(solution) => solutions.push(Some(solution)),
            Err(error) => {
                warn!(index, value, error = %error, "sweep point failed");
                failures.push(PointFailure {
                    index,
                    value: *value,
                    error: error.to_string(),
                });
                solutions.push(None);
            }
        }
    }

    let num_failed = failures.len();
    let num_successful = solutions.len() - num_failed;
    info!(
        successful = num_successful,
        failed = num_failed,
        warm_started = num_warm_started,
        "sweep finished"
    );

    Ok(SweepResult {
        variable: plan.sweep.variable,
        independent_values: values,
        solutions,
        failures,
        num_successful,
        num_failed,
        num_warm_started,
    })
}

fn run_sequential(
    solver: &EquilibriumSolver,
    states: &[StatePoint],
    warm_start: bool,
) -> (Vec<SolverResult<EquilibriumSolution>>, usize) {
    let mut outcomes = Vec::with_capacity(states.len());
    let mut previous: Option<ChemicalPotentials> = None;
    let mut warm_started = 0;

    for (index, state) in states.iter().enumerate() {
        let outcome = match (solver.solve(state), previous.filter(|_| warm_start)) {
            (Err(cold), Some(guess)) => {
                debug!(index, error = %cold, "retrying from previous converged point");
                let retry = retry_from(solver, state, &guess, cold);
                if retry.is_ok() {
                    warm_started += 1;
                }
                retry
            }
            (outcome, _) => outcome,
        };

        if let Ok(solution) = &outcome {
            previous = Some(solution.potentials);
        }
        outcomes.push(outcome);
    }

    (outcomes, warm_started)
}

/// Warm start; on failure the cold-start error is the one reported.
fn retry_from(
    solver: &EquilibriumSolver,
    state: &StatePoint,
    guess: &ChemicalPotentials,
    cold: SolverError,
) -> SolverResult<EquilibriumSolution> {
    solver.solve_from(state, guess).map_err(|_| cold)
}

fn run_parallel(
    solver: &EquilibriumSolver,
    states: &[StatePoint],
) -> Vec<SolverResult<EquilibriumSolution>> {
    states.par_iter().map(|state| solver.solve(state)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{SweepDefinition, SweepSpacing};
    use nse_solver::NewtonConfig;

    fn plan(variable: SweepVariable, start: f64, end: f64, points: usize) -> SweepPlan {
        let base = StatePoint::new(1e11, 3.0, 0.25).unwrap();
        let sweep =
            SweepDefinition::new(variable, start, end, points, SweepSpacing::Linear).unwrap();
        SweepPlan::new(base, sweep)
    }

    #[test]
    fn temperature_sweep_converges_everywhere() {
        let result = execute_sweep(&plan(SweepVariable::Temperature, 1.0, 10.0, 10)).unwrap();
        assert!(result.is_complete());
        assert_eq!(result.num_successful, 10);
        assert_eq!(result.alpha_mass_fraction().len(), 10);
        assert_eq!(result.successful_independent_values(), result.independent_values);
    }

    #[test]
    fn parallel_matches_sequential() {
        let sequential = plan(SweepVariable::ProtonFraction, 0.05, 0.95, 7);
        let parallel = sequential.clone().with_execution(ExecutionMode::Parallel);

        let a = execute_sweep(&sequential).unwrap();
        let b = execute_sweep(&parallel).unwrap();
        assert_eq!(a.independent_values, b.independent_values);
        for (x, y) in a.alpha_mass_fraction().iter().zip(b.alpha_mass_fraction()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn failed_points_are_recorded_not_fatal() {
        // One Newton step is not enough anywhere in this sweep.
        let mut starved = plan(SweepVariable::Temperature, 1.0, 2.0, 3).with_solver(NewtonConfig {
            max_iterations: 1,
            ..NewtonConfig::default()
        });
        starved.warm_start = false;

        let result = execute_sweep(&starved).unwrap();
        assert_eq!(result.num_failed, 3);
        assert_eq!(result.failures.len(), 3);
        assert!(result.solutions.iter().all(Option::is_none));
        assert!(result.alpha_mass_fraction().is_empty());
        assert_eq!(result.failures[1].index, 1);
        assert_eq!(result.failures[1].value, 1.5);
    }

    #[test]
    fn invalid_solver_config_is_rejected_up_front() {
        let bad = plan(SweepVariable::Temperature, 1.0, 2.0, 3).with_solver(NewtonConfig {
            line_search_beta: 1.5,
            ..NewtonConfig::default()
        });
        assert!(matches!(execute_sweep(&bad), Err(SweepError::Solver(_))));
    }
}
