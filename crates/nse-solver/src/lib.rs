//! Nuclear statistical equilibrium solver for a neutron / proton / alpha mixture.
//!
//! This crate provides a Newton-based nonlinear solver whose unknowns are the
//! chemical potentials (μ_p, μ_n, μ_α). The starting point comes from an
//! explicit guess strategy (free nucleons or alpha-dominant matter) and every
//! converged root is checked for mass conservation and charge balance before
//! mass fractions are handed back.

pub mod error;
pub mod guess;
pub mod jacobian;
pub mod newton;
pub mod potentials;
pub mod problem;
pub mod solution;
pub mod solve;
pub mod validate;

pub use error::{SolverError, SolverResult};
pub use guess::GuessStrategy;
pub use jacobian::JacobianMethod;
pub use newton::{NewtonConfig, NewtonResult};
pub use potentials::{
    alpha_potential_from_constituents, composite_potential, mass_fraction_from_potential,
    potential_from_mass_fraction, potential_from_number_density, quantum_concentration,
};
pub use problem::EquilibriumProblem;
pub use solution::{ChemicalPotentials, EquilibriumSolution, MassFractions};
pub use solve::{EquilibriumSolver, solve_equilibrium};
pub use validate::{ValidationReport, check_mass_fractions, nse_relation_residual};
