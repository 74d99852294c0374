//! Residual system for three-species NSE.
//!
//! Unknowns are x = (μ_p, μ_n, μ_α). The residuals are
//! - R1 = 1 − X_p − X_n − X_α (mass conservation)
//! - R2 = Y_p − X_p − X_α/2 (charge balance)
//! - R3 = (μ_α − 2μ_n − 2μ_p − B_α) / T (NSE relation)
//!
//! R3 is divided by T so that all three residuals are dimensionless; the root
//! is unchanged.

use crate::error::{SolverError, SolverResult};
use crate::potentials::{composite_potential, mass_fraction_prefactor};
use crate::solution::{ChemicalPotentials, MU_ALPHA, MU_N, MU_P, MassFractions, UNKNOWNS};
use nalgebra::{DMatrix, DVector};
use nse_core::{Species, StatePoint};

/// One equilibrium problem: a state point plus its precomputed
/// μ-independent mass fraction factors.
#[derive(Debug, Clone)]
pub struct EquilibriumProblem {
    state: StatePoint,
    proton_prefactor: f64,
    neutron_prefactor: f64,
    alpha_prefactor: f64,
}

impl EquilibriumProblem {
    pub fn new(state: StatePoint) -> SolverResult<Self> {
        let rho = state.density();
        let t = state.temperature();
        Ok(Self {
            state,
            proton_prefactor: mass_fraction_prefactor(Species::Proton.mass_number(), rho, t)?,
            neutron_prefactor: mass_fraction_prefactor(Species::Neutron.mass_number(), rho, t)?,
            alpha_prefactor: mass_fraction_prefactor(Species::Alpha.mass_number(), rho, t)?,
        })
    }

    pub fn state(&self) -> &StatePoint {
        &self.state
    }

    /// Forward conversion of all three potentials. May contain `inf` for
    /// potentials far above the root; callers decide how to treat that.
    pub fn mass_fractions(&self, mu: &ChemicalPotentials) -> MassFractions {
        let t = self.state.temperature();
        MassFractions::new(
            self.proton_prefactor * (mu.proton / t).exp(),
            self.neutron_prefactor * (mu.neutron / t).exp(),
            self.alpha_prefactor * (mu.alpha / t).exp(),
        )
    }

    pub fn residuals(&self, x: &DVector<f64>) -> SolverResult<DVector<f64>> {
        let mu = self.unpack(x)?;
        let fractions = self.mass_fractions(&mu);
        let t = self.state.temperature();

        let mut r = DVector::zeros(UNKNOWNS);
        r[0] = 1.0 - fractions.total();
        r[1] = self.state.proton_fraction() - fractions.charge_fraction();
        r[2] = (mu.alpha - composite_potential(Species::Alpha, mu.neutron, mu.proton)) / t;
        Ok(r)
    }

    /// Closed-form ∂R/∂μ. dX/dμ = X/T for every species.
    pub fn jacobian(&self, x: &DVector<f64>) -> SolverResult<DMatrix<f64>> {
        let mu = self.unpack(x)?;
        let fractions = self.mass_fractions(&mu);
        let t = self.state.temperature();
        let alpha_charge_share =
            f64::from(Species::Alpha.charge()) / f64::from(Species::Alpha.mass_number());

        let mut jac = DMatrix::zeros(UNKNOWNS, UNKNOWNS);

        jac[(0, MU_P)] = -fractions.proton / t;
        jac[(0, MU_N)] = -fractions.neutron / t;
        jac[(0, MU_ALPHA)] = -fractions.alpha / t;

        jac[(1, MU_P)] = -fractions.proton / t;
        jac[(1, MU_ALPHA)] = -alpha_charge_share * fractions.alpha / t;

        jac[(2, MU_P)] = -f64::from(Species::Alpha.charge()) / t;
        jac[(2, MU_N)] = -f64::from(Species::Alpha.neutron_number()) / t;
        jac[(2, MU_ALPHA)] = 1.0 / t;

        Ok(jac)
    }

    fn unpack(&self, x: &DVector<f64>) -> SolverResult<ChemicalPotentials> {
        if x.len() != UNKNOWNS {
            return Err(SolverError::InvalidConfig {
                what: format!("residual system has {} unknowns, got {}", UNKNOWNS, x.len()),
            });
        }
        ChemicalPotentials::from_vector(x)
    }
}
