//! Post-solve checks on recovered mass fractions.

use crate::error::{SolverError, SolverResult};
use crate::potentials::{alpha_potential_from_constituents, potential_from_mass_fraction};
use crate::solution::MassFractions;
use nse_core::{Species, StatePoint};

/// Residuals of the two conservation laws on a returned triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationReport {
    /// |X_p + X_n + X_α − 1|
    pub conservation_residual: f64,
    /// |X_p + X_α/2 − Y_p|
    pub charge_residual: f64,
}

/// Accept `fractions` only if they are finite, lie in [0, 1] and conserve
/// mass and charge within `tol`.
pub fn check_mass_fractions(
    fractions: &MassFractions,
    state: &StatePoint,
    tol: f64,
) -> SolverResult<ValidationReport> {
    if !fractions.is_finite() {
        return Err(SolverError::overflow(format!(
            "recovered mass fractions are not finite: {:?}",
            fractions.as_tuple()
        )));
    }

    for species in Species::ALL {
        let x = fractions.get(species);
        if x < -tol || x > 1.0 + tol {
            return Err(SolverError::not_converged(format!(
                "mass fraction of {} outside [0, 1]: {}",
                species, x
            )));
        }
    }

    let report = ValidationReport {
        conservation_residual: (fractions.total() - 1.0).abs(),
        charge_residual: (fractions.charge_fraction() - state.proton_fraction()).abs(),
    };

    if report.conservation_residual > tol {
        return Err(SolverError::not_converged(format!(
            "mass fractions sum to {} (tolerance {:e})",
            fractions.total(),
            tol
        )));
    }
    if report.charge_residual > tol {
        return Err(SolverError::not_converged(format!(
            "charge balance off by {:e} (tolerance {:e})",
            report.charge_residual, tol
        )));
    }

    Ok(report)
}

/// μ_α − (2μ_n + 2μ_p + B_α) with every μ recovered from the mass fractions.
pub fn nse_relation_residual(fractions: &MassFractions, state: &StatePoint) -> SolverResult<f64> {
    let rho = state.density();
    let t = state.temperature();
    let mu = |species: Species| {
        potential_from_mass_fraction(fractions.get(species), species.mass_number(), rho, t)
    };
    let mu_p = mu(Species::Proton)?;
    let mu_n = mu(Species::Neutron)?;
    let mu_alpha = mu(Species::Alpha)?;
    Ok(mu_alpha - alpha_potential_from_constituents(mu_n, mu_p))
}
