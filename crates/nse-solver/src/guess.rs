//! Guess strategies for seeding the Newton iteration.
//!
//! Number densities across the (ρ, T) plane span many orders of magnitude,
//! and a start that assumes free nucleons sits far from the root whenever
//! alpha particles dominate. The guess is therefore picked from two explicit
//! strategies:
//! - `FreeNucleon`: every baryon is a free nucleon
//! - `AlphaDominant`: the symmetric part of the matter is bound in alphas and
//!   only the neutron (or proton) excess stays free
//!
//! `select` runs the free-nucleon guess first and switches once if that
//! guess already predicts μ_α > μ_n.
//!
//! At low temperature B_α/T is large, and μ_α = 2μ_n + 2μ_p + B_α taken
//! from the alpha-dominant nucleon densities implies X_α far above one. In
//! that case μ_α is instead seeded from the mass share the guess leaves
//! bound in alphas; the NSE residual is linear in μ, so the first Newton
//! step restores the relation.

use crate::error::SolverResult;
use crate::potentials::{
    alpha_potential_from_constituents, mass_fraction_prefactor, nucleon_number_density,
    potential_from_mass_fraction, potential_from_number_density,
};
use crate::solution::ChemicalPotentials;
use nse_core::{Species, StatePoint};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cap on the free minority-nucleon mass share in the alpha-dominant guess.
pub const ALPHA_GUESS_MINORITY_CAP: f64 = 0.01;

/// Floor on |Y_p − 0.5| in the alpha-dominant guess; keeps the majority
/// nucleon density positive at symmetric matter.
pub const ALPHA_GUESS_EXCESS_FLOOR: f64 = 1.0e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessStrategy {
    /// All baryons free: n_p = Y_p·ρ/m_u, n_n = (1−Y_p)·ρ/m_u.
    FreeNucleon,

    /// Alphas hold the symmetric matter; the excess nucleon species carries
    /// 2·|Y_p − 0.5| of the mass and the minority species at most 1%.
    AlphaDominant,
}

impl GuessStrategy {
    pub const ALL: [GuessStrategy; 2] = [GuessStrategy::FreeNucleon, GuessStrategy::AlphaDominant];

    pub fn as_str(&self) -> &'static str {
        match self {
            GuessStrategy::FreeNucleon => "FreeNucleon",
            GuessStrategy::AlphaDominant => "AlphaDominant",
        }
    }

    /// Free (proton, neutron) mass shares this strategy assumes.
    pub fn nucleon_shares(&self, state: &StatePoint) -> (f64, f64) {
        let yp = state.proton_fraction();
        match self {
            GuessStrategy::FreeNucleon => (yp, state.neutron_fraction()),
            GuessStrategy::AlphaDominant => {
                let excess = 2.0 * (yp - 0.5).abs().max(ALPHA_GUESS_EXCESS_FLOOR);
                if yp < 0.5 {
                    (yp.min(ALPHA_GUESS_MINORITY_CAP), excess)
                } else {
                    (excess, state.neutron_fraction().min(ALPHA_GUESS_MINORITY_CAP))
                }
            }
        }
    }

    /// Chemical potentials implied by this strategy's nucleon densities.
    pub fn build(&self, state: &StatePoint) -> SolverResult<ChemicalPotentials> {
        let (proton_share, neutron_share) = self.nucleon_shares(state);
        let t = state.temperature();
        let rho = state.density();

        let proton = potential_from_number_density(
            t,
            nucleon_number_density(rho, proton_share)?,
            Species::Proton.mass_number(),
        )?;
        let neutron = potential_from_number_density(
            t,
            nucleon_number_density(rho, neutron_share)?,
            Species::Neutron.mass_number(),
        )?;
        let mut alpha = alpha_potential_from_constituents(neutron, proton);

        if *self == GuessStrategy::AlphaDominant && overfills_alpha(alpha, rho, t)? {
            let bound_share = 1.0 - proton_share - neutron_share;
            let seeded =
                potential_from_mass_fraction(bound_share, Species::Alpha.mass_number(), rho, t)?;
            debug!(
                constituent_mu_alpha = alpha,
                seeded_mu_alpha = seeded,
                bound_share,
                "alpha potential seeded from bound mass share"
            );
            alpha = seeded;
        }

        Ok(ChemicalPotentials::new(proton, neutron, alpha))
    }

    /// Pick a strategy for `state` and return its guess.
    pub fn select(state: &StatePoint) -> SolverResult<(GuessStrategy, ChemicalPotentials)> {
        let free = GuessStrategy::FreeNucleon.build(state)?;
        if !Self::alpha_channel_dominates(&free) {
            debug!(strategy = "FreeNucleon", "initial guess selected");
            return Ok((GuessStrategy::FreeNucleon, free));
        }

        let bound = GuessStrategy::AlphaDominant.build(state)?;
        debug!(
            strategy = "AlphaDominant",
            free_mu_alpha = free.alpha,
            free_mu_n = free.neutron,
            "free-nucleon guess predicts alpha dominance"
        );
        Ok((GuessStrategy::AlphaDominant, bound))
    }

    fn alpha_channel_dominates(guess: &ChemicalPotentials) -> bool {
        guess.alpha > guess.neutron
    }
}

/// ln X_α > 0, evaluated in log space since X_α itself may overflow.
fn overfills_alpha(alpha_potential: f64, density: f64, temperature: f64) -> SolverResult<bool> {
    let prefactor = mass_fraction_prefactor(Species::Alpha.mass_number(), density, temperature)?;
    Ok(prefactor.ln() + alpha_potential / temperature > 0.0)
}

impl Default for GuessStrategy {
    fn default() -> Self {
        GuessStrategy::FreeNucleon
    }
}
