//! Chemical potential and mass fraction triples, plus the solve result.

use crate::error::{SolverError, SolverResult};
use crate::guess::GuessStrategy;
use nalgebra::DVector;
use nse_core::{Species, StatePoint};
use serde::{Deserialize, Serialize};

/// Position of each unknown in the Newton vector.
pub(crate) const MU_P: usize = 0;
pub(crate) const MU_N: usize = 1;
pub(crate) const MU_ALPHA: usize = 2;
pub(crate) const UNKNOWNS: usize = 3;

/// Chemical potentials (MeV), ordered (μ_p, μ_n, μ_α).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChemicalPotentials {
    pub proton: f64,
    pub neutron: f64,
    pub alpha: f64,
}

impl ChemicalPotentials {
    pub fn new(proton: f64, neutron: f64, alpha: f64) -> Self {
        Self {
            proton,
            neutron,
            alpha,
        }
    }

    pub fn get(&self, species: Species) -> f64 {
        match species {
            Species::Proton => self.proton,
            Species::Neutron => self.neutron,
            Species::Alpha => self.alpha,
        }
    }

    pub fn to_vector(&self) -> DVector<f64> {
        DVector::from_column_slice(&[self.proton, self.neutron, self.alpha])
    }

    pub fn from_vector(x: &DVector<f64>) -> SolverResult<Self> {
        if x.len() != UNKNOWNS {
            return Err(SolverError::not_converged(format!(
                "expected {} chemical potentials, got {}",
                UNKNOWNS,
                x.len()
            )));
        }
        Ok(Self::new(x[MU_P], x[MU_N], x[MU_ALPHA]))
    }

    pub fn is_finite(&self) -> bool {
        self.proton.is_finite() && self.neutron.is_finite() && self.alpha.is_finite()
    }
}

/// Mass fractions (X_p, X_n, X_α).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassFractions {
    pub proton: f64,
    pub neutron: f64,
    pub alpha: f64,
}

impl MassFractions {
    pub fn new(proton: f64, neutron: f64, alpha: f64) -> Self {
        Self {
            proton,
            neutron,
            alpha,
        }
    }

    pub fn get(&self, species: Species) -> f64 {
        match species {
            Species::Proton => self.proton,
            Species::Neutron => self.neutron,
            Species::Alpha => self.alpha,
        }
    }

    /// X_p + X_n + X_α; 1 at equilibrium.
    pub fn total(&self) -> f64 {
        self.proton + self.neutron + self.alpha
    }

    /// Protons per baryon carried by the mixture: X_p + X_α/2.
    pub fn charge_fraction(&self) -> f64 {
        self.proton
            + self.alpha * f64::from(Species::Alpha.charge())
                / f64::from(Species::Alpha.mass_number())
    }

    /// Same fractions with the free nucleons exchanged.
    pub fn swapped_nucleons(&self) -> Self {
        Self::new(self.neutron, self.proton, self.alpha)
    }

    pub fn as_tuple(&self) -> (f64, f64, f64) {
        (self.proton, self.neutron, self.alpha)
    }

    pub fn is_finite(&self) -> bool {
        self.proton.is_finite() && self.neutron.is_finite() && self.alpha.is_finite()
    }
}

/// Converged equilibrium at one state point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumSolution {
    pub state: StatePoint,
    pub mass_fractions: MassFractions,
    pub potentials: ChemicalPotentials,
    /// Guess strategy that seeded Newton; `None` for warm starts.
    pub strategy: Option<GuessStrategy>,
    pub iterations: usize,
    pub residual_norm: f64,
}
