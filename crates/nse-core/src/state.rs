//! Thermodynamic state point: density, temperature, proton fraction.

use crate::error::NseResult;
use crate::numeric::{ensure_open_unit, ensure_positive};
use crate::units::{Density, Energy, Ratio, density_in_g_per_cm3, energy_in_mev, ratio_value};

/// Validated (ρ, T, Y_p) triple.
///
/// Density is in g/cm³ and temperature in MeV. Construction rejects
/// non-positive density or temperature and any proton fraction outside the
/// open interval (0, 1), so a `StatePoint` in hand is always solvable input.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawStatePoint", into = "RawStatePoint")
)]
pub struct StatePoint {
    density: f64,
    temperature: f64,
    proton_fraction: f64,
}

impl StatePoint {
    pub fn new(density: f64, temperature: f64, proton_fraction: f64) -> NseResult<Self> {
        Ok(Self {
            density: ensure_positive(density, "density")?,
            temperature: ensure_positive(temperature, "temperature")?,
            proton_fraction: ensure_open_unit(proton_fraction, "proton fraction")?,
        })
    }

    /// Build from typed quantities.
    pub fn from_quantities(density: Density, temperature: Energy, proton_fraction: Ratio) -> NseResult<Self> {
        Self::new(
            density_in_g_per_cm3(density),
            energy_in_mev(temperature),
            ratio_value(proton_fraction),
        )
    }

    /// Density in g/cm³.
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Temperature in MeV.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn proton_fraction(&self) -> f64 {
        self.proton_fraction
    }

    pub fn neutron_fraction(&self) -> f64 {
        1.0 - self.proton_fraction
    }

    pub fn with_density(&self, density: f64) -> NseResult<Self> {
        Self::new(density, self.temperature, self.proton_fraction)
    }

    pub fn with_temperature(&self, temperature: f64) -> NseResult<Self> {
        Self::new(self.density, temperature, self.proton_fraction)
    }

    pub fn with_proton_fraction(&self, proton_fraction: f64) -> NseResult<Self> {
        Self::new(self.density, self.temperature, proton_fraction)
    }

    /// The mirror state with protons and neutrons exchanged.
    pub fn mirrored(&self) -> Self {
        Self {
            proton_fraction: 1.0 - self.proton_fraction,
            ..*self
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RawStatePoint {
    density: f64,
    temperature: f64,
    proton_fraction: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawStatePoint> for StatePoint {
    type Error = crate::NseError;

    fn try_from(raw: RawStatePoint) -> Result<Self, Self::Error> {
        StatePoint::new(raw.density, raw.temperature, raw.proton_fraction)
    }
}

#[cfg(feature = "serde")]
impl From<StatePoint> for RawStatePoint {
    fn from(state: StatePoint) -> Self {
        RawStatePoint {
            density: state.density,
            temperature: state.temperature,
            proton_fraction: state.proton_fraction,
        }
    }
}
