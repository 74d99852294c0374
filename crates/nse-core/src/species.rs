//! Baryonic species in the three-component NSE mixture.

use crate::units::constants::ALPHA_BINDING_MEV;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Species {
    /// Free neutron
    Neutron,
    /// Free proton
    Proton,
    /// Alpha particle (⁴He nucleus)
    Alpha,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Neutron, Species::Proton, Species::Alpha];

    pub fn key(&self) -> &'static str {
        match self {
            Species::Neutron => "n",
            Species::Proton => "p",
            Species::Alpha => "alpha",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Species::Neutron => "Neutron",
            Species::Proton => "Proton",
            Species::Alpha => "Alpha",
        }
    }

    /// Atomic mass number A.
    pub fn mass_number(&self) -> u32 {
        match self {
            Species::Neutron | Species::Proton => 1,
            Species::Alpha => 4,
        }
    }

    /// Atomic charge Z.
    pub fn charge(&self) -> u32 {
        match self {
            Species::Neutron => 0,
            Species::Proton => 1,
            Species::Alpha => 2,
        }
    }

    pub fn neutron_number(&self) -> u32 {
        self.mass_number() - self.charge()
    }

    /// Nuclear binding energy in MeV.
    pub fn binding_energy_mev(&self) -> f64 {
        match self {
            Species::Neutron | Species::Proton => 0.0,
            Species::Alpha => ALPHA_BINDING_MEV,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Species {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "neutron" => Ok(Species::Neutron),
            "p" | "proton" => Ok(Species::Proton),
            "alpha" | "a" | "he4" => Ok(Species::Alpha),
            other => Err(format!("Unknown species '{}'", other)),
        }
    }
}
