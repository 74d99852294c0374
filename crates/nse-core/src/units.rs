// nse-core/src/units.rs
//
// Typed quantities live at the API edges; the solver itself works in plain
// f64 with density in g/cm³ and temperature/energies in MeV.

use uom::si::f64::{Energy as UomEnergy, MassDensity as UomMassDensity, Ratio as UomRatio};

// Public canonical unit types (f64)
pub type Density = UomMassDensity;
pub type Energy = UomEnergy;
pub type Ratio = UomRatio;

#[inline]
pub fn g_per_cm3(v: f64) -> Density {
    use uom::si::mass_density::gram_per_cubic_centimeter;
    Density::new::<gram_per_cubic_centimeter>(v)
}

#[inline]
pub fn mev(v: f64) -> Energy {
    use uom::si::energy::megaelectronvolt;
    Energy::new::<megaelectronvolt>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

#[inline]
pub fn density_in_g_per_cm3(d: Density) -> f64 {
    use uom::si::mass_density::gram_per_cubic_centimeter;
    d.get::<gram_per_cubic_centimeter>()
}

#[inline]
pub fn energy_in_mev(e: Energy) -> f64 {
    use uom::si::energy::megaelectronvolt;
    e.get::<megaelectronvolt>()
}

#[inline]
pub fn ratio_value(r: Ratio) -> f64 {
    use uom::si::ratio::ratio;
    r.get::<ratio>()
}

/// Fixed physical constants. Units are MeV, g and cm throughout.
pub mod constants {
    /// Atomic mass unit rest energy (MeV).
    pub const AMU_MEV: f64 = 931.494_103;
    /// Atomic mass unit (g).
    pub const AMU_G: f64 = 1.660_539_07e-24;
    /// Avogadro's number (1/mol).
    pub const AVOGADRO: f64 = 6.022_140_76e23;
    /// Planck constant times speed of light (MeV·cm).
    pub const HC_MEV_CM: f64 = 1.24e-10;
    /// Alpha-particle binding energy (MeV).
    pub const ALPHA_BINDING_MEV: f64 = 28.3;
}
