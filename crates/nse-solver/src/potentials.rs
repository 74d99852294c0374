//! Chemical potential / mass fraction conversions for a non-degenerate,
//! non-relativistic ideal gas.
//!
//! Temperatures and potentials are in MeV, densities in g/cm³, number
//! densities in cm⁻³.

use crate::error::{SolverResult, finite_or_overflow};
use nse_core::constants::{AMU_G, AMU_MEV, AVOGADRO, HC_MEV_CM};
use nse_core::{Species, ensure_positive};
use std::f64::consts::PI;

/// Quantum concentration nQ = (2π·T·A·m_u c² / (hc)²)^1.5 in cm⁻³.
pub fn quantum_concentration(temperature: f64, mass_number: u32) -> SolverResult<f64> {
    let t = ensure_positive(temperature, "temperature")?;
    let a = ensure_positive(f64::from(mass_number), "mass number")?;
    let base = 2.0 * PI * t * a * AMU_MEV / (HC_MEV_CM * HC_MEV_CM);
    finite_or_overflow(base.powf(1.5), "quantum concentration")
}

/// X = (A / (ρ·N_A))·nQ(T, A)·exp(μ/T).
pub fn mass_fraction_from_potential(
    potential: f64,
    mass_number: u32,
    density: f64,
    temperature: f64,
) -> SolverResult<f64> {
    let prefactor = mass_fraction_prefactor(mass_number, density, temperature)?;
    finite_or_overflow(prefactor * (potential / temperature).exp(), "mass fraction")
}

/// μ = T·ln(n / nQ(T, A)).
pub fn potential_from_number_density(
    temperature: f64,
    number_density: f64,
    mass_number: u32,
) -> SolverResult<f64> {
    let n = ensure_positive(number_density, "number density")?;
    let nq = quantum_concentration(temperature, mass_number)?;
    finite_or_overflow(temperature * (n / nq).ln(), "chemical potential")
}

/// Inverse of [`mass_fraction_from_potential`].
pub fn potential_from_mass_fraction(
    mass_fraction: f64,
    mass_number: u32,
    density: f64,
    temperature: f64,
) -> SolverResult<f64> {
    let x = ensure_positive(mass_fraction, "mass fraction")?;
    let prefactor = mass_fraction_prefactor(mass_number, density, temperature)?;
    finite_or_overflow(temperature * (x / prefactor).ln(), "chemical potential")
}

/// NSE potential of a bound species: Z·μ_p + (A−Z)·μ_n + B.
pub fn composite_potential(species: Species, neutron_potential: f64, proton_potential: f64) -> f64 {
    f64::from(species.charge()) * proton_potential
        + f64::from(species.neutron_number()) * neutron_potential
        + species.binding_energy_mev()
}

/// μ_α = 2μ_n + 2μ_p + B_α.
pub fn alpha_potential_from_constituents(neutron_potential: f64, proton_potential: f64) -> f64 {
    composite_potential(Species::Alpha, neutron_potential, proton_potential)
}

/// Free nucleon number density for a given share of the baryon mass.
pub(crate) fn nucleon_number_density(density: f64, fraction: f64) -> SolverResult<f64> {
    finite_or_overflow(fraction * density / AMU_G, "nucleon number density")
}

/// The μ-independent factor of X: (A / (ρ·N_A))·nQ(T, A).
pub(crate) fn mass_fraction_prefactor(
    mass_number: u32,
    density: f64,
    temperature: f64,
) -> SolverResult<f64> {
    let rho = ensure_positive(density, "density")?;
    let nq = quantum_concentration(temperature, mass_number)?;
    finite_or_overflow(
        f64::from(mass_number) / (rho * AVOGADRO) * nq,
        "mass fraction prefactor",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantum_concentration_scales_as_three_halves_power() {
        let nq1 = quantum_concentration(1.0, 1).unwrap();
        let nq4 = quantum_concentration(4.0, 1).unwrap();
        assert!((nq4 / nq1 - 8.0).abs() < 1e-9);

        // Mass number enters the same way as temperature
        let alpha = quantum_concentration(1.0, 4).unwrap();
        assert!((alpha / nq1 - 8.0).abs() < 1e-9);
    }

    #[test]
    fn quantum_concentration_rejects_non_positive_temperature() {
        assert!(quantum_concentration(0.0, 1).unwrap_err().is_domain());
        assert!(quantum_concentration(-1.0, 4).unwrap_err().is_domain());
        assert!(quantum_concentration(1.0, 0).unwrap_err().is_domain());
    }

    #[test]
    fn quantum_concentration_overflow_is_reported() {
        let err = quantum_concentration(1.0e300, 4).unwrap_err();
        assert!(err.is_overflow());
    }

    #[test]
    fn mass_fraction_is_increasing_in_potential() {
        let (rho, t) = (1.0e11, 3.0);
        let mut last = 0.0;
        for mu in [-60.0, -40.0, -20.0, -10.0, -5.0] {
            let x = mass_fraction_from_potential(mu, 1, rho, t).unwrap();
            assert!(x > last);
            last = x;
        }
    }

    #[test]
    fn number_density_potential_reproduces_mass_fraction() {
        // All baryons as free neutrons: X_n must come back as 1
        let (rho, t) = (1.0e11, 3.0);
        let n = nucleon_number_density(rho, 1.0).unwrap();
        let mu = potential_from_number_density(t, n, 1).unwrap();
        let x = mass_fraction_from_potential(mu, 1, rho, t).unwrap();
        assert!((x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn mass_fraction_inverse_is_exact() {
        let (rho, t) = (3.0e9, 1.7);
        for (x, a) in [(0.3, 1), (1.0e-7, 1), (0.6, 4)] {
            let mu = potential_from_mass_fraction(x, a, rho, t).unwrap();
            let back = mass_fraction_from_potential(mu, a, rho, t).unwrap();
            assert!((back / x - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn alpha_potential_matches_composite_rule() {
        let mu = alpha_potential_from_constituents(-10.0, -12.5);
        assert!((mu - (2.0 * -10.0 + 2.0 * -12.5 + 28.3)).abs() < 1e-12);
        assert_eq!(composite_potential(Species::Proton, -10.0, -12.5), -12.5);
        assert_eq!(composite_potential(Species::Neutron, -10.0, -12.5), -10.0);
    }

    #[test]
    fn zero_number_density_is_a_domain_error() {
        assert!(potential_from_number_density(3.0, 0.0, 1).unwrap_err().is_domain());
    }
}
