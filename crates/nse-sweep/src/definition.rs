//! Sweep point generation.
//!
//! A sweep varies one coordinate of a [`StatePoint`] between two bounds,
//! with either uniform or logarithmic spacing.

use crate::error::SweepError;
use nse_core::{NseResult, StatePoint, ensure_open_unit, ensure_positive};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// State coordinate varied by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepVariable {
    /// Temperature in MeV
    Temperature,
    /// Proton fraction Y_p
    ProtonFraction,
    /// Mass density in g/cm³
    Density,
}

impl SweepVariable {
    pub const ALL: [SweepVariable; 3] = [
        SweepVariable::Temperature,
        SweepVariable::ProtonFraction,
        SweepVariable::Density,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SweepVariable::Temperature => "temperature",
            SweepVariable::ProtonFraction => "proton_fraction",
            SweepVariable::Density => "density",
        }
    }

    /// Column header including units.
    pub fn label(&self) -> &'static str {
        match self {
            SweepVariable::Temperature => "temperature_mev",
            SweepVariable::ProtonFraction => "proton_fraction",
            SweepVariable::Density => "density_g_cm3",
        }
    }

    /// Check that `value` is admissible for this coordinate.
    pub fn check(&self, value: f64) -> NseResult<f64> {
        match self {
            SweepVariable::Temperature => ensure_positive(value, "temperature"),
            SweepVariable::ProtonFraction => ensure_open_unit(value, "proton fraction"),
            SweepVariable::Density => ensure_positive(value, "density"),
        }
    }

    /// `base` with this coordinate replaced by `value`.
    pub fn apply(&self, base: &StatePoint, value: f64) -> NseResult<StatePoint> {
        match self {
            SweepVariable::Temperature => base.with_temperature(value),
            SweepVariable::ProtonFraction => base.with_proton_fraction(value),
            SweepVariable::Density => base.with_density(value),
        }
    }
}

impl fmt::Display for SweepVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SweepVariable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "temperature" | "t" => Ok(SweepVariable::Temperature),
            "proton_fraction" | "yp" | "y_p" => Ok(SweepVariable::ProtonFraction),
            "density" | "rho" => Ok(SweepVariable::Density),
            other => Err(format!("unknown sweep variable '{}'", other)),
        }
    }
}

/// Spacing of sweep points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepSpacing {
    /// Uniformly spaced points
    #[default]
    Linear,
    /// Uniform in the logarithm
    Logarithmic,
}

impl fmt::Display for SweepSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Logarithmic => write!(f, "logarithmic"),
        }
    }
}

/// Definition of a single-coordinate sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepDefinition {
    pub variable: SweepVariable,
    pub start: f64,
    pub end: f64,
    pub points: usize,
    #[serde(default)]
    pub spacing: SweepSpacing,
}

impl SweepDefinition {
    pub fn new(
        variable: SweepVariable,
        start: f64,
        end: f64,
        points: usize,
        spacing: SweepSpacing,
    ) -> Result<Self, SweepError> {
        let sweep = SweepDefinition {
            variable,
            start,
            end,
            points,
            spacing,
        };
        sweep.validate()?;
        Ok(sweep)
    }

    /// Both bounds must be admissible for the variable. Every generated
    /// point then lies between them and is admissible too.
    pub fn validate(&self) -> Result<(), SweepError> {
        if self.points < 2 {
            return Err(SweepError::invalid("sweep must have at least 2 points"));
        }
        self.variable.check(self.start)?;
        self.variable.check(self.end)?;
        if (self.start - self.end).abs() <= f64::EPSILON * self.start.abs().max(self.end.abs()) {
            return Err(SweepError::invalid("start and end values must be different"));
        }
        Ok(())
    }

    /// All points in sweep order, endpoints exact.
    pub fn generate_points(&self) -> Vec<f64> {
        match self.spacing {
            SweepSpacing::Linear => self.generate_linear(),
            SweepSpacing::Logarithmic => self.generate_logarithmic(),
        }
    }

    fn generate_linear(&self) -> Vec<f64> {
        if self.points <= 1 {
            return vec![self.start];
        }

        let delta = (self.end - self.start) / (self.points - 1) as f64;
        let mut points: Vec<f64> = (0..self.points)
            .map(|i| self.start + i as f64 * delta)
            .collect();
        points[self.points - 1] = self.end;
        points
    }

    fn generate_logarithmic(&self) -> Vec<f64> {
        if self.points <= 1 {
            return vec![self.start];
        }

        let log_start = self.start.ln();
        let log_delta = (self.end.ln() - log_start) / (self.points - 1) as f64;
        let mut points: Vec<f64> = (0..self.points)
            .map(|i| (log_start + i as f64 * log_delta).exp())
            .collect();
        points[0] = self.start;
        points[self.points - 1] = self.end;
        points
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sweep {} from {} to {} ({} points, {})",
            self.variable, self.start, self.end, self.points, self.spacing
        )
    }
}
