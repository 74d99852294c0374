//! Sweep plan files.

use crate::definition::SweepDefinition;
use crate::error::SweepError;
use nse_core::StatePoint;
use nse_solver::NewtonConfig;
use serde::{Deserialize, Serialize};

/// How the points of a sweep are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One point after another, in sweep order
    #[default]
    Sequential,
    /// Independent points on the rayon pool
    Parallel,
}

/// A complete, serializable sweep request.
///
/// ```yaml
/// name: cooling alpha formation
/// base:
///   density: 1.0e11
///   temperature: 3.0
///   proton_fraction: 0.25
/// sweep:
///   variable: temperature
///   start: 1.0
///   end: 10.0
///   points: 10
/// execution: parallel
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// State supplying the coordinates held fixed during the sweep
    pub base: StatePoint,
    pub sweep: SweepDefinition,
    #[serde(default)]
    pub solver: NewtonConfig,
    #[serde(default)]
    pub execution: ExecutionMode,
    /// Retry a failed point from the previous converged one.
    /// Sequential execution only.
    #[serde(default = "default_warm_start")]
    pub warm_start: bool,
}

fn default_warm_start() -> bool {
    true
}

impl SweepPlan {
    pub fn new(base: StatePoint, sweep: SweepDefinition) -> Self {
        SweepPlan {
            name: None,
            base,
            sweep,
            solver: NewtonConfig::default(),
            execution: ExecutionMode::default(),
            warm_start: default_warm_start(),
        }
    }

    pub fn with_execution(mut self, execution: ExecutionMode) -> Self {
        self.execution = execution;
        self
    }

    pub fn with_solver(mut self, solver: NewtonConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        self.sweep.validate()?;
        self.solver.validate()?;
        Ok(())
    }

    /// Every state point of the sweep, in order.
    pub fn states(&self) -> Result<Vec<StatePoint>, SweepError> {
        self.sweep
            .generate_points()
            .into_iter()
            .map(|value| {
                self.sweep
                    .variable
                    .apply(&self.base, value)
                    .map_err(SweepError::from)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{SweepSpacing, SweepVariable};

    fn temperature_plan() -> SweepPlan {
        let base = StatePoint::new(1e11, 3.0, 0.25).unwrap();
        let sweep =
            SweepDefinition::new(SweepVariable::Temperature, 1.0, 10.0, 10, SweepSpacing::Linear)
                .unwrap();
        SweepPlan::new(base, sweep)
    }

    #[test]
    fn states_hold_fixed_axes() {
        let states = temperature_plan().states().unwrap();
        assert_eq!(states.len(), 10);
        assert!(states.iter().all(|s| s.density() == 1e11 && s.proton_fraction() == 0.25));
        assert_eq!(states[0].temperature(), 1.0);
        assert_eq!(states[9].temperature(), 10.0);
    }

    #[test]
    fn minimal_yaml_uses_defaults() {
        let yaml = r#"
base:
  density: 1.0e11
  temperature: 3.0
  proton_fraction: 0.5
sweep:
  variable: proton_fraction
  start: 0.1
  end: 0.9
  points: 5
"#;
        let plan: SweepPlan = serde_yaml::from_str(yaml).unwrap();
        plan.validate().unwrap();
        assert_eq!(plan.execution, ExecutionMode::Sequential);
        assert_eq!(plan.sweep.spacing, SweepSpacing::Linear);
        assert!(plan.warm_start);
        assert_eq!(plan.solver, NewtonConfig::default());
    }

    #[test]
    fn invalid_base_state_is_rejected_on_load() {
        let yaml = r#"
base: { density: 1.0e11, temperature: -3.0, proton_fraction: 0.5 }
sweep: { variable: density, start: 1.0e9, end: 1.0e12, points: 4, spacing: logarithmic }
"#;
        assert!(serde_yaml::from_str::<SweepPlan>(yaml).is_err());
    }

    #[test]
    fn invalid_solver_config_fails_validation() {
        let mut plan = temperature_plan();
        plan.solver.max_iterations = 0;
        assert!(matches!(plan.validate(), Err(SweepError::Solver(_))));
    }

    #[test]
    fn json_round_trip() {
        let plan = temperature_plan().with_execution(ExecutionMode::Parallel);
        let json = serde_json::to_string(&plan).unwrap();
        let back: SweepPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }
}
