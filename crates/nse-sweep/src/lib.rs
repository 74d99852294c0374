//! nse-sweep: parameter sweeps over the equilibrium solver.
//!
//! A [`SweepPlan`] fixes a base state, varies one coordinate along a
//! [`SweepDefinition`] and records one outcome per point. Plans load from
//! YAML or JSON; results export as CSV or JSON.

pub mod definition;
pub mod error;
pub mod executor;
pub mod export;
pub mod plan;

pub use definition::{SweepDefinition, SweepSpacing, SweepVariable};
pub use error::SweepError;
pub use executor::{PointFailure, SweepResult, execute_sweep};
pub use export::{write_csv, write_json};
pub use plan::{ExecutionMode, SweepPlan};

use std::path::Path;

pub fn load_yaml(path: &Path) -> Result<SweepPlan, SweepError> {
    let content = std::fs::read_to_string(path)?;
    let plan: SweepPlan = serde_yaml::from_str(&content)?;
    plan.validate()?;
    Ok(plan)
}

pub fn save_yaml(path: &Path, plan: &SweepPlan) -> Result<(), SweepError> {
    plan.validate()?;
    let content = serde_yaml::to_string(plan)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> Result<SweepPlan, SweepError> {
    let content = std::fs::read_to_string(path)?;
    let plan: SweepPlan = serde_json::from_str(&content)?;
    plan.validate()?;
    Ok(plan)
}

pub fn save_json(path: &Path, plan: &SweepPlan) -> Result<(), SweepError> {
    plan.validate()?;
    let content = serde_json::to_string_pretty(plan)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a plan, picking the format from the file extension.
///
/// `.json` is read as JSON; anything else as YAML.
pub fn load_plan(path: &Path) -> Result<SweepPlan, SweepError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json(path),
        _ => load_yaml(path),
    }
}
