use nse_core::NseError;
use nse_solver::SolverError;

#[derive(thiserror::Error, Debug)]
pub enum SweepError {
    #[error("Invalid sweep configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid sweep state: {0}")]
    State(#[from] NseError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SweepError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        SweepError::InvalidConfiguration(what.into())
    }
}
