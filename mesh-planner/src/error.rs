use config::ConfigError;
use mesh_planner_core::PlannerError;

/// Top-level error type for the `mesh-planner` binary: wraps library
/// failures plus the I/O and configuration failures that only happen
/// outside of the core crate.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("failure building app: {0}")]
    BuildFailure(String),
    #[error("failure while running: {0}")]
    RunFailure(String),
    #[error("failed to read {path}: {source}")]
    MeshFileError { path: String, source: std::io::Error },
    #[error("malformed mesh file {path} at line {line}: {reason}")]
    MeshParseError { path: String, line: usize, reason: String },

    #[error(transparent)]
    ConfigFailure(#[from] ConfigError),
    #[error(transparent)]
    JsonFailure(#[from] serde_json::Error),
    #[error(transparent)]
    IoFailure(#[from] std::io::Error),
    #[error(transparent)]
    Planner(#[from] PlannerError),
}
