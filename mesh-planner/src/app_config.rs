//! Layered application configuration: an embedded default TOML overlaid with
//! the user's config file, following the same two-source [`config::Config`]
//! pattern the planner's teacher uses for its own app configuration.

use crate::error::AppError;
use mesh_planner_core::config::PlannerConfig;
use mesh_planner_core::weight::Metric;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AppSystemParameters {
    /// Rayon global thread-pool size for [`plan_many`](mesh_planner_core::facade::Planner::plan_many).
    /// `None` defers to Rayon's own default (number of logical cores).
    pub parallelism: Option<usize>,
}

/// Top-level configuration for the `mesh-planner` binary: the tunables the
/// core crate needs, plus which metrics to run and how much parallelism to
/// use across them.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub planner: PlannerConfig,
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub system: AppSystemParameters,
}

impl TryFrom<&Path> for AppConfig {
    type Error = AppError;

    fn try_from(config_path: &Path) -> Result<Self, Self::Error> {
        let default_config =
            config::File::from_str(include_str!("app_config.default.toml"), config::FileFormat::Toml);

        let config = config::Config::builder()
            .add_source(default_config)
            .add_source(config::File::from(config_path))
            .build()?;

        let app_config: AppConfig = config.try_deserialize().map_err(|e| {
            AppError::BuildFailure(format!(
                "while reading {}: {e}",
                config_path.display()
            ))
        })?;
        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_overlay_fills_in_unset_user_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "metrics = [\"flattest\"]").unwrap();
        writeln!(file, "[planner]").unwrap();
        writeln!(file, "border_threshold = 1.5").unwrap();
        let config = AppConfig::try_from(file.path()).unwrap();
        assert_eq!(config.metrics, vec![Metric::Flattest]);
        assert_eq!(config.planner.border_threshold, 1.5);
        // untouched fields fall back to the embedded default
        assert_eq!(config.planner.transversality_threshold, 35.0);
    }
}
