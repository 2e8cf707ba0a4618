//! Tunable parameters for the preparation pipeline and the edge-weight
//! engine (spec §6, "Configuration surface"). A single [`PlannerConfig`] is
//! shared read-only across every metric a facade call plans for.

use crate::weight::EnergyCoefficients;
use serde::{Deserialize, Serialize};

/// All tunables exposed to callers, with the defaults named in the spec's
/// configuration table. Constructed by the `mesh-planner` binary from a
/// layered TOML configuration; the core crate only needs `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Max traversal angle, degrees, kept by the traversability filter.
    pub transversality_threshold: f64,
    /// Border-expansion distance, meters. `0.0` disables the step.
    pub border_threshold: f64,
    /// Reserved for a future inter-face jump filter; unused by the core.
    pub bumpiness_threshold: f64,
    /// COMBINED weight on normalized distance.
    pub c_short: f64,
    /// COMBINED weight on normalized energy.
    pub c_energy: f64,
    /// COMBINED weight on normalized traversal angle.
    pub c_traversal: f64,
    /// Std-dev cutoff, degrees, below which `*_NORMAL` metrics fall back to
    /// the cheap normal-based traversal angle instead of calling a plugin.
    pub c_threshold_std_angle_terrain: f64,
    /// Frontier-clustering neighborhood radius, meters.
    pub dbscan_eps: f64,
    /// Frontier-clustering minimum neighborhood density.
    pub dbscan_min_samples: usize,
    /// Locomotion-energy model calibration constants.
    pub energy: EnergyCoefficients,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            transversality_threshold: 35.0,
            border_threshold: 0.0,
            bumpiness_threshold: 0.5,
            c_short: 0.25,
            c_energy: 0.25,
            c_traversal: 0.5,
            c_threshold_std_angle_terrain: 5.0,
            dbscan_eps: 2.5,
            dbscan_min_samples: 2,
            energy: EnergyCoefficients::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_table() {
        let cfg = PlannerConfig::default();
        assert_eq!(cfg.transversality_threshold, 35.0);
        assert_eq!(cfg.border_threshold, 0.0);
        assert_eq!((cfg.c_short, cfg.c_energy, cfg.c_traversal), (0.25, 0.25, 0.5));
        assert_eq!(cfg.dbscan_eps, 2.5);
        assert_eq!(cfg.dbscan_min_samples, 2);
    }
}
