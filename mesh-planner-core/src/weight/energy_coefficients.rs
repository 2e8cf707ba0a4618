use serde::{Deserialize, Serialize};

/// Calibration constants for the ENERGY locomotion-cost model (spec §4.4).
/// These are empirically fit constants, not natural ones, hence exposed as a
/// configuration value rather than baked into the formula.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyCoefficients {
    /// Rotation-cost coefficient, applied to `rot / 360`.
    pub rotation: f64,
    /// Slope-cost coefficient for downhill segments (`alpha < 0`).
    pub downhill_slope: f64,
    /// Slope-cost intercept for downhill segments.
    pub downhill_intercept: f64,
    /// Slope-cost coefficient for uphill/flat segments (`alpha >= 0`).
    pub uphill_slope: f64,
    /// Slope-cost intercept for uphill/flat segments.
    pub uphill_intercept: f64,
}

impl Default for EnergyCoefficients {
    fn default() -> Self {
        EnergyCoefficients {
            rotation: 37735.9,
            downhill_slope: -475.07,
            downhill_intercept: 1089.3,
            uphill_slope: 564.97,
            uphill_intercept: 1364.9,
        }
    }
}
