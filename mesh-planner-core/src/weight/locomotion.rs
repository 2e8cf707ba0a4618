use crate::geometry::{angle, distance};
use crate::model::Point3;
use crate::weight::EnergyCoefficients;

/// Heading change (`rot`, degrees) at `v` given `pv → pu` and an optional
/// predecessor position `pp` (spec §4.4, ENERGY). With no predecessor, `rot`
/// is the angle between the source and target positions themselves; with a
/// predecessor, it is the angle between the incoming and outgoing segments.
pub fn rotation(pv: Point3, pu: Point3, predecessor_position: Option<Point3>) -> f64 {
    match predecessor_position {
        None => angle(pv, pu),
        Some(pp) => {
            let v_sp = pv - pp;
            let v_ts = pu - pv;
            angle(v_sp, v_ts)
        }
    }
}

/// Pitch (degrees from gravity) of the segment used to derive `rot`, the
/// other half of the ENERGY formula's slope term.
pub fn pitch(pv: Point3, pu: Point3, predecessor_position: Option<Point3>) -> f64 {
    match predecessor_position {
        None => angle(pu - pv, Point3::GRAVITY),
        Some(pp) => angle(pv - pp, Point3::GRAVITY),
    }
}

/// The ENERGY locomotion-cost formula (spec §4.4): a calibrated blend of
/// rotation cost and slope cost, scaled by segment length.
pub fn energy_cost(pv: Point3, pu: Point3, predecessor_position: Option<Point3>, coeffs: &EnergyCoefficients) -> f64 {
    let rot = rotation(pv, pu, predecessor_position);
    let pitch = pitch(pv, pu, predecessor_position);
    let alpha = 90.0 - pitch;
    let d = distance(pv, pu);
    let slope_term = if alpha < 0.0 {
        coeffs.downhill_slope * alpha + coeffs.downhill_intercept
    } else {
        coeffs.uphill_slope * alpha + coeffs.uphill_intercept
    };
    ((coeffs.rotation * rot / 360.0) + slope_term) * d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_is_positive_for_a_level_step() {
        let pv = Point3::new(0.0, 0.0, 0.0);
        let pu = Point3::new(1.0, 0.0, 0.0);
        let e = energy_cost(pv, pu, None, &EnergyCoefficients::default());
        assert!(e > 0.0);
    }
}
