use crate::model::Point3;

/// Euclidean distance between `a` and `b`.
pub fn distance(a: Point3, b: Point3) -> f64 {
    (a - b).norm()
}

/// Acute-safe angle in degrees between `u` and `v`, in `[0, 180]`. The
/// cosine ratio is clamped into `[-1, 1]` before `acos` so that
/// floating-point drift on near-parallel or near-antiparallel vectors never
/// produces a NaN.
pub fn angle(u: Point3, v: Point3) -> f64 {
    let denom = u.norm() * v.norm();
    if denom == 0.0 {
        return 0.0;
    }
    let cos_theta = (u.dot(&v) / denom).clamp(-1.0, 1.0);
    cos_theta.acos().to_degrees()
}

/// `angle(n, gravity)` folded into `[0, 90]`. The mesh may carry inverted
/// normals; traversal difficulty depends on surface inclination, not on
/// which side of the face the normal happens to point.
pub fn traversal_angle(n: Point3) -> f64 {
    let theta = angle(n, Point3::GRAVITY);
    if theta > 90.0 {
        (theta - 180.0).abs()
    } else {
        theta
    }
}

/// Maps `x ∈ [lo, hi]` into `[0, 1]`. Returns 0 when `hi == lo`: a
/// degenerate metric (every edge tied) is treated as cost-free rather than
/// undefined, so COMBINED never divides by zero.
pub fn normalize(x: f64, lo: f64, hi: f64) -> f64 {
    if hi == lo {
        return 0.0;
    }
    (x - lo) / (hi - lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_angle_is_zero_straight_up() {
        assert!((traversal_angle(Point3::new(0.0, 0.0, 1.0))).abs() < 1e-9);
    }

    #[test]
    fn traversal_angle_folds_inverted_normal_to_zero() {
        assert!((traversal_angle(Point3::new(0.0, 0.0, -1.0))).abs() < 1e-9);
    }

    #[test]
    fn traversal_angle_stays_within_0_90_for_unit_vectors() {
        let samples = [
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.7071, 0.0, 0.7071),
            Point3::new(-0.7071, 0.0, -0.7071),
            Point3::new(0.3, 0.3, 0.9055),
        ];
        for n in samples {
            let a = traversal_angle(n);
            assert!((0.0..=90.0 + 1e-6).contains(&a), "angle {a} out of range");
        }
    }

    #[test]
    fn angle_clamps_antiparallel_vectors_to_180() {
        let u = Point3::new(1.0, 0.0, 0.0);
        let v = Point3::new(-1.0, 0.0, 0.0);
        assert!((angle(u, v) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn distance_is_euclidean_norm_of_difference() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 4.0, 0.0);
        assert!((distance(a, b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_is_zero_when_degenerate() {
        assert_eq!(normalize(5.0, 3.0, 3.0), 0.0);
    }

    #[test]
    fn normalize_maps_into_unit_interval() {
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(0.0, 0.0, 10.0), 0.0);
        assert_eq!(normalize(10.0, 0.0, 10.0), 1.0);
    }
}
