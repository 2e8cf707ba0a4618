//! Per-path statistics (spec §4.7 step 5): min/max/mean/std/sum of distance,
//! energy, rotation, and traversal angle along a planned path. Computed
//! independently of which metric produced the path, mirroring the
//! diagnostic report the facade emits for every planning result.

use crate::geometry::{distance, traversal_angle};
use crate::model::{Mesh, VertexId};
use crate::weight::{locomotion, EnergyCoefficients};

/// Summary of a sequence of per-edge samples along a path.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Stat {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
    pub sum: f64,
}

impl Stat {
    fn from_samples(samples: &[f64]) -> Stat {
        if samples.is_empty() {
            return Stat::default();
        }
        let sum: f64 = samples.iter().sum();
        let mean = sum / samples.len() as f64;
        let variance = samples.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / samples.len() as f64;
        Stat {
            min: samples.iter().copied().fold(f64::INFINITY, f64::min),
            max: samples.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean,
            std: variance.sqrt(),
            sum,
        }
    }
}

/// Per-edge statistics along an entire path (spec §4.7, "Derives per-path
/// statistics: min/max/mean/std/sum of distance, energy, rotation,
/// traversal").
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct PathStats {
    pub distance: Stat,
    pub energy: Stat,
    pub rotation: Stat,
    pub traversal: Stat,
}

/// Computes [`PathStats`] by walking every consecutive pair of `path`,
/// using the vertex two steps back as the predecessor context for energy
/// and rotation, matching the predecessor-aware formulas of §4.4.
pub fn compute_path_stats(mesh: &Mesh, path: &[VertexId], energy_coefficients: &EnergyCoefficients) -> PathStats {
    let mut distances = Vec::new();
    let mut energies = Vec::new();
    let mut rotations = Vec::new();
    let mut traversals = Vec::new();

    for i in 0..path.len().saturating_sub(1) {
        let v = path[i];
        let u = path[i + 1];
        let predecessor = if i > 0 { Some(path[i - 1]) } else { None };

        let (Ok(pv), Ok(pu), Ok(nu)) = (mesh.position(v), mesh.position(u), mesh.normal(u)) else {
            continue;
        };
        let predecessor_position = predecessor.and_then(|p| mesh.position(p).ok());

        distances.push(distance(pv, pu));
        traversals.push(traversal_angle(nu));
        energies.push(locomotion::energy_cost(pv, pu, predecessor_position, energy_coefficients));
        rotations.push(locomotion::rotation(pv, pu, predecessor_position));
    }

    PathStats {
        distance: Stat::from_samples(&distances),
        energy: Stat::from_samples(&energies),
        rotation: Stat::from_samples(&rotations),
        traversal: Stat::from_samples(&traversals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point3;

    #[test]
    fn single_step_path_sums_equal_the_one_sample() {
        let positions = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 4.0, 0.0)];
        let normals = vec![Point3::new(0.0, 0.0, 1.0); 2];
        let mesh = Mesh::from_raw(&positions, &normals, &[]).unwrap();
        let stats = compute_path_stats(&mesh, &[VertexId::new(0), VertexId::new(1)], &EnergyCoefficients::default());
        assert!((stats.distance.sum - 5.0).abs() < 1e-9);
        assert!((stats.distance.min - 5.0).abs() < 1e-9);
        assert!((stats.distance.max - 5.0).abs() < 1e-9);
        assert_eq!(stats.distance.std, 0.0);
    }

    #[test]
    fn empty_path_yields_zeroed_stats() {
        let positions = vec![Point3::new(0.0, 0.0, 0.0)];
        let normals = vec![Point3::new(0.0, 0.0, 1.0)];
        let mesh = Mesh::from_raw(&positions, &normals, &[]).unwrap();
        let stats = compute_path_stats(&mesh, &[VertexId::new(0)], &EnergyCoefficients::default());
        assert_eq!(stats.distance, Stat::default());
    }
}
