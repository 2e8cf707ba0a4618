use crate::geometry::{angle, distance, traversal_angle};
use crate::model::{Graph, Mesh};
use crate::weight::{locomotion, EnergyCoefficients};

/// Per-metric `(min, max)` pairs gathered by a single O(|E|) scan over every
/// edge of a prepared graph, evaluated with no predecessor context (spec
/// §4.5). Feeds the COMBINED metric's normalizers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMaxBounds {
    pub distance: (f64, f64),
    pub traversal: (f64, f64),
    pub energy: (f64, f64),
    pub rotation: (f64, f64),
}

impl MinMaxBounds {
    pub fn scan(mesh: &Mesh, graph: &Graph, energy_coefficients: &EnergyCoefficients) -> MinMaxBounds {
        let mut distance_bounds = (f64::INFINITY, f64::NEG_INFINITY);
        let mut traversal_bounds = (f64::INFINITY, f64::NEG_INFINITY);
        let mut energy_bounds = (f64::INFINITY, f64::NEG_INFINITY);
        let mut rotation_bounds = (f64::INFINITY, f64::NEG_INFINITY);

        let mut saw_edge = false;
        for v in graph.nodes() {
            let Some(neighbors) = graph.neighbors(v) else {
                continue;
            };
            for &u in neighbors {
                let (Ok(pv), Ok(pu), Ok(nu)) = (mesh.position(v), mesh.position(u), mesh.normal(u))
                else {
                    continue;
                };
                saw_edge = true;
                let d = distance(pv, pu);
                let t = traversal_angle(nu);
                let rot = angle(pv, pu);
                let e = locomotion::energy_cost(pv, pu, None, energy_coefficients);

                widen(&mut distance_bounds, d);
                widen(&mut traversal_bounds, t);
                widen(&mut rotation_bounds, rot);
                widen(&mut energy_bounds, e);
            }
        }

        if !saw_edge {
            distance_bounds = (0.0, 0.0);
            traversal_bounds = (0.0, 0.0);
            energy_bounds = (0.0, 0.0);
            rotation_bounds = (0.0, 0.0);
        }

        MinMaxBounds {
            distance: distance_bounds,
            traversal: traversal_bounds,
            energy: energy_bounds,
            rotation: rotation_bounds,
        }
    }
}

fn widen(bounds: &mut (f64, f64), x: f64) {
    bounds.0 = bounds.0.min(x);
    bounds.1 = bounds.1.max(x);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point3;

    #[test]
    fn single_edge_length_degenerates_to_equal_bounds() {
        let positions = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let normals = vec![Point3::new(0.0, 0.0, 1.0); 2];
        let mesh = Mesh::from_raw(&positions, &normals, &[]).unwrap();
        let mut graph = Graph::new();
        graph.insert_edge(crate::model::VertexId::new(0), crate::model::VertexId::new(1));
        let bounds = MinMaxBounds::scan(&mesh, &graph, &EnergyCoefficients::default());
        assert_eq!(bounds.distance.0, bounds.distance.1);
    }
}
