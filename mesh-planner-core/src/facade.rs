//! Planner facade (C7): orchestrates mesh → graph → preparation → search
//! for each requested metric and reports per-path statistics (spec §4.7).

use crate::config::PlannerConfig;
use crate::error::PlannerError;
use crate::model::{Mesh, Point3, VertexId};
use crate::prepare::prepare;
use crate::search::{dijkstra, SearchError};
use crate::stats::{compute_path_stats, PathStats};
use crate::weight::{Metric, PoseEstimator, WeightEngine};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

/// One requested metric's planning result (spec §6, "Planner output").
#[derive(Debug, Clone, serde::Serialize)]
pub struct PlanRecord {
    pub metric: Metric,
    pub face_path: Vec<VertexId>,
    pub path: Vec<Point3>,
    pub cost: f64,
    pub time_sec: f64,
    pub stats: PathStats,
}

/// Stateless dispatcher over one immutable [`Mesh`] (spec §3, "The planner
/// facade is a stateless dispatcher"). Each [`plan`](Planner::plan) call
/// builds its own graph and owns it for the duration of the request; no
/// mutable state is shared between calls.
pub struct Planner<'a> {
    mesh: &'a Mesh,
    config: &'a PlannerConfig,
    pose_estimator: Option<Arc<dyn PoseEstimator>>,
}

impl<'a> Planner<'a> {
    pub fn new(mesh: &'a Mesh, config: &'a PlannerConfig, pose_estimator: Option<Arc<dyn PoseEstimator>>) -> Self {
        Planner { mesh, config, pose_estimator }
    }

    /// Plans a single metric from `source_point` to `target_point`, both
    /// resolved to their nearest mesh vertex (spec §6, "Planner input").
    pub fn plan(&self, metric: Metric, source_point: Point3, target_point: Point3) -> Result<PlanRecord, PlannerError> {
        let start = Instant::now();

        let source = self
            .mesh
            .nearest_vertex(source_point)
            .ok_or(PlannerError::AnchorResolutionFailed)?;
        let target = self
            .mesh
            .nearest_vertex(target_point)
            .ok_or(PlannerError::AnchorResolutionFailed)?;

        let prepared = prepare(self.mesh, self.config, source, Some(target))?;
        let engine = WeightEngine::new(self.mesh, &prepared.graph, metric, self.config, self.pose_estimator.clone())?;
        let output = dijkstra(&prepared.graph, &engine, &[source], Some(target), None, None)?;

        let face_path = output
            .path_to(target)
            .map(<[VertexId]>::to_vec)
            .ok_or(SearchError::NoPathTo(target))?;
        let cost = output.distance_to(target).ok_or(SearchError::NoPathTo(target))?;
        let path: Vec<Point3> = face_path
            .iter()
            .map(|&id| self.mesh.position(id))
            .collect::<Result<_, _>>()?;
        let stats = compute_path_stats(self.mesh, &face_path, &self.config.energy);

        Ok(PlanRecord {
            metric,
            face_path,
            path,
            cost,
            time_sec: start.elapsed().as_secs_f64(),
            stats,
        })
    }

    /// Plans every requested metric as an independent worker (spec §5):
    /// each metric gets its own prepared graph; no mutable state is shared
    /// except the immutable mesh. Results are joined before returning.
    pub fn plan_many(
        &self,
        metrics: &[Metric],
        source_point: Point3,
        target_point: Point3,
    ) -> Vec<(Metric, Result<PlanRecord, PlannerError>)> {
        metrics
            .par_iter()
            .map(|&metric| (metric, self.plan(metric, source_point, target_point)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point3 as P;

    fn unit_tetra() -> Mesh {
        let positions = vec![P::new(0.0, 0.0, 0.0), P::new(1.0, 0.0, 0.0), P::new(0.0, 1.0, 0.0), P::new(0.0, 0.0, 1.0)];
        let normals = vec![P::new(0.0, 0.0, 1.0); 4];
        Mesh::from_raw(&positions, &normals, &[[0, 1, 2], [0, 1, 3]]).unwrap()
    }

    #[test]
    fn plans_shortest_path_on_unit_tetra() {
        let mesh = unit_tetra();
        let config = PlannerConfig::default();
        let planner = Planner::new(&mesh, &config, None);
        let record = planner.plan(Metric::Shortest, P::new(0.0, 0.0, 0.0), P::new(0.0, 1.0, 0.0)).unwrap();
        assert_eq!(record.face_path, vec![VertexId::new(0), VertexId::new(2)]);
        assert!((record.cost - 1.0).abs() < 1e-9);
    }

    #[test]
    fn source_equals_target_plans_zero_cost() {
        let mesh = unit_tetra();
        let config = PlannerConfig::default();
        let planner = Planner::new(&mesh, &config, None);
        let record = planner.plan(Metric::Shortest, P::new(0.0, 0.0, 0.0), P::new(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(record.cost, 0.0);
        assert_eq!(record.face_path, vec![VertexId::new(0)]);
    }

    #[test]
    fn plan_many_runs_every_metric_independently() {
        let mesh = unit_tetra();
        let config = PlannerConfig::default();
        let planner = Planner::new(&mesh, &config, None);
        let results = planner.plan_many(
            &[Metric::Shortest, Metric::Flattest, Metric::Straightest],
            P::new(0.0, 0.0, 0.0),
            P::new(0.0, 1.0, 0.0),
        );
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|(_, r)| r.is_ok()));
    }
}
