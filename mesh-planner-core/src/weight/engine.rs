use crate::config::PlannerConfig;
use crate::geometry::{distance, normalize, traversal_angle};
use crate::model::{Graph, Mesh, Point3, VertexId};
use crate::weight::bounds::MinMaxBounds;
use crate::weight::pose_estimator::PoseEstimator;
use crate::weight::{locomotion, Metric, WeightError};
use itertools::Itertools;
use std::sync::Arc;

const NORMAL_VARIANT_SIGMA_SQUARED: f64 = 0.3;
const NORMAL_VARIANT_WEIGHT_FLOOR: f64 = 0.001;

/// Evaluates edge costs for one [`Metric`] against one prepared [`Graph`]
/// (spec §4.4). Constructed once per metric per planning request; immutable
/// afterwards, so concurrent metric workers never contend on it.
pub struct WeightEngine<'a> {
    mesh: &'a Mesh,
    metric: Metric,
    config: &'a PlannerConfig,
    pose_estimator: Option<Arc<dyn PoseEstimator>>,
    bounds: MinMaxBounds,
}

impl<'a> WeightEngine<'a> {
    pub fn new(
        mesh: &'a Mesh,
        graph: &'a Graph,
        metric: Metric,
        config: &'a PlannerConfig,
        pose_estimator: Option<Arc<dyn PoseEstimator>>,
    ) -> Result<WeightEngine<'a>, WeightError> {
        if metric.requires_pose_estimator() && pose_estimator.is_none() {
            return Err(WeightError::ConfigurationError { metric });
        }
        let bounds = MinMaxBounds::scan(mesh, graph, &config.energy);
        Ok(WeightEngine {
            mesh,
            metric,
            config,
            pose_estimator,
            bounds,
        })
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn bounds(&self) -> MinMaxBounds {
        self.bounds
    }

    /// `weight(v, u, predecessor_of_v, metric)` from spec §4.4. Returns
    /// `Ok(None)` to mean "edge unusable", which the search treats as a skip.
    pub fn weight(
        &self,
        v: VertexId,
        u: VertexId,
        predecessor_of_v: Option<VertexId>,
    ) -> Result<Option<f64>, WeightError> {
        let pv = self.mesh.position(v).map_err(|e| WeightError::PoseEstimatorFailed(v, e.to_string()))?;
        let pu = self.mesh.position(u).map_err(|e| WeightError::PoseEstimatorFailed(u, e.to_string()))?;

        let w = match self.metric {
            Metric::Shortest => distance(pv, pu),
            Metric::Flattest => self.traversal_angle_at(u)? + distance(pv, pu),
            Metric::FlattestPybullet | Metric::FlattestOptimization => {
                self.plugin_traversal_angle(u)? + distance(pv, pu)
            }
            Metric::FlattestPybulletNormal | Metric::FlattestOptimizationNormal => {
                self.normal_variant_traversal_angle(u)? + distance(pv, pu)
            }
            Metric::Energy => self.energy(predecessor_of_v, pv, pu)?,
            Metric::Combined => self.combined(u, predecessor_of_v, pv, pu)?,
            Metric::Straightest => match predecessor_of_v {
                None => 0.0,
                Some(_) => self.rotation(predecessor_of_v, pv, pu),
            },
        };
        Ok(Some(w))
    }

    fn traversal_angle_at(&self, u: VertexId) -> Result<f64, WeightError> {
        let normal = self
            .mesh
            .normal(u)
            .map_err(|e| WeightError::PoseEstimatorFailed(u, e.to_string()))?;
        Ok(traversal_angle(normal))
    }

    fn plugin_traversal_angle(&self, u: VertexId) -> Result<f64, WeightError> {
        let position = self
            .mesh
            .position(u)
            .map_err(|e| WeightError::PoseEstimatorFailed(u, e.to_string()))?;
        let estimator = self
            .pose_estimator
            .as_ref()
            .ok_or(WeightError::ConfigurationError { metric: self.metric })?;
        let (_, up) = estimator.estimate_pose(position)?;
        Ok(traversal_angle(up))
    }

    /// `*_NORMAL` variants: Gaussian-decay weighted mean/std of traversal
    /// angle over `u`'s second-order mesh neighborhood, falling back to the
    /// cheap normal-based angle when that neighborhood is already flat
    /// enough (spec §4.4).
    fn normal_variant_traversal_angle(&self, u: VertexId) -> Result<f64, WeightError> {
        let pu = self
            .mesh
            .position(u)
            .map_err(|e| WeightError::PoseEstimatorFailed(u, e.to_string()))?;

        let mut neighborhood: Vec<VertexId> = vec![u];
        if let Ok(first) = self.mesh.mesh_adjacency(u) {
            neighborhood.extend(first.iter().copied());
            for &n1 in first {
                if let Ok(second) = self.mesh.mesh_adjacency(n1) {
                    neighborhood.extend(second.iter().copied());
                }
            }
        }
        let neighborhood: Vec<VertexId> = neighborhood.into_iter().sorted().dedup().collect();

        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        let mut samples: Vec<(f64, f64)> = Vec::with_capacity(neighborhood.len());
        for w_id in neighborhood {
            let (Ok(pw), Ok(nw)) = (self.mesh.position(w_id), self.mesh.normal(w_id)) else {
                continue;
            };
            let d = distance(pw, pu);
            let mut weight = (-(d * d) / (2.0 * NORMAL_VARIANT_SIGMA_SQUARED)).exp();
            if weight < NORMAL_VARIANT_WEIGHT_FLOOR {
                weight = 0.0;
            }
            let angle_w = traversal_angle(nw);
            weighted_sum += weight * angle_w;
            weight_total += weight;
            samples.push((weight, angle_w));
        }

        let fallback_angle = self.traversal_angle_at(u)?;
        if weight_total <= 0.0 {
            return Ok(fallback_angle);
        }
        let mean = weighted_sum / weight_total;
        let variance = samples
            .iter()
            .map(|(w, a)| w * (a - mean) * (a - mean))
            .sum::<f64>()
            / weight_total;
        let std = variance.max(0.0).sqrt();

        if std <= self.config.c_threshold_std_angle_terrain {
            Ok(fallback_angle)
        } else {
            self.plugin_traversal_angle(u)
        }
    }

    /// Shared rotation derivation from the ENERGY formula (spec §4.4), also
    /// used directly by STRAIGHTEST.
    fn rotation(&self, predecessor_of_v: Option<VertexId>, pv: Point3, pu: Point3) -> f64 {
        let predecessor_position = predecessor_of_v.and_then(|p| self.mesh.position(p).ok());
        locomotion::rotation(pv, pu, predecessor_position)
    }

    fn energy(
        &self,
        predecessor_of_v: Option<VertexId>,
        pv: Point3,
        pu: Point3,
    ) -> Result<f64, WeightError> {
        let predecessor_position = match predecessor_of_v {
            None => None,
            Some(p) => Some(self.mesh.position(p).map_err(|e| WeightError::PoseEstimatorFailed(p, e.to_string()))?),
        };
        Ok(locomotion::energy_cost(pv, pu, predecessor_position, &self.config.energy))
    }

    fn combined(
        &self,
        u: VertexId,
        predecessor_of_v: Option<VertexId>,
        pv: Point3,
        pu: Point3,
    ) -> Result<f64, WeightError> {
        let d = distance(pv, pu);
        let t = self.traversal_angle_at(u)?;
        let e = self.energy(predecessor_of_v, pv, pu)?;

        let n_dist = normalize(d, self.bounds.distance.0, self.bounds.distance.1);
        let n_trav = normalize(t, self.bounds.traversal.0, self.bounds.traversal.1);
        let n_energy = normalize(e, self.bounds.energy.0, self.bounds.energy.1);

        Ok(self.config.c_short * n_dist + self.config.c_traversal * n_trav + self.config.c_energy * n_energy)
    }
}
