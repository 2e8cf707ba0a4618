/// A cost metric the edge-weight engine can evaluate (spec §4.4). Each
/// variant names one of the planner's supported optimization criteria;
/// `FLATTEST_COMPARISON_TEST` and `GLOBAL` from the original source are
/// intentionally omitted as diagnostic scaffolding (spec §9, Open Questions).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Shortest,
    Flattest,
    FlattestPybullet,
    FlattestOptimization,
    FlattestPybulletNormal,
    FlattestOptimizationNormal,
    Energy,
    Combined,
    Straightest,
}

impl Metric {
    /// Whether this metric needs a [`PoseEstimator`](super::PoseEstimator)
    /// plugin to evaluate any edge.
    pub fn requires_pose_estimator(&self) -> bool {
        matches!(
            self,
            Metric::FlattestPybullet
                | Metric::FlattestOptimization
                | Metric::FlattestPybulletNormal
                | Metric::FlattestOptimizationNormal
        )
    }

    /// Whether this metric is one of the `*_NORMAL` second-order-neighborhood
    /// variants, which may fall back to the cheap normal-based angle.
    pub fn is_normal_variant(&self) -> bool {
        matches!(
            self,
            Metric::FlattestPybulletNormal | Metric::FlattestOptimizationNormal
        )
    }

    pub fn all() -> &'static [Metric] {
        &[
            Metric::Shortest,
            Metric::Flattest,
            Metric::FlattestPybullet,
            Metric::FlattestOptimization,
            Metric::FlattestPybulletNormal,
            Metric::FlattestOptimizationNormal,
            Metric::Energy,
            Metric::Combined,
            Metric::Straightest,
        ]
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
