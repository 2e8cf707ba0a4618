use crate::model::Point3;
use crate::weight::WeightError;

/// External collaborator consumed by the `FLATTEST_PYBULLET*` and
/// `FLATTEST_OPTIMIZATION*` metrics (spec §4.8). Concrete implementations
/// (a physics simulator, a linear-program solver) are out of scope here;
/// the planner depends only on this contract and must function end-to-end
/// without one as long as no requested metric needs it.
///
/// Implementations are expected to be deterministic for a fixed input
/// position over a fixed mesh, and are assumed thread-safe: the planner may
/// call a single instance concurrently from independent metric workers
/// (spec §5) without external locking.
pub trait PoseEstimator: Send + Sync {
    /// Estimates the robot's resting pose at `position`, returning the
    /// (possibly adjusted) contact point and the up vector used downstream
    /// by [`traversal_angle`](crate::geometry::traversal_angle). The planner
    /// only consumes the up vector; `final_position` is carried for
    /// reporting purposes only.
    fn estimate_pose(&self, position: Point3) -> Result<(Option<Point3>, Point3), WeightError>;
}
