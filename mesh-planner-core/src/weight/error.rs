use crate::model::VertexId;

#[derive(thiserror::Error, Debug)]
pub enum WeightError {
    #[error("metric {metric:?} requires a pose-estimator plugin but none was supplied")]
    ConfigurationError { metric: crate::weight::Metric },
    #[error("pose estimator failed at vertex {0}: {1}")]
    PoseEstimatorFailed(VertexId, String),
}
