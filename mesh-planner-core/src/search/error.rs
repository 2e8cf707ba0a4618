use crate::model::VertexId;
use crate::weight::WeightError;

#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("source node not found in graph: {0}")]
    NodeNotFound(VertexId),
    #[error("no path to target {0}")]
    NoPathTo(VertexId),
    #[error("observed a negative effective edge cost relaxing a finalized node; metric {metric:?} may be unsound")]
    ContradictoryPaths { metric: crate::weight::Metric },
    #[error("search cancelled")]
    Cancelled,
    #[error(transparent)]
    WeightFailed(#[from] WeightError),
}
