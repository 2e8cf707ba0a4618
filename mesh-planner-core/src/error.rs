//! Top-level error type aggregating every component's error enum (spec §7).

use crate::model::{GraphError, MeshError};
use crate::prepare::PrepareError;
use crate::search::SearchError;
use crate::weight::WeightError;

#[derive(thiserror::Error, Debug)]
pub enum PlannerError {
    #[error("no face centroid found near the supplied source/target point")]
    AnchorResolutionFailed,
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Prepare(#[from] PrepareError),
    #[error(transparent)]
    Weight(#[from] WeightError),
    #[error(transparent)]
    Search(#[from] SearchError),
}
