use super::VertexId;

#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    #[error("node {0} not found in graph")]
    NodeNotFound(VertexId),
}
