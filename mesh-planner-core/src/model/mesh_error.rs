use super::VertexId;

#[derive(thiserror::Error, Debug)]
pub enum MeshError {
    #[error("triangle references vertex index {0} but the mesh only has {1} vertices")]
    VertexIndexOutOfBounds(usize, usize),
    #[error("mesh has {0} positions but {1} normals; one normal is required per vertex")]
    PositionNormalCountMismatch(usize, usize),
    #[error("vertex {0} not found in mesh")]
    VertexNotFound(VertexId),
    #[error("mesh has no vertices")]
    EmptyMesh,
}
