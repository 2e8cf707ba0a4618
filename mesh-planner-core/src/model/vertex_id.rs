use std::fmt::Display;

/// A dense non-negative integer identifying a mesh vertex / graph node.
/// Stable for the lifetime of a planning session; assigned by [`Mesh`](super::mesh::Mesh)
/// in the order unique 3D positions are first observed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn new(id: usize) -> Self {
        VertexId(id)
    }
}

impl Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}
