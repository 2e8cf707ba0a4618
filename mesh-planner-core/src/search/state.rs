use crate::model::VertexId;
use std::collections::HashMap;

/// Output of one [`dijkstra`](super::dijkstra) call: finalized distances and
/// the shortest path reconstructed for every node reached.
#[derive(Debug, Clone, Default)]
pub struct SearchOutput {
    pub dist: HashMap<VertexId, f64>,
    pub paths: HashMap<VertexId, Vec<VertexId>>,
}

impl SearchOutput {
    pub fn distance_to(&self, node: VertexId) -> Option<f64> {
        self.dist.get(&node).copied()
    }

    pub fn path_to(&self, node: VertexId) -> Option<&[VertexId]> {
        self.paths.get(&node).map(Vec::as_slice)
    }
}
