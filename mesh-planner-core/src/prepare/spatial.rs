use crate::model::{Point3, VertexId};
use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// A mesh vertex indexed by its 3D position, for KD-tree nearest-neighbor
/// and radius queries used by border expansion, anchor reconnection, and
/// frontier clustering (spec §4.3).
#[derive(Copy, Clone, Debug)]
pub struct IndexedPoint {
    pub id: VertexId,
    pub position: Point3,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.position.x, self.position.y, self.position.z])
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.position.x - point[0];
        let dy = self.position.y - point[1];
        let dz = self.position.z - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

pub fn build_rtree(points: impl IntoIterator<Item = (VertexId, Point3)>) -> RTree<IndexedPoint> {
    let objects: Vec<IndexedPoint> = points
        .into_iter()
        .map(|(id, position)| IndexedPoint { id, position })
        .collect();
    RTree::bulk_load(objects)
}

/// Nearest indexed point to `query`, or `None` if the tree is empty.
pub fn nearest(tree: &RTree<IndexedPoint>, query: Point3) -> Option<IndexedPoint> {
    tree.nearest_neighbor(&[query.x, query.y, query.z]).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_finds_closest_point() {
        let tree = build_rtree([
            (VertexId::new(0), Point3::new(0.0, 0.0, 0.0)),
            (VertexId::new(1), Point3::new(10.0, 0.0, 0.0)),
        ]);
        let found = nearest(&tree, Point3::new(9.0, 0.0, 0.0)).unwrap();
        assert_eq!(found.id, VertexId::new(1));
    }
}
