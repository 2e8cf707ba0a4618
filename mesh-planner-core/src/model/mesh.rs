use super::mesh_error::MeshError;
use super::point::{Point3, Point3Bits};
use super::vertex_id::VertexId;
use indexmap::IndexSet;
use std::collections::HashMap;

/// Immutable, deduplicated mesh: per-vertex position and outward normal, the
/// triangle list, and mesh-adjacency (vertices sharing a face). Built once
/// per planning session and never mutated afterwards.
///
/// Vertex records with bitwise-identical `(x, y, z)` positions are merged at
/// construction time; this is a deliberate simplification (see module docs on
/// [`MeshError`]) rather than an epsilon-based merge, matching upstream
/// behavior where duplicate corners are a known artifact of the mesh source.
#[derive(Debug, Clone)]
pub struct Mesh {
    positions: Box<[Point3]>,
    normals: Box<[Point3]>,
    triangles: Box<[[VertexId; 3]]>,
    adjacency: Box<[IndexSet<VertexId>]>,
}

impl Mesh {
    /// Builds a deduplicated [`Mesh`] from raw per-vertex-occurrence data, as
    /// would come from a mesh file reader. `raw_triangles` indexes into
    /// `raw_positions`/`raw_normals` directly (not yet deduplicated).
    pub fn from_raw(
        raw_positions: &[Point3],
        raw_normals: &[Point3],
        raw_triangles: &[[usize; 3]],
    ) -> Result<Mesh, MeshError> {
        if raw_positions.is_empty() {
            return Err(MeshError::EmptyMesh);
        }
        if raw_positions.len() != raw_normals.len() {
            return Err(MeshError::PositionNormalCountMismatch(
                raw_positions.len(),
                raw_normals.len(),
            ));
        }

        let mut dedup_index: HashMap<Point3Bits, VertexId> = HashMap::new();
        let mut positions: Vec<Point3> = Vec::new();
        let mut normals: Vec<Point3> = Vec::new();
        let mut raw_to_dense: Vec<VertexId> = Vec::with_capacity(raw_positions.len());

        for (raw_idx, position) in raw_positions.iter().enumerate() {
            let key = Point3Bits::from(*position);
            let dense_id = *dedup_index.entry(key).or_insert_with(|| {
                let id = VertexId::new(positions.len());
                positions.push(*position);
                normals.push(raw_normals[raw_idx]);
                id
            });
            raw_to_dense.push(dense_id);
        }

        let n_raw = raw_positions.len();
        let mut triangles: Vec<[VertexId; 3]> = Vec::with_capacity(raw_triangles.len());
        for tri in raw_triangles {
            let mut dense_tri = [VertexId::new(0); 3];
            for (slot, raw_vertex) in tri.iter().enumerate() {
                let dense = raw_to_dense
                    .get(*raw_vertex)
                    .ok_or(MeshError::VertexIndexOutOfBounds(*raw_vertex, n_raw))?;
                dense_tri[slot] = *dense;
            }
            triangles.push(dense_tri);
        }

        let mut adjacency: Vec<IndexSet<VertexId>> = vec![IndexSet::new(); positions.len()];
        for tri in &triangles {
            for &a in tri {
                for &b in tri {
                    if a != b {
                        adjacency[a.0].insert(b);
                    }
                }
            }
        }

        Ok(Mesh {
            positions: positions.into_boxed_slice(),
            normals: normals.into_boxed_slice(),
            triangles: triangles.into_boxed_slice(),
            adjacency: adjacency.into_boxed_slice(),
        })
    }

    pub fn n_vertices(&self) -> usize {
        self.positions.len()
    }

    pub fn n_triangles(&self) -> usize {
        self.triangles.len()
    }

    pub fn position(&self, id: VertexId) -> Result<Point3, MeshError> {
        self.positions
            .get(id.0)
            .copied()
            .ok_or(MeshError::VertexNotFound(id))
    }

    pub fn normal(&self, id: VertexId) -> Result<Point3, MeshError> {
        self.normals
            .get(id.0)
            .copied()
            .ok_or(MeshError::VertexNotFound(id))
    }

    pub fn triangles(&self) -> &[[VertexId; 3]] {
        &self.triangles
    }

    /// mesh adjacency of `id`: the vertices sharing a triangle with it. A
    /// mesh-frontier vertex (spec §4.3 step 3) is one whose adjacency set has
    /// at most 2 members.
    pub fn mesh_adjacency(&self, id: VertexId) -> Result<&IndexSet<VertexId>, MeshError> {
        self.adjacency.get(id.0).ok_or(MeshError::VertexNotFound(id))
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.positions.len()).map(VertexId::new)
    }

    /// the vertex whose position is nearest to `point`, used to resolve a 3D
    /// source/target query point to a graph node (spec §6).
    pub fn nearest_vertex(&self, point: Point3) -> Option<VertexId> {
        self.positions
            .iter()
            .enumerate()
            .map(|(idx, p)| {
                let d = *p - point;
                (idx, d.dot(&d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(idx, _)| VertexId::new(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square_triangles() -> (Vec<Point3>, Vec<Point3>, Vec<[usize; 3]>) {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let normals = vec![Point3::new(0.0, 0.0, 1.0); 4];
        let triangles = vec![[0, 1, 2], [1, 3, 2]];
        (positions, normals, triangles)
    }

    #[test]
    fn dedupes_bitwise_identical_positions() {
        let mut positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0), // duplicate of vertex 0
        ];
        let normals = vec![Point3::new(0.0, 0.0, 1.0); 3];
        let triangles = vec![[0, 1, 2]];
        let mesh = Mesh::from_raw(&positions, &normals, &triangles).unwrap();
        assert_eq!(mesh.n_vertices(), 2);
        // the triangle folds to a single edge (0,1) since raw 0 and 2 dedupe
        assert!(mesh.mesh_adjacency(VertexId::new(0)).unwrap().contains(&VertexId::new(1)));
        positions.truncate(2);
        assert_eq!(mesh.n_vertices(), positions.len());
    }

    #[test]
    fn unit_tetra_has_three_triangles_worth_of_adjacency() {
        let (positions, normals, triangles) = unit_square_triangles();
        let mesh = Mesh::from_raw(&positions, &normals, &triangles).unwrap();
        assert_eq!(mesh.n_vertices(), 4);
        assert_eq!(mesh.n_triangles(), 2);
        assert_eq!(mesh.mesh_adjacency(VertexId::new(0)).unwrap().len(), 2);
    }

    #[test]
    fn nearest_vertex_finds_closest_point() {
        let (positions, normals, triangles) = unit_square_triangles();
        let mesh = Mesh::from_raw(&positions, &normals, &triangles).unwrap();
        let nearest = mesh.nearest_vertex(Point3::new(0.9, 0.1, 0.0)).unwrap();
        assert_eq!(nearest, VertexId::new(1));
    }

    #[test]
    fn rejects_out_of_bounds_triangle_index() {
        let (positions, normals, _) = unit_square_triangles();
        let triangles = vec![[0, 1, 9]];
        let err = Mesh::from_raw(&positions, &normals, &triangles).unwrap_err();
        assert!(matches!(err, MeshError::VertexIndexOutOfBounds(9, 4)));
    }
}
