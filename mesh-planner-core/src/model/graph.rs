use super::graph_error::GraphError;
use super::mesh::Mesh;
use super::vertex_id::VertexId;
use indexmap::{IndexMap, IndexSet};
use std::collections::VecDeque;

/// An undirected, unweighted structural graph derived from a [`Mesh`]: nodes
/// are vertex ids, edges are the unordered pairs drawn from each triangle.
/// Edge weight is never stored here — metric-aware costs are computed on
/// demand by the weight engine during search (§4.4 of the design).
///
/// `G` is built once per planning request and mutated in place by the
/// preparation pipeline; after preparation it is treated as read-only by the
/// search.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: IndexMap<VertexId, IndexSet<VertexId>>,
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            adjacency: IndexMap::new(),
        }
    }

    /// Builds G from every triangle of `mesh`: for `(a,b,c)` emit the three
    /// unordered pairs `(a,b), (a,c), (b,c)`. Edge insertion is idempotent so
    /// repeated faces and shared edges fold into a single edge.
    pub fn from_mesh(mesh: &Mesh) -> Graph {
        let mut graph = Graph::new();
        for id in mesh.vertex_ids() {
            graph.adjacency.entry(id).or_default();
        }
        for tri in mesh.triangles() {
            let [a, b, c] = *tri;
            graph.insert_edge(a, b);
            graph.insert_edge(a, c);
            graph.insert_edge(b, c);
        }
        graph
    }

    pub fn n_nodes(&self) -> usize {
        self.adjacency.len()
    }

    pub fn n_edges(&self) -> usize {
        self.adjacency.values().map(|n| n.len()).sum::<usize>() / 2
    }

    pub fn contains_node(&self, id: VertexId) -> bool {
        self.adjacency.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Degree of `id`, or `None` if `id` is not a node of G.
    pub fn degree(&self, id: VertexId) -> Option<usize> {
        self.adjacency.get(&id).map(|n| n.len())
    }

    pub fn neighbors(&self, id: VertexId) -> Option<&IndexSet<VertexId>> {
        self.adjacency.get(&id)
    }

    /// Inserts an undirected edge between `a` and `b`, creating either
    /// endpoint as a node if it does not already exist. A self-loop (`a ==
    /// b`) is silently ignored; G has no self-loops by invariant.
    pub fn insert_edge(&mut self, a: VertexId, b: VertexId) {
        if a == b {
            return;
        }
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
    }

    /// Removes node `id` and every edge incident to it. No-op if the node is
    /// already absent.
    pub fn remove_node(&mut self, id: VertexId) {
        if let Some(neighbors) = self.adjacency.shift_remove(&id) {
            for neighbor in neighbors {
                if let Some(set) = self.adjacency.get_mut(&neighbor) {
                    set.shift_remove(&id);
                }
            }
        }
    }

    /// Inserts `id` as a node with no edges, if not already present.
    pub fn insert_node(&mut self, id: VertexId) {
        self.adjacency.entry(id).or_default();
    }

    /// The set of nodes reachable from `source` via a breadth-first search.
    /// `source` itself is a member of its own component.
    pub fn connected_component(&self, source: VertexId) -> Result<IndexSet<VertexId>, GraphError> {
        if !self.contains_node(source) {
            return Err(GraphError::NodeNotFound(source));
        }
        let mut visited: IndexSet<VertexId> = IndexSet::new();
        let mut queue: VecDeque<VertexId> = VecDeque::new();
        visited.insert(source);
        queue.push_back(source);
        while let Some(node) = queue.pop_front() {
            if let Some(neighbors) = self.adjacency.get(&node) {
                for &neighbor in neighbors {
                    if visited.insert(neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
        }
        Ok(visited)
    }

    /// Restricts G in place to the connected component containing `source`.
    pub fn restrict_to_component_of(&mut self, source: VertexId) -> Result<(), GraphError> {
        let keep = self.connected_component(source)?;
        let drop: Vec<VertexId> = self
            .adjacency
            .keys()
            .copied()
            .filter(|id| !keep.contains(id))
            .collect();
        for id in drop {
            self.remove_node(id);
        }
        Ok(())
    }

    /// All (unordered) connected components of G, each as a node set.
    pub fn components(&self) -> Vec<IndexSet<VertexId>> {
        let mut seen: IndexSet<VertexId> = IndexSet::new();
        let mut out = Vec::new();
        for node in self.nodes() {
            if seen.contains(&node) {
                continue;
            }
            let component = self
                .connected_component(node)
                .expect("node came from self.nodes(), must exist");
            seen.extend(component.iter().copied());
            out.push(component);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point3;

    fn single_triangle_mesh() -> Mesh {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let normals = vec![Point3::new(0.0, 0.0, 1.0); 3];
        Mesh::from_raw(&positions, &normals, &[[0, 1, 2]]).unwrap()
    }

    #[test]
    fn one_triangle_yields_three_nodes_three_edges() {
        let mesh = single_triangle_mesh();
        let graph = Graph::from_mesh(&mesh);
        assert_eq!(graph.n_nodes(), 3);
        assert_eq!(graph.n_edges(), 3);
    }

    #[test]
    fn remove_node_drops_incident_edges() {
        let mesh = single_triangle_mesh();
        let mut graph = Graph::from_mesh(&mesh);
        graph.remove_node(VertexId::new(0));
        assert_eq!(graph.n_nodes(), 2);
        assert_eq!(graph.n_edges(), 1);
        assert!(!graph.contains_node(VertexId::new(0)));
    }

    #[test]
    fn connected_component_excludes_isolated_node() {
        let mesh = single_triangle_mesh();
        let mut graph = Graph::from_mesh(&mesh);
        graph.insert_node(VertexId::new(99));
        let component = graph.connected_component(VertexId::new(0)).unwrap();
        assert_eq!(component.len(), 3);
        assert!(!component.contains(&VertexId::new(99)));
    }

    #[test]
    fn restrict_to_component_drops_other_components() {
        let mesh = single_triangle_mesh();
        let mut graph = Graph::from_mesh(&mesh);
        graph.insert_node(VertexId::new(99));
        graph.restrict_to_component_of(VertexId::new(0)).unwrap();
        assert_eq!(graph.n_nodes(), 3);
        assert!(!graph.contains_node(VertexId::new(99)));
    }

    #[test]
    fn connected_component_of_missing_node_fails() {
        let mesh = single_triangle_mesh();
        let graph = Graph::from_mesh(&mesh);
        let err = graph.connected_component(VertexId::new(42)).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(_)));
    }
}
