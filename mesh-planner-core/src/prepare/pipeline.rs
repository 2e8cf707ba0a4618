use crate::config::PlannerConfig;
use crate::geometry::{distance, traversal_angle};
use crate::model::{Graph, Mesh, VertexId};
use crate::prepare::error::PrepareError;
use crate::prepare::frontier::{cluster_frontiers, FrontierCluster};
use crate::prepare::spatial::{build_rtree, nearest};
use indexmap::IndexSet;

/// Graph-frontier degree heuristic from spec §4.3 step 3.
const GRAPH_FRONTIER_DEGREE_THRESHOLD: usize = 4;
/// Border-node degree heuristic from spec §4.3 step 4.
const BORDER_DEGREE_THRESHOLD: usize = 9;
/// Minimum surviving component size after border expansion (spec §4.3 step 4).
const MIN_COMPONENT_SIZE_AFTER_EXPANSION: usize = 3;

/// Output of the full preparation pipeline: the prepared graph and the
/// frontier clusters discovered on it (spec §4.3).
#[derive(Debug, Clone)]
pub struct PreparationResult {
    pub graph: Graph,
    pub frontier_clusters: Vec<FrontierCluster>,
}

/// Runs the seven-step graph preparation pipeline against `(source,
/// target)` (spec §4.3). `target` is optional: unreachable anchors are
/// still reconnected for the source alone when no target is supplied.
pub fn prepare(
    mesh: &Mesh,
    config: &PlannerConfig,
    source: VertexId,
    target: Option<VertexId>,
) -> Result<PreparationResult, PrepareError> {
    let mut graph = Graph::from_mesh(mesh);
    log::debug!("prepare: starting from {} mesh vertices", graph.n_nodes());

    // 1. Traversability filter.
    traversability_filter(&mut graph, mesh, config.transversality_threshold);
    log::debug!("prepare: {} nodes survive the traversability filter", graph.n_nodes());

    // 2. Connected-component restriction.
    graph.restrict_to_component_of(source).map_err(|_| {
        log::warn!("prepare: source {source} did not survive the traversability filter");
        PrepareError::SourceUnreachable
    })?;

    // 3. Frontier extraction.
    let mesh_frontier = mesh_frontier_nodes(mesh);
    let graph_frontier = graph_frontier_nodes(&graph, GRAPH_FRONTIER_DEGREE_THRESHOLD);
    let mut reachable_frontiers: IndexSet<VertexId> =
        mesh_frontier.intersection(&graph_frontier).copied().collect();

    // 4. Border expansion (optional).
    if config.border_threshold > 0.0 {
        expand_borders(&mut graph, mesh, config.border_threshold)?;
    }

    // 5. Anchor reconnection.
    reconnect_anchors(&mut graph, mesh, source, target, &mut reachable_frontiers, config.border_threshold);

    // 6. Second connectivity pass.
    graph.restrict_to_component_of(source).map_err(|_| {
        log::warn!("prepare: source {source} unreachable after anchor reconnection");
        PrepareError::SourceUnreachable
    })?;
    log::debug!("prepare: prepared graph has {} nodes", graph.n_nodes());

    // 7. Frontier clustering.
    reachable_frontiers.retain(|id| graph.contains_node(*id));
    let frontier_points: Vec<(VertexId, crate::model::Point3)> = reachable_frontiers
        .iter()
        .filter_map(|&id| mesh.position(id).ok().map(|p| (id, p)))
        .collect();
    let node_index = build_rtree(graph.nodes().filter_map(|id| mesh.position(id).ok().map(|p| (id, p))));
    let source_position = mesh.position(source).unwrap_or(crate::model::Point3::ZERO);
    let frontier_clusters = cluster_frontiers(
        &frontier_points,
        source_position,
        config.dbscan_eps,
        config.dbscan_min_samples,
        &node_index,
    );

    Ok(PreparationResult { graph, frontier_clusters })
}

fn traversability_filter(graph: &mut Graph, mesh: &Mesh, threshold: f64) {
    let nodes: Vec<VertexId> = graph.nodes().collect();
    for id in nodes {
        if let Ok(normal) = mesh.normal(id) {
            if traversal_angle(normal) > threshold {
                graph.remove_node(id);
            }
        }
    }
}

fn mesh_frontier_nodes(mesh: &Mesh) -> IndexSet<VertexId> {
    mesh.vertex_ids()
        .filter(|&id| mesh.mesh_adjacency(id).map(|adj| adj.len() <= 2).unwrap_or(false))
        .collect()
}

fn graph_frontier_nodes(graph: &Graph, degree_threshold: usize) -> IndexSet<VertexId> {
    graph
        .nodes()
        .filter(|&id| graph.degree(id).map(|d| d <= degree_threshold).unwrap_or(false))
        .collect()
}

/// Removes every node within `border_threshold` of a current border node
/// (degree ≤ [`BORDER_DEGREE_THRESHOLD`]), then drops any surviving
/// component smaller than [`MIN_COMPONENT_SIZE_AFTER_EXPANSION`]. A border
/// node's nearest border distance to itself is 0, so border nodes are
/// always among those removed once this step runs.
fn expand_borders(graph: &mut Graph, mesh: &Mesh, border_threshold: f64) -> Result<(), PrepareError> {
    let border_points: Vec<(VertexId, crate::model::Point3)> = graph
        .nodes()
        .filter(|&id| graph.degree(id).map(|d| d <= BORDER_DEGREE_THRESHOLD).unwrap_or(false))
        .filter_map(|id| mesh.position(id).ok().map(|p| (id, p)))
        .collect();
    if border_points.is_empty() {
        return Ok(());
    }
    let border_index = build_rtree(border_points);

    let candidates: Vec<VertexId> = graph.nodes().collect();
    for id in candidates {
        let Ok(position) = mesh.position(id) else {
            continue;
        };
        if let Some(found) = nearest(&border_index, position) {
            if distance(position, found.position) <= border_threshold {
                graph.remove_node(id);
            }
        }
    }

    for component in graph.components() {
        if component.len() < MIN_COMPONENT_SIZE_AFTER_EXPANSION {
            for id in component {
                graph.remove_node(id);
            }
        }
    }

    if graph.n_nodes() == 0 {
        return Err(PrepareError::GraphEmptied);
    }
    Ok(())
}

/// Reinserts unchecked anchors (source, target) unconditionally and checked
/// anchors (reachable frontiers) only when close enough to a surviving
/// node, substituting the nearest surviving node otherwise (spec §4.3 step
/// 5). The nearest-neighbor index is a snapshot of the graph as it stood
/// before any reinsertion, matching the upstream algorithm.
fn reconnect_anchors(
    graph: &mut Graph,
    mesh: &Mesh,
    source: VertexId,
    target: Option<VertexId>,
    reachable_frontiers: &mut IndexSet<VertexId>,
    border_threshold: f64,
) {
    let snapshot: Vec<(VertexId, crate::model::Point3)> = graph
        .nodes()
        .filter_map(|id| mesh.position(id).ok().map(|p| (id, p)))
        .collect();
    if snapshot.is_empty() {
        return;
    }
    let snapshot_index = build_rtree(snapshot);
    let max_checked_distance = border_threshold + 1.0;

    let mut unchecked_anchors = vec![source];
    if let Some(t) = target {
        unchecked_anchors.push(t);
    }
    for anchor in unchecked_anchors {
        if graph.contains_node(anchor) {
            continue;
        }
        let Ok(position) = mesh.position(anchor) else {
            continue;
        };
        if let Some(found) = nearest(&snapshot_index, position) {
            graph.insert_edge(anchor, found.id);
        }
    }

    let checked_anchors: Vec<VertexId> = reachable_frontiers.iter().copied().collect();
    let mut updated_frontiers = IndexSet::new();
    for anchor in checked_anchors {
        if graph.contains_node(anchor) {
            updated_frontiers.insert(anchor);
            continue;
        }
        let Ok(position) = mesh.position(anchor) else {
            continue;
        };
        let Some(found) = nearest(&snapshot_index, position) else {
            continue;
        };
        if distance(position, found.position) <= max_checked_distance {
            graph.insert_edge(anchor, found.id);
            updated_frontiers.insert(anchor);
        } else {
            updated_frontiers.insert(found.id);
        }
    }
    *reachable_frontiers = updated_frontiers;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point3;

    fn flat_strip_mesh() -> Mesh {
        // a 1x5 strip of unit triangles, all flat (normal straight up).
        let mut positions = Vec::new();
        for i in 0..=5 {
            positions.push(Point3::new(i as f64, 0.0, 0.0));
            positions.push(Point3::new(i as f64, 1.0, 0.0));
        }
        let normals = vec![Point3::new(0.0, 0.0, 1.0); positions.len()];
        let mut triangles = Vec::new();
        for i in 0..5 {
            let a = i * 2;
            let b = i * 2 + 1;
            let c = (i + 1) * 2;
            let d = (i + 1) * 2 + 1;
            triangles.push([a, b, c]);
            triangles.push([b, d, c]);
        }
        Mesh::from_raw(&positions, &normals, &triangles).unwrap()
    }

    #[test]
    fn prepare_keeps_source_reachable_on_flat_mesh() {
        let mesh = flat_strip_mesh();
        let config = PlannerConfig::default();
        let result = prepare(&mesh, &config, VertexId::new(0), Some(VertexId::new(11))).unwrap();
        assert!(result.graph.contains_node(VertexId::new(0)));
        assert!(result.graph.contains_node(VertexId::new(11)));
    }

    #[test]
    fn traversability_filter_removes_steep_nodes() {
        let mesh = flat_strip_mesh();
        let mut graph = Graph::from_mesh(&mesh);
        traversability_filter(&mut graph, &mesh, 35.0);
        // all normals point straight up, nothing should be filtered
        assert_eq!(graph.n_nodes(), mesh.n_vertices());
    }

    #[test]
    fn steep_source_fails_with_source_unreachable_before_reconnection() {
        let mesh = flat_strip_mesh();
        let mut graph = Graph::from_mesh(&mesh);
        // force-remove the source to simulate a filtered-out steep source
        graph.remove_node(VertexId::new(0));
        let err = graph.restrict_to_component_of(VertexId::new(0)).unwrap_err();
        assert!(matches!(err, crate::model::GraphError::NodeNotFound(_)));
    }

    #[test]
    fn prepare_produces_frontier_clusters_on_strip_ends() {
        let mesh = flat_strip_mesh();
        let config = PlannerConfig::default();
        let result = prepare(&mesh, &config, VertexId::new(0), None).unwrap();
        // the strip has open boundaries at both short ends; clustering
        // should find at least one frontier cluster.
        assert!(!result.frontier_clusters.is_empty());
    }
}
