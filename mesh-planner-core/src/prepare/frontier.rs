use crate::geometry::distance;
use crate::model::{Point3, VertexId};
use crate::prepare::spatial::{build_rtree, nearest, IndexedPoint};
use rstar::RTree;
use std::collections::{HashMap, HashSet, VecDeque};

/// One output of frontier clustering (spec §4.3 step 7 / §3 "Frontier
/// Cluster"): a density-connected group of reachable-frontier points.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontierCluster {
    /// The frontier node in this cluster nearest to the robot/source.
    pub visit_id: VertexId,
    /// The graph node nearest to the cluster's arithmetic-mean point.
    pub centroid_id: VertexId,
    pub points: Vec<Point3>,
}

/// Density-based clustering (DBSCAN) of `frontiers` by 3D position. Noise
/// points (density below `min_samples`) are discarded. `node_index` covers
/// every node currently in the prepared graph and is used to resolve each
/// cluster's `centroid_id`.
pub fn cluster_frontiers(
    frontiers: &[(VertexId, Point3)],
    source_position: Point3,
    eps: f64,
    min_samples: usize,
    node_index: &RTree<IndexedPoint>,
) -> Vec<FrontierCluster> {
    if frontiers.is_empty() {
        return Vec::new();
    }

    let positions: HashMap<VertexId, Point3> = frontiers.iter().copied().collect();
    let local_index = build_rtree(frontiers.iter().copied());
    let eps_sq = eps * eps;

    let region_query = |center: Point3| -> Vec<VertexId> {
        local_index
            .locate_within_distance([center.x, center.y, center.z], eps_sq)
            .map(|p| p.id)
            .collect()
    };

    let mut visited: HashSet<VertexId> = HashSet::new();
    // None = unlabeled, Some(None) = noise, Some(Some(k)) = cluster k
    let mut label: HashMap<VertexId, Option<usize>> = HashMap::new();
    let mut next_cluster = 0usize;

    for &(id, pos) in frontiers {
        if visited.contains(&id) {
            continue;
        }
        visited.insert(id);
        let neighbors = region_query(pos);
        if neighbors.len() < min_samples {
            label.insert(id, None);
            continue;
        }

        let cluster = next_cluster;
        next_cluster += 1;
        label.insert(id, Some(cluster));

        let mut queue: VecDeque<VertexId> = neighbors.into_iter().collect();
        while let Some(candidate) = queue.pop_front() {
            if !visited.contains(&candidate) {
                visited.insert(candidate);
                if let Some(&candidate_pos) = positions.get(&candidate) {
                    let candidate_neighbors = region_query(candidate_pos);
                    if candidate_neighbors.len() >= min_samples {
                        queue.extend(candidate_neighbors);
                    }
                }
            }
            let entry = label.entry(candidate).or_insert(Some(cluster));
            if entry.is_none() {
                *entry = Some(cluster);
            }
        }
    }

    let mut members: HashMap<usize, Vec<VertexId>> = HashMap::new();
    for (&id, &cluster) in &label {
        if let Some(cluster) = cluster {
            members.entry(cluster).or_default().push(id);
        }
    }

    let mut clusters: Vec<FrontierCluster> = Vec::with_capacity(members.len());
    for (_cluster_id, node_ids) in members {
        let points: Vec<Point3> = node_ids.iter().filter_map(|id| positions.get(id).copied()).collect();
        if points.is_empty() {
            continue;
        }
        let visit_id = *node_ids
            .iter()
            .min_by(|a, b| {
                let da = distance(positions[a], source_position);
                let db = distance(positions[b], source_position);
                da.total_cmp(&db)
            })
            .expect("non-empty cluster");

        let n = points.len() as f64;
        let centroid = points.iter().fold(Point3::ZERO, |acc, &p| acc + p) * (1.0 / n);
        let centroid_id = nearest(node_index, centroid)
            .map(|p| p.id)
            .unwrap_or(visit_id);

        clusters.push(FrontierCluster {
            visit_id,
            centroid_id,
            points,
        });
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prepare::spatial::build_rtree;

    #[test]
    fn two_distant_groups_yield_two_clusters() {
        let frontiers = vec![
            (VertexId::new(0), Point3::new(0.0, 0.0, 0.0)),
            (VertexId::new(1), Point3::new(0.5, 0.0, 0.0)),
            (VertexId::new(2), Point3::new(0.0, 0.5, 0.0)),
            (VertexId::new(3), Point3::new(100.0, 0.0, 0.0)),
            (VertexId::new(4), Point3::new(100.5, 0.0, 0.0)),
            (VertexId::new(5), Point3::new(100.0, 0.5, 0.0)),
        ];
        let node_index = build_rtree(frontiers.iter().copied());
        let clusters = cluster_frontiers(&frontiers, Point3::new(0.0, 0.0, 0.0), 2.5, 2, &node_index);
        assert_eq!(clusters.len(), 2);
    }

    #[test]
    fn isolated_points_are_discarded_as_noise() {
        let frontiers = vec![
            (VertexId::new(0), Point3::new(0.0, 0.0, 0.0)),
            (VertexId::new(1), Point3::new(200.0, 0.0, 0.0)),
        ];
        let node_index = build_rtree(frontiers.iter().copied());
        let clusters = cluster_frontiers(&frontiers, Point3::new(0.0, 0.0, 0.0), 2.5, 2, &node_index);
        assert!(clusters.is_empty());
    }

    #[test]
    fn empty_frontier_set_yields_no_clusters() {
        let node_index = build_rtree(std::iter::empty());
        let clusters = cluster_frontiers(&[], Point3::ZERO, 2.5, 2, &node_index);
        assert!(clusters.is_empty());
    }
}
