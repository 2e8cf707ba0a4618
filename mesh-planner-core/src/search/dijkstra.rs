use crate::model::{Graph, VertexId};
use crate::search::error::SearchError;
use crate::search::state::SearchOutput;
use crate::weight::WeightEngine;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Tolerance below which two tentative distances are considered equal
/// rather than a genuine improvement; guards the contradiction check
/// against floating-point roundoff false positives.
const CONTRADICTION_EPSILON: f64 = 1e-9;

/// Multi-source Dijkstra whose relaxation may consult one hop of
/// predecessor context (spec §4.6). `sources` must be non-empty and present
/// in `graph`. When `target` is `Some`, the search terminates as soon as
/// that node is finalized; the returned maps are only guaranteed to be
/// complete up to and including the target in that case. `cutoff` drops any
/// tentative path whose length would exceed it. `cancel`, if supplied, is
/// polled between pops and aborts the search cooperatively.
pub fn dijkstra(
    graph: &Graph,
    engine: &WeightEngine,
    sources: &[VertexId],
    target: Option<VertexId>,
    cutoff: Option<f64>,
    cancel: Option<&dyn Fn() -> bool>,
) -> Result<SearchOutput, SearchError> {
    if let Some(t) = target {
        if sources.contains(&t) {
            let mut out = SearchOutput::default();
            out.dist.insert(t, 0.0);
            out.paths.insert(t, vec![t]);
            return Ok(out);
        }
    }
    for &s in sources {
        if !graph.contains_node(s) {
            return Err(SearchError::NodeNotFound(s));
        }
    }

    let mut dist: HashMap<VertexId, f64> = HashMap::new();
    let mut paths: HashMap<VertexId, Vec<VertexId>> = HashMap::new();
    let mut pred: HashMap<VertexId, VertexId> = HashMap::new();
    let mut best_seen: HashMap<VertexId, f64> = HashMap::new();
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, u64, VertexId)>> = BinaryHeap::new();
    let mut counter: u64 = 0;

    for &s in sources {
        best_seen.insert(s, 0.0);
        heap.push(Reverse((OrderedFloat(0.0), counter, s)));
        counter += 1;
    }

    while let Some(Reverse((d, _, node))) = heap.pop() {
        if let Some(cancel_fn) = cancel {
            if cancel_fn() {
                log::debug!("dijkstra: cancelled after finalizing {} nodes", dist.len());
                return Err(SearchError::Cancelled);
            }
        }
        if dist.contains_key(&node) {
            continue; // stale entry: a better one already finalized this node
        }
        let d = d.into_inner();
        dist.insert(node, d);
        paths.insert(node, build_path(node, &pred));

        if target == Some(node) {
            return Ok(SearchOutput { dist, paths });
        }

        let predecessor_of_node = pred.get(&node).copied();
        let neighbors: Vec<VertexId> = graph.neighbors(node).into_iter().flatten().copied().collect();
        for neighbor in neighbors {
            let weight = engine.weight(node, neighbor, predecessor_of_node)?;
            let Some(w) = weight else {
                continue; // edge reported unusable
            };
            if w < 0.0 {
                return Err(SearchError::ContradictoryPaths { metric: engine.metric() });
            }
            let tentative = d + w;

            if let Some(&finalized) = dist.get(&neighbor) {
                if tentative + CONTRADICTION_EPSILON < finalized {
                    return Err(SearchError::ContradictoryPaths { metric: engine.metric() });
                }
                continue;
            }

            if let Some(cutoff) = cutoff {
                if tentative > cutoff {
                    continue;
                }
            }

            let is_improvement = match best_seen.get(&neighbor) {
                None => true,
                Some(&prev) => tentative + CONTRADICTION_EPSILON < prev,
            };
            if is_improvement {
                best_seen.insert(neighbor, tentative);
                pred.insert(neighbor, node);
                heap.push(Reverse((OrderedFloat(tentative), counter, neighbor)));
                counter += 1;
            }
        }
    }

    if let Some(t) = target {
        if !dist.contains_key(&t) {
            return Err(SearchError::NoPathTo(t));
        }
    }
    Ok(SearchOutput { dist, paths })
}

fn build_path(node: VertexId, pred: &HashMap<VertexId, VertexId>) -> Vec<VertexId> {
    let mut path = vec![node];
    let mut current = node;
    while let Some(&p) = pred.get(&current) {
        path.push(p);
        current = p;
    }
    path.reverse();
    path
}
