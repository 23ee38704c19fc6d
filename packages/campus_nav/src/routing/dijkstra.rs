use std::cmp::Ordering;
use std::collections::BinaryHeap;

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::common::campus_graph::{CampusGraph, CampusPetgraph};
use crate::common::graph_data::LocationId;

/// Entry in the search frontier, ordered so that BinaryHeap behaves as a
/// min-heap on cumulative walking time
#[derive(Copy, Clone, Debug)]
struct State {
    time: f64,
    node: NodeIndex,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Walk back along the recorded predecessors from the end node, returning
/// the ids of every location visited on the way from the start
fn reconstruct_route(
    graph: &CampusPetgraph,
    parents: &FxHashMap<NodeIndex, NodeIndex>,
    end_inx: NodeIndex,
) -> Vec<LocationId> {
    let mut route = vec![graph[end_inx].id];
    let mut cur_inx = end_inx;
    while let Some(&parent) = parents.get(&cur_inx) {
        route.push(graph[parent].id);
        cur_inx = parent;
    }
    route.reverse();
    route
}

/// Find the quickest route between two locations, weighting each segment by
/// the time taken to walk it. Returns None if either location is unknown, or
/// if there is no way to get from one to the other
pub fn find_shortest_path(
    campus: &CampusGraph,
    start: LocationId,
    end: LocationId,
) -> Option<Vec<LocationId>> {
    let (start_inx, end_inx) =
        match (campus.node_index(start), campus.node_index(end)) {
            (Some(start_inx), Some(end_inx)) => (start_inx, end_inx),
            _ => {
                debug!(start, end, "route requested for unknown location");
                return None;
            }
        };

    let graph = campus.graph();

    let mut best = FxHashMap::<NodeIndex, f64>::default();
    let mut parents = FxHashMap::<NodeIndex, NodeIndex>::default();
    let mut visited = FxHashSet::<NodeIndex>::default();
    let mut heap = BinaryHeap::new();

    best.insert(start_inx, 0.0);
    heap.push(State {
        time: 0.0,
        node: start_inx,
    });

    while let Some(State { time, node }) = heap.pop() {
        // Stale entry, this node was already reached more quickly
        if !visited.insert(node) {
            continue;
        }

        if node == end_inx {
            let route = reconstruct_route(graph, &parents, end_inx);
            debug!(start, end, time, hops = route.len() - 1, "route found");
            return Some(route);
        }

        for eref in graph.edges(node) {
            let next = eref.target();
            if visited.contains(&next) {
                continue;
            }

            let next_time = time + campus.segment_time(eref.weight());
            let improved = match best.get(&next) {
                Some(&known) => next_time < known,
                None => true,
            };

            if improved {
                best.insert(next, next_time);
                parents.insert(next, node);
                heap.push(State {
                    time: next_time,
                    node: next,
                });
            }
        }
    }

    debug!(start, end, "no route found");
    None
}
