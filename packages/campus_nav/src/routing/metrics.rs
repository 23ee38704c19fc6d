//! Defines the functions which calculate high level information about a
//! route (i.e. how long it takes to walk)

use crate::common::campus_graph::CampusGraph;
use crate::common::graph_data::{LocationId, Segment};

/// Fetch the segment used for each step of the route, in order. Steps which
/// don't correspond to a segment in the graph are skipped
pub fn route_segments<'a>(
    campus: &'a CampusGraph,
    route: &[LocationId],
) -> Vec<&'a Segment> {
    route
        .windows(2)
        .filter_map(|pair| campus.edge(pair[0], pair[1]))
        .collect()
}

/// Total time taken to walk the provided route. Routes with fewer than two
/// locations take no time at all
pub fn calculate_path_time(campus: &CampusGraph, route: &[LocationId]) -> f64 {
    // Start from positive zero, so that empty routes format as 0.0
    route_segments(campus, route)
        .iter()
        .fold(0.0, |total, segment| total + campus.segment_time(segment))
}

/// Format a walking time for display, as the API and text messages show it
pub fn format_time(time: f64) -> String {
    format!("{:.1} minutes", time)
}
