use crate::common::campus_graph::{CampusGraph, CampusPetgraph};
use crate::common::error::{Error, Result};
use crate::common::graph_data::{LocationId, PathTable, PathType, Segment};
use crate::loading::catalog::{Catalog, ConnectionRow};
use crate::routing::geometry::{CURVE_FACTOR, generate_path_points};
use petgraph::graph::NodeIndex;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

/// Check that every path type can actually be walked, so that segment times
/// are always finite and non-negative
fn validate_speeds(catalog: &Catalog) -> Result<()> {
    for (path_type, data) in catalog.path_types.iter() {
        if !(data.speed.is_finite() && data.speed > 0.0) {
            return Err(Error::InvalidSpeed {
                path_type: *path_type,
                speed: data.speed,
            });
        }
    }
    Ok(())
}

/// Check that a connection joins two known locations over a walkable
/// distance
fn validate_connection(
    node_lookup: &FxHashMap<LocationId, NodeIndex>,
    src: LocationId,
    dst: LocationId,
    conn: &ConnectionRow,
) -> Result<(NodeIndex, NodeIndex)> {
    let src_inx = node_lookup.get(&src).ok_or(Error::UnknownEndpoint {
        from: src,
        to: dst,
        missing: src,
    })?;
    let dst_inx = node_lookup.get(&dst).ok_or(Error::UnknownEndpoint {
        from: src,
        to: dst,
        missing: dst,
    })?;

    if !(conn.distance.is_finite() && conn.distance > 0.0) {
        return Err(Error::InvalidDistance {
            from: src,
            to: dst,
            distance: conn.distance,
        });
    }

    Ok((*src_inx, *dst_inx))
}

/// Create the segment which runs from src_inx to dst_inx, generating the
/// curve which will be used to draw it
fn build_segment(
    graph: &CampusPetgraph,
    src_inx: NodeIndex,
    dst_inx: NodeIndex,
    distance: f64,
    path_type: PathType,
) -> Segment {
    let src = &graph[src_inx];
    let dst = &graph[dst_inx];

    Segment {
        src: src.id,
        dst: dst.id,
        distance,
        path_type,
        path_points: generate_path_points(
            src.position,
            dst.position,
            CURVE_FACTOR,
        ),
    }
}

/// Based on the catalog which has been read in, generate a petgraph graph
/// which can be used for route finding. Every connection is also added in
/// the reverse direction, unless the catalog already provides a segment
/// running that way. Explicit connections always replace a reverse segment
/// which was added on their behalf
pub fn create_graph(catalog: Catalog) -> Result<CampusGraph> {
    validate_speeds(&catalog)?;

    // Set up empty graph
    let mut graph = CampusPetgraph::new();

    // Add all nodes to the graph, create mapping from catalog IDs to node
    // indexes
    let mut node_lookup = FxHashMap::<LocationId, NodeIndex>::default();
    for (id, row) in catalog.locations.iter() {
        if *id == 0 {
            return Err(Error::InvalidLocationId { id: *id });
        }
        let node_inx = graph.add_node(row.clone().prepare(*id));
        node_lookup.insert(*id, node_inx);
    }

    let mut synthesised: usize = 0;
    for (src, dst, conn) in catalog.iter_connections() {
        let (src_inx, dst_inx) =
            validate_connection(&node_lookup, src, dst, &conn)?;

        let fwd = build_segment(
            &graph,
            src_inx,
            dst_inx,
            conn.distance,
            conn.path_type,
        );
        graph.update_edge(src_inx, dst_inx, fwd);

        if graph.find_edge(dst_inx, src_inx).is_none() {
            let rev = build_segment(
                &graph,
                dst_inx,
                src_inx,
                conn.distance,
                conn.path_type,
            );
            graph.add_edge(dst_inx, src_inx, rev);
            synthesised += 1;
            debug!(from = dst, to = src, "added reverse segment");
        }
    }

    info!(
        locations = graph.node_count(),
        segments = graph.edge_count(),
        synthesised = synthesised,
        "campus graph built"
    );

    let path_table = PathTable::new(catalog.path_types);

    Ok(CampusGraph::new(graph, node_lookup, path_table))
}
