//! Defines the read-only store which holds the campus graph once it has been
//! built. It is shared between all requests, and never modified after
//! creation.

use petgraph::graph::NodeIndex;
use petgraph::{Directed, Graph};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

use crate::common::error::Result;
use crate::common::graph_data::{
    Location, LocationId, PathStyle, PathTable, PathType, Segment,
};
use crate::loading::catalog::Catalog;
use crate::loading::petgraph::create_graph;
use crate::routing::dijkstra;
use crate::routing::geometry::{self, DetailRecord};
use crate::routing::metrics;

/// The petgraph graph type used to store the campus
pub type CampusPetgraph = Graph<Location, Segment, Directed, u32>;

/// Immutable store for every location and path segment on campus
#[derive(Debug, Clone)]
pub struct CampusGraph {
    graph: CampusPetgraph,
    node_lookup: FxHashMap<LocationId, NodeIndex>,
    path_table: PathTable,
}

impl CampusGraph {
    /// Wrap a fully populated graph. The lookup must map every location id
    /// to the index of its node
    pub(crate) fn new(
        graph: CampusPetgraph,
        node_lookup: FxHashMap<LocationId, NodeIndex>,
        path_table: PathTable,
    ) -> Self {
        CampusGraph {
            graph,
            node_lookup,
            path_table,
        }
    }

    /// Build the graph from the provided catalog, validating that every
    /// connection can be walked
    pub fn from_catalog(catalog: Catalog) -> Result<Self> {
        create_graph(catalog)
    }

    pub fn graph(&self) -> &CampusPetgraph {
        &self.graph
    }

    pub fn node_index(&self, id: LocationId) -> Option<NodeIndex> {
        self.node_lookup.get(&id).copied()
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.node_lookup.contains_key(&id)
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.node_index(id)
            .and_then(|inx| self.graph.node_weight(inx))
    }

    /// All locations, ordered by id
    pub fn locations(&self) -> Vec<&Location> {
        let mut locations: Vec<&Location> =
            self.graph.node_weights().collect();
        locations.sort_by_key(|location| location.id);
        locations
    }

    /// Sorted ids of every location on campus
    pub fn location_ids(&self) -> Vec<LocationId> {
        self.locations().iter().map(|location| location.id).collect()
    }

    /// Fetch the segment which runs directly from one location to another,
    /// if there is one
    pub fn edge(&self, from: LocationId, to: LocationId) -> Option<&Segment> {
        let src_inx = self.node_index(from)?;
        let dst_inx = self.node_index(to)?;
        let edge_inx = self.graph.find_edge(src_inx, dst_inx)?;
        self.graph.edge_weight(edge_inx)
    }

    /// Every segment in the graph, keyed by source id and then destination
    /// id. Locations with no outgoing segments are omitted
    pub fn edges(
        &self,
    ) -> BTreeMap<LocationId, BTreeMap<LocationId, &Segment>> {
        let mut edges: BTreeMap<LocationId, BTreeMap<LocationId, &Segment>> =
            BTreeMap::new();
        for eref in self.graph.edge_references() {
            let segment = eref.weight();
            edges
                .entry(segment.src)
                .or_default()
                .insert(segment.dst, segment);
        }
        edges
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn path_table(&self) -> &PathTable {
        &self.path_table
    }

    /// Styles for every path type, for consumption by the front end
    pub fn path_styles(&self) -> BTreeMap<PathType, &PathStyle> {
        self.path_table.styles()
    }

    /// Time taken to walk the provided segment
    pub fn segment_time(&self, segment: &Segment) -> f64 {
        segment.distance / self.path_table.speed(segment.path_type)
    }

    /// See [`dijkstra::find_shortest_path`]
    pub fn find_shortest_path(
        &self,
        start: LocationId,
        end: LocationId,
    ) -> Option<Vec<LocationId>> {
        dijkstra::find_shortest_path(self, start, end)
    }

    /// See [`metrics::calculate_path_time`]
    pub fn calculate_path_time(&self, route: &[LocationId]) -> f64 {
        metrics::calculate_path_time(self, route)
    }

    /// See [`geometry::get_path_details`]
    pub fn get_path_details(&self, route: &[LocationId]) -> Vec<DetailRecord> {
        geometry::get_path_details(self, route)
    }
}
