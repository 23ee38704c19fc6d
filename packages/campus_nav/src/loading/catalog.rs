//! The functions defined here read in the campus catalog, which describes
//! every location, every connection between locations, and the properties of
//! each type of path. The catalog is a JSON document; a default copy is
//! compiled into the binary and can be swapped out for a file on disk.
use crate::common::error::Result;
use crate::common::graph_data::{
    Location, LocationCategory, LocationId, PathType, PathTypeData,
};
use geo::Coord;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Container for a single location as it appears in the catalog
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct LocationRow {
    pub name: String,
    x: f64,
    y: f64,
    #[serde(rename = "type")]
    category: LocationCategory,
}

impl LocationRow {
    /// Unpack the raw location data into a format which can be loaded into
    /// the graph. The id is taken from the key the row was stored under
    pub fn prepare(self, id: LocationId) -> Location {
        Location {
            id,
            name: self.name,
            position: Coord {
                x: self.x,
                y: self.y,
            },
            category: self.category,
        }
    }
}

/// Container for a single directed connection as it appears in the catalog
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ConnectionRow {
    pub distance: f64,
    pub path_type: PathType,
}

/// The full contents of a catalog file. Connections are keyed by source id,
/// then by destination id
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Catalog {
    pub locations: BTreeMap<LocationId, LocationRow>,
    pub path_types: BTreeMap<PathType, PathTypeData>,
    pub connections: BTreeMap<LocationId, BTreeMap<LocationId, ConnectionRow>>,
}

impl Catalog {
    /// Iterate over every directed connection in the catalog, ordered by
    /// source id and then destination id
    pub fn iter_connections(
        &self,
    ) -> impl Iterator<Item = (LocationId, LocationId, ConnectionRow)> + '_ {
        self.connections.iter().flat_map(|(src, dsts)| {
            dsts.iter().map(move |(dst, conn)| (*src, *dst, *conn))
        })
    }
}

/// Parse a catalog from the raw contents of a JSON document
pub fn parse_catalog(raw: &str) -> Result<Catalog> {
    let catalog: Catalog = serde_json::from_str(raw)?;
    Ok(catalog)
}

/// Read in the catalog which is bundled with the service
pub fn default_catalog() -> Result<Catalog> {
    // This brings the catalog into the compiled code
    let raw = include_str!("campus.json");
    parse_catalog(raw)
}

/// Read in a catalog from a file on disk
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    info!(path = %path.display(), "loading campus catalog");
    let raw = fs::read_to_string(path)?;
    parse_catalog(&raw)
}
