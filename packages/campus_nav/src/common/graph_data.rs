//! Sets out the data which is stored against each node and edge of the
//! campus graph, along with the fixed vocabularies used to describe them.

use geo::Coord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier for a single location on campus, as it appears in the catalog
pub type LocationId = u32;

/// Traversal speed used for any path type which is missing from the path
/// type table, in distance units per minute
pub const DEFAULT_SPEED: f64 = 50.0;

/// Broad category of a location, used by the front end to pick an icon
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LocationCategory {
    Entrance,
    Academic,
    Admin,
    Hostel,
    Food,
    OpenSpace,
    Sports,
}

/// The kind of walkway a segment represents. This determines both how the
/// segment is drawn and how quickly it can be walked
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PathType {
    PavedWalkway,
    OpenPath,
    CrowdedArea,
    Stairs,
    FoodCourt,
}

impl PathType {
    /// The tag used for this path type in the catalog and API responses
    pub fn as_str(&self) -> &'static str {
        match self {
            PathType::PavedWalkway => "paved_walkway",
            PathType::OpenPath => "open_path",
            PathType::CrowdedArea => "crowded_area",
            PathType::Stairs => "stairs",
            PathType::FoodCourt => "food_court",
        }
    }
}

impl fmt::Display for PathType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual style for a path type, consumed verbatim by the front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    pub color: String,
    pub width: u32,
    pub dash: Vec<u32>,
}

/// Everything known about a single path type: how to draw it, and how fast
/// it can be walked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathTypeData {
    #[serde(flatten)]
    pub style: PathStyle,
    pub speed: f64,
}

/// Lookup table from path type to its style and speed. Types which are
/// absent from the table are walked at DEFAULT_SPEED and have no style
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathTable {
    entries: BTreeMap<PathType, PathTypeData>,
}

impl PathTable {
    pub fn new(entries: BTreeMap<PathType, PathTypeData>) -> Self {
        PathTable { entries }
    }

    /// Walking speed along the provided path type
    pub fn speed(&self, path_type: PathType) -> f64 {
        match self.entries.get(&path_type) {
            Some(data) => data.speed,
            None => DEFAULT_SPEED,
        }
    }

    pub fn style(&self, path_type: PathType) -> Option<&PathStyle> {
        self.entries.get(&path_type).map(|data| &data.style)
    }

    /// All known styles, keyed by path type
    pub fn styles(&self) -> BTreeMap<PathType, &PathStyle> {
        self.entries
            .iter()
            .map(|(path_type, data)| (*path_type, &data.style))
            .collect()
    }
}

/// Sets the data which will be stored as weights for nodes in the petgraph
/// graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    #[serde(flatten)]
    pub position: Coord,
    #[serde(rename = "type")]
    pub category: LocationCategory,
}

/// Container for edge metadata which will be stored in the graph. The path
/// points are the cached curve between src and dst, excluding both endpoints
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub src: LocationId,
    pub dst: LocationId,
    pub distance: f64,
    pub path_type: PathType,
    pub path_points: Vec<Coord>,
}
