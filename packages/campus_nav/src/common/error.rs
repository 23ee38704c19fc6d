use thiserror::Error;

use crate::common::graph_data::{LocationId, PathType};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Everything which can go wrong while building or using the campus graph
#[derive(Debug, Error)]
pub enum Error {
    /// A connection in the catalog references a location which doesn't exist
    #[error("connection {from} -> {to} references unknown location {missing}")]
    UnknownEndpoint {
        from: LocationId,
        to: LocationId,
        missing: LocationId,
    },

    /// Location ids must be positive
    #[error("location id {id} is not a positive integer")]
    InvalidLocationId { id: LocationId },

    /// A connection in the catalog has a distance which can't be walked
    #[error("connection {from} -> {to} has invalid distance {distance}")]
    InvalidDistance {
        from: LocationId,
        to: LocationId,
        distance: f64,
    },

    /// A path type in the catalog has a speed which can't be walked at
    #[error("path type {path_type} has invalid speed {speed}")]
    InvalidSpeed { path_type: PathType, speed: f64 },

    /// A requested location id is not in the catalog
    #[error("unknown location {id}")]
    UnknownLocation { id: LocationId },

    /// The search was exhausted without reaching the destination
    #[error("no route found between {start} and {end}")]
    NoRouteFound { start: LocationId, end: LocationId },

    /// A route with no locations was provided where one was required
    #[error("route is empty")]
    EmptyRoute,

    /// Raised when a text template can't be prepared
    #[error("failed to prepare template: {0}")]
    Template(#[from] aho_corasick::BuildError),

    /// Wrapper for IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for catalog parsing errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
