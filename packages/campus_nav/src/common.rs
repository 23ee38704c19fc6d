//! Data structures and utilities shared by the rest of the crate

pub mod bbox;
pub mod campus_graph;
pub mod error;
pub mod graph_data;
pub mod logging;
