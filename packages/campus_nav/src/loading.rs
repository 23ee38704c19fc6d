//! This module focuses on reading the campus catalog and using it to
//! generate a petgraph graph object.

pub mod catalog;
pub mod petgraph;
