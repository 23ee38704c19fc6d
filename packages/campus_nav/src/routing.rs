//! This module finds the quickest route between two locations, and describes
//! the result in terms of walking time and drawable geometry.

pub mod dijkstra;
pub mod geometry;
pub mod metrics;
