pub mod api;
pub mod common;
pub mod config;
pub mod loading;
pub mod notify;
pub mod routing;

pub use common::campus_graph::CampusGraph;
pub use common::error::{Error, Result};
