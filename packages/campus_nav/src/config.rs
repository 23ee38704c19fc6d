pub mod route;
pub mod service;
