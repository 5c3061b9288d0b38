//! Route tables.

mod common;
mod projects;
pub use common::common_routes;
pub use projects::api_routes;
