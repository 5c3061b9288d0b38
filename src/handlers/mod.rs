//! HTTP handlers: translate requests into accessor calls and outcomes into responses.

pub mod projects;
pub mod users;
