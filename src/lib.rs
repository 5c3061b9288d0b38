//! REST backend for projects, users and their memberships.
//!
//! Requests flow handler → statement builder ([`sql`]) → [`DataAccessor`] → SQLite,
//! and every accessor call ends in an [`Outcome`] that the handler maps to a response.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod response;
pub mod routes;
pub mod server;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{DatabaseConfig, ServerConfig};
pub use error::{AppError, ConfigError, StartupError};
pub use models::{Member, Project, ProjectRecord, User};
pub use routes::{api_routes, common_routes};
pub use server::{app, RunningServer, Server};
pub use service::{DataAccessor, FailureKind, Outcome};
pub use state::AppState;
pub use store::{connect, ensure_schema};
