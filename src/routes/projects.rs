//! Project and user routes, mounted under `/api`.

use crate::handlers::{projects, users};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/projects/users/:id",
            get(projects::list_for_user).post(projects::create_for_user),
        )
        .route(
            "/projects/:id",
            get(projects::read)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route("/users/:id", get(users::read))
        .with_state(state)
}
