//! User handlers. Users are read-only here.

use crate::error::AppError;
use crate::extractors::RecordId;
use crate::models::User;
use crate::response;
use crate::service::DataAccessor;
use crate::sql;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

/// GET /api/users/:id
pub async fn read(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.pool.acquire().await?;
    let outcome = DataAccessor::read::<User>(&mut conn, &sql::users_read(id))
        .await
        .into_result()?;
    Ok(response::rows(outcome.data.unwrap_or_default()))
}
