//! Project handlers: list by user, create for user, read, update, delete.
//! Composite writes (project + membership) run in one transaction and roll back on any failed step.

use crate::error::AppError;
use crate::extractors::RecordId;
use crate::models::{Member, MemberRecord, Project, ProjectRecord};
use crate::response;
use crate::service::{DataAccessor, Outcome, RequestValidator, PROJECT_RULES};
use crate::sql;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use sqlx::{Sqlite, SqliteConnection, Transaction};

fn project_body(body: Result<Json<Value>, JsonRejection>) -> Result<ProjectRecord, AppError> {
    let Json(value) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let Value::Object(map) = value else {
        return Err(AppError::BadRequest("body must be a JSON object".into()));
    };
    RequestValidator::validate(&map, PROJECT_RULES)?;
    serde_json::from_value(Value::Object(map)).map_err(|e| AppError::Validation(e.to_string()))
}

/// Commit on success, roll back on failure. The step's error wins over a rollback error.
async fn settle<T>(
    tx: Transaction<'static, Sqlite>,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    match result {
        Ok(v) => {
            tx.commit().await?;
            Ok(v)
        }
        Err(e) => {
            if let Err(rb) = tx.rollback().await {
                tracing::error!(error = %rb, "rollback failed");
            }
            tracing::debug!(error = %e, "transaction rolled back");
            Err(e)
        }
    }
}

async fn create_with_member(
    conn: &mut SqliteConnection,
    user_id: i64,
    record: &ProjectRecord,
) -> Result<Vec<Project>, AppError> {
    let created = DataAccessor::create::<Project, _>(conn, &sql::insert(record), sql::projects_read)
        .await
        .into_result()?;
    let projects = created.data.unwrap_or_default();
    let Some(project) = projects.first() else {
        return Err(AppError::Recovery(
            "Failed to recover the inserted record: No record(s) found".into(),
        ));
    };
    let member = MemberRecord {
        user_id,
        project_id: project.project_id,
    };
    DataAccessor::create::<Member, _>(conn, &sql::insert(&member), sql::members_read)
        .await
        .into_result()?;
    Ok(projects)
}

async fn delete_with_members(
    conn: &mut SqliteConnection,
    project_id: i64,
) -> Result<Outcome<()>, AppError> {
    DataAccessor::delete_all(conn, &sql::project_members_delete(project_id))
        .await
        .into_result()?;
    DataAccessor::delete(conn, &sql::projects_delete(project_id))
        .await
        .into_result()
}

/// GET /api/projects/users/:id
pub async fn list_for_user(
    State(state): State<AppState>,
    RecordId(user_id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.pool.acquire().await?;
    let outcome = DataAccessor::read::<Project>(&mut conn, &sql::user_projects_read(user_id))
        .await
        .into_result()?;
    Ok(response::rows(outcome.data.unwrap_or_default()))
}

/// POST /api/projects/users/:id
pub async fn create_for_user(
    State(state): State<AppState>,
    RecordId(user_id): RecordId,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let record = project_body(body)?;
    let mut tx = state.pool.begin().await?;
    let result = create_with_member(&mut tx, user_id, &record).await;
    let projects = settle(tx, result).await?;
    tracing::info!(user_id, project_id = projects[0].project_id, "project created");
    Ok(response::created(projects))
}

/// GET /api/projects/:id
pub async fn read(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = state.pool.acquire().await?;
    let outcome = DataAccessor::read::<Project>(&mut conn, &sql::projects_read(id))
        .await
        .into_result()?;
    Ok(response::rows(outcome.data.unwrap_or_default()))
}

/// PUT /api/projects/:id
pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let record = project_body(body)?;
    let mut conn = state.pool.acquire().await?;
    let outcome =
        DataAccessor::update::<Project, _>(&mut conn, &sql::update(&record, id), sql::projects_read)
            .await
            .into_result()?;
    Ok(response::rows(outcome.data.unwrap_or_default()))
}

/// DELETE /api/projects/:id
pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = state.pool.begin().await?;
    let result = delete_with_members(&mut tx, id).await;
    let outcome = settle(tx, result).await?;
    tracing::info!(project_id = id, "project deleted");
    Ok(response::message(outcome.message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_must_be_an_object() {
        let err = project_body(Ok(Json(json!([1, 2])))).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn body_is_validated_then_typed() {
        let rec = project_body(Ok(Json(json!({
            "projectName": "Atlas",
            "projectDescription": "d",
            "projectImage": null,
            "projectDeadline": "2025-01-01",
            "ignored": true
        }))))
        .unwrap();
        assert_eq!(rec.project_name, "Atlas");
        assert_eq!(rec.project_image, None);
        assert_eq!(
            rec.project_deadline,
            chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
        );
        let err = project_body(Ok(Json(json!({ "projectName": "Atlas" })))).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
