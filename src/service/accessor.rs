//! Statement execution against SQLite. Every call ends in an [`Outcome`]; driver errors never escape.

use super::outcome::{FailureKind, Outcome};
use crate::sql::Statement;
use sqlx::sqlite::{SqliteQueryResult, SqliteRow};
use sqlx::{FromRow, SqliteConnection};

pub struct DataAccessor;

impl DataAccessor {
    /// Run a SELECT. Zero rows is a NotFound failure.
    pub async fn read<T>(conn: &mut SqliteConnection, query: &Statement) -> Outcome<Vec<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        tracing::debug!(sql = %query.sql, params = ?query.params, "query");
        let mut q = sqlx::query_as::<_, T>(&query.sql);
        for p in &query.params {
            q = q.bind(p.clone());
        }
        match q.fetch_all(&mut *conn).await {
            Ok(rows) if rows.is_empty() => {
                tracing::debug!(sql = %query.sql, "no rows");
                Outcome::failed(FailureKind::NotFound, "No record(s) found")
            }
            Ok(rows) => Outcome::succeeded(Some(rows), "Record(s) successfully recovered"),
            Err(e) => Outcome::driver(&e),
        }
    }

    /// Run an INSERT, then re-read the new row through `read_query(last_insert_id)`.
    /// A failed read-back fails the whole create even though the row was written.
    pub async fn create<T, F>(
        conn: &mut SqliteConnection,
        query: &Statement,
        read_query: F,
    ) -> Outcome<Vec<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
        F: Fn(i64) -> Statement,
    {
        let status = match Self::execute(conn, query).await {
            Ok(status) => status,
            Err(e) => return Outcome::driver(&e),
        };
        let recovered = Self::read::<T>(conn, &read_query(status.last_insert_rowid())).await;
        if recovered.is_success() {
            Outcome::succeeded(recovered.data, "Record successfully recovered")
        } else {
            tracing::warn!(sql = %query.sql, message = %recovered.message, "inserted row could not be read back");
            Outcome::failed(
                FailureKind::InconsistentRecovery,
                format!("Failed to recover the inserted record: {}", recovered.message),
            )
        }
    }

    /// Run an UPDATE, then re-read the target row through `read_query(key)`.
    /// Zero affected rows is a NoEffect failure, distinct from a driver error.
    pub async fn update<T, F>(
        conn: &mut SqliteConnection,
        query: &Statement,
        read_query: F,
    ) -> Outcome<Vec<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
        F: Fn(i64) -> Statement,
    {
        let Some(id) = query.key else {
            return Outcome::failed(
                FailureKind::DriverError,
                "Failed to execute query: update statement has no target id",
            );
        };
        let status = match Self::execute(conn, query).await {
            Ok(status) => status,
            Err(e) => return Outcome::driver(&e),
        };
        if status.rows_affected() == 0 {
            tracing::debug!(sql = %query.sql, id, "update affected no rows");
            return Outcome::failed(
                FailureKind::NoEffect,
                "Failed to update record: no rows affected",
            );
        }
        let recovered = Self::read::<T>(conn, &read_query(id)).await;
        if recovered.is_success() {
            Outcome::succeeded(recovered.data, "Record successfully recovered")
        } else {
            tracing::warn!(sql = %query.sql, id, message = %recovered.message, "updated row could not be read back");
            Outcome::failed(
                FailureKind::InconsistentRecovery,
                format!("Failed to recover the updated record: {}", recovered.message),
            )
        }
    }

    /// Run a DELETE that must remove at least one row.
    pub async fn delete(conn: &mut SqliteConnection, query: &Statement) -> Outcome<()> {
        match Self::execute(conn, query).await {
            Ok(status) if status.rows_affected() == 0 => {
                let target = query.key.map(|id| format!(" {}", id)).unwrap_or_default();
                Outcome::failed(
                    FailureKind::NoEffect,
                    format!("Failed to delete record{}", target),
                )
            }
            Ok(_) => Outcome::succeeded(None, "Record successfully deleted"),
            Err(e) => Outcome::driver(&e),
        }
    }

    /// Run a DELETE where removing nothing is fine (dependent rows that may not exist).
    pub async fn delete_all(conn: &mut SqliteConnection, query: &Statement) -> Outcome<()> {
        match Self::execute(conn, query).await {
            Ok(status) => Outcome::succeeded(
                None,
                format!("{} record(s) deleted", status.rows_affected()),
            ),
            Err(e) => Outcome::driver(&e),
        }
    }

    async fn execute(
        conn: &mut SqliteConnection,
        query: &Statement,
    ) -> Result<SqliteQueryResult, sqlx::Error> {
        tracing::debug!(sql = %query.sql, params = ?query.params, "execute");
        let mut q = sqlx::query(&query.sql);
        for p in &query.params {
            q = q.bind(p.clone());
        }
        q.execute(&mut *conn).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Member, MemberRecord, Project, ProjectRecord};
    use crate::sql::{self, BindValue};
    use crate::store::{connect, ensure_schema};
    use crate::config::DatabaseConfig;
    use sqlx::SqlitePool;

    async fn pool() -> SqlitePool {
        let pool = connect(&DatabaseConfig::in_memory()).await.unwrap();
        ensure_schema(&pool).await.unwrap();
        sqlx::query("INSERT INTO users (firstName, lastName) VALUES ('Ada', 'Lovelace')")
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    fn atlas() -> ProjectRecord {
        ProjectRecord {
            project_name: "Atlas".into(),
            project_description: "d".into(),
            project_image: None,
            project_deadline: chrono::NaiveDate::from_ymd_opt(2025, 1, 1),
        }
    }

    #[tokio::test]
    async fn read_of_missing_row_is_not_found() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let out = DataAccessor::read::<Project>(&mut conn, &sql::projects_read(99)).await;
        assert!(!out.success);
        assert_eq!(out.failure, Some(FailureKind::NotFound));
        assert_eq!(out.message, "No record(s) found");
        assert!(out.data.is_none());
    }

    #[tokio::test]
    async fn create_returns_canonical_row() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let out = DataAccessor::create::<Project, _>(&mut conn, &sql::insert(&atlas()), sql::projects_read).await;
        assert!(out.success, "{}", out.message);
        let rows = out.data.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].project_name, "Atlas");
        assert_eq!(rows[0].project_deadline, atlas().project_deadline);

        let member = MemberRecord { user_id: 1, project_id: rows[0].project_id };
        let out = DataAccessor::create::<Member, _>(&mut conn, &sql::insert(&member), sql::members_read).await;
        assert!(out.success, "{}", out.message);
        assert_eq!(out.data.unwrap()[0].project_id, rows[0].project_id);
    }

    #[tokio::test]
    async fn create_with_failed_read_back_is_inconsistent() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let out = DataAccessor::create::<Project, _>(&mut conn, &sql::insert(&atlas()), |_| {
            sql::projects_read(-1)
        })
        .await;
        assert_eq!(out.failure, Some(FailureKind::InconsistentRecovery));
        assert_eq!(out.message, "Failed to recover the inserted record: No record(s) found");

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn constraint_violation_is_driver_error() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let member = MemberRecord { user_id: 404, project_id: 404 };
        let out = DataAccessor::create::<Member, _>(&mut conn, &sql::insert(&member), sql::members_read).await;
        assert_eq!(out.failure, Some(FailureKind::DriverError));
        assert!(out.message.starts_with("Failed to execute query: "));
    }

    #[tokio::test]
    async fn update_of_missing_row_has_no_effect() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let out = DataAccessor::update::<Project, _>(&mut conn, &sql::update(&atlas(), 12), sql::projects_read).await;
        assert_eq!(out.failure, Some(FailureKind::NoEffect));
        assert_eq!(out.message, "Failed to update record: no rows affected");
    }

    #[tokio::test]
    async fn update_rereads_row() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let created = DataAccessor::create::<Project, _>(&mut conn, &sql::insert(&atlas()), sql::projects_read)
            .await
            .data
            .unwrap();
        let id = created[0].project_id;
        let mut changed = atlas();
        changed.project_name = "Atlas II".into();
        changed.project_image = Some("atlas.png".into());
        let out = DataAccessor::update::<Project, _>(&mut conn, &sql::update(&changed, id), sql::projects_read).await;
        assert!(out.success, "{}", out.message);
        let row = &out.data.unwrap()[0];
        assert_eq!(row.project_id, id);
        assert_eq!(row.project_name, "Atlas II");
        assert_eq!(row.project_image.as_deref(), Some("atlas.png"));
    }

    #[tokio::test]
    async fn update_without_target_is_rejected() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let q = Statement {
            sql: "UPDATE projects SET projectName = $1".into(),
            params: vec![BindValue::Text("x".into())],
            key: None,
        };
        let out = DataAccessor::update::<Project, _>(&mut conn, &q, sql::projects_read).await;
        assert_eq!(out.failure, Some(FailureKind::DriverError));
    }

    #[tokio::test]
    async fn delete_requires_an_affected_row() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let out = DataAccessor::delete(&mut conn, &sql::projects_delete(3)).await;
        assert_eq!(out.failure, Some(FailureKind::NoEffect));
        assert_eq!(out.message, "Failed to delete record 3");

        let out = DataAccessor::delete_all(&mut conn, &sql::project_members_delete(3)).await;
        assert!(out.success);
        assert!(out.data.is_none());
    }

    #[tokio::test]
    async fn malformed_statement_does_not_escape() {
        let pool = pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let q = Statement {
            sql: "SELECT * FROM nowhere".into(),
            params: Vec::new(),
            key: None,
        };
        let out = DataAccessor::read::<Project>(&mut conn, &q).await;
        assert_eq!(out.failure, Some(FailureKind::DriverError));
        let out = DataAccessor::delete(&mut conn, &q).await;
        assert_eq!(out.failure, Some(FailureKind::DriverError));
    }
}
