//! Typed errors and HTTP mapping.

use crate::service::FailureKind;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Errors raised while bringing a server up or down.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("server task: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    NoEffect(String),
    #[error("{0}")]
    Driver(String),
    #[error("{0}")]
    Recovery(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    /// Error for a failed accessor outcome; the message is passed through unchanged.
    pub fn from_failure(kind: FailureKind, message: String) -> Self {
        match kind {
            FailureKind::NotFound => AppError::NotFound(message),
            FailureKind::NoEffect => AppError::NoEffect(message),
            FailureKind::DriverError => AppError::Driver(message),
            FailureKind::InconsistentRecovery => AppError::Recovery(message),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::NoEffect(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Driver(_) | AppError::Recovery(_) | AppError::Db(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::NoEffect(_) => "no_effect",
            AppError::Driver(_) | AppError::Db(_) => "database_error",
            AppError::Recovery(_) => "inconsistent_recovery",
            AppError::Validation(_) => "validation_error",
            AppError::BadRequest(_) => "bad_request",
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            code: self.code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_map_to_consistent_statuses() {
        let cases = [
            (FailureKind::NotFound, StatusCode::NOT_FOUND),
            (FailureKind::NoEffect, StatusCode::NOT_FOUND),
            (FailureKind::DriverError, StatusCode::INTERNAL_SERVER_ERROR),
            (FailureKind::InconsistentRecovery, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (kind, status) in cases {
            let err = AppError::from_failure(kind, "m".into());
            assert_eq!(err.status(), status);
            assert_eq!(err.to_string(), "m");
        }
        assert_eq!(AppError::BadRequest("invalid id".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn pool_errors_are_server_errors() {
        let err = AppError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "database_error");
    }
}
