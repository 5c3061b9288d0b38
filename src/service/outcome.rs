//! Uniform result record returned by every data-access operation.

use crate::error::AppError;
use serde::Serialize;

/// Why an accessor call did not succeed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A read matched zero rows.
    NotFound,
    /// A write statement ran but affected zero rows.
    NoEffect,
    /// The driver raised an error (connectivity, constraint, malformed statement).
    DriverError,
    /// A write succeeded but the mandatory read-back failed.
    InconsistentRecovery,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Outcome<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
    #[serde(skip)]
    pub failure: Option<FailureKind>,
}

impl<T> Outcome<T> {
    pub fn succeeded(data: Option<T>, message: impl Into<String>) -> Self {
        Outcome {
            success: true,
            data,
            message: message.into(),
            failure: None,
        }
    }

    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Outcome {
            success: false,
            data: None,
            message: message.into(),
            failure: Some(kind),
        }
    }

    /// Failure carrying a driver error's text.
    pub fn driver(err: &sqlx::Error) -> Self {
        tracing::warn!(error = %err, "query failed");
        Self::failed(
            FailureKind::DriverError,
            format!("Failed to execute query: {}", err),
        )
    }

    /// Re-type a failure; data is always empty on failure so nothing is lost.
    pub fn cast<U>(self) -> Outcome<U> {
        Outcome {
            success: self.success,
            data: None,
            message: self.message,
            failure: self.failure,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Hand a successful outcome back to the caller, or turn a failure into an [`AppError`].
    pub fn into_result(self) -> Result<Self, AppError> {
        if self.success {
            return Ok(self);
        }
        let kind = self.failure.unwrap_or(FailureKind::DriverError);
        Err(AppError::from_failure(kind, self.message))
    }
}
