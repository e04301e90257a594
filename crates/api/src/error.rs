//! HTTP error mapping.
//!
//! Every failure leaves the API as `{ "error": message, "code": CODE }`.
//! Internal details are logged, never returned.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use questlog_core::error::CoreError;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Produced by the router fallback.
    #[error("No route for {0}")]
    RouteNotFound(String),

    /// Logged in full, rendered as a generic message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

/// Status, machine code and client-facing message for one error.
struct Rendered {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl Rendered {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    fn internal(detail: &dyn std::fmt::Display) -> Self {
        tracing::error!(error = %detail, "Request failed with internal error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }
}

impl AppError {
    fn render(&self) -> Rendered {
        match self {
            Self::Core(CoreError::NotFound { entity, id }) => {
                Rendered::not_found(format!("{entity} with id {id} not found"))
            }
            Self::Core(CoreError::NotFoundByName { entity, name }) => {
                Rendered::not_found(format!("{entity} '{name}' not found"))
            }
            Self::Core(CoreError::Validation(msg)) => {
                Rendered::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.as_str())
            }
            Self::Core(CoreError::Conflict(msg)) => {
                Rendered::new(StatusCode::CONFLICT, "CONFLICT", msg.as_str())
            }
            Self::Core(CoreError::Unauthorized(msg)) => {
                Rendered::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.as_str())
            }
            Self::Core(CoreError::Internal(msg)) => Rendered::internal(msg),

            Self::Database(sqlx::Error::RowNotFound) => Rendered::not_found("Resource not found"),
            Self::Database(sqlx::Error::Database(db_err)) => match unique_constraint(&**db_err) {
                Some(constraint) => Rendered::new(
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                ),
                None => Rendered::internal(db_err),
            },
            Self::Database(other) => Rendered::internal(other),

            Self::RouteNotFound(path) => Rendered::not_found(format!("No route for {path}")),
            Self::InternalError(msg) => Rendered::internal(msg),
        }
    }
}

/// Name of the violated constraint when a write hit one of our `uq_*`
/// unique constraints. Other constraint names stay internal errors.
fn unique_constraint(err: &dyn sqlx::error::DatabaseError) -> Option<&str> {
    if !err.is_unique_violation() {
        return None;
    }
    err.constraint().filter(|name| name.starts_with("uq_"))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let Rendered {
            status,
            code,
            message,
        } = self.render();
        (
            status,
            Json(ErrorBody {
                error: message,
                code,
            }),
        )
            .into_response()
    }
}
