use anyhow::Error;
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::validation::ValidationIssue;

/// Body message for every 401, whatever the internal denial reason was.
pub const ACCESS_DENIED: &str = "Access Denied";

/// User-facing message when a uniqueness constraint rejects a write.
pub const CREDENTIALS_IN_USE: &str = "The credentials you entered are already in use";

const BASIC_CHALLENGE: &str = "Basic realm=\"coursebook\"";

/// Every non-success outcome a handler can produce.
///
/// The [`IntoResponse`] impl is the single place where these are turned into
/// a status code and JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("request failed validation ({} issues)", .0.len())]
    Validation(Vec<ValidationIssue>),

    /// The reason is for operator logs only and is never serialised.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{message}")]
    Conflict { message: String, constraint: String },

    #[error(transparent)]
    Internal(#[from] Error),
}

/// Failure kinds reported by the data-access layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("data store operation failed")]
    Backend(#[source] Error),
}

impl StoreError {
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::Backend(err.into())
    }
}

/// Full error rendering attached to 500 responses so the fault logger can
/// decide whether to write it out. Never part of the body.
#[derive(Debug, Clone)]
pub struct FaultDetail(pub String);

impl AppError {
    pub fn validation(issues: Vec<ValidationIssue>) -> Self {
        Self::Validation(issues)
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized(reason.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound(entity.into())
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::Internal(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(constraint) => AppError::Conflict {
                message: CREDENTIALS_IN_USE.to_string(),
                constraint,
            },
            other => AppError::Internal(other.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            AppError::Validation(issues) => {
                let errors: Vec<&str> = issues.iter().map(|issue| issue.message.as_str()).collect();
                (status, Json(json!({ "errors": errors }))).into_response()
            }
            AppError::Unauthorized(_) => {
                let mut response =
                    (status, Json(json!({ "message": ACCESS_DENIED }))).into_response();
                response.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static(BASIC_CHALLENGE),
                );
                response
            }
            AppError::Forbidden(message) => {
                (status, Json(json!({ "message": message }))).into_response()
            }
            AppError::NotFound(entity) => (
                status,
                Json(json!({ "message": format!("{} not found", entity) })),
            )
                .into_response(),
            AppError::Conflict {
                message,
                constraint,
            } => fault_response(
                message,
                format!("unique constraint violated: {}", constraint),
            ),
            AppError::Internal(err) => fault_response(err.to_string(), format!("{:?}", err)),
        }
    }
}

fn fault_response(message: String, detail: String) -> Response {
    let mut response = (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": message })),
    )
        .into_response();
    response.extensions_mut().insert(FaultDetail(detail));
    response
}
