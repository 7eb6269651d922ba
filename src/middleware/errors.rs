use std::any::Any;

use anyhow::anyhow;
use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use coursebook_core::{AppError, FaultDetail};
use serde_json::json;
use tracing::error;

use crate::state::AppState;

/// Writes the detail of every 500 response to the operator log when global
/// error logging is enabled. The detail is stripped from the response either way.
pub async fn log_faults(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let mut response = next.run(req).await;

    if let Some(FaultDetail(detail)) = response.extensions_mut().remove::<FaultDetail>()
        && state.server_config.enable_global_error_logging
    {
        error!(
            method = %method,
            path = %path,
            status = %response.status().as_u16(),
            detail = %detail,
            "Global error handler"
        );
    }

    response
}

/// Turns a handler panic into the same 500 shape as any other fault.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::internal(
        anyhow!("handler panicked: {}", detail).context("There was a problem with your request"),
    )
    .into_response()
}

pub async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Route Not Found" })),
    )
}
