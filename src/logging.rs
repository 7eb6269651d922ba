use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "coursebook=info,tower_http=info,sqlx=warn";

/// Logs arrival and completion of every request under a fresh request id.
///
/// Only method, path, status and latency are recorded; headers are not, so
/// `Authorization` never reaches the logs.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let request_id = uuid::Uuid::new_v4().to_string();

    info!(
        request_id = %request_id,
        method = %method,
        path = %matched_path,
        "Incoming request"
    );

    let response = next.run(req).await;
    let latency_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    match status {
        400..=499 => warn!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms,
            "Client error"
        ),
        500..=599 => error!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms,
            "Server error"
        ),
        _ => info!(
            request_id = %request_id,
            method = %method,
            path = %matched_path,
            status,
            latency_ms,
            "Request completed"
        ),
    }

    response
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber: a compact console layer, plus a daily
/// rolling JSON file in `LOG_DIR` when that variable is set.
///
/// Keep the returned guard alive for as long as the file should be written.
pub fn init_tracing() -> Option<WorkerGuard> {
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(env_filter());

    let log_dir = std::env::var("LOG_DIR")
        .ok()
        .filter(|dir| !dir.trim().is_empty());

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "coursebook.json");
            let (writer, guard) = tracing_appender::non_blocking(appender);

            let json_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(true)
                .with_span_list(true)
                .with_filter(env_filter());

            tracing_subscriber::registry()
                .with(console_layer)
                .with(json_layer)
                .init();

            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(console_layer).init();
            None
        }
    }
}
