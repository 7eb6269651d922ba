use crate::docs::{ApiDoc, MessageResponse};
use crate::logging::logging_middleware;
use crate::middleware::errors::{handle_panic, log_faults, route_not_found};
use crate::modules::courses::init_courses_router;
use crate::modules::users::init_users_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, middleware, routing::get};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const WELCOME_MESSAGE: &str = "Welcome to the REST API project!";

/// Welcome message
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = MessageResponse)),
    tag = "Root"
)]
pub async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::LOCATION])
        .allow_credentials(true)
}

/// Layers, innermost first: panic boundary, fault logger, CORS, request log.
/// The panic boundary sits inside the fault logger so panics are logged too.
pub fn with_global_layers(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .fallback(route_not_found)
        .with_state(state.clone())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(state.clone(), log_faults))
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware))
}

pub fn init_router(state: AppState) -> Router {
    let routes = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(welcome))
        .nest(
            "/api",
            Router::new()
                .merge(init_users_router())
                .merge(init_courses_router()),
        );

    with_global_layers(routes, state)
}
