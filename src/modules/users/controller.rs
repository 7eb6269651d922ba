use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use coursebook_core::AppError;
use coursebook_models::{CreateUserDto, UserSummary};
use tracing::instrument;

use crate::docs::{MessageResponse, ValidationErrorResponse};
use crate::middleware::auth::CurrentUser;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Get the authenticated user
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "The authenticated user", body = UserSummary),
        (status = 401, description = "Missing or invalid credentials", body = MessageResponse),
    ),
    security(
        ("basic_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(user_id = current_user.id()))]
pub async fn get_current_user(current_user: CurrentUser) -> Json<UserSummary> {
    Json(UserSummary::from(&current_user.0))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created; empty body", headers(("Location" = String))),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
        (status = 500, description = "Email already in use or internal error", body = MessageResponse)
    ),
    tag = "Users"
)]
#[instrument(skip_all)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    UserService::create_user(state.users.as_ref(), dto).await?;

    Ok((StatusCode::CREATED, [(header::LOCATION, "/")]))
}
