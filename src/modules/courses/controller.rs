use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use coursebook_core::AppError;
use coursebook_models::{CourseDto, CourseWithOwner};
use tracing::instrument;

use crate::docs::{MessageResponse, ValidationErrorResponse};
use crate::middleware::auth::CurrentUser;
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List all courses with their owners
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses", body = Vec<CourseWithOwner>),
        (status = 500, description = "Internal error", body = MessageResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseWithOwner>>, AppError> {
    let courses = CourseService::list_courses(state.courses.as_ref()).await?;
    Ok(Json(courses))
}

/// Get a course by id
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 200, description = "The course", body = CourseWithOwner),
        (status = 404, description = "Course not found", body = MessageResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CourseWithOwner>, AppError> {
    let id = CourseService::parse_id(&id)?;
    let course = CourseService::get_course(state.courses.as_ref(), id).await?;
    Ok(Json(course))
}

/// Create a course owned by the authenticated user
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CourseDto,
    responses(
        (status = 201, description = "Course created; empty body", headers(("Location" = String))),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = MessageResponse),
        (status = 403, description = "userId names another user", body = MessageResponse)
    ),
    security(("basic_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip_all, fields(user_id = current_user.id()))]
pub async fn create_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    ValidatedJson(dto): ValidatedJson<CourseDto>,
) -> Result<impl IntoResponse, AppError> {
    let course =
        CourseService::create_course(state.courses.as_ref(), &current_user.0, dto).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/courses/{}", course.id))],
    ))
}

/// Replace a course
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course id")),
    request_body = CourseDto,
    responses(
        (status = 204, description = "Course updated"),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
        (status = 401, description = "Missing or invalid credentials", body = MessageResponse),
        (status = 403, description = "Course belongs to another user", body = MessageResponse),
        (status = 404, description = "Course not found", body = MessageResponse)
    ),
    security(("basic_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, current_user, dto), fields(user_id = current_user.id()))]
pub async fn update_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
    ValidatedJson(dto): ValidatedJson<CourseDto>,
) -> Result<StatusCode, AppError> {
    let id = CourseService::parse_id(&id)?;
    CourseService::update_course(state.courses.as_ref(), &current_user.0, id, dto).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a course
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course id")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Missing or invalid credentials", body = MessageResponse),
        (status = 403, description = "Course belongs to another user", body = MessageResponse),
        (status = 404, description = "Course not found", body = MessageResponse)
    ),
    security(("basic_auth" = [])),
    tag = "Courses"
)]
#[instrument(skip(state, current_user), fields(user_id = current_user.id()))]
pub async fn delete_course(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = CourseService::parse_id(&id)?;
    CourseService::delete_course(state.courses.as_ref(), &current_user.0, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
