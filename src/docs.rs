use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

use coursebook_models::{Course, CourseDto, CourseOwner, CourseWithOwner, CreateUserDto, UserSummary};

/// `{"message": ...}` body used by the welcome route and every non-validation error.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// `{"errors": [...]}` body of a 400, one entry per failed rule in declaration order.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::welcome,
        crate::modules::users::controller::get_current_user,
        crate::modules::users::controller::create_user,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
    ),
    components(
        schemas(
            UserSummary,
            CreateUserDto,
            Course,
            CourseOwner,
            CourseWithOwner,
            CourseDto,
            MessageResponse,
            ValidationErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Root", description = "Service banner"),
        (name = "Users", description = "Account creation and the authenticated user"),
        (name = "Courses", description = "Course catalogue; writes are limited to the course owner")
    ),
    info(
        title = "Coursebook API",
        version = "0.1.0",
        description = "REST API over users and courses with HTTP Basic authentication.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            )
        }
    }
}
