use coursebook_core::{FieldRule, RuleSet};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: i64,
}

/// Public fields of the user that created a course.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseOwner {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct CourseWithOwner {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub course: Course,
    #[sqlx(flatten)]
    pub user: CourseOwner,
}

/// Request body for creating and replacing a course.
///
/// `userId` is optional; the course always belongs to the authenticated user.
#[derive(Deserialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub title: String,
    pub description: String,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
    pub user_id: Option<i64>,
}

impl RuleSet for CourseDto {
    const RULES: &'static [FieldRule] = &[
        FieldRule::required("title", "Title is required"),
        FieldRule::required("description", "Description is required"),
    ];
}
