//! User data models and DTOs.
//!
//! A [`User`] is also the authenticated principal: the authentication gate
//! resolves one per request and hands it to the handler.

use std::fmt;

use coursebook_core::password::PASSWORD_TOO_LONG;
use coursebook_core::{FieldRule, MAX_PASSWORD_BYTES, RuleSet};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A user account as stored in the database.
///
/// `password` holds the bcrypt hash and is never serialised.
#[derive(Serialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Response body for `GET /api/users`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct UserSummary {
    pub name: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            name: user.full_name(),
            email: user.email_address.clone(),
        }
    }
}

/// Request body for `POST /api/users`.
#[derive(Deserialize, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password: String,
}

impl RuleSet for CreateUserDto {
    const RULES: &'static [FieldRule] = &[
        FieldRule::required("firstName", "Please provide a value for \"firstName\""),
        FieldRule::required("lastName", "Please provide a value for \"lastName\""),
        FieldRule::required("emailAddress", "Please provide a value for \"emailAddress\""),
        FieldRule::email(
            "emailAddress",
            "Please provide a valid value for \"emailAddress\"",
        ),
        FieldRule::required("password", "Please provide a value for \"password\""),
        FieldRule::max_bytes("password", MAX_PASSWORD_BYTES, PASSWORD_TOO_LONG),
    ];
}

impl fmt::Debug for CreateUserDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserDto")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email_address", &self.email_address)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A user ready to insert; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password_hash: String,
}
