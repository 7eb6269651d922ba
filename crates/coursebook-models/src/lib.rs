//! # Coursebook Models
//!
//! Domain models and DTOs shared by the API, the data-access layer and the CLI.
//!
//! - [`users`]: the `User` entity (the authenticated principal) and its DTOs
//! - [`courses`]: the `Course` entity, its owner projection and DTOs
//!
//! Request DTOs implement [`coursebook_core::RuleSet`] so the request
//! validation pipeline can check the raw payload before deserialising it.

pub mod courses;
pub mod users;

pub use courses::{Course, CourseDto, CourseOwner, CourseWithOwner};
pub use users::{CreateUserDto, NewUser, User, UserSummary};
