//! Data-access ports.
//!
//! The HTTP layer only ever talks to these traits. Every method is a
//! suspension point; implementations must be safe to share across concurrent
//! requests.

use async_trait::async_trait;
use coursebook_core::StoreError;
use coursebook_models::{Course, CourseDto, CourseWithOwner, NewUser, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email_address: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::UniqueViolation`] when the email address is taken.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
}

#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// All courses with their owner's public fields, ordered by id.
    async fn find_all(&self) -> Result<Vec<CourseWithOwner>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<CourseWithOwner>, StoreError>;

    async fn create(&self, user_id: i64, course: &CourseDto) -> Result<Course, StoreError>;

    /// Returns `false` when no course has this id.
    async fn update(&self, id: i64, course: &CourseDto) -> Result<bool, StoreError>;

    /// Returns `false` when no course has this id.
    async fn destroy(&self, id: i64) -> Result<bool, StoreError>;
}
