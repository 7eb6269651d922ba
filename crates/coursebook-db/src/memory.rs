//! Process-local store with the same observable semantics as [`PgStore`],
//! including email uniqueness. Intended for tests.
//!
//! [`PgStore`]: crate::PgStore

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use coursebook_core::StoreError;
use coursebook_models::{Course, CourseDto, CourseOwner, CourseWithOwner, NewUser, User};
use tokio::sync::RwLock;

use crate::repository::{CourseRepository, UserRepository};

const EMAIL_CONSTRAINT: &str = "users_email_address_key";

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    courses: Vec<Course>,
    last_user_id: i64,
    last_course_id: i64,
}

impl Tables {
    fn with_owner(&self, course: &Course) -> Option<CourseWithOwner> {
        let owner = self.users.iter().find(|u| u.id == course.user_id)?;
        Some(CourseWithOwner {
            course: course.clone(),
            user: CourseOwner {
                first_name: owner.first_name.clone(),
                last_name: owner.last_name.clone(),
                email_address: owner.email_address.clone(),
            },
        })
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every operation fails with [`StoreError::Backend`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn course_count(&self) -> usize {
        self.tables.read().await.courses.len()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::backend(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "in-memory store marked unavailable",
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email_address: &str) -> Result<Option<User>, StoreError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email_address == email_address)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        if tables
            .users
            .iter()
            .any(|u| u.email_address == user.email_address)
        {
            return Err(StoreError::UniqueViolation(EMAIL_CONSTRAINT.to_string()));
        }

        tables.last_user_id += 1;
        let created = User {
            id: tables.last_user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email_address: user.email_address,
            password: user.password_hash,
        };
        tables.users.push(created.clone());

        Ok(created)
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<CourseWithOwner>, StoreError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .courses
            .iter()
            .filter_map(|c| tables.with_owner(c))
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CourseWithOwner>, StoreError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .courses
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| tables.with_owner(c)))
    }

    async fn create(&self, user_id: i64, course: &CourseDto) -> Result<Course, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        if !tables.users.iter().any(|u| u.id == user_id) {
            return Err(StoreError::backend(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("foreign key violation: no user with id {}", user_id),
            )));
        }

        tables.last_course_id += 1;
        let created = Course {
            id: tables.last_course_id,
            title: course.title.clone(),
            description: course.description.clone(),
            estimated_time: course.estimated_time.clone(),
            materials_needed: course.materials_needed.clone(),
            user_id,
        };
        tables.courses.push(created.clone());

        Ok(created)
    }

    async fn update(&self, id: i64, course: &CourseDto) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        let Some(existing) = tables.courses.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };
        existing.title = course.title.clone();
        existing.description = course.description.clone();
        existing.estimated_time = course.estimated_time.clone();
        existing.materials_needed = course.materials_needed.clone();

        Ok(true)
    }

    async fn destroy(&self, id: i64) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        let before = tables.courses.len();
        tables.courses.retain(|c| c.id != id);

        Ok(tables.courses.len() < before)
    }
}
