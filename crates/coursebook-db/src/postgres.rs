use async_trait::async_trait;
use coursebook_core::StoreError;
use coursebook_models::{Course, CourseDto, CourseWithOwner, NewUser, User};
use sqlx::PgPool;
use tracing::instrument;

use crate::repository::{CourseRepository, UserRepository};

const COURSE_WITH_OWNER_SELECT: &str = r#"
    SELECT c.id, c.title, c.description, c.estimated_time, c.materials_needed, c.user_id,
           u.first_name, u.last_name, u.email_address
    FROM courses c
    JOIN users u ON u.id = c.user_id
"#;

/// PostgreSQL-backed implementation of both repositories.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return StoreError::UniqueViolation(db_err.constraint().unwrap_or("unknown").to_string());
    }
    StoreError::backend(err)
}

#[async_trait]
impl UserRepository for PgStore {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email_address: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            r#"SELECT id, first_name, last_name, email_address, password
               FROM users
               WHERE email_address = $1"#,
        )
        .bind(email_address)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(
            r#"SELECT id, first_name, last_name, email_address, password
               FROM users
               WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)
    }

    #[instrument(skip(self, user), fields(email_address = %user.email_address))]
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (first_name, last_name, email_address, password)
               VALUES ($1, $2, $3, $4)
               RETURNING id, first_name, last_name, email_address, password"#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email_address)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)
    }
}

#[async_trait]
impl CourseRepository for PgStore {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<CourseWithOwner>, StoreError> {
        let query = format!("{} ORDER BY c.id", COURSE_WITH_OWNER_SELECT);

        sqlx::query_as::<_, CourseWithOwner>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<CourseWithOwner>, StoreError> {
        let query = format!("{} WHERE c.id = $1", COURSE_WITH_OWNER_SELECT);

        sqlx::query_as::<_, CourseWithOwner>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)
    }

    #[instrument(skip(self, course))]
    async fn create(&self, user_id: i64, course: &CourseDto) -> Result<Course, StoreError> {
        sqlx::query_as::<_, Course>(
            r#"INSERT INTO courses (title, description, estimated_time, materials_needed, user_id)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING id, title, description, estimated_time, materials_needed, user_id"#,
        )
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.estimated_time)
        .bind(&course.materials_needed)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)
    }

    #[instrument(skip(self, course))]
    async fn update(&self, id: i64, course: &CourseDto) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"UPDATE courses
               SET title = $1, description = $2, estimated_time = $3,
                   materials_needed = $4, updated_at = NOW()
               WHERE id = $5"#,
        )
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.estimated_time)
        .bind(&course.materials_needed)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn destroy(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }
}
