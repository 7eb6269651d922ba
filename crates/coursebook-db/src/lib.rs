//! # Coursebook DB
//!
//! Data access for the Coursebook API.
//!
//! - [`repository`]: the [`UserRepository`] and [`CourseRepository`] traits the
//!   HTTP layer depends on
//! - [`postgres`]: [`PgStore`], the SQLx/PostgreSQL implementation
//! - `memory`: `InMemoryStore`, a process-local implementation used by tests
//!   (feature `test-utils`)
//!
//! # Example
//!
//! ```ignore
//! use coursebook_config::DatabaseConfig;
//! use coursebook_db::{PgStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! let store = PgStore::new(pool);
//! ```

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;
pub mod repository;

use coursebook_config::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

pub use postgres::PgStore;
pub use repository::{CourseRepository, UserRepository};
// Re-export PgPool for convenience
pub use sqlx::PgPool;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Opens a PostgreSQL connection pool.
///
/// The pool is cheaply cloneable and is shared by every in-flight request.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "Database connection established"
    );

    Ok(pool)
}

/// Brings the schema up to date. Safe to call on every start.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
