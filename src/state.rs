use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use coursebook_config::{CorsConfig, DatabaseConfig, ServerConfig};
use coursebook_db::{CourseRepository, PgStore, UserRepository, init_db_pool, run_migrations};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub server_config: ServerConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    /// Builds state where one store serves both repositories.
    pub fn new<S>(store: Arc<S>, server_config: ServerConfig, cors_config: CorsConfig) -> Self
    where
        S: UserRepository + CourseRepository + 'static,
    {
        Self {
            users: store.clone(),
            courses: store,
            server_config,
            cors_config,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("server_config", &self.server_config)
            .field("cors_config", &self.cors_config)
            .finish_non_exhaustive()
    }
}

/// Connects to PostgreSQL, applies migrations and loads configuration from
/// the environment.
pub async fn init_app_state(server_config: ServerConfig) -> anyhow::Result<AppState> {
    let database_config = DatabaseConfig::from_env()?;

    let pool = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(AppState::new(
        Arc::new(PgStore::new(pool)),
        server_config,
        CorsConfig::from_env(),
    ))
}
