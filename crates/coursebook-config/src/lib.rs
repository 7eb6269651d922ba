//! # Coursebook Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`server`]: listening port and global error logging switch
//! - [`database`]: PostgreSQL connection settings
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//!
//! # Example
//!
//! ```ignore
//! use coursebook_config::{CorsConfig, DatabaseConfig, ServerConfig};
//!
//! let server_config = ServerConfig::from_env();
//! let database_config = DatabaseConfig::from_env()?;
//! let cors_config = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use server::ServerConfig;
