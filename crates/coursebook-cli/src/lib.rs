//! # Coursebook CLI
//!
//! Administrative and seeding utilities for Coursebook development.
//!
//! The seeder writes through the repository traits, so it works against
//! PostgreSQL and against the in-memory store alike.
//!
//! ## Usage
//!
//! ```ignore
//! use coursebook_cli::seeder::{SeedConfig, seed_all};
//!
//! let store = PgStore::new(pool);
//! seed_all(&store, &store, &SeedConfig::new(10)).await?;
//! ```

pub mod seeder;
