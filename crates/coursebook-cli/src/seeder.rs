//! Fake users and courses for local development.

use std::time::Instant;

use anyhow::Context;
use coursebook_core::hash_password_async;
use coursebook_db::{CourseRepository, UserRepository};
use coursebook_models::{CourseDto, NewUser};
use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence, Words};
use fake::faker::name::en::{FirstName, LastName};

pub const DEFAULT_PASSWORD: &str = "password";

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub users: usize,
    pub courses_per_user: usize,
    /// Plaintext shared by every seeded account.
    pub password: String,
}

impl SeedConfig {
    pub fn new(users: usize) -> Self {
        Self {
            users,
            courses_per_user: 3,
            password: DEFAULT_PASSWORD.to_string(),
        }
    }

    pub fn with_courses_per_user(mut self, courses_per_user: usize) -> Self {
        self.courses_per_user = courses_per_user;
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub courses: usize,
}

/// Builds a fake user. `index` keeps the email address unique within one run.
pub fn generate_user(index: usize, run_tag: u64, password_hash: &str) -> NewUser {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();

    let email_address = format!(
        "{}.{}+{}{}@example.com",
        first_name.to_lowercase().replace(' ', ""),
        last_name.to_lowercase().replace(' ', ""),
        run_tag,
        index
    );

    NewUser {
        first_name,
        last_name,
        email_address,
        password_hash: password_hash.to_string(),
    }
}

pub fn generate_course() -> CourseDto {
    let title: String = Sentence(2..5).fake();
    let materials: Vec<String> = Words(2..5).fake();

    CourseDto {
        title: title.trim_end_matches('.').to_string(),
        description: Paragraph(2..4).fake(),
        estimated_time: Some(format!("{} hours", (2..40).fake::<u32>())),
        materials_needed: Some(
            materials
                .iter()
                .map(|m| format!("* {}", m))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        user_id: None,
    }
}

/// Inserts `config.users` users, each owning `config.courses_per_user` courses.
///
/// The password is hashed once and shared by every seeded account.
pub async fn seed_all(
    users: &dyn UserRepository,
    courses: &dyn CourseRepository,
    config: &SeedConfig,
) -> anyhow::Result<SeedSummary> {
    let start_time = Instant::now();
    println!(
        "👥 Seeding {} users with {} courses each...",
        config.users, config.courses_per_user
    );

    let password_hash = hash_password_async(config.password.clone())
        .await
        .context("Failed to hash password")?;
    let run_tag = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    let mut summary = SeedSummary::default();
    for index in 0..config.users {
        let user = users
            .create(generate_user(index, run_tag, &password_hash))
            .await
            .context("Failed to insert seeded user")?;
        summary.users += 1;

        for _ in 0..config.courses_per_user {
            courses
                .create(user.id, &generate_course())
                .await
                .context("Failed to insert seeded course")?;
            summary.courses += 1;
        }
    }

    println!(
        "✅ Seeded {} users and {} courses in {:.2?}",
        summary.users,
        summary.courses,
        start_time.elapsed()
    );

    Ok(summary)
}
