use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use coursebook_cli::seeder::{self, DEFAULT_PASSWORD, SeedConfig};
use coursebook_config::DatabaseConfig;
use coursebook_core::{RuleSet, hash_password_async, validation::evaluate};
use coursebook_db::{PgStore, UserRepository, init_db_pool, run_migrations};
use coursebook_models::{CreateUserDto, NewUser};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "coursebook-cli")]
#[command(about = "Coursebook CLI - Administrative tools for Coursebook", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account
    CreateUser {
        /// First name
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake users and courses
    Seed {
        /// Number of users to create
        #[arg(short = 'u', long, default_value = "5")]
        users: usize,

        /// Number of courses owned by each user
        #[arg(short = 'c', long, default_value = "3")]
        courses_per_user: usize,

        /// Password shared by every seeded user
        #[arg(long, default_value = DEFAULT_PASSWORD)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    let config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    let store = PgStore::new(pool);

    match cli.command {
        Commands::CreateUser {
            first_name,
            last_name,
            email,
            password,
        } => handle_create_user(&store, first_name, last_name, email, password).await,
        Commands::Seed {
            users,
            courses_per_user,
            password,
        } => {
            let config = SeedConfig::new(users)
                .with_courses_per_user(courses_per_user)
                .with_password(password);
            seeder::seed_all(&store, &store, &config).await?;
            Ok(())
        }
    }
}

fn prompt_text(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase())),
    }
}

async fn handle_create_user(
    store: &PgStore,
    first_name: Option<String>,
    last_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let first_name = prompt_text(first_name, "First name")?;
    let last_name = prompt_text(last_name, "Last name")?;
    let email = prompt_text(email, "Email address")?;
    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    // Same rules as POST /api/users.
    let issues = evaluate(
        &serde_json::json!({
            "firstName": first_name,
            "lastName": last_name,
            "emailAddress": email,
            "password": password,
        }),
        CreateUserDto::RULES,
    );
    if !issues.is_empty() {
        for issue in &issues {
            eprintln!("   {}", issue.message);
        }
        bail!("❌ Invalid user details");
    }

    let password_hash = hash_password_async(password)
        .await
        .context("Failed to hash password")?;
    let user = store
        .create(NewUser {
            first_name,
            last_name,
            email_address: email,
            password_hash,
        })
        .await
        .context("❌ Error creating user")?;

    println!("\n✅ User created successfully!");
    println!("   Email: {}", user.email_address);
    println!("   Name: {}", user.full_name());

    Ok(())
}
