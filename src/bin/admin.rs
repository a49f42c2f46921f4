//! CLI administration tool for recipe-share.
//!
//! Provides commands for managing users, API tokens and reference data
//! (tags, ingredients), viewing statistics, and performing database
//! operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a user, then a token for them
//! cargo run --bin admin -- user create --email cook@example.com --username cook
//! cargo run --bin admin -- token create --user cook@example.com
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Mobile App"
//!
//! # Reference data
//! cargo run --bin admin -- tag create --name Breakfast --slug breakfast
//! cargo run --bin admin -- ingredients load data/ingredients.json
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET`: required by `token create`; must match the server's

use recipe_share::application::services::{CatalogService, UserService, hash_token};
use recipe_share::config::Config;
use recipe_share::domain::entities::{NewIngredient, NewTag, NewUser};
use recipe_share::domain::repositories::{TagRepository, TokenRepository, UserRepository};
use recipe_share::infrastructure::persistence::{
    PgIngredientRepository, PgRecipeRepository, PgSubscriptionRepository, PgTagRepository,
    PgTokenRepository, PgUserRepository,
};
use recipe_share::state::{AppCatalogService, AppUserService};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for managing recipe-share.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage user accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Manage tags
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },

    /// Manage the ingredient catalogue
    Ingredients {
        #[command(subcommand)]
        action: IngredientAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a user account
    Create {
        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        username: Option<String>,

        #[arg(long, default_value = "")]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,
    },

    /// List user accounts
    List {
        /// Maximum number of users to show
        #[arg(short, long, default_value_t = 50)]
        limit: i64,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token
    Create {
        /// Owner's email address
        #[arg(short, long)]
        user: Option<String>,

        /// Token name (e.g., "Mobile App")
        #[arg(short, long)]
        name: Option<String>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
    },
}

#[derive(Subcommand)]
enum TagAction {
    /// Create a tag
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        slug: String,
    },

    /// List tags
    List,
}

#[derive(Subcommand)]
enum IngredientAction {
    /// Load ingredients from a JSON array of `{"name", "measurement_unit"}`
    Load {
        /// Path to the JSON file
        file: PathBuf,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Tag { action } => handle_tag_action(action, &pool).await?,
        Commands::Ingredients { action } => handle_ingredient_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn user_service(pool: &PgPool) -> AppUserService {
    let pool = Arc::new(pool.clone());
    UserService::new(
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgSubscriptionRepository::new(pool.clone())),
        Arc::new(PgRecipeRepository::new(pool)),
    )
}

fn catalog_service(pool: &PgPool) -> AppCatalogService {
    let pool = Arc::new(pool.clone());
    CatalogService::new(
        Arc::new(PgTagRepository::new(pool.clone())),
        Arc::new(PgIngredientRepository::new(pool)),
    )
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    match action {
        UserAction::Create {
            email,
            username,
            first_name,
            last_name,
        } => {
            println!("{}", "Create User".bright_blue().bold());
            println!();

            let email = match email {
                Some(e) => e,
                None => Input::new().with_prompt("Email").interact_text()?,
            };
            let username = match username {
                Some(u) => u,
                None => Input::new().with_prompt("Username").interact_text()?,
            };

            let user = user_service(pool)
                .create_user(NewUser {
                    email,
                    username,
                    first_name,
                    last_name,
                })
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create user: {}", e))?;

            println!(
                "{} {} (id {})",
                "User created:".green().bold(),
                user.username.cyan(),
                user.id.to_string().bright_black()
            );
        }
        UserAction::List { limit } => {
            let repo = PgUserRepository::new(Arc::new(pool.clone()));
            let users = repo
                .list(0, limit)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

            if users.is_empty() {
                println!("{}", "  No users found".yellow());
                return Ok(());
            }

            println!(
                "  {:<5} {:<24} {:<32} {:<20}",
                "ID".bright_white().bold(),
                "Username".bright_white().bold(),
                "Email".bright_white().bold(),
                "Joined".bright_white().bold()
            );
            println!("  {}", "-".repeat(84).bright_black());

            for user in &users {
                println!(
                    "  {:<5} {:<24} {:<32} {}",
                    user.id.to_string().bright_black(),
                    user.username.cyan(),
                    user.email,
                    user.created_at
                        .format("%Y-%m-%d %H:%M")
                        .to_string()
                        .bright_black()
                );
            }
            println!();
        }
    }

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create {
            user,
            name,
            token,
            yes,
        } => {
            create_token(repo, pool, user, name, token, yes).await?;
        }
        TokenAction::List => {
            list_tokens(repo).await?;
        }
        TokenAction::Revoke { name_or_id } => {
            revoke_token(repo, name_or_id).await?;
        }
    }

    Ok(())
}

/// Creates a new API token with interactive prompts.
///
/// # Security
///
/// - Only the HMAC-SHA256 hash (keyed by `TOKEN_SIGNING_SECRET`) is stored
/// - Raw token is displayed once and cannot be retrieved later
/// - Tokens are 48 characters (alphanumeric) for high entropy
async fn create_token(
    repo: Arc<PgTokenRepository>,
    pool: &PgPool,
    user: Option<String>,
    name: Option<String>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Create API Token".bright_blue().bold());
    println!();

    let secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

    let email = match user {
        Some(u) => u,
        None => Input::new().with_prompt("Owner email").interact_text()?,
    };

    let owner = PgUserRepository::new(Arc::new(pool.clone()))
        .find_by_email(&email)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("No user with email '{email}'"))?;

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Mobile App")
            .interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            println!("{}", "Using provided token value".yellow());
            t
        }
        None => generate_token(),
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Owner: {}", owner.username.cyan());
    println!("  Name:  {}", token_name.cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = hash_token(&secret, &token_value);

    repo.create_token(owner.id, &token_name, &token_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!("{}", "Token created successfully!".green().bold());
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/users/me",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
///
/// # Output Format
///
/// ```text
///   ID  User   Name              Created              Status
///   -------------------------------------------------------------
///   1   4      Mobile App        2025-01-15 10:30     ACTIVE
///   2   4      Old laptop        2025-01-16 14:20     REVOKED
/// ```
async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<6} {:<30} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<3} {:<6} {:<30} {:<20} {}",
            token.id.to_string().bright_black(),
            token.user_id.to_string().bright_black(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name or ID with confirmation prompt.
///
/// Numeric input is looked up as an ID, anything else as an exact name.
async fn revoke_token(repo: Arc<PgTokenRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        Err(_) => repo
            .find_by_name(&name_or_id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
    };

    let token = token.context("Token not found")?;

    if token.revoked_at.is_some() {
        println!("{}", "This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!("{}", "Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

async fn handle_tag_action(action: TagAction, pool: &PgPool) -> Result<()> {
    match action {
        TagAction::Create { name, slug } => {
            let tag = catalog_service(pool)
                .create_tag(NewTag { name, slug })
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create tag: {}", e))?;

            println!(
                "{} {} ({})",
                "Tag created:".green().bold(),
                tag.name.cyan(),
                tag.slug.bright_black()
            );
        }
        TagAction::List => {
            let tags = PgTagRepository::new(Arc::new(pool.clone()))
                .list()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list tags: {}", e))?;

            if tags.is_empty() {
                println!("{}", "  No tags found".yellow());
                return Ok(());
            }

            for tag in &tags {
                println!(
                    "  {:<4} {:<32} {}",
                    tag.id.to_string().bright_black(),
                    tag.name.cyan(),
                    tag.slug
                );
            }
        }
    }

    Ok(())
}

/// Loads an ingredient catalogue. Entries already present are skipped.
async fn handle_ingredient_action(action: IngredientAction, pool: &PgPool) -> Result<()> {
    match action {
        IngredientAction::Load { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let ingredients: Vec<NewIngredient> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON ingredient list", file.display()))?;

            let total = ingredients.len();
            let inserted = catalog_service(pool)
                .load_ingredients(ingredients)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to load ingredients: {}", e))?;

            println!(
                "{} {} of {} (others already present)",
                "Ingredients loaded:".green().bold(),
                inserted.to_string().bright_white().bold(),
                total
            );
        }
    }

    Ok(())
}

/// Displays row counts of the main tables.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    for (label, sql) in [
        ("Users:", "SELECT COUNT(*) FROM users"),
        ("Recipes:", "SELECT COUNT(*) FROM recipes"),
        ("Tags:", "SELECT COUNT(*) FROM tags"),
        ("Ingredients:", "SELECT COUNT(*) FROM ingredients"),
        ("Subscriptions:", "SELECT COUNT(*) FROM subscriptions"),
        ("Favorites:", "SELECT COUNT(*) FROM favorites"),
        ("Cart entries:", "SELECT COUNT(*) FROM shopping_cart"),
        (
            "Active tokens:",
            "SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL",
        ),
    ] {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(pool).await?;
        println!(
            "  {:<15} {}",
            label,
            count.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}

/// Generates a cryptographically random token.
///
/// # Format
///
/// - Length: 48 characters
/// - Character set: A-Z, a-z, 0-9
fn generate_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
