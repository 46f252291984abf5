//! CLI administration tool for snipurl.
//!
//! Lists and creates mappings, shows click statistics, and performs
//! database checks without going through the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # List all mappings
//! cargo run --bin admin -- list
//!
//! # Shorten a URL
//! cargo run --bin admin -- shorten https://example.com/a
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
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `BASE_URL` (optional): prefix for printed short URLs
//! - `CODE_LENGTH` (optional): length of generated codes

use snipurl::application::services::{MappingStore, SubmissionService};
use snipurl::domain::repositories::MappingRepository;
use snipurl::infrastructure::persistence::PgMappingRepository;
use snipurl::utils::code_generator::{DEFAULT_CODE_LENGTH, RandomCodeGenerator};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing snipurl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// List all mappings in insertion order
    List,

    /// Create a mapping for a URL
    Shorten {
        /// Target URL (prompted for if omitted)
        url: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
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

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    if !database_url.starts_with("postgres://") && !database_url.starts_with("postgresql://") {
        anyhow::bail!("admin requires a PostgreSQL DATABASE_URL");
    }

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::List => list_mappings(&pool).await?,
        Commands::Shorten { url, yes } => shorten(&pool, url, yes).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    pool.close().await;
    Ok(())
}

/// Builds the same store the server uses, on top of `pool`.
fn build_store(pool: &PgPool) -> Arc<MappingStore> {
    let code_length = std::env::var("CODE_LENGTH")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_CODE_LENGTH);

    let repository: Arc<dyn MappingRepository> =
        Arc::new(PgMappingRepository::new(Arc::new(pool.clone())));

    Arc::new(MappingStore::new(
        repository,
        Arc::new(RandomCodeGenerator::new(code_length)),
        snipurl::application::services::mapping_store::DEFAULT_MAX_ATTEMPTS,
    ))
}

fn base_url() -> String {
    std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Lists all mappings.
///
/// # Output Format
///
/// ```text
/// 📋 Mappings
///
///   Code       Clicks   Target
///   ──────────────────────────────────────────────
///   abc123     2        https://example.com/a
/// ```
async fn list_mappings(pool: &PgPool) -> Result<()> {
    println!("{}", "📋 Mappings".bright_blue().bold());
    println!();

    let mappings = build_store(pool)
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list mappings: {}", e))?;

    if mappings.is_empty() {
        println!("{}", "  No mappings found".yellow());
        println!();
        println!(
            "  Create one with: {} admin shorten <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<12} {:<8} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mapping in &mappings {
        println!(
            "  {:<12} {:<8} {}",
            mapping.code.cyan(),
            mapping.clicks.to_string().bright_green(),
            mapping.target
        );
    }

    println!();
    println!(
        "  Total: {}",
        mappings.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Creates a mapping, prompting for the URL and confirmation when needed.
async fn shorten(pool: &PgPool, url: Option<String>, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let target = match url {
        Some(u) => u,
        None => Input::new().with_prompt("Target URL").interact_text()?,
    };

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create a short link for {}?", target))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = SubmissionService::new(build_store(pool), base_url());
    let mapping = service
        .submit(&target)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create mapping: {}", e))?;

    println!();
    println!("{}", "✅ Mapping created".green().bold());
    println!("  Code:      {}", mapping.code.bright_yellow().bold());
    println!("  Target:    {}", mapping.target.cyan());
    println!(
        "  Short URL: {}",
        service.short_url(&mapping.code).bright_white()
    );
    println!();

    Ok(())
}

/// Displays mapping and click totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let mappings_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM mappings")
        .fetch_one(pool)
        .await?;

    let clicks_total: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM mappings")
            .fetch_one(pool)
            .await?;

    println!(
        "  Mappings: {}",
        mappings_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:   {}",
        clicks_total.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
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
