//! CLI administration tool for url-mapper.
//!
//! Inspects and creates mappings directly against the configured store,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check storage connectivity
//! cargo run --bin admin -- db check
//!
//! # Create a mapping (prompts for missing values)
//! cargo run --bin admin -- mapping create --shortened-url https://short.ly/promo \
//!     --redirected-link https://example.com/landing
//!
//! # Show a mapping
//! cargo run --bin admin -- mapping show promo
//!
//! # Count mappings
//! cargo run --bin admin -- mapping count
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components: PostgreSQL connection
//!
//! Only the PostgreSQL backend is meaningful here; the in-memory store lives
//! inside the server process.

use url_mapper::AppError;
use url_mapper::application::services::{MappingConfirmation, ShorteningService};
use url_mapper::config::Config;
use url_mapper::domain::entities::UrlMapping;
use url_mapper::domain::repositories::MappingRepository;
use url_mapper::infrastructure::persistence::PgMappingRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing url-mapper.
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
    /// Manage URL mappings
    Mapping {
        #[command(subcommand)]
        action: MappingAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Mapping subcommands.
#[derive(Subcommand)]
enum MappingAction {
    /// Create a new mapping
    Create {
        /// Short URL or bare code (e.g., "https://short.ly/promo", "promo")
        #[arg(short, long)]
        shortened_url: Option<String>,

        /// Destination URL
        #[arg(short, long)]
        redirected_link: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a mapping by short code
    Show {
        /// Short code (not the full short URL)
        code: String,

        /// Only show the mapping if it is active
        #[arg(long)]
        active_only: bool,
    },

    /// Count stored mappings
    Count,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    let repo = Arc::new(PgMappingRepository::new(Arc::new(pool)));

    match cli.command {
        Commands::Mapping { action } => handle_mapping_action(action, repo).await?,
        Commands::Db { action } => handle_db_action(action, repo).await?,
    }

    Ok(())
}

/// Dispatches mapping commands.
async fn handle_mapping_action(action: MappingAction, repo: Arc<PgMappingRepository>) -> Result<()> {
    match action {
        MappingAction::Create {
            shortened_url,
            redirected_link,
            yes,
        } => create_mapping(repo, shortened_url, redirected_link, yes).await,
        MappingAction::Show { code, active_only } => show_mapping(repo, &code, active_only).await,
        MappingAction::Count => count_mappings(repo).await,
    }
}

/// Creates a mapping through the same service the HTTP API uses.
///
/// Missing values are prompted for interactively; the creation is confirmed
/// unless `--yes` is given.
async fn create_mapping(
    repo: Arc<PgMappingRepository>,
    shortened_url: Option<String>,
    redirected_link: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Create URL Mapping".bright_blue().bold());
    println!();

    let shortened_url = match shortened_url {
        Some(s) => s,
        None => Input::new()
            .with_prompt("Shortened URL or code")
            .interact_text()?,
    };

    let redirected_link = match redirected_link {
        Some(r) => r,
        None => Input::new()
            .with_prompt("Redirected link")
            .with_initial_text("https://")
            .interact_text()?,
    };

    println!();
    println!("  Shortened URL:   {}", shortened_url.cyan());
    println!("  Redirected link: {}", redirected_link.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this mapping?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = ShorteningService::new(repo);

    let result = service
        .create_short_mapping(&shortened_url, &redirected_link)
        .await;

    let confirmation = creation_outcome(result)?;
    println!("{}", format!("✅ {}", confirmation.message).green().bold());
    println!(
        "  Created at: {}",
        confirmation.created_at.to_rfc3339().bright_white()
    );

    Ok(())
}

/// Turns a rejected creation into a command failure so the process exits non-zero.
fn creation_outcome(
    result: Result<MappingConfirmation, AppError>,
) -> Result<MappingConfirmation> {
    result.map_err(|e| {
        println!("{} {}", "❌".red(), e.to_string().red());
        anyhow::Error::new(e).context("Failed to create mapping")
    })
}

/// Prints a single mapping, or a notice if none matches.
async fn show_mapping(repo: Arc<PgMappingRepository>, code: &str, active_only: bool) -> Result<()> {
    let mapping = if active_only {
        repo.find_active_by_short_code(code).await
    } else {
        repo.find_by_short_code(code).await
    }
    .map_err(|e| anyhow::anyhow!("Failed to load mapping: {}", e))?;

    match mapping {
        Some(mapping) => print_mapping(&mapping),
        None => println!("{}", format!("No mapping found for '{code}'").yellow()),
    }

    Ok(())
}

fn print_mapping(mapping: &UrlMapping) {
    let status = if mapping.is_active {
        "active".green()
    } else {
        "inactive".red()
    };

    println!("{}", "📋 Mapping".bright_blue().bold());
    println!("  ID:           {}", mapping.id);
    println!("  Short code:   {}", mapping.short_code.cyan());
    println!("  Original URL: {}", mapping.original_url.bright_white());
    println!("  Status:       {}", status);
    println!("  Clicks:       {}", mapping.click_count);
    println!("  Created at:   {}", mapping.created_at.to_rfc3339());
    println!("  Updated at:   {}", mapping.updated_at.to_rfc3339());
    match mapping.expires_at {
        Some(expires_at) => println!("  Expires at:   {}", expires_at.to_rfc3339()),
        None => println!("  Expires at:   {}", "never".dimmed()),
    }
}

async fn count_mappings(repo: Arc<PgMappingRepository>) -> Result<()> {
    let count = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;

    println!("{}", "📊 Statistics".bright_blue().bold());
    println!("  Mappings: {}", count.to_string().bright_yellow());

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, repo: Arc<PgMappingRepository>) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            match repo.ping().await {
                Ok(()) => println!("{}", "✅ Database connection OK".green().bold()),
                Err(e) => println!("{} {}", "❌ Database check failed:".red().bold(), e),
            }
        }
    }

    Ok(())
}
