//! # Stockpile CLI Entry Point
//!
//! Command-line surface for the Stockpile inventory tracker. The two halves
//! of the workflow - browsing the list and editing one item - map onto
//! subcommands:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Stockpile CLI                              │
//! │                                                                     │
//! │  List view        ──► stockpile list                                │
//! │    sell button    ──► stockpile sell <id>                           │
//! │    buy button     ──► stockpile restock <id>                        │
//! │                                                                     │
//! │  Editor view      ──► stockpile show / add / edit / delete          │
//! │    order button   ──► stockpile order <id> --quantity N             │
//! │                                                                     │
//! │  Maintenance      ──► stockpile seed / clear                        │
//! │                                                                     │
//! │  Every command opens the database, then speaks only the item        │
//! │  gateway contract.                                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Determine database path (flag, env, or platform data directory)
//! 3. Connect to database & run migrations
//! 4. Dispatch to the requested command

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stockpile_db::{Database, DbConfig};

use commands::{admin, item, list, order};

/// Default database file name.
const DATABASE_FILE: &str = "inventory.db";

#[derive(Parser)]
#[command(
    name = "stockpile",
    version,
    about = "Track inventory items in a local SQLite store"
)]
struct Cli {
    /// Path to the database file (defaults to the platform data directory)
    #[arg(long, global = true, env = "STOCKPILE_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all items (id, name, price, quantity)
    List(list::ListArgs),
    /// Show every field of one item
    Show {
        /// Item id
        id: i64,
    },
    /// Add a new item
    Add(item::AddArgs),
    /// Edit fields of an existing item
    Edit(item::EditArgs),
    /// Delete one item
    Delete {
        /// Item id
        id: i64,
    },
    /// Decrease an item's quantity by one (never below zero)
    Sell {
        /// Item id
        id: i64,
    },
    /// Increase an item's quantity by one
    Restock {
        /// Item id
        id: i64,
    },
    /// Compose a reorder email to the item's supplier
    Order(order::OrderArgs),
    /// Insert a sample item
    Seed,
    /// Delete every item
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let db_path = match cli.db {
        Some(path) => path,
        None => default_database_path()?,
    };
    info!(path = %db_path.display(), "Opening database");

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;

    let result = match cli.command {
        Command::List(args) => list::run(&db, args).await,
        Command::Show { id } => item::show(&db, id).await,
        Command::Add(args) => item::add(&db, args).await,
        Command::Edit(args) => item::edit(&db, args).await,
        Command::Delete { id } => item::delete(&db, id).await,
        Command::Sell { id } => item::sell(&db, id).await,
        Command::Restock { id } => item::restock(&db, id).await,
        Command::Order(args) => order::run(&db, args).await,
        Command::Seed => admin::seed(&db).await,
        Command::Clear => admin::clear(&db).await,
    };

    db.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockpile_db=trace` - Trace the db layer only
/// - Default: warnings only, so command output stays clean
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Determines the database file path.
///
/// ## Resolution Order
/// 1. `--db` flag / `STOCKPILE_DB` env var (handled by clap)
/// 2. Platform data directory:
///    - macOS: `~/Library/Application Support/com.stockpile.stockpile/`
///    - Windows: `%APPDATA%\stockpile\stockpile\data\`
///    - Linux: `~/.local/share/stockpile/`
fn default_database_path() -> anyhow::Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "stockpile", "stockpile")
        .context("could not determine the data directory")?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;

    Ok(data_dir.join(DATABASE_FILE))
}
