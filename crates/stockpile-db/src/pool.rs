//! # Database Pool Management
//!
//! Owns the lifecycle of the single SQLite database file: open-or-create,
//! schema migration, and handing out gateways.
//!
//! ## Access Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Storage Engine Adapter                          │
//! │                                                                     │
//! │  DbConfig::new(path)            ──► read-write handle               │
//! │    • creates the file if absent                                     │
//! │    • runs pending migrations                                        │
//! │                                                                     │
//! │  DbConfig::new(path).read_only(true) ──► read-only handle           │
//! │    • same file, no create, no migrate                               │
//! │                                                                     │
//! │  Both modes go through one pool; WAL mode lets readers proceed      │
//! │  while a writer holds the file. Writes serialize at the SQLite      │
//! │  connection - the gateway adds no locking of its own.               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Better concurrent read performance
//! - Readers don't block writers, writers don't block readers
//! - Better crash recovery

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::events::{self, ChangeEvent};
use crate::gateway::ItemGateway;
use crate::migrations;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/inventory.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (sufficient for a local single-user app)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true (forced off for read-only handles)
    pub run_migrations: bool,

    /// Open a read-only handle: no file creation, no migrations.
    /// Default: false
    pub read_only: bool,
}

impl DbConfig {
    /// Creates a new read-write configuration with the given path.
    ///
    /// The file will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
            read_only: false,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection acquire timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Opens a read-only handle to an existing file.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::new(DbConfig::in_memory()).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
            read_only: false,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Main database handle: owns the pool and the change-event channel, hands
/// out item gateways.
///
/// ## Ownership Rules
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  Database     owns the on-disk file handle (pool)                   │
/// │  ItemGateway  is the sole mutator of rows                           │
/// │  Callers      never touch storage directly - gateway only           │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,

    /// Change-event channel shared by every gateway from this handle.
    changes: broadcast::Sender<ChangeEvent>,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist (read-write mode)
    /// 2. Configures SQLite: WAL mode, NORMAL synchronous, foreign keys
    /// 3. Creates the connection pool
    /// 4. Runs migrations (read-write mode, unless disabled)
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            read_only = config.read_only,
            "Initializing database connection"
        );

        // sqlite://path?mode=rwc creates the file if not exists;
        // mode=ro opens an existing file without write access.
        let mode = if config.read_only { "ro" } else { "rwc" };
        let connect_url = format!("sqlite://{}?mode={}", config.database_path.display(), mode);

        let mut connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            // NORMAL synchronous: safe from corruption, may lose last
            // transaction on crash
            .synchronous(SqliteSynchronous::Normal)
            // SQLite has foreign keys disabled by default
            .foreign_keys(true)
            .create_if_missing(!config.read_only);
        if !config.read_only {
            // WAL mode: readers don't block writers, writers don't block
            // readers. It is a persistent property of the file, so only
            // write handles set it.
            connect_options = connect_options.journal_mode(SqliteJournalMode::Wal);
        }

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database {
            pool,
            changes: events::channel(),
        };

        if config.run_migrations && !config.read_only {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations.
    ///
    /// Called by `new()` unless disabled; safe to run multiple times.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    ///
    /// For diagnostics only. All row access goes through the gateway.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the item gateway.
    ///
    /// Every gateway handed out by one `Database` shares its change-event
    /// channel, so observers see mutations regardless of which gateway
    /// instance performed them.
    pub fn items(&self) -> ItemGateway {
        ItemGateway::new(self.pool.clone(), self.changes.clone())
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, all gateway operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use stockpile_core::{Addressing, ItemValues};

    use crate::gateway::QueryOptions;

    #[tokio::test]
    async fn in_memory_database_is_healthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert_eq!(total, applied);
    }

    #[tokio::test]
    async fn config_builder() {
        let config = DbConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2)
            .read_only(true);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(config.read_only);
    }

    #[tokio::test]
    async fn open_or_create_then_reopen_preserves_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.db");
        assert!(!path.exists());

        {
            let db = Database::new(DbConfig::new(&path)).await.unwrap();
            db.items()
                .insert(
                    &Addressing::Collection,
                    ItemValues::new()
                        .name("Pen")
                        .price("20")
                        .quantity(3)
                        .image("res://drawable/pen")
                        .supplier("acme")
                        .supplier_email("orders@acme.test"),
                )
                .await
                .unwrap();
            db.close().await;
        }
        assert!(path.exists());

        let reopened = Database::new(DbConfig::new(&path)).await.unwrap();
        let rows = reopened
            .items()
            .query(&Addressing::Collection, QueryOptions::new())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name.as_deref(), Some("Pen"));
    }

    #[tokio::test]
    async fn read_only_handle_sees_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.db");

        let writer = Database::new(DbConfig::new(&path)).await.unwrap();
        writer
            .items()
            .insert(
                &Addressing::Collection,
                ItemValues::new()
                    .name("Pen")
                    .price("20")
                    .quantity(3)
                    .image("res://drawable/pen")
                    .supplier("acme")
                    .supplier_email("orders@acme.test"),
            )
            .await
            .unwrap();
        writer.close().await;

        let reader = Database::new(DbConfig::new(&path).read_only(true))
            .await
            .unwrap();
        let rows = reader
            .items()
            .query(&Addressing::Collection, QueryOptions::new())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }
}
