//! Database module: connection pool, migrations, and queries via SeaORM.

pub mod associations;
pub mod documents;
pub mod failure_effects;
pub mod history;
pub mod items;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};
use crate::migration::Migrator;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

/// Trim a required text value, rejecting blanks.
pub(crate) fn required_text(field: &str, value: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} must not be blank", field)));
    }
    Ok(value.to_string())
}

impl DbPool {
    /// Connect using the configured URL (PostgreSQL, or SQLite for tests).
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let mut opts = ConnectOptions::new(&config.url);
        opts.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(false);

        // Each in-memory SQLite connection is its own database.
        if config.url.starts_with("sqlite") && config.url.contains(":memory:") {
            opts.max_connections(1).min_connections(1);
        }

        let conn = Database::connect(opts)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        if conn.get_database_backend() == DatabaseBackend::Sqlite {
            conn.execute_unprepared("PRAGMA foreign_keys = ON")
                .await
                .map_err(|e| {
                    AppError::Database(format!("Failed to enable foreign keys: {}", e))
                })?;
        }

        Ok(DbPool { conn })
    }

    /// Get the underlying connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Apply all pending migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(self.connection(), None)
            .await
            .map_err(|e| AppError::Database(format!("Failed to run migrations: {}", e)))?;
        info!("Database migrations complete");
        Ok(())
    }

    /// Check connectivity for the readiness endpoint.
    pub async fn ping(&self) -> AppResult<()> {
        self.conn
            .ping()
            .await
            .map_err(|e| AppError::Database(format!("Database ping failed: {}", e)))
    }
}
