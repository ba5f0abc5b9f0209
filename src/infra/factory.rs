use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::infra::repositories::{
    postgres_service_repo::PostgresServiceRepo, postgres_booking_repo::PostgresBookingRepo,
    postgres_block_repo::PostgresBlockRepo, postgres_inventory_repo::PostgresInventoryRepo,
    sqlite_service_repo::SqliteServiceRepo, sqlite_booking_repo::SqliteBookingRepo,
    sqlite_block_repo::SqliteBlockRepo, sqlite_inventory_repo::SqliteInventoryRepo,
};

pub async fn bootstrap_state(config: &Config) -> Result<AppState, sqlx::Error> {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let pool = connect_postgres(database_url).await?;
        run_postgres_migrations(&pool).await?;

        Ok(AppState::new(
            config.clone(),
            Arc::new(PostgresServiceRepo::new(pool.clone())),
            Arc::new(PostgresBookingRepo::new(pool.clone())),
            Arc::new(PostgresBlockRepo::new(pool.clone())),
            Arc::new(PostgresInventoryRepo::new(pool)),
        ))
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let pool = connect_sqlite(database_url).await?;
        run_sqlite_migrations(&pool).await?;

        Ok(sqlite_state(config, pool))
    }
}

/// Wires every repository onto one SQLite pool. Tests build their state here
/// after preparing their own throwaway database.
pub fn sqlite_state(config: &Config, pool: SqlitePool) -> AppState {
    AppState::new(
        config.clone(),
        Arc::new(SqliteServiceRepo::new(pool.clone())),
        Arc::new(SqliteBookingRepo::new(pool.clone())),
        Arc::new(SqliteBlockRepo::new(pool.clone())),
        Arc::new(SqliteInventoryRepo::new(pool)),
    )
}

async fn connect_postgres(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let opts: PgConnectOptions = database_url.parse::<PgConnectOptions>()?
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    PgPoolOptions::new()
        .max_connections(10)
        .connect_with(opts)
        .await
}

pub async fn connect_sqlite(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
}

async fn run_postgres_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations/postgres").run(pool).await?;
    Ok(())
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations/sqlite").run(pool).await?;
    Ok(())
}
