//! Database migration command.
//!
//! Connects to `WEBTOON_DATABASE_URL` (falling back to `DATABASE_URL`, then
//! `sqlite://site.db`), creating the `SQLite` file if it does not exist, and
//! applies the migrations embedded in the server crate.

use webtoon_server::config::ServerConfig;
use webtoon_server::db;

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the database cannot be
/// opened, or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db::migrate(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
