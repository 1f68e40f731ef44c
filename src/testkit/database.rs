use sqlx::MySqlPool;
use tracing::info;

use crate::core::Result;

/// Ledger schema as the digest expects to find it. Kept as individual
/// statements because MySQL executes one statement per query.
const SCHEMA_STATEMENTS: &[&str] = &[
    "DROP TABLE IF EXISTS transactions",
    "DROP TABLE IF EXISTS expenses",
    "DROP TABLE IF EXISTS collectives",
    r#"
    CREATE TABLE collectives (
        id BIGINT PRIMARY KEY AUTO_INCREMENT,
        slug VARCHAR(255) NOT NULL UNIQUE,
        tags TEXT,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TABLE transactions (
        id BIGINT PRIMARY KEY AUTO_INCREMENT,
        collective_id BIGINT NOT NULL,
        amount BIGINT NOT NULL,
        currency VARCHAR(3) NOT NULL,
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        INDEX idx_transactions_created_at (created_at),
        INDEX idx_transactions_collective_id (collective_id)
    )
    "#,
    r#"
    CREATE TABLE expenses (
        id BIGINT PRIMARY KEY AUTO_INCREMENT,
        collective_id BIGINT NOT NULL,
        amount BIGINT NOT NULL,
        currency VARCHAR(3) NOT NULL,
        status VARCHAR(16) NOT NULL DEFAULT 'PENDING',
        created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
        INDEX idx_expenses_updated_at (updated_at),
        INDEX idx_expenses_collective_id (collective_id)
    )
    "#,
];

/// Destructively recreate the ledger schema. Any failure here leaves the
/// database half-built, so callers treat an error as fatal.
pub async fn reset_database(pool: &MySqlPool) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Test database schema recreated");
    Ok(())
}

/// Restore a named snapshot, overwriting whatever is in the database.
///
/// Snapshots are plain `.sql` files under the snapshot directory
/// (`SNAPSHOT_DIR`, default `snapshots/`), one statement per `;`-terminated
/// block.
pub async fn load_snapshot(pool: &MySqlPool, name: &str) -> Result<()> {
    reset_database(pool).await?;

    let dir = std::env::var("SNAPSHOT_DIR").unwrap_or_else(|_| "snapshots".to_string());
    let path = format!("{}/{}.sql", dir, name);
    let script = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| crate::core::AppError::internal(format!("Cannot read {}: {}", path, e)))?;

    for block in script.split(';') {
        // Comment lines are allowed anywhere in a snapshot file
        let statement = block
            .lines()
            .filter(|line| !line.trim_start().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let statement = statement.trim();
        if statement.is_empty() {
            continue;
        }
        sqlx::query(statement).execute(pool).await?;
    }

    info!(snapshot = name, "Snapshot restored");
    Ok(())
}
