use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

struct Migration {
    version: i64,
    sql: &'static str,
}

/// Schema steps in application order. Append only.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: r"
        CREATE TABLE IF NOT EXISTS kv_entries (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
    ",
}];

async fn current_version(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_migrations")
        .fetch_one(pool)
        .await?;
    Ok(version.unwrap_or(0))
}

/// Apply every migration newer than the recorded schema version.
pub async fn apply_pending(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    let applied = current_version(pool).await?;
    for step in MIGRATIONS.iter().filter(|m| m.version > applied) {
        let mut tx = pool.begin().await?;
        sqlx::query(step.sql).execute(&mut *tx).await?;
        sqlx::query("INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)")
            .bind(step.version)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        log::debug!("applied schema migration v{}", step.version);
    }
    Ok(())
}
