//! SQLite schema creation
//!
//! Structured columns (asana steps, sequence steps) are stored as JSON text.
//! Timestamps are unix milliseconds.

use sqlx::SqlitePool;

use crate::error::PersistenceError;

const TABLES: &[(&str, &str)] = &[
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            created_at INTEGER NOT NULL
        )
        "#,
    ),
    (
        "asanas",
        r#"
        CREATE TABLE IF NOT EXISTS asanas (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            sanskrit_name TEXT NOT NULL,
            overview_image TEXT NOT NULL,
            step_data TEXT NOT NULL,
            difficulty TEXT NOT NULL,
            benefits TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )
        "#,
    ),
    (
        "sequences",
        r#"
        CREATE TABLE IF NOT EXISTS sequences (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            emotion TEXT NOT NULL,
            intensity_min INTEGER NOT NULL DEFAULT 1,
            intensity_max INTEGER NOT NULL DEFAULT 5,
            asana_sequence TEXT NOT NULL,
            total_duration INTEGER NOT NULL,
            created_at INTEGER NOT NULL
        )
        "#,
    ),
    (
        "sessions",
        r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            emotion TEXT NOT NULL,
            intensity INTEGER NOT NULL,
            sequence_id INTEGER NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            duration INTEGER,
            created_at INTEGER NOT NULL
        )
        "#,
    ),
];

/// Create all required tables
pub async fn create_tables(pool: &SqlitePool) -> Result<(), PersistenceError> {
    for (name, ddl) in TABLES {
        sqlx::query(ddl).execute(pool).await.map_err(|e| {
            PersistenceError::SchemaError(format!("Failed to create {} table: {}", name, e))
        })?;
    }

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_sequences_emotion ON sequences (emotion)")
        .execute(pool)
        .await
        .map_err(|e| PersistenceError::SchemaError(format!("Failed to create index: {}", e)))?;

    Ok(())
}
