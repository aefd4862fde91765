//! SQLite schema definitions

use crate::error::AuthResult;
use rusqlite::Connection;

pub const SCHEMA_VERSION: u32 = 1;

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> AuthResult<()> {
    conn.execute_batch(
        r#"
        -- Schema version tracking
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );

        -- Image records
        CREATE TABLE IF NOT EXISTS images (
            id TEXT PRIMARY KEY,                   -- hyphenated UUID
            owner_id TEXT NOT NULL,                -- subject claim, case-sensitive
            file_name TEXT NOT NULL,
            title TEXT NOT NULL,
            created_at INTEGER NOT NULL            -- Unix timestamp
        );

        CREATE INDEX IF NOT EXISTS idx_images_owner
            ON images(owner_id);
    "#,
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO schema_version (version) VALUES (?)",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Check schema version
#[allow(dead_code)]
pub fn check_version(conn: &Connection) -> AuthResult<u32> {
    let version: u32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);
    Ok(version)
}
