//! Database schema definitions and migrations.

use rusqlite::Connection;

use crate::DbError;

pub fn run_migrations(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tags (
    code TEXT PRIMARY KEY,
    pet_id TEXT,
    printed INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMP NOT NULL,
    printed_at TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_tags_unprinted
    ON tags (created_at) WHERE printed = 0 AND pet_id IS NULL;

CREATE TABLE IF NOT EXISTS print_jobs (
    id TEXT PRIMARY KEY,
    tag_count INTEGER NOT NULL,
    created_at TIMESTAMP NOT NULL
);
"#;
