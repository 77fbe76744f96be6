//! Tag minting, lookups, and print bookkeeping.

use chrono::Utc;
use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

use crate::{Database, DbError};

/// Alphabet for short codes: lowercase alphanumeric.
const CODE_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Length of a short code.
pub const CODE_LEN: usize = 8;

/// Collision retries per minted code before giving up.
const MINT_RETRIES: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub code: String,
    pub pet_id: Option<String>,
    pub printed: bool,
    pub created_at: String,
    pub printed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintJob {
    pub id: String,
    pub tag_count: i64,
    pub created_at: String,
}

fn row_to_tag(row: &rusqlite::Row<'_>) -> Result<Tag, rusqlite::Error> {
    Ok(Tag {
        code: row.get(0)?,
        pet_id: row.get(1)?,
        printed: row.get::<_, i64>(2)? != 0,
        created_at: row.get(3)?,
        printed_at: row.get(4)?,
    })
}

impl Database {
    /// Mint `count` fresh short codes in one transaction.
    ///
    /// Collisions with existing codes are retried; exhausting the retry
    /// budget surfaces as `InvalidData` rather than looping forever.
    pub fn mint_tags(&self, count: usize) -> Result<Vec<String>, DbError> {
        let now = Utc::now().to_rfc3339();
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let mut codes = Vec::with_capacity(count);
            {
                let mut stmt = tx.prepare(
                    "INSERT OR IGNORE INTO tags (code, created_at) VALUES (?1, ?2)",
                )?;
                for _ in 0..count {
                    let mut inserted = false;
                    for _ in 0..MINT_RETRIES {
                        let code = nanoid::nanoid!(CODE_LEN, &CODE_ALPHABET);
                        if stmt.execute((&code, &now))? == 1 {
                            codes.push(code);
                            inserted = true;
                            break;
                        }
                    }
                    if !inserted {
                        return Err(DbError::InvalidData(
                            "short code space exhausted".to_string(),
                        ));
                    }
                }
            }
            tx.commit()?;
            tracing::info!(count = codes.len(), "minted tag codes");
            Ok(codes)
        })
    }

    /// Codes not yet printed and not yet assigned to a pet, oldest first.
    ///
    /// `limit` is the caller-side cap; the layout engine itself has none.
    pub fn unprinted_tags(&self, limit: usize) -> Result<Vec<Tag>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT code, pet_id, printed, created_at, printed_at FROM tags
                 WHERE printed = 0 AND pet_id IS NULL
                 ORDER BY created_at, code LIMIT ?1",
            )?;
            let rows = stmt.query_map([limit as i64], row_to_tag)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
    }

    /// Flip the printed flag for `codes` and record the print job.
    ///
    /// One transaction: either the whole sheet is recorded or none of it.
    pub fn mark_printed(&self, codes: &[String], job_id: &str) -> Result<(), DbError> {
        let now = Utc::now().to_rfc3339();
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt =
                    tx.prepare("UPDATE tags SET printed = 1, printed_at = ?1 WHERE code = ?2")?;
                for code in codes {
                    if stmt.execute((&now, code))? == 0 {
                        return Err(DbError::NotFound(code.clone()));
                    }
                }
                tx.execute(
                    "INSERT INTO print_jobs (id, tag_count, created_at) VALUES (?1, ?2, ?3)",
                    (job_id, codes.len() as i64, &now),
                )?;
            }
            tx.commit()?;
            tracing::info!(job_id, tags = codes.len(), "recorded print job");
            Ok(())
        })
    }

    /// Claim a tag for a pet. Fails if the code is unknown or already taken.
    pub fn assign_tag(&self, code: &str, pet_id: &str) -> Result<(), DbError> {
        self.with_conn(|conn| {
            let updated = conn.execute(
                "UPDATE tags SET pet_id = ?1 WHERE code = ?2 AND pet_id IS NULL",
                (pet_id, code),
            )?;
            if updated == 1 {
                return Ok(());
            }
            match self.tag_exists_raw(conn, code)? {
                true => Err(DbError::InvalidData(format!("tag {code} already assigned"))),
                false => Err(DbError::NotFound(code.to_string())),
            }
        })
    }

    pub fn tag(&self, code: &str) -> Result<Option<Tag>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT code, pet_id, printed, created_at, printed_at FROM tags WHERE code = ?1",
            )?;
            stmt.query_row([code], row_to_tag).optional().map_err(Into::into)
        })
    }

    /// Paged listing, newest first.
    pub fn list_tags(&self, limit: usize, offset: usize) -> Result<Vec<Tag>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT code, pet_id, printed, created_at, printed_at FROM tags
                 ORDER BY created_at DESC, code LIMIT ?1 OFFSET ?2",
            )?;
            let rows = stmt.query_map([limit as i64, offset as i64], row_to_tag)?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
    }

    pub fn tag_count(&self) -> Result<i64, DbError> {
        self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM tags", [], |row| row.get(0))
                .map_err(Into::into)
        })
    }

    pub fn print_jobs(&self) -> Result<Vec<PrintJob>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, tag_count, created_at FROM print_jobs ORDER BY created_at DESC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(PrintJob {
                    id: row.get(0)?,
                    tag_count: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
    }

    fn tag_exists_raw(
        &self,
        conn: &rusqlite::Connection,
        code: &str,
    ) -> Result<bool, DbError> {
        let exists = conn
            .query_row("SELECT 1 FROM tags WHERE code = ?1", [code], |_| Ok(()))
            .optional()?
            .is_some();
        Ok(exists)
    }
}
