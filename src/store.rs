//! SQLite persistence with insert-if-absent semantics
//!
//! Uniqueness of `council_reference` is kept by checking for an existing row
//! right before each insert. The schema carries no UNIQUE constraint.

use crate::error::ScrapeError;
use crate::models::ApplicationRecord;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info};

/// Outcome of saving one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Skipped,
}

pub struct Store {
    conn: Connection,
    table: String,
}

impl Store {
    /// Open (or create) the database file and ensure the table exists
    pub fn open(path: impl AsRef<Path>, table: &str) -> Result<Self, ScrapeError> {
        let path = path.as_ref();
        debug!("Opening database {}", path.display());
        Self::with_connection(Connection::open(path)?, table)
    }

    #[cfg(test)]
    pub fn open_in_memory(table: &str) -> Result<Self, ScrapeError> {
        Self::with_connection(Connection::open_in_memory()?, table)
    }

    fn with_connection(conn: Connection, table: &str) -> Result<Self, ScrapeError> {
        if !is_valid_table_name(table) {
            return Err(ScrapeError::InvalidTableName(table.to_string()));
        }

        let store = Self {
            conn,
            table: table.to_string(),
        };
        store.ensure_table()?;
        Ok(store)
    }

    /// Idempotent schema creation
    pub fn ensure_table(&self) -> Result<(), ScrapeError> {
        self.conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY,
                description TEXT,
                date_scraped TEXT,
                date_received TEXT,
                on_notice_to TEXT,
                address TEXT,
                council_reference TEXT,
                applicant TEXT,
                owner TEXT,
                stage_description TEXT,
                stage_status TEXT,
                document_description TEXT,
                title_reference TEXT
            );",
            self.table
        ))?;
        Ok(())
    }

    /// Whether any row already carries this reference
    pub fn exists(&self, council_reference: &str) -> Result<bool, ScrapeError> {
        let count: i64 = self.conn.query_row(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE council_reference = ?1",
                self.table
            ),
            params![council_reference],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn insert(&self, record: &ApplicationRecord) -> Result<(), ScrapeError> {
        self.conn.execute(
            &format!(
                "INSERT INTO {} (
                    council_reference, address, description, date_received,
                    on_notice_to, document_description, date_scraped,
                    applicant, owner, stage_description, stage_status, title_reference
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                self.table
            ),
            params![
                record.council_reference,
                record.address,
                record.description,
                record.date_received,
                record.on_notice_to,
                record.document_description,
                record.date_scraped,
                record.applicant,
                record.owner,
                record.stage_description,
                record.stage_status,
                record.title_reference,
            ],
        )?;
        Ok(())
    }

    /// Insert the record unless its reference is already stored
    pub fn save(&self, record: &ApplicationRecord) -> Result<SaveOutcome, ScrapeError> {
        if self.exists(&record.council_reference)? {
            info!(
                "Duplicate entry for document {} found. Skipping insertion.",
                record.council_reference
            );
            return Ok(SaveOutcome::Skipped);
        }

        self.insert(record)?;
        info!("Data for {} saved to database.", record.council_reference);
        Ok(SaveOutcome::Inserted)
    }

    pub fn count(&self) -> Result<i64, ScrapeError> {
        let count = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", self.table),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Load the stored record for a reference
    #[cfg(test)]
    pub fn find(&self, council_reference: &str) -> Result<Option<ApplicationRecord>, ScrapeError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT council_reference, address, description, date_received, on_notice_to,
                    document_description, date_scraped, applicant, owner,
                    stage_description, stage_status, title_reference
             FROM {} WHERE council_reference = ?1 ORDER BY id LIMIT 1",
            self.table
        ))?;

        let mut rows = stmt.query_map(params![council_reference], |row| {
            Ok(ApplicationRecord {
                council_reference: row.get(0)?,
                address: row.get(1)?,
                description: row.get(2)?,
                date_received: row.get(3)?,
                on_notice_to: row.get(4)?,
                document_description: row.get(5)?,
                date_scraped: row.get(6)?,
                applicant: row.get(7)?,
                owner: row.get(8)?,
                stage_description: row.get(9)?,
                stage_status: row.get(10)?,
                title_reference: row.get(11)?,
            })
        })?;

        let record = rows.next().transpose()?;
        Ok(record)
    }
}

/// Table names are interpolated into SQL, so only plain identifiers pass
pub fn is_valid_table_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
