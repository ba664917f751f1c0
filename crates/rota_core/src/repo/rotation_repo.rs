//! Rotation persistence contracts and SQLite implementation.
//!
//! # Responsibility
//! - Store the live period state and the archived period records.
//! - Keep SQL and payload encoding inside the persistence boundary.
//!
//! # Invariants
//! - At most one live state row exists (`rotation_state.id = 1`).
//! - Archiving writes the new record and the reset state in one transaction.
//! - Read paths reject payloads that fail domain validation.

use crate::db::DbError;
use crate::model::record::BiweeklyRecord;
use crate::rotation::session::RotationState;
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Encode(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode rotation payload: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted rotation data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for one rotation.
pub trait RotationRepository {
    /// Loads the live state, or `None` before the first save.
    fn load_state(&self) -> RepoResult<Option<RotationState>>;
    /// Replaces the live state.
    fn save_state(&mut self, state: &RotationState) -> RepoResult<()>;
    /// Appends `record` and replaces the live state atomically.
    fn archive_period(&mut self, record: &BiweeklyRecord, state: &RotationState) -> RepoResult<()>;
    /// Lists archived records, newest first.
    fn list_records(&self) -> RepoResult<Vec<BiweeklyRecord>>;
}

/// SQLite-backed rotation repository.
pub struct SqliteRotationRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteRotationRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl RotationRepository for SqliteRotationRepository<'_> {
    fn load_state(&self) -> RepoResult<Option<RotationState>> {
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM rotation_state WHERE id = 1;",
                [],
                |row| row.get(0),
            )
            .optional()?;

        payload
            .map(|text| {
                serde_json::from_str::<RotationState>(&text).map_err(|err| {
                    RepoError::InvalidData(format!("rotation_state.payload: {err}"))
                })
            })
            .transpose()
    }

    fn save_state(&mut self, state: &RotationState) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        write_state(&tx, state)?;
        tx.commit()?;
        Ok(())
    }

    fn archive_period(&mut self, record: &BiweeklyRecord, state: &RotationState) -> RepoResult<()> {
        let record_payload = serde_json::to_string(record).map_err(RepoError::Encode)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO period_records (start_date, end_date, payload)
             VALUES (?1, ?2, ?3);",
            params![
                record.start_date.to_string(),
                record.end_date.to_string(),
                record_payload,
            ],
        )?;
        write_state(&tx, state)?;
        tx.commit()?;
        Ok(())
    }

    fn list_records(&self) -> RepoResult<Vec<BiweeklyRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT seq, payload FROM period_records ORDER BY seq DESC;")?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            let seq: i64 = row.get("seq")?;
            let payload: String = row.get("payload")?;
            let record = serde_json::from_str::<BiweeklyRecord>(&payload).map_err(|err| {
                RepoError::InvalidData(format!("period_records.payload (seq {seq}): {err}"))
            })?;
            records.push(record);
        }

        Ok(records)
    }
}

fn write_state(tx: &Transaction<'_>, state: &RotationState) -> RepoResult<()> {
    let payload = serde_json::to_string(state).map_err(RepoError::Encode)?;
    tx.execute(
        "INSERT INTO rotation_state (id, payload, updated_at)
         VALUES (1, ?1, (strftime('%s', 'now') * 1000))
         ON CONFLICT(id) DO UPDATE SET
            payload = excluded.payload,
            updated_at = excluded.updated_at;",
        [payload],
    )?;
    Ok(())
}
