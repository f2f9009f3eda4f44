// Lead persistence layer
//
// The board talks to leads through the LeadStore trait so the same state
// container runs against SQLite (CLI) or an in-memory store (tests).

pub mod memory;
pub mod sqlite;

pub use memory::*;
pub use sqlite::*;

use crate::models::{Lead, PipelineStage};
use thiserror::Error;

/// Failure from the lead store (transport, constraint, missing row).
/// Always surfaced to the user via a notification; never swallowed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("lead not found: {0}")]
    NotFound(i64),
    #[error("constraint violation: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Conflict(e.to_string())
            }
            _ => StoreError::Database(e.to_string()),
        }
    }
}

/// Request/response access to the lead table.
pub trait LeadStore {
    /// All leads, newest first (created_ts descending)
    fn list_leads(&self) -> Result<Vec<Lead>, StoreError>;

    /// Fetch one lead by id
    fn get_lead(&self, id: i64) -> Result<Option<Lead>, StoreError>;

    /// Insert a new lead; returns the stored row with its assigned id
    fn insert_lead(&self, lead: &Lead) -> Result<Lead, StoreError>;

    /// Full-field update of an existing lead (editor form path)
    fn update_lead(&self, lead: &Lead) -> Result<(), StoreError>;

    /// Update exactly the stage and last-contacted columns of one lead
    /// (the board's drop path)
    fn update_lead_stage(
        &self,
        id: i64,
        stage: PipelineStage,
        last_contacted_ts: i64,
    ) -> Result<(), StoreError>;
}
