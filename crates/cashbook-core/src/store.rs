//! Storage seam of the ledger
//!
//! The core never touches files or databases directly; adapters live in
//! `cashbook-store`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::audit::AuditEntry;
use crate::models::{AccountSnapshot, DailySnapshot};

/// Failure reported by a storage adapter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("I/O failure: {message}")]
    Io { message: String },

    #[error("Stored data is malformed: {message}")]
    Corrupt { message: String },

    #[error("Store unavailable: {message}")]
    Unavailable { message: String },
}

impl From<std::io::Error> for StoreError {
    fn from(error: std::io::Error) -> Self {
        StoreError::Io { message: error.to_string() }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::Corrupt { message: error.to_string() }
    }
}

/// Store reference type
pub type StoreRef = Arc<dyn SnapshotStore>;

/// Persistent collection of daily snapshots and the audit trail
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Every stored day, in no particular order
    async fn load_all(&self) -> Result<Vec<DailySnapshot>, StoreError>;

    /// Replace the account list of `date`, creating the day if needed
    async fn save(&self, date: NaiveDate, accounts: Vec<AccountSnapshot>) -> Result<(), StoreError>;

    async fn append_audit(&self, entry: AuditEntry) -> Result<(), StoreError>;

    /// Audit entries, newest first
    async fn audit_log(&self) -> Result<Vec<AuditEntry>, StoreError>;

    async fn clear_audit(&self) -> Result<(), StoreError>;
}
