//! In-memory store, for tests and throwaway sessions

use async_trait::async_trait;
use cashbook_core::{AccountSnapshot, AuditEntry, DailySnapshot, SnapshotStore, StoreError};
use chrono::NaiveDate;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    days: RwLock<Vec<DailySnapshot>>,
    audit: RwLock<Vec<AuditEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with `days`
    pub fn with_days(days: Vec<DailySnapshot>) -> Self {
        Self {
            days: RwLock::new(days),
            audit: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn load_all(&self) -> Result<Vec<DailySnapshot>, StoreError> {
        Ok(self.days.read().await.clone())
    }

    async fn save(&self, date: NaiveDate, accounts: Vec<AccountSnapshot>) -> Result<(), StoreError> {
        let mut days = self.days.write().await;
        let day = DailySnapshot::new(date, accounts);
        match days.iter_mut().find(|d| d.date == date) {
            Some(existing) => *existing = day,
            None => days.push(day),
        }
        Ok(())
    }

    async fn append_audit(&self, entry: AuditEntry) -> Result<(), StoreError> {
        self.audit.write().await.insert(0, entry);
        Ok(())
    }

    async fn audit_log(&self) -> Result<Vec<AuditEntry>, StoreError> {
        Ok(self.audit.read().await.clone())
    }

    async fn clear_audit(&self) -> Result<(), StoreError> {
        self.audit.write().await.clear();
        Ok(())
    }
}
