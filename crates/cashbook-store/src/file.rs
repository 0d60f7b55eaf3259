//! JSON file store
//!
//! The whole ledger lives in one document:
//! `{ "days": [DailySnapshot...], "audit": [AuditEntry...] }`, with audit
//! entries newest first. Writes go to a sibling temp file which is then
//! renamed over the original.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cashbook_core::{AccountSnapshot, AuditEntry, DailySnapshot, SnapshotStore, StoreError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    #[serde(default)]
    days: Vec<DailySnapshot>,
    #[serde(default)]
    audit: Vec<AuditEntry>,
}

/// Snapshot store backed by a single JSON file
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<LedgerFile, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!(
                    target: "cashbook::store",
                    "{} does not exist yet, starting empty",
                    self.path.display()
                );
                return Ok(LedgerFile::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(LedgerFile::default());
        }
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            message: format!("{}: {}", self.path.display(), e),
        })
    }

    async fn write(&self, file: &LedgerFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_string_pretty(file)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<DailySnapshot>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.days)
    }

    async fn save(&self, date: NaiveDate, accounts: Vec<AccountSnapshot>) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;

        let day = DailySnapshot::new(date, accounts);
        match file.days.iter_mut().find(|d| d.date == date) {
            Some(existing) => *existing = day,
            None => file.days.push(day),
        }
        file.days.sort_by_key(|d| d.date);

        self.write(&file).await?;
        log::info!(
            target: "cashbook::store",
            "saved {} to {}",
            cashbook_core::format_date(date),
            self.path.display()
        );
        Ok(())
    }

    async fn append_audit(&self, entry: AuditEntry) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;
        file.audit.insert(0, entry);
        self.write(&file).await
    }

    async fn audit_log(&self) -> Result<Vec<AuditEntry>, StoreError> {
        let _guard = self.lock.lock().await;
        let mut audit = self.read().await?.audit;
        audit.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(audit)
    }

    async fn clear_audit(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut file = self.read().await?;
        file.audit.clear();
        self.write(&file).await
    }
}
