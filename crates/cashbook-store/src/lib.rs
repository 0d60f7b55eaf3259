//! Storage adapters for the cashbook ledger

pub mod file;
pub mod memory;

use std::sync::Arc;

use cashbook_config::Config;
use cashbook_core::StoreRef;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// File store at the configured ledger path
pub fn from_config(config: &Config) -> StoreRef {
    let path = config.ledger_path();
    log::info!(target: "cashbook::store", "using ledger file {}", path.display());
    Arc::new(JsonFileStore::new(path))
}
