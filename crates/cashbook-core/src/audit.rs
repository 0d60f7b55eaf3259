//! Audit trail entries appended after each successful mutation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::AuditAction;

/// User recorded when a request carries no identity
pub const ANONYMOUS_USER: &str = "anonymous";

/// One recorded change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub action: AuditAction,
    /// What was changed, e.g. `conta:Caixa`
    pub entity: String,
    pub description: String,
}

impl AuditEntry {
    pub fn new(
        user: &str,
        action: AuditAction,
        entity: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let user = user.trim();
        Self {
            id: cashbook_utils::generate_id(),
            timestamp: Utc::now(),
            user: if user.is_empty() { ANONYMOUS_USER.to_string() } else { user.to_string() },
            action,
            entity: entity.into(),
            description: description.into(),
        }
    }

    /// Entity key for an account
    pub fn account_entity(name: &str) -> String {
        format!("conta:{}", name)
    }
}
