//! Field-level edits of an account and the closing balance rule.
//!
//! Every edit recomputes `closing = opening + inflow - outflow - fees`
//! except an edit of the closing balance itself, which is kept as a manual
//! override until the next edit of any other amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::models::{check_amount, AccountSnapshot};
use crate::reconcile;
use crate::types::{FlowKind, SensitiveField};

/// A single change made through the editing surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum AccountEdit {
    Rename { name: String },
    OpeningBalance { value: Decimal },
    /// Direct edit of an inflow/outflow total; only allowed while the list
    /// of that kind has no itemized transactions
    FlowTotal { kind: FlowKind, value: Decimal },
    Fees { value: Decimal },
    ClosingBalance { value: Decimal },
    Note { text: Option<String> },
    AddTransaction { kind: FlowKind, description: String, value: Decimal },
    RemoveTransaction { kind: FlowKind, id: String },
    ReplaceTransaction { kind: FlowKind, id: String, description: String, value: Decimal },
    ToggleSensitive { field: SensitiveField },
}

impl AccountEdit {
    /// Whether applying this edit reruns the closing balance formula
    pub fn recomputes_closing(&self) -> bool {
        !matches!(
            self,
            AccountEdit::ClosingBalance { .. }
                | AccountEdit::Rename { .. }
                | AccountEdit::Note { .. }
                | AccountEdit::ToggleSensitive { .. }
        )
    }

    /// The amount this edit writes, if any
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            AccountEdit::OpeningBalance { value }
            | AccountEdit::FlowTotal { value, .. }
            | AccountEdit::Fees { value }
            | AccountEdit::ClosingBalance { value }
            | AccountEdit::AddTransaction { value, .. }
            | AccountEdit::ReplaceTransaction { value, .. } => Some(*value),
            _ => None,
        }
    }
}

impl AccountSnapshot {
    /// Apply one edit
    pub fn apply(&mut self, edit: AccountEdit) -> CoreResult<()> {
        if let Some(value) = edit.amount() {
            check_amount("value", value)?;
        }
        let recompute = edit.recomputes_closing();

        match edit {
            AccountEdit::Rename { name } => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(CoreError::ValidationError {
                        message: "account name must not be empty".to_string(),
                    });
                }
                self.name = name;
            }
            AccountEdit::OpeningBalance { value } => self.opening_balance = value,
            AccountEdit::FlowTotal { kind, value } => {
                if self.is_itemized(kind) {
                    return Err(CoreError::ReadOnlyField {
                        field: self.flow_field_name(kind),
                    });
                }
                self.set_base(kind, value);
                reconcile::sync_total(self, kind);
            }
            AccountEdit::Fees { value } => self.fees = value,
            AccountEdit::ClosingBalance { value } => self.closing_balance = value,
            AccountEdit::Note { text } => {
                self.note = text.filter(|t| !t.trim().is_empty());
            }
            AccountEdit::AddTransaction { kind, description, value } => {
                reconcile::add_transaction(self, kind, description, value);
            }
            AccountEdit::RemoveTransaction { kind, id } => {
                // unknown ids are ignored and must not clobber an override
                if reconcile::remove_transaction(self, kind, &id).is_none() {
                    return Ok(());
                }
            }
            AccountEdit::ReplaceTransaction { kind, id, description, value } => {
                if reconcile::replace_transaction(self, kind, &id, description, value).is_none() {
                    return Err(CoreError::TransactionNotFound { id });
                }
            }
            AccountEdit::ToggleSensitive { field } => {
                if !self.sensitive_flags.remove(&field) {
                    self.sensitive_flags.insert(field);
                }
            }
        }

        if recompute {
            self.recompute_closing();
        }
        Ok(())
    }

    /// Apply edits in order, stopping at the first rejected one
    pub fn apply_all<I>(&mut self, edits: I) -> CoreResult<()>
    where
        I: IntoIterator<Item = AccountEdit>,
    {
        for edit in edits {
            self.apply(edit)?;
        }
        Ok(())
    }

    fn flow_field_name(&self, kind: FlowKind) -> String {
        match kind {
            FlowKind::Inflow => SensitiveField::InflowTotal.key().to_string(),
            FlowKind::Outflow => SensitiveField::OutflowTotal.key().to_string(),
        }
    }
}
