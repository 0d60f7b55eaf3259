//! Itemized transaction lists and the aggregate fields they feed.
//!
//! Invariant kept by every function here:
//! `total(kind) == base(kind) + sum(items(kind))`. The base is the lump sum
//! recorded before itemization began and is never touched by add/remove.

use rust_decimal::Decimal;

use crate::models::{AccountSnapshot, Transaction};
use crate::types::FlowKind;

/// Sum of the transaction values
pub fn sum_items(items: &[Transaction]) -> Decimal {
    items.iter().map(|t| t.value).sum()
}

/// Base amount for an account record loaded from storage.
///
/// Records written before itemization existed have no stored base; with no
/// items the whole stored total is the base.
pub fn migrate_base(items: &[Transaction], total: Decimal, stored_base: Option<Decimal>) -> Decimal {
    if items.is_empty() {
        total
    } else {
        stored_base.unwrap_or(Decimal::ZERO)
    }
}

/// Recompute one aggregate field from base and items. Returns true if the
/// stored total changed.
pub fn sync_total(account: &mut AccountSnapshot, kind: FlowKind) -> bool {
    let expected = account.base(kind) + sum_items(account.items(kind));
    if account.total(kind) == expected {
        return false;
    }
    account.set_total(kind, expected);
    true
}

/// Recompute both aggregate fields. Returns true if either changed.
pub fn sync_totals(account: &mut AccountSnapshot) -> bool {
    let inflow = sync_total(account, FlowKind::Inflow);
    let outflow = sync_total(account, FlowKind::Outflow);
    inflow || outflow
}

/// Append a transaction with a fresh id, then recompute the total and the
/// closing balance. Returns the new id.
pub fn add_transaction(
    account: &mut AccountSnapshot,
    kind: FlowKind,
    description: impl Into<String>,
    value: Decimal,
) -> String {
    let transaction = Transaction::new(description, value);
    let id = transaction.id.clone();
    account.items_mut(kind).push(transaction);
    sync_total(account, kind);
    account.recompute_closing();
    id
}

/// Remove a transaction by id. An unknown id leaves the account untouched.
pub fn remove_transaction(
    account: &mut AccountSnapshot,
    kind: FlowKind,
    id: &str,
) -> Option<Transaction> {
    let items = account.items_mut(kind);
    let position = items.iter().position(|t| t.id == id)?;
    let removed = items.remove(position);
    sync_total(account, kind);
    account.recompute_closing();
    Some(removed)
}

/// Edit a transaction: delete it and append a replacement with a new id.
/// Returns the new id, or `None` if `id` was not in the list.
pub fn replace_transaction(
    account: &mut AccountSnapshot,
    kind: FlowKind,
    id: &str,
    description: impl Into<String>,
    value: Decimal,
) -> Option<String> {
    remove_transaction(account, kind, id)?;
    Some(add_transaction(account, kind, description, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_itemized_inflow_scenario() {
        let mut acc = AccountSnapshot::new("Caixa", Decimal::ZERO);
        acc.inflow_base = dec("5");
        add_transaction(&mut acc, FlowKind::Inflow, "Venda balcão", dec("30"));
        let second = add_transaction(&mut acc, FlowKind::Inflow, "Pix cliente", dec("20"));
        assert_eq!(acc.inflow_total, dec("55"));

        remove_transaction(&mut acc, FlowKind::Inflow, &second);
        assert_eq!(acc.inflow_total, dec("35"));
        assert_eq!(acc.inflow_base, dec("5"));
        assert_eq!(acc.inflow_items.len(), 1);
    }

    #[test]
    fn test_add_recomputes_closing() {
        let mut acc = AccountSnapshot::new("Banco", dec("100"));
        add_transaction(&mut acc, FlowKind::Outflow, "Fornecedor", dec("40"));
        assert_eq!(acc.outflow_total, dec("40"));
        assert_eq!(acc.closing_balance, dec("60"));
        assert_eq!(acc.closing_balance, acc.expected_closing());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut acc = AccountSnapshot::new("Banco", dec("100"));
        add_transaction(&mut acc, FlowKind::Inflow, "Depósito", dec("10"));
        acc.closing_balance = dec("999");
        let before = acc.clone();

        assert!(remove_transaction(&mut acc, FlowKind::Inflow, "missing").is_none());
        assert_eq!(acc, before);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut acc = AccountSnapshot::new("Banco", Decimal::ZERO);
        let a = add_transaction(&mut acc, FlowKind::Inflow, "a", dec("1"));
        let b = add_transaction(&mut acc, FlowKind::Inflow, "a", dec("1"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_replace_transaction() {
        let mut acc = AccountSnapshot::new("Banco", Decimal::ZERO);
        let id = add_transaction(&mut acc, FlowKind::Outflow, "Aluguel", dec("1000"));
        let new_id = replace_transaction(&mut acc, FlowKind::Outflow, &id, "Aluguel corrigido", dec("1200")).unwrap();

        assert_ne!(id, new_id);
        assert_eq!(acc.outflow_items.len(), 1);
        assert_eq!(acc.outflow_items[0].description, "Aluguel corrigido");
        assert_eq!(acc.outflow_total, dec("1200"));
        assert!(replace_transaction(&mut acc, FlowKind::Outflow, "nope", "x", dec("1")).is_none());
    }

    #[test]
    fn test_negative_item_values_are_summed() {
        let mut acc = AccountSnapshot::new("Banco", Decimal::ZERO);
        add_transaction(&mut acc, FlowKind::Inflow, "Estorno", dec("-2.50"));
        add_transaction(&mut acc, FlowKind::Inflow, "Venda", dec("10"));
        assert_eq!(acc.inflow_total, dec("7.50"));
    }

    #[test]
    fn test_migrate_base() {
        let items = vec![Transaction::new("x", dec("3"))];
        assert_eq!(migrate_base(&[], dec("80"), None), dec("80"));
        assert_eq!(migrate_base(&[], dec("80"), Some(dec("1"))), dec("80"));
        assert_eq!(migrate_base(&items, dec("80"), None), Decimal::ZERO);
        assert_eq!(migrate_base(&items, dec("80"), Some(dec("77"))), dec("77"));
    }

    #[test]
    fn test_sync_totals_repairs_drift() {
        let mut acc = AccountSnapshot::new("Banco", Decimal::ZERO);
        acc.inflow_items.push(Transaction::new("a", dec("4")));
        acc.inflow_base = dec("1");
        acc.inflow_total = dec("2");
        assert!(sync_totals(&mut acc));
        assert_eq!(acc.inflow_total, dec("5"));
        assert!(!sync_totals(&mut acc));
    }
}
