//! Core data models for the ledger
//!
//! Serialized field names follow the persisted schema (`saldo_anterior`,
//! `entradas`, ...) so the same types are used by the file store and by the
//! JSON API.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use super::error::{CoreError, CoreResult};
use super::reconcile;
use super::time::{dmy, format_date, DateRange};
use super::types::{FlowKind, SensitiveField};

/// Largest magnitude accepted for a single amount
const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Reject an amount outside `[-MAX_AMOUNT, MAX_AMOUNT]` so that totals and
/// the closing balance formula cannot overflow
pub fn check_amount(field: &str, value: Decimal) -> CoreResult<Decimal> {
    if value.abs() > Decimal::from(MAX_AMOUNT) {
        return Err(CoreError::ValidationError {
            message: format!("{} out of range: {}", field, value),
        });
    }
    Ok(value)
}

/// Itemized transaction inside an account's inflow or outflow list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque unique identifier
    pub id: String,
    pub description: String,
    /// Signed amount
    pub value: Decimal,
}

impl Transaction {
    /// Create a transaction with a freshly generated identifier
    pub fn new(description: impl Into<String>, value: Decimal) -> Self {
        Self {
            id: cashbook_utils::generate_id(),
            description: description.into(),
            value,
        }
    }
}

/// One account's figures for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AccountRecord")]
pub struct AccountSnapshot {
    /// Account name, unique within a day
    pub name: String,
    #[serde(rename = "saldo_anterior")]
    pub opening_balance: Decimal,
    #[serde(rename = "entradas")]
    pub inflow_total: Decimal,
    #[serde(rename = "saidas")]
    pub outflow_total: Decimal,
    #[serde(rename = "taxas")]
    pub fees: Decimal,
    #[serde(rename = "saldo_atual")]
    pub closing_balance: Decimal,
    #[serde(rename = "nota", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(rename = "entradas_detalhadas")]
    pub inflow_items: Vec<Transaction>,
    #[serde(rename = "saidas_detalhadas")]
    pub outflow_items: Vec<Transaction>,
    /// Manually entered inflow not covered by itemized transactions
    #[serde(rename = "entradas_base")]
    pub inflow_base: Decimal,
    /// Manually entered outflow not covered by itemized transactions
    #[serde(rename = "saidas_base")]
    pub outflow_base: Decimal,
    #[serde(rename = "sensitive_fields", serialize_with = "serialize_flags")]
    pub sensitive_flags: BTreeSet<SensitiveField>,
}

impl AccountSnapshot {
    /// Create an account with no movement: closing equals opening
    pub fn new(name: impl Into<String>, opening_balance: Decimal) -> Self {
        Self {
            name: name.into(),
            opening_balance,
            inflow_total: Decimal::ZERO,
            outflow_total: Decimal::ZERO,
            fees: Decimal::ZERO,
            closing_balance: opening_balance,
            note: None,
            inflow_items: Vec::new(),
            outflow_items: Vec::new(),
            inflow_base: Decimal::ZERO,
            outflow_base: Decimal::ZERO,
            sensitive_flags: BTreeSet::new(),
        }
    }

    /// `opening + inflow - outflow - fees`
    pub fn expected_closing(&self) -> Decimal {
        self.opening_balance + self.inflow_total - self.outflow_total - self.fees
    }

    /// Check every amount, itemized values included, against the accepted
    /// bounds
    pub fn validate_amounts(&self) -> CoreResult<()> {
        check_amount("saldo_anterior", self.opening_balance)?;
        check_amount("entradas", self.inflow_total)?;
        check_amount("saidas", self.outflow_total)?;
        check_amount("taxas", self.fees)?;
        check_amount("saldo_atual", self.closing_balance)?;
        check_amount("entradas_base", self.inflow_base)?;
        check_amount("saidas_base", self.outflow_base)?;
        for item in self.inflow_items.iter().chain(&self.outflow_items) {
            check_amount(&format!("transaction {}", item.id), item.value)?;
        }
        Ok(())
    }

    /// Overwrite the closing balance with the formula result
    pub fn recompute_closing(&mut self) {
        self.closing_balance = self.expected_closing();
    }

    pub fn items(&self, kind: FlowKind) -> &[Transaction] {
        match kind {
            FlowKind::Inflow => &self.inflow_items,
            FlowKind::Outflow => &self.outflow_items,
        }
    }

    pub(crate) fn items_mut(&mut self, kind: FlowKind) -> &mut Vec<Transaction> {
        match kind {
            FlowKind::Inflow => &mut self.inflow_items,
            FlowKind::Outflow => &mut self.outflow_items,
        }
    }

    pub fn base(&self, kind: FlowKind) -> Decimal {
        match kind {
            FlowKind::Inflow => self.inflow_base,
            FlowKind::Outflow => self.outflow_base,
        }
    }

    pub(crate) fn set_base(&mut self, kind: FlowKind, value: Decimal) {
        match kind {
            FlowKind::Inflow => self.inflow_base = value,
            FlowKind::Outflow => self.outflow_base = value,
        }
    }

    pub fn total(&self, kind: FlowKind) -> Decimal {
        match kind {
            FlowKind::Inflow => self.inflow_total,
            FlowKind::Outflow => self.outflow_total,
        }
    }

    pub(crate) fn set_total(&mut self, kind: FlowKind, value: Decimal) {
        match kind {
            FlowKind::Inflow => self.inflow_total = value,
            FlowKind::Outflow => self.outflow_total = value,
        }
    }

    /// Whether the aggregate field is derived from itemized transactions
    pub fn is_itemized(&self, kind: FlowKind) -> bool {
        !self.items(kind).is_empty()
    }

    pub fn is_sensitive(&self, field: SensitiveField) -> bool {
        self.sensitive_flags.contains(&field)
    }

    /// JSON form with sensitive amounts replaced by a mask
    pub fn to_masked_json(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or(serde_json::Value::Null);
        if let Some(map) = value.as_object_mut() {
            for field in &self.sensitive_flags {
                map.insert(
                    field.key().to_string(),
                    serde_json::Value::String(cashbook_utils::MASK.to_string()),
                );
            }
        }
        value
    }
}

fn serialize_flags<S: Serializer>(
    flags: &BTreeSet<SensitiveField>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let map: BTreeMap<&'static str, bool> = SensitiveField::ALL
        .iter()
        .map(|f| (f.key(), flags.contains(f)))
        .collect();
    map.serialize(serializer)
}

/// Account record as persisted. Older records lack the base amounts and
/// the sensitive flags; see [`reconcile::migrate_base`].
#[derive(Debug, Deserialize)]
struct AccountRecord {
    name: String,
    #[serde(default)]
    saldo_anterior: Decimal,
    #[serde(default)]
    entradas: Decimal,
    #[serde(default)]
    saidas: Decimal,
    #[serde(default)]
    taxas: Option<Decimal>,
    #[serde(default)]
    saldo_atual: Decimal,
    #[serde(default)]
    nota: Option<String>,
    #[serde(default)]
    entradas_detalhadas: Option<Vec<Transaction>>,
    #[serde(default)]
    saidas_detalhadas: Option<Vec<Transaction>>,
    #[serde(default)]
    entradas_base: Option<Decimal>,
    #[serde(default)]
    saidas_base: Option<Decimal>,
    #[serde(default)]
    sensitive_fields: Option<BTreeMap<String, bool>>,
}

impl TryFrom<AccountRecord> for AccountSnapshot {
    type Error = CoreError;

    fn try_from(record: AccountRecord) -> CoreResult<Self> {
        let inflow_items = record.entradas_detalhadas.unwrap_or_default();
        let outflow_items = record.saidas_detalhadas.unwrap_or_default();
        let inflow_base = reconcile::migrate_base(&inflow_items, record.entradas, record.entradas_base);
        let outflow_base = reconcile::migrate_base(&outflow_items, record.saidas, record.saidas_base);

        let sensitive_flags = record
            .sensitive_fields
            .unwrap_or_default()
            .into_iter()
            .filter(|(_, on)| *on)
            .filter_map(|(key, _)| key.parse::<SensitiveField>().ok())
            .collect();

        let account = Self {
            name: record.name,
            opening_balance: record.saldo_anterior,
            inflow_total: record.entradas,
            outflow_total: record.saidas,
            fees: record.taxas.unwrap_or_default(),
            closing_balance: record.saldo_atual,
            note: record.nota.filter(|n| !n.trim().is_empty()),
            inflow_items,
            outflow_items,
            inflow_base,
            outflow_base,
            sensitive_flags,
        };
        account.validate_amounts()?;
        Ok(account)
    }
}

/// Pointwise sum of the balance fields of a list of accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    #[serde(rename = "saldo_anterior")]
    pub opening_balance: Decimal,
    #[serde(rename = "entradas")]
    pub inflow_total: Decimal,
    #[serde(rename = "saidas")]
    pub outflow_total: Decimal,
    #[serde(rename = "taxas")]
    pub fees: Decimal,
    #[serde(rename = "saldo_atual")]
    pub closing_balance: Decimal,
}

impl Totals {
    /// Fold the accounts into totals, starting from zero
    pub fn rollup<'a, I>(accounts: I) -> Self
    where
        I: IntoIterator<Item = &'a AccountSnapshot>,
    {
        accounts
            .into_iter()
            .fold(Totals::default(), |acc, account| acc.add(account))
    }

    /// Add one account's fields to these totals
    pub fn add(self, account: &AccountSnapshot) -> Self {
        Self {
            opening_balance: self.opening_balance + account.opening_balance,
            inflow_total: self.inflow_total + account.inflow_total,
            outflow_total: self.outflow_total + account.outflow_total,
            fees: self.fees + account.fees,
            closing_balance: self.closing_balance + account.closing_balance,
        }
    }
}

/// All accounts of one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySnapshot {
    #[serde(with = "dmy")]
    pub date: NaiveDate,
    pub accounts: Vec<AccountSnapshot>,
    #[serde(default)]
    pub totals: Totals,
}

impl DailySnapshot {
    /// Create a snapshot, computing its totals
    pub fn new(date: NaiveDate, accounts: Vec<AccountSnapshot>) -> Self {
        let totals = Totals::rollup(&accounts);
        Self { date, accounts, totals }
    }

    /// A day with no accounts and zero totals
    pub fn empty(date: NaiveDate) -> Self {
        Self::new(date, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Recompute totals from the account list
    pub fn recompute_totals(&mut self) {
        self.totals = Totals::rollup(&self.accounts);
    }

    /// Find an account by name
    pub fn account(&self, name: &str) -> Option<&AccountSnapshot> {
        self.accounts.iter().find(|a| a.name == name)
    }

    /// Date formatted as stored
    pub fn date_label(&self) -> String {
        format_date(self.date)
    }
}

/// Consolidated, read-only view over one or more days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeView {
    /// `dd/mm/yyyy` or `dd/mm/yyyy - dd/mm/yyyy`
    pub label: String,
    pub range: DateRange,
    pub accounts: Vec<AccountSnapshot>,
    pub totals: Totals,
    /// Set when the view has no single backing day to write edits to
    pub read_only: bool,
}

impl RangeView {
    /// Wrap a single resolved day
    pub fn from_day(day: DailySnapshot, read_only: bool) -> Self {
        Self {
            label: day.date_label(),
            range: DateRange::single(day.date),
            accounts: day.accounts,
            totals: day.totals,
            read_only,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn account(name: &str, opening: &str, inflow: &str, outflow: &str, fees: &str, closing: &str) -> AccountSnapshot {
        AccountSnapshot {
            opening_balance: dec(opening),
            inflow_total: dec(inflow),
            outflow_total: dec(outflow),
            fees: dec(fees),
            closing_balance: dec(closing),
            ..AccountSnapshot::new(name, Decimal::ZERO)
        }
    }

    #[test]
    fn test_expected_closing() {
        let mut acc = account("Caixa", "100", "50", "20", "0", "0");
        assert_eq!(acc.expected_closing(), dec("130"));
        acc.recompute_closing();
        assert_eq!(acc.closing_balance, dec("130"));
    }

    #[test]
    fn test_negative_closing_is_allowed() {
        let mut acc = account("Caixa", "10", "0", "25", "1.5", "0");
        acc.recompute_closing();
        assert_eq!(acc.closing_balance, dec("-16.5"));
    }

    #[test]
    fn test_rollup_empty_is_zero() {
        let none: Vec<AccountSnapshot> = Vec::new();
        assert_eq!(Totals::rollup(&none), Totals::default());
    }

    #[test]
    fn test_rollup_single_matches_account() {
        let acc = account("Caixa", "100", "50", "20", "2", "128");
        let totals = Totals::rollup([&acc]);
        assert_eq!(totals.opening_balance, acc.opening_balance);
        assert_eq!(totals.inflow_total, acc.inflow_total);
        assert_eq!(totals.outflow_total, acc.outflow_total);
        assert_eq!(totals.fees, acc.fees);
        assert_eq!(totals.closing_balance, acc.closing_balance);
    }

    #[test]
    fn test_rollup_is_order_independent() {
        let a = account("A", "100.10", "5", "1", "0.3", "103.80");
        let b = account("B", "0.20", "0", "7", "0", "-6.80");
        let c = account("C", "42", "1.01", "0", "0", "43.01");
        let forward = Totals::rollup([&a, &b, &c]);
        let backward = Totals::rollup([&c, &b, &a]);
        assert_eq!(forward, backward);
        assert_eq!(forward.closing_balance, dec("140.01"));
    }

    #[test]
    fn test_daily_snapshot_new_computes_totals() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap();
        let day = DailySnapshot::new(date, vec![
            account("A", "1", "2", "0", "0", "3"),
            account("B", "10", "0", "4", "0", "6"),
        ]);
        assert_eq!(day.totals.closing_balance, dec("9"));
        assert_eq!(day.date_label(), "16/01/2026");
        assert!(day.account("B").is_some());
        assert!(day.account("C").is_none());
    }

    #[test]
    fn test_account_deserializes_persisted_schema() {
        let json = r#"{
            "name": "Brasil Disphel",
            "saldo_anterior": 22369.63,
            "entradas": 19612.74,
            "saidas": 11575.55,
            "taxas": 0,
            "saldo_atual": 30406.82,
            "nota": "",
            "entradas_detalhadas": [],
            "saidas_detalhadas": null
        }"#;
        let acc: AccountSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(acc.opening_balance, dec("22369.63"));
        assert_eq!(acc.closing_balance, dec("30406.82"));
        assert_eq!(acc.note, None);
        // no items: the stored total becomes the base
        assert_eq!(acc.inflow_base, dec("19612.74"));
        assert_eq!(acc.outflow_base, dec("11575.55"));
    }

    #[test]
    fn test_account_without_fees_defaults_to_zero() {
        let json = r#"{"name":"Caixa","saldo_anterior":1,"entradas":0,"saidas":0,"saldo_atual":1}"#;
        let acc: AccountSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(acc.fees, Decimal::ZERO);
        assert!(acc.sensitive_flags.is_empty());
    }

    #[test]
    fn test_sensitive_flags_serialize_as_bool_map() {
        let mut acc = AccountSnapshot::new("Caixa", dec("1"));
        acc.sensitive_flags.insert(SensitiveField::ClosingBalance);
        let value = serde_json::to_value(&acc).unwrap();
        assert_eq!(value["sensitive_fields"]["saldo_atual"], serde_json::json!(true));
        assert_eq!(value["sensitive_fields"]["entradas"], serde_json::json!(false));

        let back: AccountSnapshot = serde_json::from_value(value).unwrap();
        assert!(back.is_sensitive(SensitiveField::ClosingBalance));
        assert!(!back.is_sensitive(SensitiveField::InflowTotal));
    }

    #[test]
    fn test_masked_json_hides_only_flagged_fields() {
        let mut acc = account("Caixa", "100", "50", "20", "0", "130");
        acc.sensitive_flags.insert(SensitiveField::OpeningBalance);
        let masked = acc.to_masked_json();
        assert_eq!(masked["saldo_anterior"], serde_json::json!(cashbook_utils::MASK));
        assert_eq!(masked["saldo_atual"], serde_json::json!(130.0));
    }

    #[test]
    fn test_out_of_range_amount_is_rejected_on_deserialize() {
        let json = r#"{"name":"Grande","saldo_anterior":5e28,"entradas":0,"saidas":0,"saldo_atual":5e28}"#;
        assert!(serde_json::from_str::<AccountSnapshot>(json).is_err());

        let json = r#"{"name":"Caixa","saldo_anterior":0,"entradas":1,"saidas":0,"saldo_atual":1,
            "entradas_detalhadas":[{"id":"x","description":"Pix","value":1e20}]}"#;
        assert!(serde_json::from_str::<AccountSnapshot>(json).is_err());
    }

    #[test]
    fn test_validate_amounts_bounds() {
        let mut acc = AccountSnapshot::new("Caixa", dec("1000000000000000"));
        assert!(acc.validate_amounts().is_ok());
        acc.fees = dec("-1000000000000000.01");
        assert!(matches!(acc.validate_amounts(), Err(CoreError::ValidationError { .. })));
    }

    #[test]
    fn test_daily_snapshot_date_format() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 5).unwrap();
        let value = serde_json::to_value(DailySnapshot::empty(date)).unwrap();
        assert_eq!(value["date"], serde_json::json!("05/02/2026"));
    }
}
