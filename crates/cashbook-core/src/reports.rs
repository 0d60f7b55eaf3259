//! Report structures for charts and summaries

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::DailySnapshot;
use crate::time::{dmy, DateRange};

/// Total closing balance of one stored day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    #[serde(with = "dmy")]
    pub date: NaiveDate,
    #[serde(rename = "saldo")]
    pub closing_balance: Decimal,
}

/// Closing balance over a range, with the change between its ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceHistory {
    pub range: DateRange,
    pub points: Vec<BalancePoint>,
    pub start_balance: Decimal,
    pub end_balance: Decimal,
    pub difference: Decimal,
    /// Percent change; absent when the start balance is not positive
    pub growth_percent: Option<Decimal>,
}

/// Per-day totals for the flow chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeriesPoint {
    #[serde(with = "dmy")]
    pub date: NaiveDate,
    #[serde(rename = "entradas")]
    pub inflow: Decimal,
    #[serde(rename = "saidas")]
    pub outflow: Decimal,
    #[serde(rename = "saldo")]
    pub closing_balance: Decimal,
}

/// One account's slice of the day's positive balances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub name: String,
    pub value: Decimal,
    /// Percent of the sum of positive balances, two decimal places
    pub share: Decimal,
}

/// Overview of the stored collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub total_days: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_date: Option<String>,
    /// Distinct account names across all days
    pub total_accounts: usize,
}

pub fn balance_history(range: DateRange, days: &[DailySnapshot]) -> BalanceHistory {
    let mut points: Vec<BalancePoint> = days
        .iter()
        .filter(|d| range.contains(&d.date))
        .map(|d| BalancePoint {
            date: d.date,
            closing_balance: d.totals.closing_balance,
        })
        .collect();
    points.sort_by_key(|p| p.date);

    let start_balance = points.first().map(|p| p.closing_balance).unwrap_or_default();
    let end_balance = points.last().map(|p| p.closing_balance).unwrap_or_default();
    let difference = end_balance - start_balance;
    let growth_percent = if start_balance > Decimal::ZERO {
        Some((difference / start_balance * Decimal::ONE_HUNDRED).round_dp(2))
    } else {
        None
    };

    BalanceHistory {
        range,
        points,
        start_balance,
        end_balance,
        difference,
        growth_percent,
    }
}

pub fn daily_series(days: &[DailySnapshot]) -> Vec<DailySeriesPoint> {
    let mut series: Vec<DailySeriesPoint> = days
        .iter()
        .map(|d| DailySeriesPoint {
            date: d.date,
            inflow: d.totals.inflow_total,
            outflow: d.totals.outflow_total,
            closing_balance: d.totals.closing_balance,
        })
        .collect();
    series.sort_by_key(|p| p.date);
    series
}

/// Accounts with a positive closing balance, largest first
pub fn account_distribution(day: &DailySnapshot) -> Vec<DistributionEntry> {
    let positive: Vec<(&str, Decimal)> = day
        .accounts
        .iter()
        .filter(|a| a.closing_balance > Decimal::ZERO)
        .map(|a| (a.name.as_str(), a.closing_balance))
        .collect();
    let total: Decimal = positive.iter().map(|(_, v)| *v).sum();

    let mut entries: Vec<DistributionEntry> = positive
        .into_iter()
        .map(|(name, value)| DistributionEntry {
            name: name.to_string(),
            value,
            share: (value / total * Decimal::ONE_HUNDRED).round_dp(2),
        })
        .collect();
    entries.sort_by(|a, b| b.value.cmp(&a.value));
    entries
}

pub fn summarize(days: &[DailySnapshot]) -> LedgerSummary {
    let first = days.iter().map(|d| d.date).min();
    let last = days.iter().map(|d| d.date).max();
    let mut names: Vec<&str> = days
        .iter()
        .flat_map(|d| d.accounts.iter().map(|a| a.name.as_str()))
        .collect();
    names.sort_unstable();
    names.dedup();

    LedgerSummary {
        total_days: days.len(),
        first_date: first.map(crate::time::format_date),
        last_date: last.map(crate::time::format_date),
        total_accounts: names.len(),
    }
}
