//! Consolidated view over an inclusive date range

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::carry_forward;
use crate::models::{AccountSnapshot, DailySnapshot, RangeView, Totals};
use crate::time::DateRange;

/// Aggregate the stored days in `[start, end]`.
///
/// A single-day range resolves that day (with carry-forward) and stays
/// editable. A range with no stored days falls back to the single-day view
/// of `fallback`, read-only.
pub fn aggregate(
    start: NaiveDate,
    end: NaiveDate,
    all: &[DailySnapshot],
    fallback: NaiveDate,
) -> RangeView {
    let range = DateRange::new(start, end);

    if range.is_single_day() {
        return RangeView::from_day(carry_forward::resolve(range.start, all), false);
    }

    let mut days: Vec<&DailySnapshot> = all.iter().filter(|d| range.contains(&d.date)).collect();
    if days.is_empty() {
        log::debug!(
            target: "cashbook::ledger",
            "no stored days in {}, showing {}",
            range.label(),
            crate::time::format_date(fallback)
        );
        return RangeView::from_day(carry_forward::resolve(fallback, all), true);
    }
    days.sort_by_key(|d| d.date);

    let accounts = merge_accounts(&days);
    let totals = Totals::rollup(&accounts);

    RangeView {
        label: range.label(),
        range,
        accounts,
        totals,
        read_only: true,
    }
}

/// Merge accounts across chronologically sorted days, by name in order of
/// first appearance. Flows are summed over every day; the opening balance
/// comes from the first day and the closing balance from the last, zero for
/// an account absent on that day.
fn merge_accounts(days: &[&DailySnapshot]) -> Vec<AccountSnapshot> {
    let (first, last) = match (days.first(), days.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let mut merged: Vec<AccountSnapshot> = Vec::new();
    for day in days {
        for account in &day.accounts {
            match merged.iter_mut().find(|m| m.name == account.name) {
                Some(existing) => {
                    existing.inflow_total += account.inflow_total;
                    existing.outflow_total += account.outflow_total;
                    existing.fees += account.fees;
                }
                None => merged.push(AccountSnapshot {
                    inflow_total: account.inflow_total,
                    outflow_total: account.outflow_total,
                    fees: account.fees,
                    ..AccountSnapshot::new(account.name.clone(), Decimal::ZERO)
                }),
            }
        }
    }

    for account in &mut merged {
        account.opening_balance = first
            .account(&account.name)
            .map_or(Decimal::ZERO, |a| a.opening_balance);
        account.closing_balance = last
            .account(&account.name)
            .map_or(Decimal::ZERO, |a| a.closing_balance);
    }
    merged
}
