//! Carry-forward of closing balances into days without explicit data.
//!
//! The projection is computed on every read and never persisted, so later
//! edits of the prior day show up in the gap day until that day is saved.

use chrono::NaiveDate;

use crate::models::{AccountSnapshot, DailySnapshot};

/// Snapshot with an account list for `date`, if one was saved
pub fn find_exact(date: NaiveDate, all: &[DailySnapshot]) -> Option<&DailySnapshot> {
    all.iter().find(|d| d.date == date && !d.is_empty())
}

/// The stored day closest to `target` among days strictly before it
pub fn closest_prior(target: NaiveDate, all: &[DailySnapshot]) -> Option<&DailySnapshot> {
    all.iter()
        .filter(|d| d.date < target && !d.is_empty())
        .max_by_key(|d| d.date)
}

/// Project an account into the next day: the prior closing balance becomes
/// both opening and closing, with no movement and no note
pub fn carry_account(prior: &AccountSnapshot) -> AccountSnapshot {
    AccountSnapshot {
        sensitive_flags: prior.sensitive_flags.clone(),
        ..AccountSnapshot::new(prior.name.clone(), prior.closing_balance)
    }
}

/// Project a whole day forward to `target`
pub fn carry_day(prior: &DailySnapshot, target: NaiveDate) -> DailySnapshot {
    let accounts = prior.accounts.iter().map(carry_account).collect();
    DailySnapshot::new(target, accounts)
}

/// Snapshot for `target`: the saved day if any, else the projection of the
/// closest prior day, else an empty day
pub fn resolve(target: NaiveDate, all: &[DailySnapshot]) -> DailySnapshot {
    if let Some(day) = find_exact(target, all) {
        return day.clone();
    }

    match closest_prior(target, all) {
        Some(prior) => {
            log::debug!(
                target: "cashbook::ledger",
                "carrying {} forward to {}",
                prior.date_label(),
                target.format(crate::time::DATE_FORMAT)
            );
            carry_day(prior, target)
        }
        None => DailySnapshot::empty(target),
    }
}

/// Whether `resolve` would synthesize the day instead of returning a saved one
pub fn is_projected(target: NaiveDate, all: &[DailySnapshot]) -> bool {
    find_exact(target, all).is_none() && closest_prior(target, all).is_some()
}
