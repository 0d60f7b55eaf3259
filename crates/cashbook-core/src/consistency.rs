//! Closing balance consistency check
//!
//! Purely advisory: a mismatch is surfaced as a flag and never blocks a save
//! or corrects data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AccountSnapshot, DailySnapshot};

/// Largest difference still reported as consistent (exclusive): two cents
pub const TOLERANCE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Result of checking one account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consistency {
    pub is_consistent: bool,
    /// `|expected - closing|`
    pub diff: Decimal,
}

/// An inconsistent account of a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mismatch {
    pub account: String,
    pub expected: Decimal,
    pub closing_balance: Decimal,
    pub diff: Decimal,
}

/// Compare the stated closing balance with the formula result
pub fn check_consistency(account: &AccountSnapshot) -> Consistency {
    let diff = (account.expected_closing() - account.closing_balance).abs();
    Consistency {
        is_consistent: diff < TOLERANCE,
        diff,
    }
}

/// All inconsistent accounts of a day, in account order
pub fn check_day(day: &DailySnapshot) -> Vec<Mismatch> {
    day.accounts
        .iter()
        .filter_map(|account| {
            let result = check_consistency(account);
            if result.is_consistent {
                None
            } else {
                Some(Mismatch {
                    account: account.name.clone(),
                    expected: account.expected_closing(),
                    closing_balance: account.closing_balance,
                    diff: result.diff,
                })
            }
        })
        .collect()
}
