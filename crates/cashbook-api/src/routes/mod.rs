//! Route modules for the API server
//!
//! - days: single-day views and account edits
//! - range: range views and the consistency check
//! - reports: balance history and chart series
//! - audit: audit log listing and clearing
//!
//! Each module keeps its handlers in `api.rs` and re-exports them from
//! `mod.rs`. Handlers extract through [`AppJson`], [`AppPath`] and
//! [`AppQuery`] so malformed input is answered with an error body like any
//! other failure.

pub mod audit;
pub mod days;
pub mod range;
pub mod reports;

use axum::extract::{FromRequest, FromRequestParts};
use axum::http::HeaderMap;
use cashbook_core::{parse_date, AccountSnapshot, ANONYMOUS_USER};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

/// JSON body extractor rejecting with [`ApiError`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

/// Path extractor rejecting with [`ApiError`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct AppPath<T>(pub T);

/// Query extractor rejecting with [`ApiError`]
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct AppQuery<T>(pub T);

/// Header naming the acting user; authentication happens upstream
pub const USER_HEADER: &str = "x-cashbook-user";

/// The acting user of a request, `anonymous` when absent
pub fn acting_user(headers: &HeaderMap) -> String {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(ANONYMOUS_USER)
        .to_string()
}

/// Parse a date from a path segment or query value
pub fn date_param(raw: &str) -> ApiResult<NaiveDate> {
    Ok(parse_date(raw)?)
}

#[derive(Debug, Default, Deserialize)]
pub struct MaskQuery {
    #[serde(default)]
    pub masked: bool,
}

/// Accounts as JSON, with sensitive amounts hidden when `masked`
pub fn accounts_json(accounts: &[AccountSnapshot], masked: bool) -> Vec<serde_json::Value> {
    accounts
        .iter()
        .map(|a| {
            if masked {
                a.to_masked_json()
            } else {
                serde_json::to_value(a).unwrap_or(serde_json::Value::Null)
            }
        })
        .collect()
}
