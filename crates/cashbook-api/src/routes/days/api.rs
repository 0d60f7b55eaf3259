//! Day endpoints: resolved day views and account edits

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use cashbook_core::{
    carry_forward, consistency, format_date, AccountEdit, AccountSnapshot, DateRange, Ledger,
    Mismatch, Totals,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::routes::{accounts_json, acting_user, date_param, AppJson, AppPath, AppQuery, MaskQuery};
use crate::error::ApiResult;
use crate::AppState;

/// A day as shown to the user
#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub date: String,
    /// True when the day was carried forward from an earlier one
    pub projected: bool,
    pub accounts: Vec<serde_json::Value>,
    pub totals: Totals,
    pub inconsistent: Vec<Mismatch>,
}

/// Stored day summary for listings
#[derive(Debug, Serialize)]
pub struct DayListItem {
    pub date: String,
    pub accounts: usize,
    pub totals: Totals,
}

#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub totals: Totals,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditTarget {
    /// End of the range the edit was made from; a range longer than the
    /// day itself is read-only
    pub end: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub edits: Vec<AccountEdit>,
}

/// GET /api/days
pub async fn list_days(State(state): State<AppState>) -> Json<Vec<DayListItem>> {
    let ledger = state.ledger.read().await;
    let items = ledger
        .days()
        .iter()
        .map(|d| DayListItem {
            date: d.date_label(),
            accounts: d.accounts.len(),
            totals: d.totals,
        })
        .collect();
    Json(items)
}

/// GET /api/days/:date
pub async fn get_day(
    State(state): State<AppState>,
    AppPath(date): AppPath<String>,
    AppQuery(mask): AppQuery<MaskQuery>,
) -> ApiResult<Json<DayResponse>> {
    let date = date_param(&date)?;
    let ledger = state.ledger.read().await;
    let day = ledger.snapshot_for_date(date);

    Ok(Json(DayResponse {
        date: format_date(date),
        projected: carry_forward::is_projected(date, ledger.days()),
        accounts: accounts_json(&day.accounts, mask.masked),
        inconsistent: consistency::check_day(&day),
        totals: day.totals,
    }))
}

/// POST /api/days/:date/accounts
pub async fn add_account(
    State(state): State<AppState>,
    AppPath(date): AppPath<String>,
    headers: HeaderMap,
    AppJson(account): AppJson<AccountSnapshot>,
) -> ApiResult<(StatusCode, Json<TotalsResponse>)> {
    let date = date_param(&date)?;
    let user = acting_user(&headers);
    let mut ledger = state.ledger.write().await;
    let totals = ledger.add_account(date, account, &user).await?;
    Ok((StatusCode::CREATED, Json(TotalsResponse { totals })))
}

/// PUT /api/days/:date/accounts/:index
pub async fn update_account(
    State(state): State<AppState>,
    AppPath((date, index)): AppPath<(String, usize)>,
    AppQuery(target): AppQuery<EditTarget>,
    headers: HeaderMap,
    AppJson(account): AppJson<AccountSnapshot>,
) -> ApiResult<Json<TotalsResponse>> {
    let date = editable(&date, &target)?;
    let user = acting_user(&headers);
    let mut ledger = state.ledger.write().await;
    let totals = ledger.update_account(date, index, account, &user).await?;
    Ok(Json(TotalsResponse { totals }))
}

/// PATCH /api/days/:date/accounts/:index
pub async fn edit_account(
    State(state): State<AppState>,
    AppPath((date, index)): AppPath<(String, usize)>,
    AppQuery(target): AppQuery<EditTarget>,
    headers: HeaderMap,
    AppJson(request): AppJson<EditRequest>,
) -> ApiResult<Json<AccountSnapshot>> {
    let date = editable(&date, &target)?;
    let user = acting_user(&headers);
    let mut ledger = state.ledger.write().await;
    let account = ledger.edit_account(date, index, request.edits, &user).await?;
    Ok(Json(account))
}

/// DELETE /api/days/:date/accounts/:index
pub async fn delete_account(
    State(state): State<AppState>,
    AppPath((date, index)): AppPath<(String, usize)>,
    headers: HeaderMap,
) -> ApiResult<Json<TotalsResponse>> {
    let date = date_param(&date)?;
    let user = acting_user(&headers);
    let mut ledger = state.ledger.write().await;
    let totals = ledger.remove_account(date, index, &user).await?;
    Ok(Json(TotalsResponse { totals }))
}

fn editable(date: &str, target: &EditTarget) -> ApiResult<NaiveDate> {
    let start = date_param(date)?;
    let end = match target.end.as_deref() {
        Some(end) => date_param(end)?,
        None => start,
    };
    Ok(Ledger::editable_date(DateRange::new(start, end))?)
}
