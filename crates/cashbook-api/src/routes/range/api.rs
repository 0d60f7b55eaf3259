//! Range view and consistency endpoints

use axum::extract::State;
use axum::response::Json;
use cashbook_core::{AccountSnapshot, Consistency, DateRange, Totals};
use serde::{Deserialize, Serialize};

use crate::routes::{accounts_json, date_param, AppJson, AppQuery};
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: String,
    pub end: String,
    /// Day shown when the range holds no stored data
    pub selected: Option<String>,
    #[serde(default)]
    pub masked: bool,
}

#[derive(Debug, Serialize)]
pub struct RangeResponse {
    pub label: String,
    pub range: DateRange,
    pub read_only: bool,
    pub accounts: Vec<serde_json::Value>,
    pub totals: Totals,
}

/// GET /api/range?start=..&end=..
pub async fn get_range(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RangeQuery>,
) -> ApiResult<Json<RangeResponse>> {
    let start = date_param(&query.start)?;
    let end = date_param(&query.end)?;
    let selected = query.selected.as_deref().map(date_param).transpose()?;

    let ledger = state.ledger.read().await;
    let view = ledger.range_view(start, end, selected);

    Ok(Json(RangeResponse {
        label: view.label,
        range: view.range,
        read_only: view.read_only,
        accounts: accounts_json(&view.accounts, query.masked),
        totals: view.totals,
    }))
}

/// POST /api/consistency
pub async fn check_consistency(
    State(state): State<AppState>,
    AppJson(account): AppJson<AccountSnapshot>,
) -> ApiResult<Json<Consistency>> {
    let ledger = state.ledger.read().await;
    Ok(Json(ledger.check_consistency(&account)?))
}
