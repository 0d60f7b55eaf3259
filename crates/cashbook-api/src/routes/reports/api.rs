//! Report endpoints for charts

use axum::extract::State;
use axum::response::Json;
use cashbook_core::{time, BalanceHistory, DailySeriesPoint, DistributionEntry, LedgerSummary};
use serde::Deserialize;

use crate::routes::{date_param, AppQuery};
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// GET /api/history; bounds default to the first and last stored day
pub async fn balance_history(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<HistoryQuery>,
) -> ApiResult<Json<BalanceHistory>> {
    let ledger = state.ledger.read().await;
    let first = ledger.days().first().map(|d| d.date).unwrap_or_else(time::today);
    let last = ledger.days().last().map(|d| d.date).unwrap_or_else(time::today);

    let start = query.start.as_deref().map(date_param).transpose()?.unwrap_or(first);
    let end = query.end.as_deref().map(date_param).transpose()?.unwrap_or(last);
    Ok(Json(ledger.balance_history(start, end)))
}

/// GET /api/reports/daily
pub async fn daily_series(State(state): State<AppState>) -> Json<Vec<DailySeriesPoint>> {
    let ledger = state.ledger.read().await;
    Json(ledger.daily_series())
}

/// GET /api/reports/distribution?date=..; defaults to today
pub async fn distribution(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<DateQuery>,
) -> ApiResult<Json<Vec<DistributionEntry>>> {
    let date = query.date.as_deref().map(date_param).transpose()?.unwrap_or_else(time::today);
    let ledger = state.ledger.read().await;
    Ok(Json(ledger.account_distribution(date)))
}

/// GET /api/summary
pub async fn summary(State(state): State<AppState>) -> Json<LedgerSummary> {
    let ledger = state.ledger.read().await;
    Json(ledger.summary())
}
