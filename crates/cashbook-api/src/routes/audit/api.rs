//! Audit log endpoints

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use cashbook_core::AuditEntry;

use crate::routes::acting_user;
use crate::error::ApiResult;
use crate::AppState;

/// GET /api/audit
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<AuditEntry>>> {
    let ledger = state.ledger.read().await;
    Ok(Json(ledger.audit_log().await?))
}

/// DELETE /api/audit
pub async fn clear(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<StatusCode> {
    let user = acting_user(&headers);
    let ledger = state.ledger.read().await;
    ledger.clear_audit(&user).await?;
    Ok(StatusCode::NO_CONTENT)
}
