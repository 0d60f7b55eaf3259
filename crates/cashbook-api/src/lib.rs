//! JSON HTTP API for the cashbook ledger
//!
//! Routes are organized into modules:
//! - routes::days: day views, account create/update/edit/delete
//! - routes::range: range views and consistency checks
//! - routes::reports: history, chart series, distribution
//! - routes::audit: audit log

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post, put},
    Router,
};
use cashbook_config::Config;
use cashbook_core::Ledger;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::{ApiError, ApiResult};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<RwLock<Ledger>>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::{audit, days, range, reports};

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/summary", get(reports::summary))
        .route("/api/days", get(days::list_days))
        .route("/api/days/:date", get(days::get_day))
        .route("/api/days/:date/accounts", post(days::add_account))
        .route(
            "/api/days/:date/accounts/:index",
            put(days::update_account)
                .patch(days::edit_account)
                .delete(days::delete_account),
        )
        .route("/api/range", get(range::get_range))
        .route("/api/consistency", post(range::check_consistency))
        .route("/api/history", get(reports::balance_history))
        .route("/api/reports/daily", get(reports::daily_series))
        .route("/api/reports/distribution", get(reports::distribution))
        .route("/api/audit", get(audit::list).delete(audit::clear))
        .route("/api/refresh", post(api_refresh))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `ledger` - The shared ledger state
pub async fn start_server(config: Config, ledger: Arc<RwLock<Ledger>>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { ledger, config };
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!(target: "cashbook::api", "listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!(target: "cashbook::api", "server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!(target: "cashbook::api", "cannot listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Re-fetch the ledger; `changed` tells whether another user saved since
/// the last fetch
async fn api_refresh(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    let mut ledger = state.ledger.write().await;
    let changed = ledger.refresh().await?;
    Ok(Json(serde_json::json!({ "changed": changed })))
}
