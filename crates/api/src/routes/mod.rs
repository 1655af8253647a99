pub mod health;
pub mod scan;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /health        service liveness
/// /check-model   existence probe (GET, query modelId)
/// /start-scan    admit a scan (POST)
/// /scan-status   status projection (GET)
/// /clear-status  reset idle fields (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(health::router()).merge(scan::router())
}
