//! Status and health score handlers

use axum::Json;
use myfinance_core::{score, FinancialSummary, HealthResult};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/status - Liveness check
pub async fn get_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /api/health/score - Score a financial summary
pub async fn score_health(Json(summary): Json<FinancialSummary>) -> Json<HealthResult> {
    let result = score(&summary);
    debug!(score = result.score, "Scored summary");
    Json(result)
}
