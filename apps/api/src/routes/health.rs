use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skillgap-api",
        "job_records": state.market.len()
    }))
}

/// GET /api/v1/llm/status
/// Checks the model with a fixed echo prompt. A missing key reports unconfigured without a call.
pub async fn llm_status_handler(State(state): State<AppState>) -> Json<Value> {
    let configured = state.llm.is_configured();
    let reachable = configured && state.llm.test_connection().await;
    Json(json!({
        "model": state.llm.model(),
        "configured": configured,
        "reachable": reachable
    }))
}
