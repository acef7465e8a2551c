use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::chat::ChatMessage;
use crate::state::AppState;

use super::SessionSnapshot;

#[derive(Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Serialize)]
struct ProfileExport<'a> {
    exported_at: chrono::DateTime<Utc>,
    #[serde(flatten)]
    snapshot: SessionSnapshot<'a>,
    chat: &'a [ChatMessage],
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionCreated>) {
    let session_id = state.sessions.create().await;
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = state.session(id).await?;
    let session = session.lock().await;
    let snapshot = serde_json::to_value(session.snapshot()).map_err(anyhow::Error::from)?;
    Ok(Json(snapshot))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::session_not_found(id))
    }
}

/// GET /api/v1/sessions/:id/export
pub async fn handle_export_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let session = state.session(id).await?;
    let session = session.lock().await;
    let export = ProfileExport {
        exported_at: Utc::now(),
        snapshot: session.snapshot(),
        chat: session.chat(),
    };
    let body = serde_json::to_value(export).map_err(anyhow::Error::from)?;
    Ok(Json(body))
}
