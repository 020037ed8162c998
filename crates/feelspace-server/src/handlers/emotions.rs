//! Emotion log handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::ApiJson;
use crate::{audit_actor, clamp_limit, AppError, AppState, SuccessResponse};
use feelspace_core::models::{EmotionLog, NewEmotionLog};

/// Query parameters for listing emotion logs
#[derive(Debug, Deserialize)]
pub struct ListEmotionsQuery {
    pub wallet: Option<String>,
    pub limit: Option<i64>,
}

/// POST /api/emotions - Record an emotion log
pub async fn create_emotion(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<NewEmotionLog>,
) -> Result<(StatusCode, Json<EmotionLog>), AppError> {
    let log = state.db.record_emotion(&req)?;

    state.db.log_audit(
        &audit_actor(Some(&log.wallet_address)),
        "create",
        Some("emotion_log"),
        Some(log.id),
        Some(&format!("emotion={}, intensity={}", log.emotion, log.intensity)),
    )?;

    Ok((StatusCode::CREATED, Json(log)))
}

/// GET /api/emotions?wallet=&limit= - List a wallet's logs, newest first
pub async fn list_emotions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListEmotionsQuery>,
) -> Result<Json<Vec<EmotionLog>>, AppError> {
    let wallet = params
        .wallet
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .ok_or_else(|| AppError::bad_request("wallet query parameter is required"))?;
    let limit = clamp_limit(params.limit);

    let logs = state.db.list_emotion_logs(wallet, limit)?;

    // Audit log - read access
    state.db.log_audit(
        &audit_actor(Some(wallet)),
        "list",
        Some("emotion_log"),
        None,
        Some(&format!("count={}", logs.len())),
    )?;

    Ok(Json(logs))
}

/// DELETE /api/emotions/:id - Delete a log
pub async fn delete_emotion(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    let log = state
        .db
        .get_emotion_log(id)?
        .ok_or_else(|| AppError::not_found(&format!("Emotion log {} not found", id)))?;

    state.db.delete_emotion_log(id)?;

    state.db.log_audit(
        &audit_actor(Some(&log.wallet_address)),
        "delete",
        Some("emotion_log"),
        Some(id),
        None,
    )?;

    Ok(Json(SuccessResponse { success: true }))
}
