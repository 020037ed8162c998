//! Game session and reward handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::ApiJson;
use crate::{audit_actor, clamp_limit, AppError, AppState};
use feelspace_core::models::{GameSession, NewGameSession};

/// Query parameters for listing game sessions
#[derive(Debug, Deserialize)]
pub struct ListGamesQuery {
    pub wallet: Option<String>,
    pub limit: Option<i64>,
}

/// Request body for confirming a reward
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRewardRequest {
    pub tx_hash: String,
}

/// POST /api/games - Record a played game session
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<NewGameSession>,
) -> Result<(StatusCode, Json<GameSession>), AppError> {
    let session = state.db.record_game_session(&req)?;

    state.db.log_audit(
        &audit_actor(Some(&session.wallet_address)),
        "create",
        Some("game_session"),
        Some(session.id),
        Some(&format!(
            "game={}, score={}, reward={}",
            session.game, session.score, session.reward_amount
        )),
    )?;

    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /api/games?wallet=&limit= - List a wallet's game sessions
pub async fn list_games(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListGamesQuery>,
) -> Result<Json<Vec<GameSession>>, AppError> {
    let wallet = params
        .wallet
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .ok_or_else(|| AppError::bad_request("wallet query parameter is required"))?;
    let limit = clamp_limit(params.limit);

    let sessions = state.db.list_game_sessions(wallet, limit)?;

    state.db.log_audit(
        &audit_actor(Some(wallet)),
        "list",
        Some("game_session"),
        None,
        Some(&format!("count={}", sessions.len())),
    )?;

    Ok(Json(sessions))
}

/// POST /api/games/:id/reward - Attach the on-chain transaction hash
pub async fn confirm_reward(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<ConfirmRewardRequest>,
) -> Result<Json<GameSession>, AppError> {
    let session = state.db.confirm_reward(id, &req.tx_hash)?;

    state.db.log_audit(
        &audit_actor(Some(&session.wallet_address)),
        "confirm_reward",
        Some("game_session"),
        Some(id),
        Some(&format!("tx_hash={}", req.tx_hash.trim())),
    )?;

    Ok(Json(session))
}
