//! Wallet summary handler

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{audit_actor, AppError, AppState};
use feelspace_core::models::WalletSummary;

/// GET /api/wallets/:wallet/summary - Activity and reward totals
pub async fn get_wallet_summary(
    State(state): State<Arc<AppState>>,
    Path(wallet): Path<String>,
) -> Result<Json<WalletSummary>, AppError> {
    let summary = state.db.get_wallet_summary(&wallet)?;

    state.db.log_audit(
        &audit_actor(Some(&wallet)),
        "get",
        Some("wallet_summary"),
        None,
        None,
    )?;

    Ok(Json(summary))
}
