//! Analytics report handler

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{audit_actor, AppError, AppState};
use feelspace_core::{parse_days, AnalyticsReport};

/// Query parameters for the analytics report
///
/// `days` is kept as a raw string so bad values fall back to the default
/// window instead of failing the request.
#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub days: Option<String>,
}

/// GET /api/analytics/:wallet?days= - Analytics report for a wallet
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    Path(wallet): Path<String>,
    Query(params): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsReport>, AppError> {
    let wallet = wallet.trim();
    if wallet.is_empty() {
        return Err(AppError::bad_request("wallet must not be empty"));
    }
    let days = parse_days(params.days.as_deref());

    let report = state.engine.report_for_wallet(&state.db, wallet, days)?;

    state.db.log_audit(
        &audit_actor(Some(wallet)),
        "report",
        Some("analytics"),
        None,
        Some(&format!(
            "days={}, logs={}, insights={}",
            days,
            report.total_logs,
            report.insights.len()
        )),
    )?;

    Ok(Json(report))
}
