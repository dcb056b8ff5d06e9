use axum::extract::State;
use axum::Json;
use mediflow_core::stats::DashboardStats;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/stats: headline counters. Active alerts reflect the live board.
pub async fn get_stats(State(app): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let source = app.source.clone();
    let snapshots = tokio::task::spawn_blocking(move || source.patient_snapshots())
        .await
        .map_err(AppError::join)??;
    let board = app.alerts.read().await;
    Ok(Json(DashboardStats::compute(&snapshots, board.alerts())))
}
