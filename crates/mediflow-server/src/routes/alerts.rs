use axum::extract::{Path, State};
use axum::Json;
use mediflow_core::alert::{AlertBoard, Notice};
use mediflow_core::types::badge_all;

use crate::state::AppState;

fn partitioned(board: &AlertBoard) -> serde_json::Value {
    serde_json::json!({
        "active": badge_all(board.unacknowledged()),
        "acknowledged": badge_all(board.acknowledged()),
    })
}

fn with_notice(board: &AlertBoard, notice: Notice) -> serde_json::Value {
    let mut body = partitioned(board);
    body["notice"] = serde_json::json!(notice);
    body
}

/// GET /api/alerts: alerts split into active and acknowledged, each in
/// stored order.
pub async fn list_alerts(State(app): State<AppState>) -> Json<serde_json::Value> {
    let board = app.alerts.read().await;
    Json(partitioned(&board))
}

/// POST /api/alerts/:id/acknowledge: unknown ids leave the board unchanged.
pub async fn acknowledge_alert(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Json<serde_json::Value> {
    let mut board = app.alerts.write().await;
    let (next, notice) = board.acknowledge(&id);
    *board = next;
    let _ = app.event_tx.send(());
    Json(with_notice(&board, notice))
}

/// POST /api/alerts/:id/dismiss: unknown ids leave the board unchanged.
pub async fn dismiss_alert(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Json<serde_json::Value> {
    let mut board = app.alerts.write().await;
    let (next, notice) = board.dismiss(&id);
    *board = next;
    let _ = app.event_tx.send(());
    Json(with_notice(&board, notice))
}
