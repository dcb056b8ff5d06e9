use axum::extract::State;
use axum::Json;

use crate::state::AppState;

/// POST /api/refresh: re-run every view fetch. Returns once all of them
/// have landed.
pub async fn refresh(State(app): State<AppState>) -> Json<serde_json::Value> {
    app.refresh().await;
    Json(serde_json::json!({ "refreshed": true }))
}
