use axum::extract::State;
use axum::Json;
use mediflow_core::orchestration::EventView;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/orchestrator/events: the orchestrator log in stored order.
pub async fn list_events(
    State(app): State<AppState>,
) -> Result<Json<Vec<EventView>>, AppError> {
    let source = app.source.clone();
    let events = tokio::task::spawn_blocking(move || source.workflow_events())
        .await
        .map_err(AppError::join)??;
    Ok(Json(events.iter().map(|e| e.view()).collect()))
}
