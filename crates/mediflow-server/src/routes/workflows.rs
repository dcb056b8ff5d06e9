use axum::extract::{Path, State};
use axum::Json;
use mediflow_core::fetch::FetchState;
use mediflow_core::workflow::{self, WorkflowView};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/workflows: every patient workflow with its progress and tasks in
/// step order.
pub async fn list_workflows(State(app): State<AppState>) -> Json<FetchState<Vec<WorkflowView>>> {
    let state = app.views.lock().await.workflows.state().clone();
    Json(state.map(|workflows| workflows.iter().map(|w| w.view()).collect()))
}

/// GET /api/workflows/:id: one workflow. 404 once the view is ready and the
/// id is unknown.
pub async fn get_workflow(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FetchState<WorkflowView>>, AppError> {
    let state = app.views.lock().await.workflows.state().clone();
    let view = match state {
        FetchState::Ready { data } => FetchState::Ready {
            data: workflow::find_workflow(&data, &id)?.view(),
        },
        FetchState::Loading => FetchState::Loading,
        FetchState::Error { message } => FetchState::Error { message },
    };
    Ok(Json(view))
}
