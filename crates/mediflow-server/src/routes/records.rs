use axum::extract::{Query, State};
use axum::Json;
use mediflow_core::fetch::FetchState;
use mediflow_core::record::{self, MedicalRecord};
use mediflow_core::types::{badge_all, Badged};
use serde::Deserialize;

use crate::state::AppState;

#[derive(Deserialize)]
pub struct RecordsQuery {
    pub patient_id: Option<String>,
}

/// GET /api/records?patient_id=: medical records, newest first.
pub async fn list_records(
    State(app): State<AppState>,
    Query(query): Query<RecordsQuery>,
) -> Json<FetchState<Vec<Badged<MedicalRecord>>>> {
    let state = app.views.lock().await.records.state().clone();
    Json(state.map(|records| badge_all(record::select(&records, query.patient_id.as_deref()))))
}
