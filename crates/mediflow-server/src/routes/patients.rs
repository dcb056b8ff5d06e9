use axum::extract::State;
use axum::Json;
use mediflow_core::fetch::FetchState;
use mediflow_core::patient::{Patient, SnapshotCard};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientCard {
    #[serde(flatten)]
    pub patient: Patient,
    pub name: String,
    pub age: i32,
}

/// GET /api/patients: the patients view with each patient's current age.
pub async fn list_patients(State(app): State<AppState>) -> Json<FetchState<Vec<PatientCard>>> {
    let state = app.views.lock().await.patients.state().clone();
    let today = chrono::Local::now().date_naive();
    Json(state.map(|patients| {
        patients
            .into_iter()
            .map(|p| PatientCard {
                name: p.name(),
                age: p.age_on(today),
                patient: p,
            })
            .collect()
    }))
}

/// GET /api/snapshots: monitoring cards for patients under active watch,
/// with the status and vital tones.
pub async fn list_snapshots(
    State(app): State<AppState>,
) -> Result<Json<Vec<SnapshotCard>>, AppError> {
    let source = app.source.clone();
    let snapshots = tokio::task::spawn_blocking(move || source.patient_snapshots())
        .await
        .map_err(AppError::join)??;
    Ok(Json(snapshots.iter().map(|s| s.card()).collect()))
}
