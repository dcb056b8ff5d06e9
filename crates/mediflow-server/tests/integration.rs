use axum::http::StatusCode;
use http_body_util::BodyExt;
use mediflow_core::config::Config;
use mediflow_core::source::FileSource;
use mediflow_server::{build_router, AppState};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Seed a data directory inside the temp dir and return a refreshed state.
async fn seeded_state(dir: &TempDir) -> AppState {
    let source = FileSource::new(dir.path());
    source
        .write_dataset(&mediflow_core::seed::dataset().unwrap())
        .unwrap();
    let state = AppState::new(
        dir.path().to_path_buf(),
        Config::new("test-clinic"),
        Arc::new(source),
    );
    state.refresh().await;
    state
}

/// Send a GET request via `oneshot` and return (status, parsed JSON body).
async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Send an empty POST via `oneshot` and return (status, parsed JSON body).
async fn post(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn ids(items: &serde_json::Value) -> Vec<&str> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn alerts_are_partitioned() {
    let dir = TempDir::new().unwrap();
    let app = build_router(seeded_state(&dir).await);

    let (status, body) = get(app, "/api/alerts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["active"]), ["A001", "A002", "A004"]);
    assert_eq!(ids(&body["acknowledged"]), ["A003"]);
    assert_eq!(body["active"][0]["tone"], "destructive");
    assert_eq!(body["active"][1]["tone"], "warning");
    assert_eq!(body["active"][0]["level"], "critical");
}

#[tokio::test]
async fn acknowledge_moves_alert_and_returns_notice() {
    let dir = TempDir::new().unwrap();
    let state = seeded_state(&dir).await;

    let (status, body) = post(build_router(state.clone()), "/api/alerts/A002/acknowledge").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"]["title"], "Alert Acknowledged");
    assert_eq!(ids(&body["active"]), ["A001", "A004"]);
    assert_eq!(ids(&body["acknowledged"]), ["A002", "A003"]);

    // The board is shared, so a later read sees the change.
    let (_, body) = get(build_router(state), "/api/stats").await;
    assert_eq!(body["activeAlerts"], 2);
}

#[tokio::test]
async fn dismiss_removes_alert() {
    let dir = TempDir::new().unwrap();
    let state = seeded_state(&dir).await;

    let (status, body) = post(build_router(state.clone()), "/api/alerts/A003/dismiss").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notice"]["title"], "Alert Dismissed");
    assert!(body["acknowledged"].as_array().unwrap().is_empty());
    assert_eq!(state.alerts.read().await.len(), 3);
}

#[tokio::test]
async fn unknown_alert_id_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let state = seeded_state(&dir).await;
    let before = state.alerts.read().await.clone();

    let (status, _) = post(build_router(state.clone()), "/api/alerts/NOPE/dismiss").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(*state.alerts.read().await, before);
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stats_count_snapshot_statuses() {
    let dir = TempDir::new().unwrap();
    let app = build_router(seeded_state(&dir).await);

    let (status, body) = get(app, "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["criticalPatients"], 1);
    assert_eq!(body["followUpNeeded"], 2);
    assert_eq!(body["stablePatients"], 2);
    assert_eq!(body["activeAlerts"], 3);
}

#[tokio::test]
async fn workflows_report_progress_and_ordered_tasks() {
    let dir = TempDir::new().unwrap();
    let app = build_router(seeded_state(&dir).await);

    let (status, body) = get(app, "/api/workflows").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    let data = &body["data"];
    assert_eq!(ids(data), ["pw-001", "pw-002", "pw-003"]);
    assert_eq!(data[0]["progress"], 50.0);
    assert_eq!(data[1]["progress"], 100.0);
    assert_eq!(data[2]["progress"], 0.0);
    assert_eq!(
        ids(&data[0]["tasks"]),
        ["pwt-001", "pwt-002", "pwt-003", "pwt-004"]
    );
    assert_eq!(data[0]["statusTone"], "info");
    assert_eq!(data[0]["tasks"][0]["tone"], "success");
    assert_eq!(data[0]["tasks"][0]["status"], "completed");
}

#[tokio::test]
async fn single_workflow_and_unknown_id() {
    let dir = TempDir::new().unwrap();
    let state = seeded_state(&dir).await;

    let (status, body) = get(build_router(state.clone()), "/api/workflows/pw-002").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["completedTasks"], 2);
    assert_eq!(body["data"]["totalTasks"], 2);

    let (status, body) = get(build_router(state), "/api/workflows/pw-999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("pw-999"));
}

#[tokio::test]
async fn records_filter_by_patient() {
    let dir = TempDir::new().unwrap();
    let state = seeded_state(&dir).await;

    let (_, body) = get(build_router(state.clone()), "/api/records").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 4);

    let (status, body) = get(build_router(state), "/api/records?patient_id=pat-001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body["data"]), ["rec-002", "rec-001"]);
    assert_eq!(body["data"][0]["tone"], "success");
    assert_eq!(body["data"][1]["tone"], "info");
}

#[tokio::test]
async fn patients_carry_name_and_age() {
    let dir = TempDir::new().unwrap();
    let app = build_router(seeded_state(&dir).await);

    let (status, body) = get(app, "/api/patients").await;
    assert_eq!(status, StatusCode::OK);
    let first = &body["data"][0];
    assert_eq!(first["name"], "Sarah Johnson");
    assert!(first["age"].as_i64().unwrap() >= 45);
}

#[tokio::test]
async fn snapshots_and_orchestrator_events() {
    let dir = TempDir::new().unwrap();
    let state = seeded_state(&dir).await;

    let (status, body) = get(build_router(state.clone()), "/api/snapshots").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 6);
    let first = &body[0];
    assert_eq!(first["id"], "P001");
    assert_eq!(first["tone"], "destructive");
    assert_eq!(first["glucoseTone"], "destructive");
    assert_eq!(first["cholesterolTone"], "success");
    assert_eq!(body[1]["cholesterolTone"], "warning");

    let (status, body) = get(build_router(state), "/api/orchestrator/events").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
    assert_eq!(body[0]["severityTone"], "destructive");
    assert_eq!(body[0]["pendingActions"], 0);
    assert_eq!(body[0]["actions"][0]["tone"], "success");
}

#[tokio::test]
async fn views_report_loading_before_first_refresh() {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(
        dir.path().to_path_buf(),
        Config::new("test-clinic"),
        Arc::new(FileSource::new(dir.path())),
    );

    let (status, body) = get(build_router(state), "/api/workflows").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "loading");
}

#[tokio::test]
async fn uninitialized_root_reports_error_state() {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(
        dir.path().to_path_buf(),
        Config::new("test-clinic"),
        Arc::new(FileSource::new(dir.path())),
    );

    let (status, body) = post(build_router(state.clone()), "/api/refresh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["refreshed"], true);

    let (_, body) = get(build_router(state.clone()), "/api/patients").await;
    assert_eq!(body["status"], "error");

    let (status, _) = get(build_router(state), "/api/snapshots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn config_endpoint_returns_config_and_warnings() {
    let dir = TempDir::new().unwrap();
    let app = build_router(seeded_state(&dir).await);

    let (status, body) = get(app, "/api/config").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["config"]["project"]["name"], "test-clinic");
    assert_eq!(body["config"]["backend"]["type"], "file");
    assert!(body["warnings"].as_array().unwrap().is_empty());
}
