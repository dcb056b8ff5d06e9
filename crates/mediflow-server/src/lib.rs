pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Events (SSE)
        .route("/api/events", get(routes::events::sse_events))
        // Overview
        .route("/api/stats", get(routes::stats::get_stats))
        .route("/api/refresh", post(routes::views::refresh))
        // Alerts
        .route("/api/alerts", get(routes::alerts::list_alerts))
        .route(
            "/api/alerts/{id}/acknowledge",
            post(routes::alerts::acknowledge_alert),
        )
        .route(
            "/api/alerts/{id}/dismiss",
            post(routes::alerts::dismiss_alert),
        )
        // Patients
        .route("/api/patients", get(routes::patients::list_patients))
        .route("/api/snapshots", get(routes::patients::list_snapshots))
        .route("/api/records", get(routes::records::list_records))
        // Workflows
        .route("/api/workflows", get(routes::workflows::list_workflows))
        .route("/api/workflows/{id}", get(routes::workflows::get_workflow))
        .route(
            "/api/orchestrator/events",
            get(routes::orchestrator::list_events),
        )
        // Config
        .route("/api/config", get(routes::config::get_config))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the dashboard API on a pre-bound listener.
///
/// The initial fetch of every view runs in the background, so the views
/// report `loading` until it lands.
pub async fn serve_on(
    app_state: AppState,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();

    let initial = app_state.clone();
    tokio::spawn(async move { initial.refresh().await });

    let app = build_router(app_state);

    tracing::info!("MediFlow dashboard listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
