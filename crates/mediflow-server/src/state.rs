use mediflow_core::alert::AlertBoard;
use mediflow_core::config::Config;
use mediflow_core::fetch::{DashboardViews, FetchSlot, ViewKind};
use mediflow_core::source::DataSource;
use mediflow_core::{workflow, MediflowError};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex, RwLock};

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub config: Arc<Config>,
    pub source: Arc<dyn DataSource>,
    pub alerts: Arc<RwLock<AlertBoard>>,
    pub views: Arc<Mutex<DashboardViews>>,
    pub event_tx: broadcast::Sender<()>,
}

impl AppState {
    pub fn new(root: PathBuf, config: Config, source: Arc<dyn DataSource>) -> Self {
        let board = match source.alerts() {
            Ok(alerts) => AlertBoard::new(alerts),
            Err(e) => {
                tracing::warn!(error = %e, "could not load alerts; starting with none");
                AlertBoard::default()
            }
        };
        let (tx, _) = broadcast::channel(64);
        Self {
            root,
            config: Arc::new(config),
            source,
            alerts: Arc::new(RwLock::new(board)),
            views: Arc::new(Mutex::new(DashboardViews::new())),
            event_tx: tx,
        }
    }

    /// Fetch every view once. Results that arrive after a newer refresh
    /// started, or after `close`, are discarded by the view's slot.
    pub async fn refresh(&self) {
        tokio::join!(
            self.load(ViewKind::Patients, |v| &mut v.patients, |s| s.patients()),
            self.load(ViewKind::Records, |v| &mut v.records, |s| s.medical_records(None)),
            self.load(ViewKind::Workflows, |v| &mut v.workflows, |s| {
                let workflows = s.patient_workflows()?;
                for wf in &workflows {
                    for warning in workflow::check_step_orders(&wf.tasks) {
                        tracing::warn!(workflow = %wf.id, "{warning}");
                    }
                }
                Ok(workflows)
            }),
        );
        let _ = self.event_tx.send(());
    }

    async fn load<T, F>(
        &self,
        kind: ViewKind,
        slot: fn(&mut DashboardViews) -> &mut FetchSlot<T>,
        fetch: F,
    ) where
        T: Send + 'static,
        F: FnOnce(&dyn DataSource) -> mediflow_core::Result<T> + Send + 'static,
    {
        let ticket = slot(&mut *self.views.lock().await).begin();
        let source = self.source.clone();
        let result = tokio::task::spawn_blocking(move || fetch(source.as_ref()))
            .await
            .unwrap_or_else(|e| Err(MediflowError::Backend(format!("fetch task failed: {e}"))));
        let applied = slot(&mut *self.views.lock().await).resolve(ticket, result);
        tracing::debug!(view = kind.as_str(), applied, "view fetch finished");
    }

    /// Tear down every view; in-flight fetches are ignored when they land.
    pub async fn close(&self) {
        self.views.lock().await.close_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediflow_core::source::FileSource;

    #[tokio::test]
    async fn closed_views_stay_loading() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = FileSource::new(dir.path());
        source
            .write_dataset(&mediflow_core::seed::dataset().unwrap())
            .unwrap();
        let state = AppState::new(
            dir.path().to_path_buf(),
            Config::new("test"),
            Arc::new(source),
        );
        state.close().await;
        state.refresh().await;

        let views = state.views.lock().await;
        assert!(views.patients.state().is_loading());
        assert!(views.workflows.state().is_loading());
    }

    #[tokio::test]
    async fn missing_data_dir_degrades_each_view() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = AppState::new(
            dir.path().to_path_buf(),
            Config::new("test"),
            Arc::new(FileSource::new(dir.path())),
        );
        assert!(state.alerts.read().await.is_empty());

        state.refresh().await;
        let views = state.views.lock().await;
        assert!(views.patients.state().error().unwrap().contains("not initialized"));
        assert!(views.records.state().error().is_some());
    }
}
