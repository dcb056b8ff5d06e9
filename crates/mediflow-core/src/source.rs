use crate::alert::Alert;
use crate::config::{Backend, Config};
use crate::error::{MediflowError, Result};
use crate::orchestration::WorkflowEvent;
use crate::patient::{Patient, PatientSnapshot};
use crate::paths;
use crate::record::{self, MedicalRecord};
use crate::rest::RestSource;
use crate::workflow::PatientWorkflow;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// DataSource
// ---------------------------------------------------------------------------

/// Read access to the dashboard's upstream data. Rows come back already
/// joined with display fields; nothing here performs joins.
pub trait DataSource: Send + Sync {
    fn patients(&self) -> Result<Vec<Patient>>;

    /// Newest first, optionally restricted to one patient.
    fn medical_records(&self, patient_id: Option<&str>) -> Result<Vec<MedicalRecord>>;

    /// Most recently assigned first.
    fn patient_workflows(&self) -> Result<Vec<PatientWorkflow>>;

    fn alerts(&self) -> Result<Vec<Alert>>;

    fn patient_snapshots(&self) -> Result<Vec<PatientSnapshot>>;

    fn workflow_events(&self) -> Result<Vec<WorkflowEvent>>;
}

/// Build the source named by the config's `backend` section.
pub fn open(root: &Path, config: &Config) -> Result<Box<dyn DataSource>> {
    match &config.backend {
        Backend::File => Ok(Box::new(FileSource::new(root))),
        Backend::Rest {
            url,
            api_key_env,
            schema,
        } => {
            let key = std::env::var(api_key_env)
                .map_err(|_| MediflowError::MissingEnv(api_key_env.clone()))?;
            let source = RestSource::new(url, key, schema.clone(), FileSource::new(root))?;
            Ok(Box::new(source))
        }
    }
}

pub(crate) fn newest_workflows_first(workflows: &mut [PatientWorkflow]) {
    workflows.sort_by(|a, b| b.assigned_at.cmp(&a.assigned_at));
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Every collection the dashboard shows, as stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub snapshots: Vec<PatientSnapshot>,
    #[serde(default)]
    pub records: Vec<MedicalRecord>,
    #[serde(default)]
    pub workflows: Vec<PatientWorkflow>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub events: Vec<WorkflowEvent>,
}

// ---------------------------------------------------------------------------
// FileSource
// ---------------------------------------------------------------------------

/// YAML files under `.mediflow/data/`, one per collection.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        if !paths::data_dir(&self.root).is_dir() {
            return Err(MediflowError::NotInitialized);
        }
        let path = paths::data_file(&self.root, file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = std::fs::read_to_string(&path)?;
        let items: Option<Vec<T>> = serde_yaml::from_str(&data)?;
        Ok(items.unwrap_or_default())
    }

    fn write<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        let path = paths::data_file(&self.root, file);
        let data = serde_yaml::to_string(items)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Write every collection of `data`, replacing what is there.
    pub fn write_dataset(&self, data: &Dataset) -> Result<()> {
        self.write(paths::PATIENTS_FILE, &data.patients)?;
        self.write(paths::SNAPSHOTS_FILE, &data.snapshots)?;
        self.write(paths::RECORDS_FILE, &data.records)?;
        self.write(paths::WORKFLOWS_FILE, &data.workflows)?;
        self.write(paths::ALERTS_FILE, &data.alerts)?;
        self.write(paths::EVENTS_FILE, &data.events)?;
        Ok(())
    }

    pub fn save_alerts(&self, alerts: &[Alert]) -> Result<()> {
        self.write(paths::ALERTS_FILE, alerts)
    }
}

impl DataSource for FileSource {
    fn patients(&self) -> Result<Vec<Patient>> {
        self.read(paths::PATIENTS_FILE)
    }

    fn medical_records(&self, patient_id: Option<&str>) -> Result<Vec<MedicalRecord>> {
        let records: Vec<MedicalRecord> = self.read(paths::RECORDS_FILE)?;
        Ok(record::select(&records, patient_id))
    }

    fn patient_workflows(&self) -> Result<Vec<PatientWorkflow>> {
        let mut workflows: Vec<PatientWorkflow> = self.read(paths::WORKFLOWS_FILE)?;
        newest_workflows_first(&mut workflows);
        Ok(workflows)
    }

    fn alerts(&self) -> Result<Vec<Alert>> {
        self.read(paths::ALERTS_FILE)
    }

    fn patient_snapshots(&self) -> Result<Vec<PatientSnapshot>> {
        self.read(paths::SNAPSHOTS_FILE)
    }

    fn workflow_events(&self) -> Result<Vec<WorkflowEvent>> {
        self.read(paths::EVENTS_FILE)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use tempfile::TempDir;

    fn seeded() -> (TempDir, FileSource) {
        let dir = TempDir::new().unwrap();
        let source = FileSource::new(dir.path());
        source.write_dataset(&seed::dataset().unwrap()).unwrap();
        (dir, source)
    }

    #[test]
    fn uninitialized_root_errors() {
        let dir = TempDir::new().unwrap();
        let source = FileSource::new(dir.path());
        assert!(matches!(
            source.patients(),
            Err(MediflowError::NotInitialized)
        ));
    }

    #[test]
    fn missing_collection_is_empty() {
        let (dir, source) = seeded();
        std::fs::remove_file(paths::data_file(dir.path(), paths::EVENTS_FILE)).unwrap();
        assert!(source.workflow_events().unwrap().is_empty());
    }

    #[test]
    fn workflows_are_newest_first() {
        let (_dir, source) = seeded();
        let ids: Vec<String> = source
            .patient_workflows()
            .unwrap()
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, ["pw-001", "pw-002", "pw-003"]);
    }

    #[test]
    fn records_filter_by_patient() {
        let (_dir, source) = seeded();
        let ids: Vec<String> = source
            .medical_records(Some("pat-001"))
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, ["rec-002", "rec-001"]);
        assert_eq!(source.medical_records(None).unwrap().len(), 4);
    }

    #[test]
    fn save_alerts_round_trips() {
        let (_dir, source) = seeded();
        let alerts = source.alerts().unwrap();
        let next = crate::alert::dismiss(&alerts, "A001");
        source.save_alerts(&next).unwrap();
        assert_eq!(source.alerts().unwrap(), next);
    }

    #[test]
    fn open_file_backend() {
        let (dir, _) = seeded();
        let config = Config::new("clinic");
        let source = open(dir.path(), &config).unwrap();
        assert_eq!(source.patients().unwrap().len(), 3);
    }

    #[test]
    fn open_rest_backend_requires_key() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::new("clinic");
        config.backend = Backend::Rest {
            url: "http://localhost:1".to_string(),
            api_key_env: "MEDIFLOW_TEST_MISSING_KEY".to_string(),
            schema: None,
        };
        assert!(matches!(
            open(dir.path(), &config),
            Err(MediflowError::MissingEnv(_))
        ));
    }
}
