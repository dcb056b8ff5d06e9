use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const MEDIFLOW_DIR: &str = ".mediflow";
pub const DATA_DIR: &str = ".mediflow/data";
pub const CONFIG_FILE: &str = ".mediflow/config.yaml";

pub const ALERTS_FILE: &str = "alerts.yaml";
pub const PATIENTS_FILE: &str = "patients.yaml";
pub const SNAPSHOTS_FILE: &str = "snapshots.yaml";
pub const RECORDS_FILE: &str = "medical_records.yaml";
pub const WORKFLOWS_FILE: &str = "patient_workflows.yaml";
pub const EVENTS_FILE: &str = "workflow_events.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR)
}

pub fn data_file(root: &Path, name: &str) -> PathBuf {
    data_dir(root).join(name)
}

pub fn is_initialized(root: &Path) -> bool {
    config_path(root).exists()
}
