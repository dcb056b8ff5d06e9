//! Client for a PostgREST-compatible backend.
//!
//! The backend stores patients, medical records and workflow assignments in
//! relational tables and returns them with their joins embedded. Alerts,
//! monitoring snapshots and orchestrator events are not hosted there and are
//! read from the local data directory instead.

use crate::alert::Alert;
use crate::error::{MediflowError, Result};
use crate::orchestration::WorkflowEvent;
use crate::patient::{Patient, PatientSnapshot, Profile};
use crate::record::{MedicalRecord, Provider};
use crate::source::{newest_workflows_first, DataSource, FileSource};
use crate::types::{RecordType, TaskStatus};
use crate::workflow::{PatientWorkflow, WorkflowTask};
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;

const PATIENTS_SELECT: &str = "*,profiles(first_name,last_name,email,phone_number,role)";
const RECORDS_SELECT: &str = "*,patients(profiles(first_name,last_name)),providers(profiles(first_name,last_name),specialty)";
const WORKFLOWS_SELECT: &str = "*,patients(profiles(first_name,last_name)),workflows(name,description),patient_workflow_tasks(id,status,completed_at,notes,workflow_tasks(task_name,description,step_order))";

pub struct RestSource {
    base_url: String,
    client: reqwest::blocking::Client,
    local: FileSource,
}

impl RestSource {
    pub fn new(
        url: &str,
        api_key: String,
        schema: Option<String>,
        local: FileSource,
    ) -> Result<Self> {
        let header = |v: &str| {
            HeaderValue::from_str(v)
                .map_err(|e| MediflowError::Backend(format!("invalid header value: {e}")))
        };
        let mut headers = HeaderMap::new();
        headers.insert("apikey", header(&api_key)?);
        headers.insert(AUTHORIZATION, header(&format!("Bearer {api_key}"))?);
        if let Some(schema) = schema.as_deref() {
            headers.insert("Accept-Profile", header(schema)?);
        }

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            client,
            local,
        })
    }

    fn get<T: DeserializeOwned>(&self, table: &str, query: &[(&str, String)]) -> Result<Vec<T>> {
        let url = format!("{}/rest/v1/{table}", self.base_url);
        tracing::debug!(%url, "querying backend");
        let resp = self.client.get(&url).query(query).send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or(body);
            return Err(MediflowError::Backend(format!("{table}: {status}: {message}")));
        }
        let rows: Option<Vec<T>> = resp.json()?;
        Ok(rows.unwrap_or_default())
    }
}

impl DataSource for RestSource {
    fn patients(&self) -> Result<Vec<Patient>> {
        let rows: Vec<PatientRow> =
            self.get("patients", &[("select", PATIENTS_SELECT.to_string())])?;
        Ok(rows.into_iter().map(Patient::from).collect())
    }

    fn medical_records(&self, patient_id: Option<&str>) -> Result<Vec<MedicalRecord>> {
        let mut query = vec![
            ("select", RECORDS_SELECT.to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        if let Some(id) = patient_id {
            query.push(("patient_id", format!("eq.{id}")));
        }
        let rows: Vec<RecordRow> = self.get("medical_records", &query)?;
        Ok(rows.into_iter().map(MedicalRecord::from).collect())
    }

    fn patient_workflows(&self) -> Result<Vec<PatientWorkflow>> {
        let rows: Vec<WorkflowRow> = self.get(
            "patient_workflows",
            &[
                ("select", WORKFLOWS_SELECT.to_string()),
                ("order", "assigned_at.desc".to_string()),
            ],
        )?;
        let mut workflows: Vec<PatientWorkflow> =
            rows.into_iter().map(PatientWorkflow::from).collect();
        newest_workflows_first(&mut workflows);
        Ok(workflows)
    }

    fn alerts(&self) -> Result<Vec<Alert>> {
        self.local.alerts()
    }

    fn patient_snapshots(&self) -> Result<Vec<PatientSnapshot>> {
        self.local.patient_snapshots()
    }

    fn workflow_events(&self) -> Result<Vec<WorkflowEvent>> {
        self.local.workflow_events()
    }
}

// ---------------------------------------------------------------------------
// Backend row shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ProfileRow {
    first_name: String,
    last_name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl ProfileRow {
    fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Deserialize)]
struct PatientRow {
    id: String,
    profile_id: String,
    date_of_birth: NaiveDate,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    insurance_info: serde_json::Value,
    profiles: ProfileRow,
}

impl From<PatientRow> for Patient {
    fn from(row: PatientRow) -> Self {
        Patient {
            id: row.id,
            profile_id: row.profile_id,
            date_of_birth: row.date_of_birth,
            gender: row.gender.unwrap_or_default(),
            address: row.address,
            insurance_info: row.insurance_info,
            profile: Profile {
                first_name: row.profiles.first_name,
                last_name: row.profiles.last_name,
                email: row.profiles.email,
                phone_number: row.profiles.phone_number,
                role: row.profiles.role,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct PatientJoin {
    profiles: Option<ProfileRow>,
}

#[derive(Debug, Deserialize)]
struct ProviderJoin {
    profiles: Option<ProfileRow>,
    #[serde(default)]
    specialty: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RecordRow {
    id: String,
    patient_id: String,
    provider_id: String,
    #[serde(default)]
    record_type: Option<String>,
    #[serde(default)]
    content: serde_json::Value,
    #[serde(with = "crate::timestamp")]
    created_at: DateTime<Utc>,
    #[serde(default)]
    patients: Option<PatientJoin>,
    #[serde(default)]
    providers: Option<ProviderJoin>,
}

impl From<RecordRow> for MedicalRecord {
    fn from(row: RecordRow) -> Self {
        let patient_name = row
            .patients
            .and_then(|p| p.profiles)
            .map(|p| p.full_name());
        let provider = row.providers.and_then(|p| {
            p.profiles.map(|profile| Provider {
                name: profile.full_name(),
                specialty: p.specialty,
            })
        });
        MedicalRecord {
            id: row.id,
            patient_id: row.patient_id,
            provider_id: row.provider_id,
            record_type: RecordType::from(row.record_type.unwrap_or_default()),
            content: row.content,
            created_at: row.created_at,
            patient_name,
            provider,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TemplateTaskRow {
    task_name: String,
    #[serde(default)]
    description: Option<String>,
    step_order: i64,
}

#[derive(Debug, Deserialize)]
struct TaskRow {
    id: String,
    status: String,
    #[serde(default, with = "crate::timestamp::option")]
    completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    notes: Option<String>,
    workflow_tasks: TemplateTaskRow,
}

#[derive(Debug, Deserialize)]
struct WorkflowTemplateJoin {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WorkflowRow {
    id: String,
    patient_id: String,
    workflow_id: String,
    status: String,
    #[serde(with = "crate::timestamp")]
    assigned_at: DateTime<Utc>,
    #[serde(default, with = "crate::timestamp::option")]
    completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    patients: Option<PatientJoin>,
    workflows: WorkflowTemplateJoin,
    #[serde(default)]
    patient_workflow_tasks: Vec<TaskRow>,
}

impl From<WorkflowRow> for PatientWorkflow {
    fn from(row: WorkflowRow) -> Self {
        let patient_name = row
            .patients
            .and_then(|p| p.profiles)
            .map(|p| p.full_name())
            .unwrap_or_default();
        let tasks = row
            .patient_workflow_tasks
            .into_iter()
            .map(|t| WorkflowTask {
                id: t.id,
                status: TaskStatus::from(t.status),
                step_order: t.workflow_tasks.step_order,
                task_name: t.workflow_tasks.task_name,
                description: t.workflow_tasks.description,
                completed_at: t.completed_at,
                notes: t.notes,
            })
            .collect();
        PatientWorkflow {
            id: row.id,
            patient_id: row.patient_id,
            workflow_id: row.workflow_id,
            status: TaskStatus::from(row.status),
            assigned_at: row.assigned_at,
            completed_at: row.completed_at,
            patient_name,
            workflow_name: row.workflows.name,
            workflow_description: row.workflows.description,
            tasks,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
