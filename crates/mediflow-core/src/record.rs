use crate::types::{HasTone, RecordType, Tone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub name: String,
    #[serde(default)]
    pub specialty: Option<String>,
}

impl Provider {
    /// "Dr. Ana Martinez (Endocrinology)"
    pub fn display(&self) -> String {
        match self.specialty.as_deref() {
            Some(s) if !s.is_empty() => format!("Dr. {} ({s})", self.name),
            _ => format!("Dr. {}", self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: String,
    pub patient_id: String,
    pub provider_id: String,
    pub record_type: RecordType,
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub provider: Option<Provider>,
}

impl HasTone for MedicalRecord {
    fn tone(&self) -> Tone {
        self.record_type.tone()
    }
}

impl MedicalRecord {
    /// Record body as text: strings verbatim, anything else pretty-printed.
    /// `None` when there is no content.
    pub fn content_text(&self) -> Option<String> {
        match &self.content {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => serde_json::to_string_pretty(other).ok(),
        }
    }
}

/// Records for one patient (or all, when `patient_id` is `None`), newest first.
pub fn select(records: &[MedicalRecord], patient_id: Option<&str>) -> Vec<MedicalRecord> {
    let mut out: Vec<MedicalRecord> = records
        .iter()
        .filter(|r| match patient_id {
            Some(id) => r.patient_id == id,
            None => true,
        })
        .cloned()
        .collect();
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    out
}
