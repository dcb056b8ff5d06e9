use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::MediflowError;

// ---------------------------------------------------------------------------
// Tone
// ---------------------------------------------------------------------------

/// Badge tone a presentation layer uses to colour a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Destructive,
    Warning,
    Info,
    Success,
    Secondary,
    Outline,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Destructive => "destructive",
            Tone::Warning => "warning",
            Tone::Info => "info",
            Tone::Success => "success",
            Tone::Secondary => "secondary",
            Tone::Outline => "outline",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything the dashboard draws with a status badge.
pub trait HasTone {
    fn tone(&self) -> Tone;
}

impl<T: HasTone + ?Sized> HasTone for &T {
    fn tone(&self) -> Tone {
        (**self).tone()
    }
}

/// An item serialized together with its badge tone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badged<T> {
    #[serde(flatten)]
    pub item: T,
    pub tone: Tone,
}

impl<T: HasTone> Badged<T> {
    pub fn new(item: T) -> Self {
        let tone = item.tone();
        Self { item, tone }
    }
}

/// Pair every item with its tone.
pub fn badge_all<T: HasTone>(items: impl IntoIterator<Item = T>) -> Vec<Badged<T>> {
    items.into_iter().map(Badged::new).collect()
}

/// Display label for a snake_case status: the first `_` becomes a space.
pub fn humanize(s: &str) -> String {
    s.replacen('_', " ", 1)
}

fn invalid(kind: &'static str, value: &str) -> MediflowError {
    MediflowError::InvalidValue {
        kind,
        value: value.to_string(),
    }
}

// ---------------------------------------------------------------------------
// AlertLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Critical,
    Warning,
    Info,
}

impl AlertLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Critical => "critical",
            AlertLevel::Warning => "warning",
            AlertLevel::Info => "info",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            AlertLevel::Critical => Tone::Destructive,
            AlertLevel::Warning => Tone::Warning,
            AlertLevel::Info => Tone::Info,
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AlertLevel {
    type Err = MediflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(AlertLevel::Critical),
            "warning" => Ok(AlertLevel::Warning),
            "info" => Ok(AlertLevel::Info),
            _ => Err(invalid("alert level", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Status of a workflow task or a whole patient workflow.
///
/// The set is open: the backend may hand us statuses we do not know about,
/// and those are carried through verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
    Other(String),
}

impl TaskStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
            TaskStatus::Other(s) => s,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Tone lookup is case-insensitive, unlike completion counting.
    pub fn tone(&self) -> Tone {
        match self.as_str().to_lowercase().as_str() {
            "completed" => Tone::Success,
            "in_progress" => Tone::Info,
            "pending" => Tone::Warning,
            "cancelled" => Tone::Destructive,
            _ => Tone::Secondary,
        }
    }

    pub fn label(&self) -> String {
        humanize(self.as_str())
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => TaskStatus::Pending,
            "in_progress" => TaskStatus::InProgress,
            "completed" => TaskStatus::Completed,
            "cancelled" => TaskStatus::Cancelled,
            _ => TaskStatus::Other(s),
        }
    }
}

impl From<&str> for TaskStatus {
    fn from(s: &str) -> Self {
        TaskStatus::from(s.to_string())
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PatientStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatientStatus {
    Critical,
    Warning,
    Stable,
    FollowUp,
}

impl PatientStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PatientStatus::Critical => "critical",
            PatientStatus::Warning => "warning",
            PatientStatus::Stable => "stable",
            PatientStatus::FollowUp => "follow-up",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            PatientStatus::Critical => Tone::Destructive,
            PatientStatus::Warning => Tone::Warning,
            PatientStatus::Stable => Tone::Success,
            PatientStatus::FollowUp => Tone::Info,
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RecordType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    LabResult,
    Diagnosis,
    Prescription,
    Consultation,
    Other(String),
}

impl RecordType {
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::LabResult => "lab_result",
            RecordType::Diagnosis => "diagnosis",
            RecordType::Prescription => "prescription",
            RecordType::Consultation => "consultation",
            RecordType::Other(s) => s,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            RecordType::LabResult => Tone::Info,
            RecordType::Diagnosis => Tone::Warning,
            RecordType::Prescription => Tone::Success,
            RecordType::Consultation => Tone::Secondary,
            RecordType::Other(_) => Tone::Outline,
        }
    }

    /// Badge label; an empty type reads as "General".
    pub fn label(&self) -> String {
        if self.as_str().is_empty() {
            "General".to_string()
        } else {
            humanize(self.as_str())
        }
    }
}

impl From<String> for RecordType {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "lab_result" => RecordType::LabResult,
            "diagnosis" => RecordType::Diagnosis,
            "prescription" => RecordType::Prescription,
            "consultation" => RecordType::Consultation,
            _ => RecordType::Other(s),
        }
    }
}

impl From<RecordType> for String {
    fn from(t: RecordType) -> Self {
        match t {
            RecordType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
