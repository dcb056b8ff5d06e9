use crate::error::{MediflowError, Result};
use crate::types::{HasTone, PatientStatus, Tone};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub profile_id: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub insurance_info: serde_json::Value,
    pub profile: Profile,
}

impl Patient {
    pub fn name(&self) -> String {
        self.profile.full_name()
    }

    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_on(self.date_of_birth, today)
    }
}

/// Whole years between `birth` and `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

pub fn find_patient<'a>(patients: &'a [Patient], id: &str) -> Result<&'a Patient> {
    patients
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| MediflowError::PatientNotFound(id.to_string()))
}

// ---------------------------------------------------------------------------
// PatientSnapshot
// ---------------------------------------------------------------------------

/// At-a-glance card for a patient under active monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSnapshot {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub condition: String,
    pub last_visit: String,
    pub status: PatientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glucose: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
}

/// Glucose above this (mg/dL) is flagged.
pub const GLUCOSE_HIGH: u32 = 140;
/// Cholesterol above this (mg/dL) is flagged.
pub const CHOLESTEROL_HIGH: u32 = 200;

impl PatientSnapshot {
    pub fn glucose_high(&self) -> bool {
        self.glucose.is_some_and(|g| g > GLUCOSE_HIGH)
    }

    pub fn cholesterol_high(&self) -> bool {
        self.cholesterol.is_some_and(|c| c > CHOLESTEROL_HIGH)
    }

    pub fn card(&self) -> SnapshotCard {
        let vital = |present: bool, high: bool, alarm: Tone| {
            present.then(|| if high { alarm } else { Tone::Success })
        };
        SnapshotCard {
            snapshot: self.clone(),
            tone: self.tone(),
            glucose_tone: vital(self.glucose.is_some(), self.glucose_high(), Tone::Destructive),
            cholesterol_tone: vital(
                self.cholesterol.is_some(),
                self.cholesterol_high(),
                Tone::Warning,
            ),
        }
    }
}

impl HasTone for PatientSnapshot {
    fn tone(&self) -> Tone {
        self.status.tone()
    }
}

/// A snapshot with the tones of its status badge and of each reported vital.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotCard {
    #[serde(flatten)]
    pub snapshot: PatientSnapshot,
    pub tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glucose_tone: Option<Tone>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol_tone: Option<Tone>,
}
