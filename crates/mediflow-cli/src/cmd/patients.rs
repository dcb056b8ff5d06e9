use crate::output::{or_dash, print_json, print_table};
use clap::Subcommand;
use mediflow_core::patient::Patient;
use serde::Serialize;
use std::path::Path;

#[derive(Subcommand)]
pub enum PatientsSubcommand {
    /// List registered patients
    List,

    /// Monitoring cards for patients under active watch
    Snapshots,
}

pub fn run(root: &Path, subcmd: PatientsSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PatientsSubcommand::List => list(root, json),
        PatientsSubcommand::Snapshots => snapshots(root, json),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PatientRow<'a> {
    #[serde(flatten)]
    patient: &'a Patient,
    name: String,
    age: i32,
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let patients = super::open_source(root)?.patients()?;
    let today = chrono::Local::now().date_naive();

    if json {
        let rows: Vec<PatientRow> = patients
            .iter()
            .map(|p| PatientRow {
                patient: p,
                name: p.name(),
                age: p.age_on(today),
            })
            .collect();
        return print_json(&rows);
    }

    let rows = patients
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.name(),
                p.age_on(today).to_string(),
                p.gender.clone(),
                or_dash(p.profile.phone_number.as_deref()),
            ]
        })
        .collect();
    print_table(&["ID", "NAME", "AGE", "GENDER", "PHONE"], rows);
    Ok(())
}

fn snapshots(root: &Path, json: bool) -> anyhow::Result<()> {
    let snapshots = super::open_source(root)?.patient_snapshots()?;

    if json {
        let cards: Vec<_> = snapshots.iter().map(|s| s.card()).collect();
        return print_json(&cards);
    }

    let rows = snapshots
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                s.name.clone(),
                s.age.to_string(),
                s.condition.clone(),
                s.status.as_str().to_string(),
                s.last_visit.clone(),
                vital(s.glucose, s.glucose_high()),
                vital(s.cholesterol, s.cholesterol_high()),
                or_dash(s.blood_pressure.as_deref()),
            ]
        })
        .collect();
    print_table(
        &[
            "ID",
            "NAME",
            "AGE",
            "CONDITION",
            "STATUS",
            "LAST VISIT",
            "GLUCOSE",
            "CHOL",
            "BP",
        ],
        rows,
    );
    Ok(())
}

/// A vital reading, marked when it is over its threshold.
fn vital(value: Option<u32>, high: bool) -> String {
    match value {
        Some(v) if high => format!("{v} (high)"),
        other => or_dash(other),
    }
}
