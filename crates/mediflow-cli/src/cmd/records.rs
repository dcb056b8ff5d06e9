use crate::output::{or_dash, print_json, print_table};
use clap::Subcommand;
use mediflow_core::patient;
use std::path::Path;

const SUMMARY_WIDTH: usize = 48;

#[derive(Subcommand)]
pub enum RecordsSubcommand {
    /// List medical records, newest first
    List {
        /// Only records for this patient id
        #[arg(long)]
        patient: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: RecordsSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        RecordsSubcommand::List { patient } => list(root, patient.as_deref(), json),
    }
}

fn list(root: &Path, patient_id: Option<&str>, json: bool) -> anyhow::Result<()> {
    let source = super::open_source(root)?;
    let records = source.medical_records(patient_id)?;

    if json {
        return print_json(&records);
    }

    if let Some(id) = patient_id {
        let patients = source.patients()?;
        let patient = patient::find_patient(&patients, id)?;
        println!("Records for {} ({id})\n", patient.name());
    }

    if records.is_empty() {
        println!("No medical records.");
        return Ok(());
    }

    let rows = records
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.created_at.format("%Y-%m-%d %H:%M").to_string(),
                or_dash(r.patient_name.as_deref()),
                r.record_type.label(),
                or_dash(r.provider.as_ref().map(|p| p.display())),
                or_dash(r.content_text().map(|t| summary(&t))),
            ]
        })
        .collect();
    print_table(
        &["ID", "DATE", "PATIENT", "TYPE", "PROVIDER", "SUMMARY"],
        rows,
    );
    Ok(())
}

/// First line of the record body, cut to fit a table cell.
fn summary(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= SUMMARY_WIDTH {
        return line.to_string();
    }
    let cut: String = line.chars().take(SUMMARY_WIDTH - 3).collect();
    format!("{cut}...")
}
