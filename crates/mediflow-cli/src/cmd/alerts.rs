use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use mediflow_core::alert::{Alert, AlertBoard, Notice};
use mediflow_core::source::{DataSource, FileSource};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum AlertsSubcommand {
    /// List active and acknowledged alerts
    List,

    /// Mark an alert as acknowledged
    Ack {
        /// Alert id
        id: String,
    },

    /// Remove an alert
    Dismiss {
        /// Alert id
        id: String,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

// Alerts always live in the local data directory, whatever the backend.
pub fn run(root: &Path, subcmd: AlertsSubcommand, json: bool) -> anyhow::Result<()> {
    let source = FileSource::new(root);
    let board = AlertBoard::new(source.alerts().context("failed to load alerts")?);
    match subcmd {
        AlertsSubcommand::List => list(&board, json),
        AlertsSubcommand::Ack { id } => {
            let (next, notice) = board.acknowledge(&id);
            apply(&source, &board, next, notice, &id, json)
        }
        AlertsSubcommand::Dismiss { id } => {
            let (next, notice) = board.dismiss(&id);
            apply(&source, &board, next, notice, &id, json)
        }
    }
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

fn list(board: &AlertBoard, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&serde_json::json!({
            "active": board.unacknowledged(),
            "acknowledged": board.acknowledged(),
        }));
    }

    println!("Active alerts ({})", board.active_count());
    print_alerts(&board.unacknowledged());

    let acknowledged = board.acknowledged();
    if !acknowledged.is_empty() {
        println!("\nAcknowledged ({})", acknowledged.len());
        print_alerts(&acknowledged);
    }
    Ok(())
}

fn print_alerts(alerts: &[&Alert]) {
    let rows = alerts
        .iter()
        .map(|a| {
            vec![
                a.id.clone(),
                a.level.to_string(),
                a.title.clone(),
                a.patient_name.clone(),
                a.timestamp.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "LEVEL", "TITLE", "PATIENT", "WHEN"], rows);
}

// ---------------------------------------------------------------------------
// ack / dismiss
// ---------------------------------------------------------------------------

fn apply(
    source: &FileSource,
    before: &AlertBoard,
    next: AlertBoard,
    notice: Notice,
    id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let found = before.get(id).is_some();
    if next != *before {
        source
            .save_alerts(next.alerts())
            .context("failed to save alerts")?;
    }

    if json {
        return print_json(&serde_json::json!({
            "found": found,
            "notice": notice,
            "active": next.unacknowledged(),
            "acknowledged": next.acknowledged(),
        }));
    }

    if found {
        println!("{}: {}", notice.title, notice.description);
    } else {
        println!("No alert '{id}'; nothing changed.");
    }
    Ok(())
}
