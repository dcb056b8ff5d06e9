use crate::output::print_json;
use mediflow_core::alert::AlertBoard;
use mediflow_core::stats::DashboardStats;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let source = super::open_source(root)?;
    let snapshots = source.patient_snapshots()?;
    let board = AlertBoard::new(source.alerts()?);
    let stats = DashboardStats::compute(&snapshots, board.alerts());

    if json {
        return print_json(&stats);
    }

    println!("Critical patients:  {}", stats.critical_patients);
    println!("Need follow-up:     {}", stats.follow_up_needed);
    println!("Stable patients:    {}", stats.stable_patients);
    println!("Active alerts:      {}", stats.active_alerts);
    Ok(())
}
