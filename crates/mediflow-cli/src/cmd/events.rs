use crate::output::print_json;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let events = super::open_source(root)?.workflow_events()?;

    if json {
        let views: Vec<_> = events.iter().map(|e| e.view()).collect();
        return print_json(&views);
    }

    if events.is_empty() {
        println!("No orchestrator events.");
        return Ok(());
    }

    for (i, event) in events.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "[{}] {} ({}) {}",
            event.severity.as_str(),
            event.patient_name,
            event.created_at,
            event.id
        );
        println!("  {}", event.analysis.trim());
        let pending = event.pending_actions();
        if pending > 0 {
            println!("  {pending} action(s) pending");
        }
        for action in &event.actions {
            println!(
                "  - {} via {} [{}] {}",
                action.kind.label(),
                action.method.as_str(),
                action.status.as_str(),
                action.message
            );
        }
    }
    Ok(())
}
