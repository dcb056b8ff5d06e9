use crate::output::{or_dash, print_json, print_table};
use clap::Subcommand;
use mediflow_core::workflow::{self, PatientWorkflow, WorkflowView};
use std::path::Path;

#[derive(Subcommand)]
pub enum WorkflowsSubcommand {
    /// List patient workflows, most recently assigned first
    List,

    /// Show one workflow with its tasks in step order
    Show {
        /// Patient workflow id
        id: String,
    },
}

pub fn run(root: &Path, subcmd: WorkflowsSubcommand, json: bool) -> anyhow::Result<()> {
    let source = super::open_source(root)?;
    let workflows = source.patient_workflows()?;
    match subcmd {
        WorkflowsSubcommand::List => list(&workflows, json),
        WorkflowsSubcommand::Show { id } => show(&workflows, &id, json),
    }
}

fn list(workflows: &[PatientWorkflow], json: bool) -> anyhow::Result<()> {
    if json {
        let views: Vec<WorkflowView> = workflows.iter().map(|w| w.view()).collect();
        return print_json(&views);
    }

    if workflows.is_empty() {
        println!("No workflows assigned.");
        return Ok(());
    }

    let rows = workflows
        .iter()
        .map(|w| {
            vec![
                w.id.clone(),
                w.patient_name.clone(),
                w.workflow_name.clone(),
                w.status.label(),
                format!("{:.0}%", w.progress()),
                workflow::progress_label(&w.tasks),
            ]
        })
        .collect();
    print_table(
        &["ID", "PATIENT", "WORKFLOW", "STATUS", "PROGRESS", "TASKS"],
        rows,
    );
    Ok(())
}

fn show(workflows: &[PatientWorkflow], id: &str, json: bool) -> anyhow::Result<()> {
    let wf = workflow::find_workflow(workflows, id)?;
    for warning in workflow::check_step_orders(&wf.tasks) {
        tracing::warn!(workflow = %wf.id, "{warning}");
    }

    if json {
        return print_json(&wf.view());
    }

    println!("{} for {}", wf.workflow_name, wf.patient_name);
    if let Some(desc) = &wf.workflow_description {
        println!("{desc}");
    }
    println!("Status:    {}", wf.status.label());
    println!("Assigned:  {}", wf.assigned_at.format("%Y-%m-%d"));
    if let Some(done) = wf.completed_at {
        println!("Completed: {}", done.format("%Y-%m-%d"));
    }
    println!(
        "Progress:  {:.0}% ({})",
        wf.progress(),
        workflow::progress_label(&wf.tasks)
    );

    let tasks = wf.display_tasks();
    if tasks.is_empty() {
        println!("\nNo tasks.");
        return Ok(());
    }

    println!();
    let rows = tasks
        .iter()
        .map(|t| {
            vec![
                t.step_order.to_string(),
                t.task_name.clone(),
                t.status.as_str().to_string(),
                or_dash(t.completed_at.map(|c| c.format("%Y-%m-%d %H:%M"))),
            ]
        })
        .collect();
    print_table(&["STEP", "TASK", "STATUS", "COMPLETED"], rows);
    Ok(())
}
