use crate::error::{MediflowError, Result};
use crate::types::{badge_all, Badged, HasTone, TaskStatus, Tone};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTask {
    pub id: String,
    pub status: TaskStatus,
    pub step_order: i64,
    pub task_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, with = "crate::timestamp::option")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WorkflowTask {
    pub fn new(
        id: impl Into<String>,
        step_order: i64,
        task_name: impl Into<String>,
        status: TaskStatus,
    ) -> Self {
        Self {
            id: id.into(),
            status,
            step_order,
            task_name: task_name.into(),
            description: None,
            completed_at: None,
            notes: None,
        }
    }
}

impl HasTone for WorkflowTask {
    fn tone(&self) -> Tone {
        self.status.tone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientWorkflow {
    pub id: String,
    pub patient_id: String,
    pub workflow_id: String,
    pub status: TaskStatus,
    #[serde(with = "crate::timestamp")]
    pub assigned_at: DateTime<Utc>,
    #[serde(default, with = "crate::timestamp::option")]
    pub completed_at: Option<DateTime<Utc>>,
    pub patient_name: String,
    pub workflow_name: String,
    #[serde(default)]
    pub workflow_description: Option<String>,
    #[serde(default)]
    pub tasks: Vec<WorkflowTask>,
}

impl PatientWorkflow {
    pub fn progress(&self) -> f64 {
        compute_progress(&self.tasks)
    }

    pub fn display_tasks(&self) -> Vec<WorkflowTask> {
        order_for_display(&self.tasks)
    }

    pub fn view(&self) -> WorkflowView {
        WorkflowView {
            id: self.id.clone(),
            patient_id: self.patient_id.clone(),
            patient_name: self.patient_name.clone(),
            workflow_name: self.workflow_name.clone(),
            workflow_description: self.workflow_description.clone(),
            status: self.status.clone(),
            status_tone: self.status.tone(),
            assigned_at: self.assigned_at,
            completed_at: self.completed_at,
            progress: self.progress(),
            completed_tasks: completed_count(&self.tasks),
            total_tasks: self.tasks.len(),
            tasks: badge_all(self.display_tasks()),
        }
    }
}

/// A workflow as a dashboard shows it: progress computed, tasks in step order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowView {
    pub id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub workflow_name: String,
    pub workflow_description: Option<String>,
    pub status: TaskStatus,
    pub status_tone: Tone,
    pub assigned_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub progress: f64,
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub tasks: Vec<Badged<WorkflowTask>>,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Percentage of tasks whose status is exactly `completed`, in `[0, 100]`.
/// An empty task list is 0.
pub fn compute_progress(tasks: &[WorkflowTask]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    completed_count(tasks) as f64 / tasks.len() as f64 * 100.0
}

pub fn completed_count(tasks: &[WorkflowTask]) -> usize {
    tasks.iter().filter(|t| t.status.is_completed()).count()
}

/// Tasks sorted by ascending step order. Ties keep their input order.
pub fn order_for_display(tasks: &[WorkflowTask]) -> Vec<WorkflowTask> {
    let mut ordered = tasks.to_vec();
    ordered.sort_by_key(|t| t.step_order);
    ordered
}

/// "2/4 tasks"
pub fn progress_label(tasks: &[WorkflowTask]) -> String {
    format!("{}/{} tasks", completed_count(tasks), tasks.len())
}

pub fn find_workflow<'a>(workflows: &'a [PatientWorkflow], id: &str) -> Result<&'a PatientWorkflow> {
    workflows
        .iter()
        .find(|w| w.id == id)
        .ok_or_else(|| MediflowError::WorkflowNotFound(id.to_string()))
}

// ---------------------------------------------------------------------------
// Step order checks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepOrderWarning {
    Duplicate { step_order: i64, task_ids: Vec<String> },
    Negative { step_order: i64, task_id: String },
}

impl std::fmt::Display for StepOrderWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepOrderWarning::Duplicate {
                step_order,
                task_ids,
            } => write!(
                f,
                "step order {step_order} shared by tasks {}",
                task_ids.join(", ")
            ),
            StepOrderWarning::Negative {
                step_order,
                task_id,
            } => write!(f, "task {task_id} has negative step order {step_order}"),
        }
    }
}

/// Report duplicate and negative step orders. Nothing here rejects input:
/// duplicates display as a stable tie and negatives sort first.
pub fn check_step_orders(tasks: &[WorkflowTask]) -> Vec<StepOrderWarning> {
    let mut warnings = Vec::new();

    let mut by_order: HashMap<i64, Vec<String>> = HashMap::new();
    for task in tasks {
        by_order
            .entry(task.step_order)
            .or_default()
            .push(task.id.clone());
        if task.step_order < 0 {
            warnings.push(StepOrderWarning::Negative {
                step_order: task.step_order,
                task_id: task.id.clone(),
            });
        }
    }

    let mut duplicates: Vec<(i64, Vec<String>)> = by_order
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .collect();
    duplicates.sort_by_key(|(order, _)| *order);
    warnings.extend(
        duplicates
            .into_iter()
            .map(|(step_order, task_ids)| StepOrderWarning::Duplicate {
                step_order,
                task_ids,
            }),
    );

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, status: &str, order: i64) -> WorkflowTask {
        WorkflowTask::new(id, order, format!("Task {id}"), TaskStatus::from(status))
    }

    fn ids(tasks: &[WorkflowTask]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn progress_of_mixed_tasks() {
        let tasks = vec![task("1", "pending", 2), task("2", "completed", 1)];
        assert_eq!(compute_progress(&tasks), 50.0);
        assert_eq!(ids(&order_for_display(&tasks)), ["2", "1"]);
    }

    #[test]
    fn empty_progress_is_zero() {
        assert_eq!(compute_progress(&[]), 0.0);
        assert_eq!(progress_label(&[]), "0/0 tasks");
    }

    #[test]
    fn progress_is_full_only_when_all_completed() {
        let done = vec![task("1", "completed", 1), task("2", "completed", 2)];
        assert_eq!(compute_progress(&done), 100.0);

        let almost = vec![task("1", "completed", 1), task("2", "cancelled", 2)];
        assert!(compute_progress(&almost) < 100.0);
    }

    #[test]
    fn progress_stays_in_range() {
        let statuses = ["pending", "in_progress", "completed", "cancelled", "on_hold"];
        for n in 0..statuses.len() {
            let tasks: Vec<WorkflowTask> = statuses[..=n]
                .iter()
                .enumerate()
                .map(|(i, s)| task(&i.to_string(), s, i as i64))
                .collect();
            let p = compute_progress(&tasks);
            assert!((0.0..=100.0).contains(&p), "{p} out of range");
        }
    }

    #[test]
    fn ordering_is_stable_for_ties() {
        let tasks = vec![
            task("a", "pending", 3),
            task("b", "pending", 1),
            task("c", "pending", 3),
            task("d", "pending", 1),
        ];
        assert_eq!(ids(&order_for_display(&tasks)), ["b", "d", "a", "c"]);
    }

    #[test]
    fn ordering_is_idempotent_and_pure() {
        let tasks = vec![task("a", "pending", 10), task("b", "completed", -2), task("c", "pending", 4)];
        let once = order_for_display(&tasks);
        assert_eq!(order_for_display(&once), once);
        assert_eq!(ids(&tasks), ["a", "b", "c"]);
        assert_eq!(ids(&once), ["b", "c", "a"]);
    }

    #[test]
    fn check_step_orders_reports_without_rejecting() {
        let tasks = vec![
            task("a", "pending", 1),
            task("b", "pending", -1),
            task("c", "pending", 1),
        ];
        let warnings = check_step_orders(&tasks);
        assert_eq!(
            warnings,
            vec![
                StepOrderWarning::Negative {
                    step_order: -1,
                    task_id: "b".to_string()
                },
                StepOrderWarning::Duplicate {
                    step_order: 1,
                    task_ids: vec!["a".to_string(), "c".to_string()]
                },
            ]
        );
        assert!(check_step_orders(&[task("x", "pending", 0)]).is_empty());
    }

    #[test]
    fn workflow_view_summarizes() {
        let wf = PatientWorkflow {
            id: "PW1".to_string(),
            patient_id: "P1".to_string(),
            workflow_id: "W1".to_string(),
            status: TaskStatus::InProgress,
            assigned_at: Utc::now(),
            completed_at: None,
            patient_name: "Sarah Johnson".to_string(),
            workflow_name: "Diabetes Management".to_string(),
            workflow_description: None,
            tasks: vec![
                task("t3", "pending", 3),
                task("t1", "completed", 1),
                task("t2", "completed", 2),
                task("t4", "pending", 4),
            ],
        };
        let view = wf.view();
        assert_eq!(view.progress, 50.0);
        assert_eq!(view.completed_tasks, 2);
        assert_eq!(view.total_tasks, 4);
        let ordered: Vec<&str> = view.tasks.iter().map(|t| t.item.id.as_str()).collect();
        assert_eq!(ordered, ["t1", "t2", "t3", "t4"]);
        assert_eq!(view.status_tone, Tone::Info);
        assert_eq!(view.tasks[0].tone, Tone::Success);
        assert_eq!(view.tasks[2].tone, Tone::Warning);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["statusTone"], "info");
        assert_eq!(json["tasks"][0]["id"], "t1");
        assert_eq!(json["tasks"][0]["tone"], "success");
        assert_eq!(ids(&wf.tasks)[0], "t3");
    }

    #[test]
    fn find_workflow_not_found() {
        assert!(matches!(
            find_workflow(&[], "PW9"),
            Err(MediflowError::WorkflowNotFound(_))
        ));
    }

    #[test]
    fn task_accepts_timestamp_without_offset() {
        let task: WorkflowTask = serde_json::from_str(
            r#"{"id":"t1","status":"completed","stepOrder":1,"taskName":"Review","description":null,"completedAt":"2025-09-18T11:30:00"}"#,
        )
        .unwrap();
        assert_eq!(
            task.completed_at.unwrap().to_rfc3339(),
            "2025-09-18T11:30:00+00:00"
        );

        let task: WorkflowTask = serde_json::from_str(
            r#"{"id":"t2","status":"pending","stepOrder":2,"taskName":"Follow up","completedAt":null}"#,
        )
        .unwrap();
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn task_rejects_unparseable_timestamp() {
        let err = serde_json::from_str::<WorkflowTask>(
            r#"{"id":"t1","status":"completed","stepOrder":1,"taskName":"Review","completedAt":"last tuesday"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid timestamp"), "{err}");
    }

    #[test]
    fn task_wire_shape_is_camel_case() {
        let json = serde_json::to_value(task("1", "in_progress", 2)).unwrap();
        assert_eq!(json["stepOrder"], 2);
        assert_eq!(json["taskName"], "Task 1");
        assert_eq!(json["status"], "in_progress");
        assert!(json["description"].is_null());
        assert!(json["completedAt"].is_null());
    }
}
