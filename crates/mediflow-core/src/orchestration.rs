use crate::types::{badge_all, humanize, Badged, HasTone, Tone};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventSeverity {
    Routine,
    FollowUp,
    Urgent,
    Critical,
}

impl EventSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            EventSeverity::Routine => "routine",
            EventSeverity::FollowUp => "follow-up",
            EventSeverity::Urgent => "urgent",
            EventSeverity::Critical => "critical",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            EventSeverity::Critical => Tone::Destructive,
            EventSeverity::Urgent => Tone::Warning,
            EventSeverity::FollowUp => Tone::Info,
            EventSeverity::Routine => Tone::Success,
        }
    }
}

impl fmt::Display for EventSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    NotifyDoctor,
    ScheduleFollowup,
    NotifyPatient,
    SendSummary,
    Escalate,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::NotifyDoctor => "notify_doctor",
            ActionKind::ScheduleFollowup => "schedule_followup",
            ActionKind::NotifyPatient => "notify_patient",
            ActionKind::SendSummary => "send_summary",
            ActionKind::Escalate => "escalate",
        }
    }

    pub fn label(self) -> String {
        humanize(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionMethod {
    SlackApi,
    GoogleCalendar,
    TwilioSms,
    SendgridEmail,
    MsTeams,
}

impl ActionMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionMethod::SlackApi => "slack_api",
            ActionMethod::GoogleCalendar => "google_calendar",
            ActionMethod::TwilioSms => "twilio_sms",
            ActionMethod::SendgridEmail => "sendgrid_email",
            ActionMethod::MsTeams => "ms_teams",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Pending,
    Completed,
    Failed,
}

impl ActionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionStatus::Pending => "pending",
            ActionStatus::Completed => "completed",
            ActionStatus::Failed => "failed",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            ActionStatus::Completed => Tone::Success,
            ActionStatus::Failed => Tone::Destructive,
            ActionStatus::Pending => Tone::Warning,
        }
    }
}

// ---------------------------------------------------------------------------
// WorkflowEvent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub method: ActionMethod,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub status: ActionStatus,
    pub timestamp: String,
}

/// One entry in the orchestrator log. `analysis` is produced by an external
/// service and is shown as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEvent {
    pub id: String,
    pub patient_name: String,
    pub analysis: String,
    pub severity: EventSeverity,
    pub created_at: String,
    #[serde(default)]
    pub actions: Vec<WorkflowAction>,
}

impl WorkflowEvent {
    pub fn pending_actions(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| a.status == ActionStatus::Pending)
            .count()
    }

    pub fn view(&self) -> EventView {
        EventView {
            id: self.id.clone(),
            patient_name: self.patient_name.clone(),
            analysis: self.analysis.clone(),
            severity: self.severity,
            severity_tone: self.severity.tone(),
            created_at: self.created_at.clone(),
            pending_actions: self.pending_actions(),
            actions: badge_all(self.actions.iter().cloned()),
        }
    }
}

impl HasTone for WorkflowAction {
    fn tone(&self) -> Tone {
        self.status.tone()
    }
}

/// An event as the orchestrator panel shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub id: String,
    pub patient_name: String,
    pub analysis: String,
    pub severity: EventSeverity,
    pub severity_tone: Tone,
    pub created_at: String,
    pub pending_actions: usize,
    pub actions: Vec<Badged<WorkflowAction>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_parses_from_wire_shape() {
        let json = serde_json::json!({
            "id": "WF9",
            "patientName": "Lisa Wang",
            "analysis": "Cholesterol elevated.",
            "severity": "follow-up",
            "createdAt": "2025-09-20 06:15 AM",
            "actions": [
                {
                    "type": "schedule_followup",
                    "method": "google_calendar",
                    "message": "Consultation booked",
                    "date": "2025-09-22T09:00:00",
                    "status": "pending",
                    "timestamp": "06:18 AM"
                }
            ]
        });
        let event: WorkflowEvent = serde_json::from_value(json).unwrap();
        assert_eq!(event.severity, EventSeverity::FollowUp);
        assert_eq!(event.actions[0].kind, ActionKind::ScheduleFollowup);
        assert_eq!(event.actions[0].kind.label(), "schedule followup");
        assert_eq!(event.pending_actions(), 1);

        let view = event.view();
        assert_eq!(view.severity_tone, Tone::Info);
        assert_eq!(view.actions[0].tone, Tone::Warning);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["severityTone"], "info");
        assert_eq!(json["pendingActions"], 1);
        assert_eq!(json["actions"][0]["type"], "schedule_followup");
        assert_eq!(json["actions"][0]["tone"], "warning");
    }
}
