use crate::types::{AlertLevel, HasTone, Tone};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
    pub patient_name: String,
    /// Display string, never parsed.
    pub timestamp: String,
    #[serde(default)]
    pub acknowledged: bool,
}

impl HasTone for Alert {
    fn tone(&self) -> Tone {
        self.level.tone()
    }
}

// ---------------------------------------------------------------------------
// Collection reducers (return a new Vec<Alert>)
// ---------------------------------------------------------------------------

/// Mark the alert with `id` as acknowledged. Unknown ids leave the
/// collection as it was.
pub fn acknowledge(alerts: &[Alert], id: &str) -> Vec<Alert> {
    alerts
        .iter()
        .map(|a| {
            if a.id == id {
                Alert {
                    acknowledged: true,
                    ..a.clone()
                }
            } else {
                a.clone()
            }
        })
        .collect()
}

/// Remove the alert with `id`. Unknown ids leave the collection as it was.
pub fn dismiss(alerts: &[Alert], id: &str) -> Vec<Alert> {
    alerts.iter().filter(|a| a.id != id).cloned().collect()
}

pub fn unacknowledged(alerts: &[Alert]) -> Vec<&Alert> {
    alerts.iter().filter(|a| !a.acknowledged).collect()
}

pub fn acknowledged(alerts: &[Alert]) -> Vec<&Alert> {
    alerts.iter().filter(|a| a.acknowledged).collect()
}

// ---------------------------------------------------------------------------
// Notice
// ---------------------------------------------------------------------------

/// Confirmation shown to the operator after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    fn acknowledged() -> Self {
        Self {
            title: "Alert Acknowledged".to_string(),
            description: "Alert has been marked as acknowledged.".to_string(),
        }
    }

    fn dismissed() -> Self {
        Self {
            title: "Alert Dismissed".to_string(),
            description: "Alert has been removed from the system.".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// AlertBoard
// ---------------------------------------------------------------------------

/// The alert collection owned by a presentation layer.
///
/// Mutations never edit in place; they hand back the next board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertBoard {
    alerts: Vec<Alert>,
}

impl AlertBoard {
    pub fn new(alerts: Vec<Alert>) -> Self {
        Self { alerts }
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn into_alerts(self) -> Vec<Alert> {
        self.alerts
    }

    pub fn get(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    pub fn acknowledge(&self, id: &str) -> (AlertBoard, Notice) {
        if self.get(id).is_none() {
            tracing::debug!(alert = id, "acknowledge: no such alert");
        } else {
            tracing::debug!(alert = id, "alert acknowledged");
        }
        (Self::new(acknowledge(&self.alerts, id)), Notice::acknowledged())
    }

    pub fn dismiss(&self, id: &str) -> (AlertBoard, Notice) {
        if self.get(id).is_none() {
            tracing::debug!(alert = id, "dismiss: no such alert");
        } else {
            tracing::debug!(alert = id, "alert dismissed");
        }
        (Self::new(dismiss(&self.alerts, id)), Notice::dismissed())
    }

    pub fn unacknowledged(&self) -> Vec<&Alert> {
        unacknowledged(&self.alerts)
    }

    pub fn acknowledged(&self) -> Vec<&Alert> {
        acknowledged(&self.alerts)
    }

    pub fn active_count(&self) -> usize {
        self.alerts.iter().filter(|a| !a.acknowledged).count()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(id: &str, acknowledged: bool) -> Alert {
        Alert {
            id: id.to_string(),
            level: AlertLevel::Warning,
            title: format!("Alert {id}"),
            message: "message".to_string(),
            patient_name: "Sarah Johnson".to_string(),
            timestamp: "8:30 AM".to_string(),
            acknowledged,
        }
    }

    #[test]
    fn acknowledge_then_dismiss() {
        let alerts = vec![alert("A1", false)];
        let acked = acknowledge(&alerts, "A1");
        assert_eq!(acked, vec![alert("A1", true)]);
        assert!(dismiss(&acked, "A1").is_empty());
    }

    #[test]
    fn acknowledge_keeps_order_and_others() {
        let alerts = vec![alert("A1", false), alert("A2", false), alert("A3", true)];
        let next = acknowledge(&alerts, "A2");
        let ids: Vec<&str> = next.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["A1", "A2", "A3"]);
        assert!(!next[0].acknowledged);
        assert!(next[1].acknowledged);
        assert!(next[2].acknowledged);
    }

    #[test]
    fn acknowledge_is_idempotent() {
        let alerts = vec![alert("A1", false), alert("A2", false)];
        let once = acknowledge(&alerts, "A1");
        let twice = acknowledge(&once, "A1");
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_ids_are_silent_noops() {
        let alerts = vec![alert("A1", false), alert("A2", true)];
        assert_eq!(acknowledge(&alerts, "nope"), alerts);
        assert_eq!(dismiss(&alerts, "nope"), alerts);
    }

    #[test]
    fn partitions_preserve_relative_order() {
        let alerts = vec![
            alert("A1", false),
            alert("A2", true),
            alert("A3", false),
            alert("A4", true),
        ];
        let active: Vec<&str> = unacknowledged(&alerts).iter().map(|a| a.id.as_str()).collect();
        let seen: Vec<&str> = acknowledged(&alerts).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(active, ["A1", "A3"]);
        assert_eq!(seen, ["A2", "A4"]);
    }

    #[test]
    fn board_returns_new_value_and_notice() {
        let board = AlertBoard::new(vec![alert("A1", false), alert("A2", false)]);
        let (next, notice) = board.acknowledge("A1");
        assert_eq!(notice.title, "Alert Acknowledged");
        assert_eq!(board.active_count(), 2);
        assert_eq!(next.active_count(), 1);

        let (next, notice) = next.dismiss("A2");
        assert_eq!(notice.title, "Alert Dismissed");
        assert_eq!(next.len(), 1);
        assert!(next.get("A1").unwrap().acknowledged);
    }

    #[test]
    fn alert_uses_camel_case_wire_shape() {
        let json = serde_json::to_value(alert("A1", false)).unwrap();
        assert_eq!(json["type"], "warning");
        assert_eq!(json["patientName"], "Sarah Johnson");
        assert_eq!(json["acknowledged"], false);
    }
}
