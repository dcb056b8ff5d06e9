use crate::alert::Alert;
use crate::patient::PatientSnapshot;
use crate::types::PatientStatus;
use serde::Serialize;

/// Headline counters shown above the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub critical_patients: usize,
    pub follow_up_needed: usize,
    pub stable_patients: usize,
    pub active_alerts: usize,
}

impl DashboardStats {
    pub fn compute(snapshots: &[PatientSnapshot], alerts: &[Alert]) -> Self {
        let count = |status: PatientStatus| snapshots.iter().filter(|p| p.status == status).count();
        Self {
            critical_patients: count(PatientStatus::Critical),
            // "Need follow-up" counts warning patients only.
            follow_up_needed: count(PatientStatus::Warning),
            stable_patients: count(PatientStatus::Stable),
            active_alerts: alerts.iter().filter(|a| !a.acknowledged).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    #[test]
    fn seed_stats() {
        let data = seed::dataset().unwrap();
        let stats = DashboardStats::compute(&data.snapshots, &data.alerts);
        assert_eq!(
            stats,
            DashboardStats {
                critical_patients: 1,
                follow_up_needed: 2,
                stable_patients: 2,
                active_alerts: 3,
            }
        );
    }

    #[test]
    fn empty_inputs() {
        let stats = DashboardStats::compute(&[], &[]);
        assert_eq!(stats.critical_patients, 0);
        assert_eq!(stats.active_alerts, 0);
    }
}
