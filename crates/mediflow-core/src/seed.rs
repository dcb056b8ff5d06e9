//! Demo dataset written by `mediflow init` and served until a real backend
//! is configured.

use crate::error::Result;
use crate::source::Dataset;

pub fn dataset() -> Result<Dataset> {
    Ok(serde_yaml::from_str(SEED_YAML)?)
}

const SEED_YAML: &str = r#"
snapshots:
  - id: P001
    name: Sarah Johnson
    age: 45
    condition: Type 2 Diabetes
    lastVisit: "2025-09-18"
    status: critical
    glucose: 285
    cholesterol: 180
    bloodPressure: 145/95
  - id: P002
    name: Michael Chen
    age: 62
    condition: Hypertension
    lastVisit: "2025-09-15"
    status: warning
    glucose: 110
    cholesterol: 245
    bloodPressure: 150/90
  - id: P003
    name: Emma Rodriguez
    age: 34
    condition: Annual Checkup
    lastVisit: "2025-09-19"
    status: stable
    glucose: 95
    cholesterol: 165
    bloodPressure: 120/80
  - id: P004
    name: David Thompson
    age: 58
    condition: Post-Surgery Follow-up
    lastVisit: "2025-09-10"
    status: follow-up
    bloodPressure: 125/82
  - id: P005
    name: Lisa Wang
    age: 41
    condition: Hyperlipidemia
    lastVisit: "2025-09-17"
    status: warning
    glucose: 105
    cholesterol: 285
    bloodPressure: 135/85
  - id: P006
    name: Robert Miller
    age: 67
    condition: Cardiac Monitoring
    lastVisit: "2025-09-19"
    status: stable
    glucose: 100
    cholesterol: 175
    bloodPressure: 118/75

alerts:
  - id: A001
    type: critical
    title: Critical Glucose Level
    message: >-
      Sarah Johnson's glucose level has reached 285 mg/dL, which is critically
      high and requires immediate medical intervention. Patient has been
      contacted and emergency appointment scheduled.
    patientName: Sarah Johnson
    timestamp: "8:30 AM"
    acknowledged: false
  - id: A002
    type: warning
    title: Elevated Cholesterol
    message: >-
      Lisa Wang's cholesterol level of 285 mg/dL indicates significant
      cardiovascular risk. Recommend immediate medication review and
      lifestyle intervention.
    patientName: Lisa Wang
    timestamp: "6:15 AM"
    acknowledged: false
  - id: A003
    type: info
    title: Medication Refill Due
    message: >-
      Michael Chen's blood pressure medication is due for refill in 3 days.
      Automatic refill request has been sent to pharmacy.
    patientName: Michael Chen
    timestamp: "Yesterday 4:22 PM"
    acknowledged: true
  - id: A004
    type: warning
    title: Missed Follow-up
    message: >-
      David Thompson missed his post-surgery follow-up appointment scheduled
      for September 18th. Rescheduling required.
    patientName: David Thompson
    timestamp: "2 hours ago"
    acknowledged: false

events:
  - id: WF001
    patientName: Sarah Johnson
    analysis: >-
      Patient glucose level critically high at 285 mg/dL. Immediate
      intervention required. Previous medications may need adjustment.
    severity: critical
    createdAt: "2025-09-20 08:30 AM"
    actions:
      - type: notify_doctor
        method: slack_api
        message: "CRITICAL: Sarah Johnson glucose 285 mg/dL - Immediate review needed"
        status: completed
        timestamp: "08:31 AM"
      - type: schedule_followup
        method: google_calendar
        message: Emergency consultation scheduled for Sarah Johnson
        date: "2025-09-20T14:00:00"
        status: completed
        timestamp: "08:32 AM"
      - type: notify_patient
        method: twilio_sms
        message: >-
          Urgent: Please come in for immediate glucose management.
          Appointment booked for 2PM today.
        status: completed
        timestamp: "08:33 AM"
  - id: WF002
    patientName: Michael Chen
    analysis: >-
      Cholesterol levels elevated at 245 mg/dL. Blood pressure trending
      upward. Recommend medication review and lifestyle counseling.
    severity: follow-up
    createdAt: "2025-09-20 07:45 AM"
    actions:
      - type: schedule_followup
        method: google_calendar
        message: Cholesterol management consultation for Michael Chen
        date: "2025-09-25T10:00:00"
        status: completed
        timestamp: "07:46 AM"
      - type: send_summary
        method: sendgrid_email
        message: Lab results and treatment recommendations sent to Dr. Martinez
        status: completed
        timestamp: "07:48 AM"
      - type: notify_patient
        method: twilio_sms
        message: >-
          Your recent lab results show elevated cholesterol. Follow-up
          scheduled for Sep 25th at 10 AM.
        status: pending
        timestamp: "07:50 AM"
  - id: WF003
    patientName: Lisa Wang
    analysis: >-
      Significantly elevated cholesterol at 285 mg/dL requires immediate
      attention. Consider statin therapy adjustment.
    severity: urgent
    createdAt: "2025-09-20 06:15 AM"
    actions:
      - type: notify_doctor
        method: ms_teams
        message: "Lisa Wang cholesterol 285 mg/dL - Medication review needed"
        status: completed
        timestamp: "06:16 AM"
      - type: schedule_followup
        method: google_calendar
        message: Urgent cardiology consultation for Lisa Wang
        date: "2025-09-22T09:00:00"
        status: completed
        timestamp: "06:18 AM"

patients:
  - id: pat-001
    profileId: prof-001
    dateOfBirth: "1980-03-12"
    gender: female
    address: 14 Elm Street, Springfield
    insuranceInfo:
      provider: BlueCross
      memberId: BC-448812
    profile:
      firstName: Sarah
      lastName: Johnson
      email: sarah.johnson@example.com
      phoneNumber: "+1 555 0101"
      role: patient
  - id: pat-002
    profileId: prof-002
    dateOfBirth: "1963-07-02"
    gender: male
    address: 220 Oak Avenue, Springfield
    insuranceInfo:
      provider: Medicare
    profile:
      firstName: Michael
      lastName: Chen
      email: michael.chen@example.com
      phoneNumber: "+1 555 0102"
      role: patient
  - id: pat-003
    profileId: prof-003
    dateOfBirth: "1967-11-23"
    gender: male
    profile:
      firstName: David
      lastName: Thompson
      role: patient

records:
  - id: rec-001
    patientId: pat-001
    providerId: prov-001
    recordType: lab_result
    content:
      glucose_mg_dl: 285
      hba1c_percent: 9.1
    createdAt: "2025-09-18T09:30:00Z"
    patientName: Sarah Johnson
    provider:
      name: Ana Martinez
      specialty: Endocrinology
  - id: rec-002
    patientId: pat-001
    providerId: prov-001
    recordType: prescription
    content: Metformin 1000 mg twice daily
    createdAt: "2025-09-18T10:05:00Z"
    patientName: Sarah Johnson
    provider:
      name: Ana Martinez
      specialty: Endocrinology
  - id: rec-003
    patientId: pat-002
    providerId: prov-002
    recordType: diagnosis
    content: Stage 2 hypertension
    createdAt: "2025-09-15T14:20:00Z"
    patientName: Michael Chen
    provider:
      name: James Okafor
      specialty: Cardiology
  - id: rec-004
    patientId: pat-003
    providerId: prov-003
    recordType: consultation
    content:
      summary: Post-operative review, incision healing well
    createdAt: "2025-09-10T11:00:00Z"
    patientName: David Thompson
    provider:
      name: Priya Nair
      specialty: General Surgery

workflows:
  - id: pw-001
    patientId: pat-001
    workflowId: wf-diabetes
    status: in_progress
    assignedAt: "2025-09-18T11:00:00Z"
    patientName: Sarah Johnson
    workflowName: Diabetes Management
    workflowDescription: Stabilise blood glucose and adjust medication
    tasks:
      - id: pwt-004
        status: pending
        stepOrder: 4
        taskName: Schedule follow-up
        description: Book a review in two weeks
      - id: pwt-001
        status: completed
        stepOrder: 1
        taskName: Review lab results
        completedAt: "2025-09-18T11:30:00Z"
      - id: pwt-002
        status: completed
        stepOrder: 2
        taskName: Adjust medication
        description: Increase metformin dose
        completedAt: "2025-09-18T12:10:00Z"
      - id: pwt-003
        status: in_progress
        stepOrder: 3
        taskName: Patient education
  - id: pw-002
    patientId: pat-002
    workflowId: wf-hypertension
    status: completed
    assignedAt: "2025-09-15T15:00:00Z"
    completedAt: "2025-09-17T09:00:00Z"
    patientName: Michael Chen
    workflowName: Hypertension Follow-up
    tasks:
      - id: pwt-101
        status: completed
        stepOrder: 1
        taskName: Blood pressure check
        completedAt: "2025-09-15T15:30:00Z"
      - id: pwt-102
        status: completed
        stepOrder: 2
        taskName: Medication review
        completedAt: "2025-09-17T09:00:00Z"
  - id: pw-003
    patientId: pat-003
    workflowId: wf-post-surgery
    status: pending
    assignedAt: "2025-09-10T12:00:00Z"
    patientName: David Thompson
    workflowName: Post-Surgery Recovery
    workflowDescription: Monitor recovery after surgery
    tasks: []
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_parses() {
        let data = dataset().unwrap();
        assert_eq!(data.snapshots.len(), 6);
        assert_eq!(data.alerts.len(), 4);
        assert_eq!(data.events.len(), 3);
        assert_eq!(data.patients.len(), 3);
        assert_eq!(data.records.len(), 4);
        assert_eq!(data.workflows.len(), 3);
    }

    #[test]
    fn seed_workflow_progress() {
        let data = dataset().unwrap();
        let progress: Vec<f64> = data.workflows.iter().map(|w| w.progress()).collect();
        assert_eq!(progress, [50.0, 100.0, 0.0]);
    }
}
