//! Call-ahead reminder tasks for newly booked appointments.
//!
//! Runs on appointment-created change events only. The reminder goes out
//! through the host-effects seam as a task for the scheduling provider;
//! the result stays `NotApplicable` and the recommendation queue stays
//! empty.

use pathway_engine::{
    ChangeType, EvaluationContext, HostTask, Protocol, ProtocolMeta, ProtocolResult, Result,
};
use pathway_patient::ClinicalRecord;
use time::Duration;
use tracing::debug;

pub struct AppointmentReminder;

impl AppointmentReminder {
    const REMINDER_LEAD_DAYS: i64 = 3;
}

impl Protocol for AppointmentReminder {
    fn meta(&self) -> ProtocolMeta {
        ProtocolMeta {
            title: "Appointment Reminder".into(),
            version: "2023-v1".into(),
            description: "Create a call-ahead task when an appointment is booked.".into(),
            identifiers: vec!["AppointmentReminder".into()],
            notification_only: true,
            ..Default::default()
        }
    }

    fn responds_to_event_types(&self) -> Vec<pathway_engine::EventType> {
        Vec::new()
    }

    fn compute_on_change_types(&self) -> Vec<ChangeType> {
        vec![ChangeType::Appointment]
    }

    fn compute_results(&self, ctx: &EvaluationContext<'_>) -> Result<ProtocolResult> {
        let result = ProtocolResult::new();

        let Some(changes) = &ctx.field_changes else {
            return Ok(result);
        };
        if !changes.created || changes.model_name != "appointment" {
            return Ok(result);
        }
        let Some(appointment_id) = changes.canvas_id.as_deref() else {
            return Ok(result);
        };

        let Some(appointment) = ctx
            .patient
            .upcoming_appointments
            .iter()
            .find(|a| a.id == appointment_id)
        else {
            debug!(appointment_id, "Created appointment not in snapshot; no reminder");
            return Ok(result);
        };
        let Some(start) = appointment.canonical_date() else {
            return Ok(result);
        };

        let provider_key = ctx
            .patient
            .upcoming_appointment_notes
            .iter()
            .find(|note| note.appointment_id.as_deref() == Some(appointment_id))
            .and_then(|note| note.provider_key.clone());

        ctx.effects.create_task(HostTask {
            title: format!(
                "{} has an appointment on {}. Please call to remind!",
                ctx.patient.first_name(),
                start.date()
            ),
            due: Some(start - Duration::days(Self::REMINDER_LEAD_DAYS)),
            assignee_identifier: provider_key,
            labels: vec!["Urgent".into()],
            patient_key: Some(ctx.patient.patient.key.clone()),
        });

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathway_engine::{ChangeEvent, ProtocolStatus};
    use pathway_patient::{
        Appointment, AppointmentNote, PatientSnapshot, RecordCollection,
    };
    use std::sync::Mutex;
    use time::OffsetDateTime;
    use time::macros::datetime;

    const NOW: OffsetDateTime = datetime!(2023-06-01 12:00 UTC);

    #[derive(Default)]
    struct Recording(Mutex<Vec<HostTask>>);

    impl pathway_engine::HostEffects for Recording {
        fn create_task(&self, task: HostTask) {
            self.0.lock().unwrap().push(task);
        }
    }

    fn booked_patient() -> PatientSnapshot {
        let mut patient = PatientSnapshot::default();
        patient.patient.key = "patient-1".into();
        patient.patient.first_name = Some("Ada".into());
        patient.upcoming_appointments = RecordCollection::new(vec![Appointment {
            id: "appt-42".into(),
            start_time: Some(datetime!(2023-06-22 14:30 UTC)),
            status: Some("unconfirmed".into()),
            ..Default::default()
        }]);
        patient.upcoming_appointment_notes = RecordCollection::new(vec![AppointmentNote {
            id: "note-1".into(),
            appointment_id: Some("appt-42".into()),
            provider_key: Some("provider-7".into()),
            datetime_of_service: Some(datetime!(2023-06-22 14:30 UTC)),
            ..Default::default()
        }]);
        patient
    }

    fn created_event() -> ChangeEvent {
        ChangeEvent::change(ChangeType::Appointment, "appointment")
            .with_created()
            .with_canvas_id("appt-42")
    }

    #[test]
    fn test_reminder_task_for_new_appointment() {
        let patient = booked_patient();
        let effects = Recording::default();
        let ctx = EvaluationContext::new(&patient, NOW)
            .with_field_changes(created_event().context())
            .with_effects(&effects);
        let result = AppointmentReminder.compute_results(&ctx).unwrap();

        assert_eq!(result.status(), ProtocolStatus::NotApplicable);
        assert_eq!(result.recommendation_count(), 0);

        let tasks = effects.0.lock().unwrap();
        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(
            task.title,
            "Ada has an appointment on 2023-06-22. Please call to remind!"
        );
        assert_eq!(task.due, Some(datetime!(2023-06-19 14:30 UTC)));
        assert_eq!(task.assignee_identifier.as_deref(), Some("provider-7"));
        assert_eq!(task.labels, ["Urgent"]);
        assert_eq!(task.patient_key.as_deref(), Some("patient-1"));
    }

    #[test]
    fn test_update_event_creates_no_task() {
        let patient = booked_patient();
        let effects = Recording::default();
        let event = ChangeEvent::change(ChangeType::Appointment, "appointment")
            .with_canvas_id("appt-42");
        let ctx = EvaluationContext::new(&patient, NOW)
            .with_field_changes(event.context())
            .with_effects(&effects);
        AppointmentReminder.compute_results(&ctx).unwrap();
        assert!(effects.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_appointment_creates_no_task() {
        let patient = booked_patient();
        let effects = Recording::default();
        let event = ChangeEvent::change(ChangeType::Appointment, "appointment")
            .with_created()
            .with_canvas_id("appt-999");
        let ctx = EvaluationContext::new(&patient, NOW)
            .with_field_changes(event.context())
            .with_effects(&effects);
        AppointmentReminder.compute_results(&ctx).unwrap();
        assert!(effects.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_missing_change_context_is_a_no_op() {
        let patient = booked_patient();
        let effects = Recording::default();
        let ctx = EvaluationContext::new(&patient, NOW).with_effects(&effects);
        let result = AppointmentReminder.compute_results(&ctx).unwrap();
        assert_eq!(result.status(), ProtocolStatus::NotApplicable);
        assert!(effects.0.lock().unwrap().is_empty());
    }
}
