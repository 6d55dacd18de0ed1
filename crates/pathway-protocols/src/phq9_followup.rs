//! Telehealth follow-up after an elevated PHQ-9.
//!
//! A PHQ-9 score of 10 or more warrants a follow-up visit within a week
//! unless a telehealth consultation is already scheduled or has happened
//! since the interview.

use pathway_engine::{
    ChangeType, EvaluationContext, FollowUpContext, Protocol, ProtocolMeta, ProtocolResult,
    ProtocolStatus, Recommendation, Result,
};
use pathway_patient::{ClinicalRecord, Filter, Interview};
use pathway_valuesets::{encounters, questionnaires};
use time::Duration;

pub struct Phq9Followup;

impl Phq9Followup {
    const ELEVATED_SCORE: f64 = 10.0;
    const FOLLOW_UP_DAYS: i64 = 7;
    /// SNOMED note type for a telehealth consultation.
    const TELEHEALTH_NOTE_TYPE: &'static str = "448337001";

    fn last_elevated_interview(&self, ctx: &EvaluationContext<'_>) -> Option<Interview> {
        ctx.patient
            .interviews
            .find(&questionnaires::PHQ9)
            .filtered(&Filter::new().gte("results.score", Self::ELEVATED_SCORE))
            .last()
            .cloned()
    }

    /// A telehealth visit already books or resolves the follow-up: one
    /// scheduled in the future, or one completed after the interview.
    fn followed_up(&self, ctx: &EvaluationContext<'_>, interview: &Interview) -> bool {
        let scheduled = ctx
            .patient
            .upcoming_appointments
            .find(&encounters::TELEHEALTH_CONSULTATION)
            .after(ctx.now)
            .iter()
            .any(|a| !a.is_cancelled());
        let since_interview = interview.canonical_date().unwrap_or(ctx.now);
        let completed = ctx
            .patient
            .appointments
            .find(&encounters::TELEHEALTH_CONSULTATION)
            .after(since_interview)
            .iter()
            .any(|a| !a.is_cancelled());
        scheduled || completed
    }
}

impl Protocol for Phq9Followup {
    fn meta(&self) -> ProtocolMeta {
        ProtocolMeta {
            title: "PHQ-9 Follow Up".into(),
            version: "2023-v1".into(),
            description: "Schedule a telehealth follow-up after an elevated PHQ-9 score.".into(),
            identifiers: vec!["PHQ9FollowUp".into()],
            types: vec!["DUO".into()],
            ..Default::default()
        }
    }

    fn compute_on_change_types(&self) -> Vec<ChangeType> {
        vec![ChangeType::Interview, ChangeType::Appointment]
    }

    fn in_initial_population(&self, ctx: &EvaluationContext<'_>) -> bool {
        self.last_elevated_interview(ctx).is_some()
    }

    fn in_numerator(&self, ctx: &EvaluationContext<'_>) -> bool {
        self.last_elevated_interview(ctx)
            .is_some_and(|interview| self.followed_up(ctx, &interview))
    }

    fn compute_results(&self, ctx: &EvaluationContext<'_>) -> Result<ProtocolResult> {
        let mut result = ProtocolResult::new();
        let first_name = ctx.patient.first_name();

        let Some(interview) = self.last_elevated_interview(ctx) else {
            result.add_narrative(format!("{first_name} has no elevated PHQ-9 score on file."));
            return Ok(result);
        };

        if self.followed_up(ctx, &interview) {
            result.set_status(ProtocolStatus::Satisfied)?;
            result.add_narrative(format!(
                "{first_name} has a telehealth follow-up for the elevated PHQ-9 score."
            ));
            return Ok(result);
        }

        let score = interview.score().unwrap_or(Self::ELEVATED_SCORE);
        result.set_status(ProtocolStatus::Due)?;
        result.set_due_in(-1);
        result.add_narrative(format!(
            "{first_name} has an elevated score of {score} on the PHQ-9 and no follow-up visit scheduled."
        ));
        result.add_recommendation(
            Recommendation::follow_up(
                "phq9-follow-up",
                1,
                FollowUpContext {
                    requested_date: Some((ctx.now + Duration::days(Self::FOLLOW_UP_DAYS)).date()),
                    requested_note_type: Some(Self::TELEHEALTH_NOTE_TYPE.into()),
                    reason_for_visit: Some("Follow Up Visit".into()),
                    ..Default::default()
                },
            )
            .with_title("Request a telehealth follow-up visit"),
        )?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathway_core::Coding;
    use pathway_engine::RecommendationPayload;
    use pathway_patient::{
        Appointment, PatientSnapshot, RecordCollection,
        records::{AppointmentNoteType, InterviewResult},
    };
    use time::macros::{date, datetime};
    use time::OffsetDateTime;

    const NOW: OffsetDateTime = datetime!(2023-06-15 12:00 UTC);

    fn phq9(id: &str, score: f64, when: OffsetDateTime) -> Interview {
        Interview {
            id: id.into(),
            coding: vec![Coding::new("LOINC", "44249-1")],
            results: vec![InterviewResult {
                score: Some(score),
                narrative: None,
            }],
            note_timestamp: Some(when),
            ..Default::default()
        }
    }

    fn telehealth(id: &str, start: OffsetDateTime, status: &str) -> Appointment {
        Appointment {
            id: id.into(),
            start_time: Some(start),
            status: Some(status.into()),
            note_type: Some(AppointmentNoteType {
                code: Some("448337001".into()),
                system: Some("SNOMEDCT".into()),
            }),
            ..Default::default()
        }
    }

    fn patient_with_score(score: f64) -> PatientSnapshot {
        let mut patient = PatientSnapshot::default();
        patient.patient.first_name = Some("Ada".into());
        patient.interviews =
            RecordCollection::new(vec![phq9("i1", score, datetime!(2023-06-01 10:00 UTC))]);
        patient
    }

    #[test]
    fn test_elevated_score_is_due() {
        let patient = patient_with_score(12.0);
        let ctx = EvaluationContext::new(&patient, NOW);
        let result = Phq9Followup.compute_results(&ctx).unwrap();
        assert_eq!(result.status(), ProtocolStatus::Due);
        assert_eq!(result.due_in(), Some(-1));
        assert!(result.narrative().contains("elevated score"));

        let recommendations = result.recommendations();
        assert_eq!(recommendations.len(), 1);
        let RecommendationPayload::FollowUp { context } = &recommendations[0].payload else {
            panic!("expected a follow-up payload");
        };
        assert_eq!(context.requested_date, Some(date!(2023 - 06 - 22)));
        assert_eq!(context.requested_note_type.as_deref(), Some("448337001"));
        assert_eq!(context.reason_for_visit.as_deref(), Some("Follow Up Visit"));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let patient = patient_with_score(10.0);
        let ctx = EvaluationContext::new(&patient, NOW);
        let result = Phq9Followup.compute_results(&ctx).unwrap();
        assert_eq!(result.status(), ProtocolStatus::Due);
    }

    #[test]
    fn test_low_score_not_applicable() {
        let patient = patient_with_score(6.0);
        let ctx = EvaluationContext::new(&patient, NOW);
        let result = Phq9Followup.compute_results(&ctx).unwrap();
        assert_eq!(result.status(), ProtocolStatus::NotApplicable);
        assert!(result.recommendations().is_empty());
    }

    #[test]
    fn test_scheduled_telehealth_satisfies() {
        let mut patient = patient_with_score(12.0);
        patient.upcoming_appointments = RecordCollection::new(vec![telehealth(
            "a1",
            datetime!(2023-06-20 9:00 UTC),
            "unconfirmed",
        )]);
        let ctx = EvaluationContext::new(&patient, NOW);
        let result = Phq9Followup.compute_results(&ctx).unwrap();
        assert_eq!(result.status(), ProtocolStatus::Satisfied);
        assert!(result.recommendations().is_empty());
    }

    #[test]
    fn test_cancelled_telehealth_does_not_satisfy() {
        let mut patient = patient_with_score(12.0);
        patient.upcoming_appointments = RecordCollection::new(vec![telehealth(
            "a1",
            datetime!(2023-06-20 9:00 UTC),
            "cancelled",
        )]);
        let ctx = EvaluationContext::new(&patient, NOW);
        let result = Phq9Followup.compute_results(&ctx).unwrap();
        assert_eq!(result.status(), ProtocolStatus::Due);
    }

    #[test]
    fn test_completed_telehealth_after_interview_satisfies() {
        let mut patient = patient_with_score(12.0);
        patient.appointments = RecordCollection::new(vec![telehealth(
            "a1",
            datetime!(2023-06-10 9:00 UTC),
            "checked-in",
        )]);
        let ctx = EvaluationContext::new(&patient, NOW);
        let result = Phq9Followup.compute_results(&ctx).unwrap();
        assert_eq!(result.status(), ProtocolStatus::Satisfied);
    }

    #[test]
    fn test_telehealth_before_interview_does_not_satisfy() {
        let mut patient = patient_with_score(12.0);
        patient.appointments = RecordCollection::new(vec![telehealth(
            "a1",
            datetime!(2023-05-01 9:00 UTC),
            "checked-in",
        )]);
        let ctx = EvaluationContext::new(&patient, NOW);
        let result = Phq9Followup.compute_results(&ctx).unwrap();
        assert_eq!(result.status(), ProtocolStatus::Due);
    }
}
