//! Fixture-driven scenario tests, one per seed case.

use pathway_engine::{
    BannerIntent, ChangeEvent, ChangeType, EvaluationMode, ProtocolStatus, RecommendationPayload,
};
use pathway_protocols::{
    AppointmentReminder, BreastCancerScreening, EmergencyContactReview, Hba1cMonitoring,
    Phq9Followup,
};
use pathway_testing::Harness;
use std::path::PathBuf;
use time::OffsetDateTime;
use time::macros::{date, datetime};

const NOW: OffsetDateTime = datetime!(2023-06-15 12:00 UTC);

fn harness(case: &str) -> Harness {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(case);
    Harness::from_fixture_dir(dir, NOW).expect("fixture loads")
}

#[test]
fn screening_due_without_recent_mammogram() {
    let result = harness("s1_screening_due")
        .run(&BreastCancerScreening)
        .unwrap();

    assert_eq!(result.status(), ProtocolStatus::Due);
    assert_eq!(result.due_in(), Some(-1));
    assert!(result.narrative().starts_with("No relevant exams found."));

    let recommendations = result.recommendations();
    assert_eq!(recommendations.len(), 2);
    assert!(matches!(
        recommendations[0].payload,
        RecommendationPayload::Perform { .. }
    ));
    assert_eq!(recommendations[0].title, "Perform Mammography");
    assert!(matches!(
        recommendations[1].payload,
        RecommendationPayload::Instruct { .. }
    ));
    assert_eq!(recommendations[1].title, "Discuss Breast Cancer Screening");
}

#[test]
fn screening_satisfied_by_mammogram_ten_months_ago() {
    let result = harness("s2_screening_satisfied")
        .run(&BreastCancerScreening)
        .unwrap();

    assert_eq!(result.status(), ProtocolStatus::Satisfied);
    // 27 months after the 2022-08-15 exam.
    assert_eq!(
        result.due_in(),
        Some((date!(2024 - 11 - 15) - NOW.date()).whole_days())
    );
    assert!(result.narrative().contains("had a mammography"));
    assert!(result.narrative().contains("August 15, 2022"));
    assert!(result.recommendations().is_empty());
}

#[test]
fn screening_not_applicable_for_male_patient() {
    let result = harness("s3_screening_male")
        .run(&BreastCancerScreening)
        .unwrap();

    assert_eq!(result.status(), ProtocolStatus::NotApplicable);
    assert!(result.due_in().is_none());
    assert!(result.recommendations().is_empty());
}

#[test]
fn elevated_phq9_requests_follow_up() {
    let result = harness("s4_phq9_followup").run(&Phq9Followup).unwrap();

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
fn appointment_created_event_emits_reminder_task() {
    let event = ChangeEvent::change(ChangeType::Appointment, "appointment")
        .with_created()
        .with_canvas_id("appt-42");
    let harness = harness("s5_appointment_reminder").with_event(event);
    let result = harness.run(&AppointmentReminder).unwrap();

    assert_eq!(result.status(), ProtocolStatus::NotApplicable);
    assert_eq!(result.recommendation_count(), 0);

    let tasks = harness.created_tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(
        tasks[0].title,
        "Lin has an appointment on 2023-06-22. Please call to remind!"
    );
    assert_eq!(tasks[0].due, Some(datetime!(2023-06-19 14:30 UTC)));
    assert_eq!(tasks[0].assignee_identifier.as_deref(), Some("provider-7"));
    assert_eq!(tasks[0].labels, ["Urgent"]);
}

#[test]
fn elderly_patient_without_emergency_contacts_gets_banners() {
    let result = harness("s6_emergency_contacts")
        .run(&EmergencyContactReview)
        .unwrap();

    assert_eq!(result.status(), ProtocolStatus::Due);
    assert_eq!(result.due_in(), Some(-1));

    let recommendations = result.recommendations();
    assert_eq!(recommendations.len(), 2);
    for recommendation in &recommendations {
        let RecommendationPayload::BannerAlert { intent, .. } = &recommendation.payload else {
            panic!("expected banner alerts");
        };
        assert_eq!(*intent, BannerIntent::Alert);
        assert!(
            recommendation
                .narrative
                .contains("is 72 and has no emergency contacts listed")
        );
    }
}

#[test]
fn overdue_hba1c_orders_lab() {
    let result = harness("hba1c_overdue").run(&Hba1cMonitoring).unwrap();

    assert_eq!(result.status(), ProtocolStatus::Due);
    let recommendations = result.recommendations();
    assert_eq!(recommendations.len(), 1);
    assert!(matches!(
        recommendations[0].payload,
        RecommendationPayload::Lab { .. }
    ));
}

#[test]
fn report_mode_classifies_unseen_patients() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/s1_screening_due");
    let mut harness = Harness::from_fixture_dir(dir, NOW)
        .unwrap()
        .with_mode(EvaluationMode::Report);
    harness.patient.appointments = Default::default();

    let result = harness.run(&BreastCancerScreening).unwrap();
    assert_eq!(result.status(), ProtocolStatus::Due);
}
