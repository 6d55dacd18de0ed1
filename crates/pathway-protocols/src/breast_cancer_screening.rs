//! Breast cancer screening (CMS125-style).
//!
//! Women 51 to 74 with a qualifying visit in the measurement period are due
//! for a mammography every 27 months. Bilateral mastectomy and hospice care
//! exclude.

use pathway_core::narrative::format_long;
use pathway_core::time::add_months;
use pathway_core::{Shift, Timeframe};
use pathway_engine::{
    ChangeType, EvaluationContext, EvaluationMode, Protocol, ProtocolMeta, ProtocolResult,
    ProtocolStatus, Recommendation, Result,
};
use pathway_patient::{ClinicalRecord, CodedReport};
use pathway_valuesets::{ValueSet, encounters, instructions, procedures};
use std::sync::LazyLock;
use time::OffsetDateTime;

static QUALIFYING_VISIT: LazyLock<ValueSet> = LazyLock::new(|| {
    encounters::OFFICE_VISIT
        .union(&encounters::PREVENTIVE_CARE_SERVICES_ESTABLISHED)
        .union(&encounters::PREVENTIVE_CARE_SERVICES_INITIAL)
        .union(&encounters::ANNUAL_WELLNESS_VISIT)
        .union(&encounters::HOME_HEALTHCARE_SERVICES)
        .union(&encounters::TELEPHONE_VISITS)
});

static MASTECTOMY: LazyLock<ValueSet> = LazyLock::new(|| {
    procedures::BILATERAL_MASTECTOMY.union(&procedures::HISTORY_OF_BILATERAL_MASTECTOMY)
});

pub struct BreastCancerScreening;

impl BreastCancerScreening {
    const MINIMUM_AGE: i32 = 51;
    const MAXIMUM_AGE: i32 = 74;
    const SCREENING_INTERVAL_MONTHS: i32 = 27;

    fn screening_frame(now: OffsetDateTime) -> Timeframe {
        Timeframe::ending_at(now, Shift::Months(Self::SCREENING_INTERVAL_MONTHS))
    }

    fn last_mammogram(&self, ctx: &EvaluationContext<'_>) -> Option<CodedReport> {
        ctx.patient
            .imaging_reports
            .find(&procedures::MAMMOGRAPHY)
            .within(&Self::screening_frame(ctx.now))
            .last()
            .cloned()
    }
}

impl Protocol for BreastCancerScreening {
    fn meta(&self) -> ProtocolMeta {
        ProtocolMeta {
            title: "Breast Cancer Screening".into(),
            version: "2023-v1".into(),
            description: "Women 51-74 should have a mammography every 27 months.".into(),
            information: "https://ecqi.healthit.gov/ecqm/ep/2022/cms125v10".into(),
            identifiers: vec!["CMS125v10".into()],
            types: vec!["CQM".into()],
            references: vec![
                "U.S. Preventive Services Task Force: screening for breast cancer".into(),
            ],
            default_display_interval_in_days: Some(30),
            ..Default::default()
        }
    }

    fn compute_on_change_types(&self) -> Vec<ChangeType> {
        vec![
            ChangeType::Patient,
            ChangeType::Condition,
            ChangeType::Appointment,
            ChangeType::ImagingReport,
            ChangeType::ReferralReport,
        ]
    }

    fn in_initial_population(&self, ctx: &EvaluationContext<'_>) -> bool {
        let demographics = ctx.patient.is_female()
            && ctx
                .patient
                .age_at_between(ctx.now, Self::MINIMUM_AGE, Self::MAXIMUM_AGE);
        if ctx.mode == EvaluationMode::Report {
            return demographics;
        }
        demographics && ctx.patient.has_visit_within(&ctx.timeframe, &QUALIFYING_VISIT)
    }

    fn in_numerator(&self, ctx: &EvaluationContext<'_>) -> bool {
        self.last_mammogram(ctx).is_some()
    }

    fn excluded(&self, ctx: &EvaluationContext<'_>) -> bool {
        let mastectomy = !ctx
            .patient
            .conditions
            .find(&MASTECTOMY)
            .starts_before(ctx.now)
            .is_empty()
            || !ctx
                .patient
                .referral_reports
                .find(&MASTECTOMY)
                .before(ctx.now)
                .is_empty();
        mastectomy || ctx.patient.hospice_within(&ctx.timeframe)
    }

    fn first_due_in(&self, ctx: &EvaluationContext<'_>) -> Option<i64> {
        if !ctx.patient.is_female() {
            return None;
        }
        let birthday = ctx.patient.birthday()?;
        let eligible = pathway_core::time::add_years(birthday, Self::MINIMUM_AGE);
        let days = (eligible - ctx.now.date()).whole_days();
        (days > 0).then_some(days)
    }

    fn compute_results(&self, ctx: &EvaluationContext<'_>) -> Result<ProtocolResult> {
        let mut result = ProtocolResult::new();
        let first_name = ctx.patient.first_name();

        if !self.in_denominator(ctx) {
            result.add_narrative(format!(
                "{first_name} does not meet the criteria for breast cancer screening."
            ));
            return Ok(result);
        }

        if let Some(mammogram) = self.last_mammogram(ctx) {
            result.set_status(ProtocolStatus::Satisfied)?;
            let performed = mammogram
                .canonical_date()
                .unwrap_or(ctx.now)
                .date();
            let next_due = add_months(performed, Self::SCREENING_INTERVAL_MONTHS);
            result.set_due_in((next_due - ctx.now.date()).whole_days());
            result.set_next_review(next_due);
            result.add_narrative(format!(
                "{first_name} had a mammography on {}.",
                format_long(performed)
            ));
            return Ok(result);
        }

        result.set_status(ProtocolStatus::Due)?;
        result.set_due_in(-1);
        result.add_narrative("No relevant exams found.");
        result.add_narrative(format!("{first_name} is due for a mammography."));
        result.add_recommendation(
            Recommendation::perform("mammography", 1, &procedures::MAMMOGRAPHY)
                .with_narrative(format!("{first_name} should have a mammography performed.")),
        )?;
        result.add_recommendation(Recommendation::instruct(
            "breast-cancer-screening-education",
            2,
            &instructions::BREAST_CANCER_SCREENING_EDUCATION,
        ))?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathway_core::Coding;
    use pathway_patient::{
        Appointment, CodedReport, PatientSnapshot, RecordCollection,
        records::AppointmentNoteType,
    };
    use time::macros::{date, datetime};

    const NOW: OffsetDateTime = datetime!(2023-06-15 12:00 UTC);

    fn eligible_patient() -> PatientSnapshot {
        let mut patient = PatientSnapshot::default();
        patient.patient.key = "patient-1".into();
        patient.patient.first_name = Some("Ada".into());
        patient.patient.sex_at_birth = Some("F".into());
        patient.patient.birth_date = Some(date!(1968 - 03 - 02));
        patient.appointments = RecordCollection::new(vec![Appointment {
            id: "visit-1".into(),
            start_time: Some(datetime!(2023-02-10 9:00 UTC)),
            status: Some("checked-in".into()),
            note_type: Some(AppointmentNoteType {
                code: Some("99213".into()),
                system: Some("CPT".into()),
            }),
            ..Default::default()
        }]);
        patient
    }

    fn mammogram(date: OffsetDateTime) -> CodedReport {
        CodedReport {
            id: "img-1".into(),
            codings: vec![Coding::new("CPT", "77067")],
            original_date: Some(date),
        }
    }

    #[test]
    fn test_due_without_recent_mammogram() {
        let patient = eligible_patient();
        let ctx = EvaluationContext::new(&patient, NOW);
        let result = BreastCancerScreening.compute_results(&ctx).unwrap();
        assert_eq!(result.status(), ProtocolStatus::Due);
        assert_eq!(result.due_in(), Some(-1));
        assert!(result.narrative().starts_with("No relevant exams found."));
        let recommendations = result.recommendations();
        assert_eq!(recommendations.len(), 2);
        assert_eq!(recommendations[0].button.as_deref(), Some("Perform"));
        assert_eq!(recommendations[1].button.as_deref(), Some("Instruct"));
    }

    #[test]
    fn test_satisfied_with_mammogram_ten_months_ago() {
        let mut patient = eligible_patient();
        let performed = datetime!(2022-08-15 0:00 UTC);
        patient.imaging_reports = RecordCollection::new(vec![mammogram(performed)]);
        let ctx = EvaluationContext::new(&patient, NOW);
        let result = BreastCancerScreening.compute_results(&ctx).unwrap();
        assert_eq!(result.status(), ProtocolStatus::Satisfied);
        // Next due 27 months after the exam: 2024-11-15.
        assert_eq!(
            result.due_in(),
            Some((date!(2024 - 11 - 15) - NOW.date()).whole_days())
        );
        assert!(result.narrative().contains("had a mammography"));
        assert!(result.narrative().contains("August 15, 2022"));
        assert!(result.recommendations().is_empty());
    }

    #[test]
    fn test_mammogram_older_than_27_months_is_ignored() {
        let mut patient = eligible_patient();
        patient.imaging_reports =
            RecordCollection::new(vec![mammogram(datetime!(2020-01-15 0:00 UTC))]);
        let ctx = EvaluationContext::new(&patient, NOW);
        let result = BreastCancerScreening.compute_results(&ctx).unwrap();
        assert_eq!(result.status(), ProtocolStatus::Due);
    }

    #[test]
    fn test_male_patient_not_applicable() {
        let mut patient = eligible_patient();
        patient.patient.sex_at_birth = Some("M".into());
        let ctx = EvaluationContext::new(&patient, NOW);
        let result = BreastCancerScreening.compute_results(&ctx).unwrap();
        assert_eq!(result.status(), ProtocolStatus::NotApplicable);
        assert!(result.due_in().is_none());
        assert!(result.recommendations().is_empty());
        assert!(BreastCancerScreening.first_due_in(&ctx).is_none());
    }

    #[test]
    fn test_no_qualifying_visit_not_applicable() {
        let mut patient = eligible_patient();
        patient.appointments = RecordCollection::empty();
        let ctx = EvaluationContext::new(&patient, NOW);
        let result = BreastCancerScreening.compute_results(&ctx).unwrap();
        assert_eq!(result.status(), ProtocolStatus::NotApplicable);
    }

    #[test]
    fn test_report_mode_bypasses_visit_check() {
        let mut patient = eligible_patient();
        patient.appointments = RecordCollection::empty();
        let ctx = EvaluationContext::new(&patient, NOW).with_mode(EvaluationMode::Report);
        let result = BreastCancerScreening.compute_results(&ctx).unwrap();
        assert_eq!(result.status(), ProtocolStatus::Due);
    }

    #[test]
    fn test_mastectomy_excludes() {
        let mut patient = eligible_patient();
        patient.conditions = RecordCollection::new(vec![pathway_patient::Condition {
            id: "c1".into(),
            coding: vec![Coding::new("SNOMEDCT", "27865001")],
            clinical_status: Some("active".into()),
            onset_date: Some(datetime!(2015-01-01 0:00 UTC)),
            ..Default::default()
        }]);
        let ctx = EvaluationContext::new(&patient, NOW);
        let result = BreastCancerScreening.compute_results(&ctx).unwrap();
        assert_eq!(result.status(), ProtocolStatus::NotApplicable);
    }

    #[test]
    fn test_first_due_in_before_eligibility() {
        let mut patient = eligible_patient();
        patient.patient.birth_date = Some(date!(1980 - 01 - 01));
        let ctx = EvaluationContext::new(&patient, NOW);
        let days = BreastCancerScreening.first_due_in(&ctx).unwrap();
        assert_eq!(days, (date!(2031 - 01 - 01) - NOW.date()).whole_days());
    }
}
