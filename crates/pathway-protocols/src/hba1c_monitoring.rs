//! HbA1c monitoring for diabetic patients.
//!
//! Active diabetics should have an HbA1c result every six months. A recent
//! result above the poor-control threshold with no active metformin also
//! suggests starting one.

use pathway_core::Coding;
use pathway_core::narrative::format_long;
use pathway_core::time::add_months;
use pathway_core::{Shift, Timeframe};
use pathway_engine::{
    ChangeType, EvaluationContext, PrescribeContext, Protocol, ProtocolMeta, ProtocolResult,
    ProtocolStatus, Recommendation, RecommendationPayload, Result,
};
use pathway_patient::{ClinicalRecord, LabReport};
use pathway_valuesets::{conditions, labs, medications};
use time::OffsetDateTime;

pub struct Hba1cMonitoring;

impl Hba1cMonitoring {
    const MONITORING_INTERVAL_MONTHS: i32 = 6;
    const POOR_CONTROL_PERCENT: f64 = 9.0;

    fn monitoring_frame(now: OffsetDateTime) -> Timeframe {
        Timeframe::ending_at(now, Shift::Months(Self::MONITORING_INTERVAL_MONTHS))
    }

    fn last_recent_result(&self, ctx: &EvaluationContext<'_>) -> Option<LabReport> {
        ctx.patient
            .lab_reports
            .find(&labs::HBA1C_LABORATORY_TEST)
            .within(&Self::monitoring_frame(ctx.now))
            .last()
            .cloned()
    }

    fn on_metformin(&self, ctx: &EvaluationContext<'_>) -> bool {
        !ctx.patient
            .medications
            .find(&medications::METFORMIN)
            .intersects(&ctx.timeframe, true)
            .is_empty()
    }

    fn poorly_controlled(&self, ctx: &EvaluationContext<'_>) -> bool {
        ctx.patient
            .lab_reports
            .find(&labs::HBA1C_LABORATORY_TEST)
            .last_value()
            .and_then(|v| v.parse::<f64>().ok())
            .is_some_and(|v| v >= Self::POOR_CONTROL_PERCENT)
    }
}

impl Protocol for Hba1cMonitoring {
    fn meta(&self) -> ProtocolMeta {
        ProtocolMeta {
            title: "HbA1c Monitoring".into(),
            version: "2023-v1".into(),
            description: "Diabetics should have an HbA1c drawn every six months.".into(),
            identifiers: vec!["Hba1cMonitoring".into()],
            types: vec!["CQM".into()],
            ..Default::default()
        }
    }

    fn compute_on_change_types(&self) -> Vec<ChangeType> {
        vec![
            ChangeType::Condition,
            ChangeType::LabReport,
            ChangeType::Medication,
        ]
    }

    fn in_initial_population(&self, ctx: &EvaluationContext<'_>) -> bool {
        ctx.patient.has_condition(&conditions::DIABETES, &ctx.timeframe)
    }

    fn in_numerator(&self, ctx: &EvaluationContext<'_>) -> bool {
        self.last_recent_result(ctx).is_some()
    }

    fn excluded(&self, ctx: &EvaluationContext<'_>) -> bool {
        ctx.patient.hospice_within(&ctx.timeframe)
    }

    fn compute_results(&self, ctx: &EvaluationContext<'_>) -> Result<ProtocolResult> {
        let mut result = ProtocolResult::new();
        let first_name = ctx.patient.first_name();

        if !self.in_denominator(ctx) {
            result.add_narrative(format!("{first_name} has no active diabetes diagnosis."));
            return Ok(result);
        }

        if let Some(report) = self.last_recent_result(ctx) {
            result.set_status(ProtocolStatus::Satisfied)?;
            let drawn = report.canonical_date().unwrap_or(ctx.now).date();
            let next_due = add_months(drawn, Self::MONITORING_INTERVAL_MONTHS);
            result.set_due_in((next_due - ctx.now.date()).whole_days());
            result.set_next_review(next_due);
            match report.value.as_deref() {
                Some(value) => result.add_narrative(format!(
                    "{first_name} had an HbA1c of {value}% on {}.",
                    format_long(drawn)
                )),
                None => result.add_narrative(format!(
                    "{first_name} had an HbA1c drawn on {}.",
                    format_long(drawn)
                )),
            }
            return Ok(result);
        }

        result.set_status(ProtocolStatus::Due)?;
        result.set_due_in(-1);
        result.add_narrative(format!(
            "{first_name} has diabetes and no HbA1c result in the last {} months.",
            Self::MONITORING_INTERVAL_MONTHS
        ));
        result.add_recommendation(Recommendation::lab_order(
            "hba1c-order",
            1,
            &labs::HBA1C_LABORATORY_TEST,
        ))?;

        if self.poorly_controlled(ctx) && !self.on_metformin(ctx) {
            let justification: Vec<Coding> = conditions::DIABETES
                .codes_for(pathway_core::CodingSystem::Icd10Cm)
                .into_iter()
                .flatten()
                .map(|code| Coding::new("ICD10CM", code.as_str()))
                .collect();
            let mut prescribe = Recommendation::prescribe("metformin", 2, &medications::METFORMIN);
            if let RecommendationPayload::Prescribe { context, .. } = &mut prescribe.payload {
                *context = PrescribeContext {
                    conditions: vec![justification],
                    ..Default::default()
                };
            }
            result.add_recommendation(prescribe)?;
        }
        Ok(result)
    }
}
