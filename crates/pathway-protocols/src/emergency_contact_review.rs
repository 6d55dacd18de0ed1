//! Emergency-contact review for elderly patients.
//!
//! Patients 70 and older should have at least one emergency contact on
//! file. When none is listed, banner alerts surface on the scheduling and
//! chart surfaces.

use pathway_engine::{
    BannerIntent, BannerPlacement, ChangeType, EvaluationContext, Protocol, ProtocolMeta,
    ProtocolResult, ProtocolStatus, Recommendation, Result,
};

pub struct EmergencyContactReview;

impl EmergencyContactReview {
    const MINIMUM_AGE: i32 = 70;
}

impl Protocol for EmergencyContactReview {
    fn meta(&self) -> ProtocolMeta {
        ProtocolMeta {
            title: "Emergency Contact Review".into(),
            version: "2023-v1".into(),
            description: "Patients 70 and older need an emergency contact on file.".into(),
            identifiers: vec!["EmergencyContactReview".into()],
            ..Default::default()
        }
    }

    fn compute_on_change_types(&self) -> Vec<ChangeType> {
        vec![ChangeType::Patient]
    }

    fn in_initial_population(&self, ctx: &EvaluationContext<'_>) -> bool {
        ctx.patient
            .age_at(ctx.now)
            .is_some_and(|age| age >= Self::MINIMUM_AGE)
    }

    fn in_numerator(&self, ctx: &EvaluationContext<'_>) -> bool {
        !ctx.patient.emergency_contacts().is_empty()
    }

    fn compute_results(&self, ctx: &EvaluationContext<'_>) -> Result<ProtocolResult> {
        let mut result = ProtocolResult::new();
        let first_name = ctx.patient.first_name();

        if !self.in_denominator(ctx) {
            result.add_narrative(format!(
                "{first_name} is under {} and does not need an emergency contact review.",
                Self::MINIMUM_AGE
            ));
            return Ok(result);
        }

        if self.in_numerator(ctx) {
            result.set_status(ProtocolStatus::Satisfied)?;
            result.add_narrative(format!("{first_name} has emergency contacts listed."));
            return Ok(result);
        }

        // in_denominator guarantees the age is known.
        let age = ctx.patient.age_at(ctx.now).unwrap_or(Self::MINIMUM_AGE);
        let alert = format!("{first_name} is {age} and has no emergency contacts listed");

        result.set_status(ProtocolStatus::Due)?;
        result.set_due_in(-1);
        result.add_narrative(&alert);
        result.add_recommendation(Recommendation::banner_alert(
            "emergency-contact-scheduling",
            1,
            &alert,
            vec![BannerPlacement::AppointmentCard, BannerPlacement::SchedulingCard],
            BannerIntent::Alert,
        ))?;
        result.add_recommendation(Recommendation::banner_alert(
            "emergency-contact-chart",
            2,
            &alert,
            vec![BannerPlacement::Profile, BannerPlacement::Chart],
            BannerIntent::Alert,
        ))?;
        Ok(result)
    }
}
