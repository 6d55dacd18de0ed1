//! Typed recommendations: the structured suggestions a protocol emits.
//!
//! Recommendations are data, not actions. Every variant shares an envelope
//! (key, rank, button, title, narrative) and adds a typed payload; the host
//! renders the button label and owns whatever happens on click.

use pathway_core::Coding;
use pathway_valuesets::ValueSet;
use serde::{Deserialize, Serialize};
use time::Date;

/// Where a banner alert may be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerPlacement {
    Timeline,
    AppointmentCard,
    SchedulingCard,
    Profile,
    Chart,
}

/// Severity of a banner alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerIntent {
    Info,
    Warning,
    Alert,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrescribeContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sig_original_input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_in_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispense_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_of_refills_allowed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_substitutions_allowed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_to_pharmacist: Option<String>,
    /// One code list per condition justifying the prescription.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Vec<Coding>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderContext {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Vec<Coding>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReferContext {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Vec<Coding>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FollowUpContext {
    /// Rendered "YYYY-MM-DD".
    #[serde(
        with = "pathway_core::time::iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub requested_date: Option<Date>,
    /// Note-type code for the requested visit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_note_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_for_visit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskContext {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Rendered "YYYY-MM-DD".
    #[serde(
        with = "pathway_core::time::iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Date>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_identifier: Option<String>,
}

/// Variant-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecommendationPayload {
    Prescribe {
        prescription: ValueSet,
        #[serde(default)]
        context: PrescribeContext,
    },
    Lab {
        lab: ValueSet,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<ValueSet>,
        #[serde(default)]
        context: OrderContext,
    },
    Imaging {
        imaging: ValueSet,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<ValueSet>,
        #[serde(default)]
        context: OrderContext,
    },
    Perform {
        procedure: ValueSet,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<ValueSet>,
        #[serde(default)]
        context: OrderContext,
    },
    Refer {
        referral: ValueSet,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<ValueSet>,
        #[serde(default)]
        context: ReferContext,
    },
    FollowUp {
        #[serde(default)]
        context: FollowUpContext,
    },
    Task {
        #[serde(default)]
        context: TaskContext,
    },
    Diagnose {
        condition: ValueSet,
    },
    Instruct {
        instruction: ValueSet,
    },
    Interview {
        questionnaires: Vec<ValueSet>,
    },
    Plan,
    BannerAlert {
        placement: Vec<BannerPlacement>,
        intent: BannerIntent,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        href: Option<String>,
    },
    Hyperlink {
        href: String,
    },
}

/// A structured suggestion emitted by a protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Unique within one result.
    pub key: String,
    /// Positive; equal ranks keep insertion order.
    pub rank: u32,
    /// Advisory label for the host UI; banner alerts and hyperlinks have
    /// none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_key: Option<String>,
    pub title: String,
    #[serde(default)]
    pub narrative: String,
    #[serde(flatten)]
    pub payload: RecommendationPayload,
}

impl Recommendation {
    fn envelope(
        key: impl Into<String>,
        rank: u32,
        button: Option<&str>,
        title: String,
        payload: RecommendationPayload,
    ) -> Self {
        Self {
            key: key.into(),
            rank,
            button: button.map(str::to_string),
            patient_key: None,
            title,
            narrative: String::new(),
            payload,
        }
    }

    pub fn prescribe(key: impl Into<String>, rank: u32, prescription: &ValueSet) -> Self {
        Self::envelope(
            key,
            rank,
            Some("Prescribe"),
            format!("Prescribe {}", prescription.name()),
            RecommendationPayload::Prescribe {
                prescription: prescription.clone(),
                context: PrescribeContext::default(),
            },
        )
    }

    pub fn lab_order(key: impl Into<String>, rank: u32, lab: &ValueSet) -> Self {
        Self::envelope(
            key,
            rank,
            Some("Order"),
            format!("Order {}", lab.name()),
            RecommendationPayload::Lab {
                lab: lab.clone(),
                condition: None,
                context: OrderContext::default(),
            },
        )
    }

    pub fn imaging_order(key: impl Into<String>, rank: u32, imaging: &ValueSet) -> Self {
        Self::envelope(
            key,
            rank,
            Some("Order"),
            format!("Order {}", imaging.name()),
            RecommendationPayload::Imaging {
                imaging: imaging.clone(),
                condition: None,
                context: OrderContext::default(),
            },
        )
    }

    pub fn perform(key: impl Into<String>, rank: u32, procedure: &ValueSet) -> Self {
        Self::envelope(
            key,
            rank,
            Some("Perform"),
            format!("Perform {}", procedure.name()),
            RecommendationPayload::Perform {
                procedure: procedure.clone(),
                condition: None,
                context: OrderContext::default(),
            },
        )
    }

    pub fn refer(key: impl Into<String>, rank: u32, referral: &ValueSet) -> Self {
        Self::envelope(
            key,
            rank,
            Some("Refer"),
            format!("Refer for {}", referral.name()),
            RecommendationPayload::Refer {
                referral: referral.clone(),
                condition: None,
                context: ReferContext::default(),
            },
        )
    }

    pub fn follow_up(key: impl Into<String>, rank: u32, context: FollowUpContext) -> Self {
        Self::envelope(
            key,
            rank,
            Some("Follow up"),
            "Request follow-up visit".to_string(),
            RecommendationPayload::FollowUp { context },
        )
    }

    pub fn task(key: impl Into<String>, rank: u32, title: impl Into<String>, context: TaskContext) -> Self {
        Self::envelope(
            key,
            rank,
            Some("Task"),
            title.into(),
            RecommendationPayload::Task { context },
        )
    }

    pub fn diagnose(key: impl Into<String>, rank: u32, condition: &ValueSet) -> Self {
        Self::envelope(
            key,
            rank,
            Some("Diagnose"),
            format!("Diagnose {}", condition.name()),
            RecommendationPayload::Diagnose {
                condition: condition.clone(),
            },
        )
    }

    pub fn instruct(key: impl Into<String>, rank: u32, instruction: &ValueSet) -> Self {
        Self::envelope(
            key,
            rank,
            Some("Instruct"),
            format!("Discuss {}", instruction.name()),
            RecommendationPayload::Instruct {
                instruction: instruction.clone(),
            },
        )
    }

    pub fn interview(key: impl Into<String>, rank: u32, questionnaires: Vec<ValueSet>) -> Self {
        let title = questionnaires
            .first()
            .map(|q| format!("Administer {}", q.name()))
            .unwrap_or_else(|| "Administer questionnaire".to_string());
        Self::envelope(
            key,
            rank,
            Some("Interview"),
            title,
            RecommendationPayload::Interview { questionnaires },
        )
    }

    pub fn plan(key: impl Into<String>, rank: u32, narrative: impl Into<String>) -> Self {
        let mut recommendation = Self::envelope(
            key,
            rank,
            Some("Plan"),
            "Plan".to_string(),
            RecommendationPayload::Plan,
        );
        recommendation.narrative = narrative.into();
        recommendation
    }

    pub fn banner_alert(
        key: impl Into<String>,
        rank: u32,
        narrative: impl Into<String>,
        placement: Vec<BannerPlacement>,
        intent: BannerIntent,
    ) -> Self {
        let narrative = narrative.into();
        let mut recommendation = Self::envelope(
            key,
            rank,
            None,
            narrative.clone(),
            RecommendationPayload::BannerAlert {
                placement,
                intent,
                href: None,
            },
        );
        recommendation.narrative = narrative;
        recommendation
    }

    pub fn hyperlink(
        key: impl Into<String>,
        rank: u32,
        title: impl Into<String>,
        href: impl Into<String>,
    ) -> Self {
        Self::envelope(
            key,
            rank,
            None,
            title.into(),
            RecommendationPayload::Hyperlink { href: href.into() },
        )
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_narrative(mut self, narrative: impl Into<String>) -> Self {
        self.narrative = narrative.into();
        self
    }

    pub fn with_patient_key(mut self, key: impl Into<String>) -> Self {
        self.patient_key = Some(key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathway_core::CodingSystem;

    fn mammography() -> ValueSet {
        ValueSet::builder("Mammography")
            .codes(CodingSystem::Cpt, ["77067"])
            .build()
    }

    #[test]
    fn test_perform_defaults() {
        let recommendation = Recommendation::perform("mammogram", 1, &mammography());
        assert_eq!(recommendation.button.as_deref(), Some("Perform"));
        assert_eq!(recommendation.title, "Perform Mammography");
    }

    #[test]
    fn test_banner_alert_has_no_button() {
        let recommendation = Recommendation::banner_alert(
            "alert",
            1,
            "needs attention",
            vec![BannerPlacement::Profile, BannerPlacement::Chart],
            BannerIntent::Alert,
        );
        assert!(recommendation.button.is_none());
        assert_eq!(recommendation.narrative, "needs attention");
    }

    #[test]
    fn test_serde_roundtrip_preserves_payload() {
        let recommendation = Recommendation::follow_up(
            "follow-up",
            2,
            FollowUpContext {
                requested_date: Some(time::macros::date!(2023 - 06 - 22)),
                requested_note_type: Some("448337001".into()),
                reason_for_visit: Some("Follow Up Visit".into()),
                ..Default::default()
            },
        );
        let json = serde_json::to_string(&recommendation).unwrap();
        let back: Recommendation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, recommendation);
    }

    #[test]
    fn test_payload_is_tagged() {
        let recommendation = Recommendation::prescribe("rx", 1, &mammography());
        let value = serde_json::to_value(&recommendation).unwrap();
        assert_eq!(value["type"], "prescribe");
        assert_eq!(value["rank"], 1);
    }

    #[test]
    fn test_follow_up_date_renders_iso() {
        let recommendation = Recommendation::follow_up(
            "f",
            1,
            FollowUpContext {
                requested_date: Some(time::macros::date!(2023 - 06 - 22)),
                ..Default::default()
            },
        );
        assert_json_diff::assert_json_include!(
            actual: serde_json::to_value(&recommendation).unwrap(),
            expected: serde_json::json!({
                "type": "follow_up",
                "button": "Follow up",
                "context": { "requestedDate": "2023-06-22" },
            })
        );
    }
}
