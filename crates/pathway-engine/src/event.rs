//! Change events and the envelope the host delivers them in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Category of underlying record alteration that triggers re-evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Condition,
    Medication,
    Prescription,
    Appointment,
    Interview,
    LabReport,
    Patient,
    VitalSign,
    Task,
    Coverage,
    Instruction,
    ImagingReport,
    ReferralReport,
    ProtocolOverride,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Condition => "CONDITION",
            ChangeType::Medication => "MEDICATION",
            ChangeType::Prescription => "PRESCRIPTION",
            ChangeType::Appointment => "APPOINTMENT",
            ChangeType::Interview => "INTERVIEW",
            ChangeType::LabReport => "LAB_REPORT",
            ChangeType::Patient => "PATIENT",
            ChangeType::VitalSign => "VITAL_SIGN",
            ChangeType::Task => "TASK",
            ChangeType::Coverage => "COVERAGE",
            ChangeType::Instruction => "INSTRUCTION",
            ChangeType::ImagingReport => "IMAGING_REPORT",
            ChangeType::ReferralReport => "REFERRAL_REPORT",
            ChangeType::ProtocolOverride => "PROTOCOL_OVERRIDE",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Host event kinds a protocol may subscribe to directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// The periodic health-maintenance tick.
    HealthMaintenance,
    /// Bulk upload / reconciliation of imported records.
    BatchPatientImport,
    /// Chart review pass over an existing patient.
    ChartReview,
}

/// The envelope delivered by the host when something changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeEvent {
    /// Set for periodic / lifecycle events.
    pub kind: Option<EventType>,
    /// Set for record-change events.
    pub change_tag: Option<ChangeType>,
    pub model_name: String,
    pub fields_changed: BTreeSet<String>,
    pub created: bool,
    pub external_id: Option<String>,
    pub canvas_id: Option<String>,
}

impl ChangeEvent {
    /// A record-change event for the given tag and host model name.
    pub fn change(change_tag: ChangeType, model_name: impl Into<String>) -> Self {
        Self {
            change_tag: Some(change_tag),
            model_name: model_name.into(),
            ..Default::default()
        }
    }

    /// A periodic / lifecycle event of the given kind.
    pub fn tick(kind: EventType) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn with_created(mut self) -> Self {
        self.created = true;
        self
    }

    pub fn with_fields_changed<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields_changed = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }

    pub fn with_canvas_id(mut self, id: impl Into<String>) -> Self {
        self.canvas_id = Some(id.into());
        self
    }

    /// Whether this event belongs to the bulk-upload family, the only one
    /// `notification_only` protocols sit out.
    pub fn is_bulk_upload(&self) -> bool {
        self.kind == Some(EventType::BatchPatientImport)
    }

    /// The per-protocol change context derived from this envelope.
    pub fn context(&self) -> ChangeContext {
        ChangeContext {
            model_name: self.model_name.clone(),
            fields_changed: self.fields_changed.clone(),
            created: self.created,
            external_id: self.external_id.clone(),
            canvas_id: self.canvas_id.clone(),
        }
    }
}

/// What a protocol sees of the triggering change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChangeContext {
    pub model_name: String,
    pub fields_changed: BTreeSet<String>,
    pub created: bool,
    pub external_id: Option<String>,
    pub canvas_id: Option<String>,
}
