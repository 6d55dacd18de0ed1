//! Typed clinical record kinds.
//!
//! Every record deserializes from the camelCase JSON the host emits, with
//! every field optional-or-defaulted: a missing field is a non-match, never
//! an error. Each kind declares its canonical date, which drives
//! chronological ordering and all temporal predicates.

use pathway_core::Coding;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime, Time};

/// Serde helper for optional timestamps that arrive either as RFC 3339
/// instants or as bare `YYYY-MM-DD` dates (midnight UTC).
pub(crate) mod flexible_time {
    use super::*;

    pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(t) => {
                let formatted = t.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
                serializer.serialize_some(&formatted)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) if s.is_empty() => Ok(None),
            Some(s) => parse_instant(&s)
                .ok_or_else(|| D::Error::custom(format!("unrecognized timestamp: {s}")))
                .map(Some),
        }
    }
}

/// Parse an RFC 3339 instant or a bare calendar date (midnight UTC).
pub fn parse_instant(s: &str) -> Option<OffsetDateTime> {
    if let Ok(t) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(t);
    }
    let format = time::macros::format_description!("[year]-[month]-[day]");
    Date::parse(s, &format)
        .ok()
        .map(|d| d.with_time(Time::MIDNIGHT).assume_utc())
}

/// Common surface of every record kind.
pub trait ClinicalRecord: Clone + Serialize {
    /// Host-assigned stable identifier; the tie-breaker for equal dates.
    fn record_id(&self) -> &str;

    /// The date that orders this record and answers temporal predicates.
    fn canonical_date(&self) -> Option<OffsetDateTime>;

    /// Codings matched by `RecordCollection::find`. Uncoded kinds match
    /// nothing.
    fn codings(&self) -> Vec<Coding> {
        Vec::new()
    }

    /// Scalar payload returned by `last_value`, when the kind has one.
    fn scalar_value(&self) -> Option<String> {
        None
    }

    /// The interval this record is in effect: `(start, end)`, `None` end
    /// meaning still active. Point-in-time kinds default to their canonical
    /// date.
    fn effective_period(&self) -> (Option<OffsetDateTime>, Option<OffsetDateTime>) {
        (self.canonical_date(), self.canonical_date())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Condition {
    pub id: String,
    pub coding: Vec<Coding>,
    /// active | inactive | resolved | entered-in-error | recurrence | relapse
    pub clinical_status: Option<String>,
    #[serde(with = "flexible_time")]
    pub created: Option<OffsetDateTime>,
    #[serde(with = "flexible_time")]
    pub onset_date: Option<OffsetDateTime>,
    #[serde(with = "flexible_time")]
    pub abatement_date: Option<OffsetDateTime>,
}

impl ClinicalRecord for Condition {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn canonical_date(&self) -> Option<OffsetDateTime> {
        self.onset_date.or(self.created)
    }

    fn codings(&self) -> Vec<Coding> {
        self.coding.clone()
    }

    fn effective_period(&self) -> (Option<OffsetDateTime>, Option<OffsetDateTime>) {
        (self.onset_date.or(self.created), self.abatement_date)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicationPeriod {
    #[serde(with = "flexible_time")]
    pub from: Option<OffsetDateTime>,
    #[serde(with = "flexible_time")]
    pub to: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Medication {
    pub id: String,
    pub coding: Vec<Coding>,
    pub status: Option<String>,
    pub periods: Vec<MedicationPeriod>,
}

impl ClinicalRecord for Medication {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn canonical_date(&self) -> Option<OffsetDateTime> {
        self.periods.iter().filter_map(|p| p.from).max()
    }

    fn codings(&self) -> Vec<Coding> {
        self.coding.clone()
    }

    fn effective_period(&self) -> (Option<OffsetDateTime>, Option<OffsetDateTime>) {
        let start = self.periods.iter().filter_map(|p| p.from).min();
        let open_ended = self.periods.iter().any(|p| p.to.is_none());
        let end = if open_ended {
            None
        } else {
            self.periods.iter().filter_map(|p| p.to).max()
        };
        (start, end)
    }
}

/// Prescription records parallel medications, tied by `medication_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Prescription {
    pub id: String,
    pub medication_id: Option<String>,
    pub coding: Vec<Coding>,
    pub sig: Option<String>,
    #[serde(with = "flexible_time")]
    pub written_date: Option<OffsetDateTime>,
}

impl ClinicalRecord for Prescription {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn canonical_date(&self) -> Option<OffsetDateTime> {
        self.written_date
    }

    fn codings(&self) -> Vec<Coding> {
        self.coding.clone()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabReport {
    pub id: String,
    pub coding: Vec<Coding>,
    /// Numeric result as a string, as the host reports it.
    pub value: Option<String>,
    #[serde(with = "flexible_time")]
    pub original_date: Option<OffsetDateTime>,
    #[serde(with = "flexible_time")]
    pub note_timestamp: Option<OffsetDateTime>,
}

impl ClinicalRecord for LabReport {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn canonical_date(&self) -> Option<OffsetDateTime> {
        self.original_date.or(self.note_timestamp)
    }

    fn codings(&self) -> Vec<Coding> {
        self.coding.clone()
    }

    fn scalar_value(&self) -> Option<String> {
        self.value.clone()
    }
}

/// The small set of signs the host vitalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalSignType {
    BloodPressure,
    Weight,
    Height,
    HeartRate,
    RespirationRate,
    Temperature,
    OxygenSaturation,
    Bmi,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VitalSign {
    pub id: String,
    pub sign: Option<VitalSignType>,
    /// Scalar, or "systolic/diastolic" for blood pressure.
    pub value: Option<String>,
    #[serde(with = "flexible_time")]
    pub date_recorded: Option<OffsetDateTime>,
}

impl ClinicalRecord for VitalSign {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn canonical_date(&self) -> Option<OffsetDateTime> {
        self.date_recorded
    }

    fn scalar_value(&self) -> Option<String> {
        self.value.clone()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewResponse {
    pub code: Option<String>,
    pub system: Option<String>,
    pub value: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewResult {
    pub score: Option<f64>,
    pub narrative: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Interview {
    pub id: String,
    /// Codings of the questionnaire the interview answers.
    pub coding: Vec<Coding>,
    pub responses: Vec<InterviewResponse>,
    pub results: Vec<InterviewResult>,
    pub status: Option<String>,
    pub author: Option<String>,
    /// Itemized structured answers, shape owned by the host.
    pub item: Option<serde_json::Value>,
    #[serde(with = "flexible_time")]
    pub note_timestamp: Option<OffsetDateTime>,
    #[serde(with = "flexible_time")]
    pub created: Option<OffsetDateTime>,
}

impl Interview {
    /// The highest score across result rows, when any row carries one.
    pub fn score(&self) -> Option<f64> {
        self.results
            .iter()
            .filter_map(|r| r.score)
            .fold(None, |acc, s| Some(acc.map_or(s, |a: f64| a.max(s))))
    }
}

impl ClinicalRecord for Interview {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn canonical_date(&self) -> Option<OffsetDateTime> {
        self.note_timestamp.or(self.created)
    }

    fn codings(&self) -> Vec<Coding> {
        self.coding.clone()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentNoteType {
    pub code: Option<String>,
    pub system: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentStateChange {
    pub state: Option<String>,
    #[serde(with = "flexible_time")]
    pub created: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Appointment {
    pub id: String,
    #[serde(with = "flexible_time")]
    pub start_time: Option<OffsetDateTime>,
    /// Includes the cancelled family (cancelled, noshowed, …).
    pub status: Option<String>,
    pub note_type: Option<AppointmentNoteType>,
    pub state_history: Vec<AppointmentStateChange>,
}

impl Appointment {
    const CANCELLED_STATUSES: [&'static str; 3] = ["cancelled", "noshowed", "deleted"];

    pub fn is_cancelled(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| Self::CANCELLED_STATUSES.contains(&s))
    }
}

impl ClinicalRecord for Appointment {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn canonical_date(&self) -> Option<OffsetDateTime> {
        self.start_time
    }

    fn codings(&self) -> Vec<Coding> {
        match &self.note_type {
            Some(AppointmentNoteType {
                code: Some(code),
                system,
            }) => vec![Coding::new(
                system.clone().unwrap_or_default(),
                code.clone(),
            )],
            _ => Vec::new(),
        }
    }
}

/// Notes attached to upcoming appointments; carries the scheduling provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentNote {
    pub id: String,
    pub appointment_id: Option<String>,
    pub provider_key: Option<String>,
    pub current_state: Option<String>,
    #[serde(with = "flexible_time")]
    pub datetime_of_service: Option<OffsetDateTime>,
}

impl ClinicalRecord for AppointmentNote {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn canonical_date(&self) -> Option<OffsetDateTime> {
        self.datetime_of_service
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Open,
    Completed,
    Closed,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskRecord {
    pub id: String,
    pub status: Option<TaskStatus>,
    pub title: Option<String>,
    pub externally_exposable_id: Option<String>,
    pub labels: Vec<String>,
    #[serde(with = "flexible_time")]
    pub created: Option<OffsetDateTime>,
    #[serde(with = "flexible_time")]
    pub due: Option<OffsetDateTime>,
}

impl ClinicalRecord for TaskRecord {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn canonical_date(&self) -> Option<OffsetDateTime> {
        self.created
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Instruction {
    pub id: String,
    pub coding: Vec<Coding>,
    #[serde(with = "flexible_time")]
    pub note_timestamp: Option<OffsetDateTime>,
}

impl ClinicalRecord for Instruction {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn canonical_date(&self) -> Option<OffsetDateTime> {
        self.note_timestamp
    }

    fn codings(&self) -> Vec<Coding> {
        self.coding.clone()
    }
}

/// Referral and imaging reports share one shape: a coded report with an
/// original service date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodedReport {
    pub id: String,
    pub codings: Vec<Coding>,
    #[serde(with = "flexible_time")]
    pub original_date: Option<OffsetDateTime>,
}

impl ClinicalRecord for CodedReport {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn canonical_date(&self) -> Option<OffsetDateTime> {
        self.original_date
    }

    fn codings(&self) -> Vec<Coding> {
        self.codings.clone()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Immunization {
    pub id: String,
    pub coding: Vec<Coding>,
    #[serde(with = "flexible_time")]
    pub date_administered: Option<OffsetDateTime>,
}

impl ClinicalRecord for Immunization {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn canonical_date(&self) -> Option<OffsetDateTime> {
        self.date_administered
    }

    fn codings(&self) -> Vec<Coding> {
        self.coding.clone()
    }
}
