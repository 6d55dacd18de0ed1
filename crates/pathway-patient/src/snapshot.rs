//! The patient snapshot: one immutable view of a patient at evaluation time.

use crate::collection::RecordCollection;
use crate::query::Filter;
use crate::records::{
    Appointment, AppointmentNote, CodedReport, Condition, Immunization, Instruction, Interview,
    LabReport, Medication, Prescription, TaskRecord, VitalSign,
};
use pathway_core::Timeframe;
use pathway_valuesets::ValueSet;
use pathway_valuesets::procedures::HOSPICE_CARE_AMBULATORY;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExternalIdentifier {
    pub system: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CareTeamMembership {
    pub provider_key: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub name: Option<String>,
    pub relationship: Option<String>,
    /// Host-assigned category tags; emergency contacts carry
    /// "emergency_contact".
    pub categories: Vec<String>,
    pub phone_number: Option<String>,
}

impl Contact {
    pub fn is_emergency(&self) -> bool {
        self.categories.iter().any(|c| c == "emergency_contact")
    }
}

/// Patient demographics as supplied in `patient.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Demographics {
    pub key: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// "F" or "M".
    pub sex_at_birth: Option<String>,
    pub biological_race_codes: Vec<String>,
    pub cultural_ethnicity_codes: Vec<String>,
    #[serde(with = "pathway_core::time::iso_date::option")]
    pub birth_date: Option<Date>,
    pub external_identifiers: Vec<ExternalIdentifier>,
    pub care_team: Vec<CareTeamMembership>,
    pub contacts: Vec<Contact>,
}

/// An immutable view of one patient's clinical record at a single
/// evaluation instant. Constructed once per evaluation and discarded with
/// the protocol instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientSnapshot {
    pub patient: Demographics,
    pub conditions: RecordCollection<Condition>,
    pub medications: RecordCollection<Medication>,
    pub prescriptions: RecordCollection<Prescription>,
    pub lab_reports: RecordCollection<LabReport>,
    pub vital_signs: RecordCollection<VitalSign>,
    pub interviews: RecordCollection<Interview>,
    pub appointments: RecordCollection<Appointment>,
    pub upcoming_appointments: RecordCollection<Appointment>,
    pub upcoming_appointment_notes: RecordCollection<AppointmentNote>,
    pub tasks: RecordCollection<TaskRecord>,
    pub instructions: RecordCollection<Instruction>,
    pub referral_reports: RecordCollection<CodedReport>,
    pub imaging_reports: RecordCollection<CodedReport>,
    pub immunizations: RecordCollection<Immunization>,
}

impl PatientSnapshot {
    pub fn first_name(&self) -> &str {
        self.patient.first_name.as_deref().unwrap_or_default()
    }

    pub fn is_female(&self) -> bool {
        self.patient
            .sex_at_birth
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("F"))
    }

    pub fn is_male(&self) -> bool {
        self.patient
            .sex_at_birth
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("M"))
    }

    pub fn birthday(&self) -> Option<Date> {
        self.patient.birth_date
    }

    /// Whole years of age at `date`; None when the birthday is unknown.
    pub fn age_at(&self, date: OffsetDateTime) -> Option<i32> {
        let birthday = self.patient.birth_date?;
        let on = date.date();
        let mut age = on.year() - birthday.year();
        if (on.month() as u8, on.day()) < (birthday.month() as u8, birthday.day()) {
            age -= 1;
        }
        Some(age)
    }

    /// Inclusive age-range test at `date`; false when the birthday is
    /// unknown.
    pub fn age_at_between(&self, date: OffsetDateTime, low: i32, high: i32) -> bool {
        self.age_at(date).is_some_and(|age| low <= age && age <= high)
    }

    /// Whether an active condition matching the value set overlaps the
    /// timeframe. Conditions without an onset or created date never match.
    pub fn has_condition(&self, value_set: &ValueSet, timeframe: &Timeframe) -> bool {
        !self
            .conditions
            .find(value_set)
            .filtered(&Filter::new().eq("clinicalStatus", "active"))
            .intersects(timeframe, false)
            .is_empty()
    }

    /// Whether hospice care overlaps the timeframe, in conditions or coded
    /// reports.
    pub fn hospice_within(&self, timeframe: &Timeframe) -> bool {
        !self
            .conditions
            .find(&HOSPICE_CARE_AMBULATORY)
            .intersects(timeframe, false)
            .is_empty()
            || !self
                .referral_reports
                .find(&HOSPICE_CARE_AMBULATORY)
                .within(timeframe)
                .is_empty()
    }

    /// Whether a non-cancelled visit matching the value set falls in the
    /// timeframe.
    pub fn has_visit_within(&self, timeframe: &Timeframe, value_set: &ValueSet) -> bool {
        self.appointments
            .find(value_set)
            .within(timeframe)
            .iter()
            .any(|a| !a.is_cancelled())
    }

    pub fn emergency_contacts(&self) -> Vec<&Contact> {
        self.patient
            .contacts
            .iter()
            .filter(|c| c.is_emergency())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathway_core::{Coding, Shift};
    use time::macros::{date, datetime};

    fn patient_with_birthday(birth_date: Date, sex: &str) -> PatientSnapshot {
        PatientSnapshot {
            patient: Demographics {
                key: "patient-1".into(),
                first_name: Some("Ada".into()),
                sex_at_birth: Some(sex.into()),
                birth_date: Some(birth_date),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_age_at_before_and_after_birthday() {
        let patient = patient_with_birthday(date!(1968 - 06 - 15), "F");
        assert_eq!(patient.age_at(datetime!(2023-06-14 0:00 UTC)), Some(54));
        assert_eq!(patient.age_at(datetime!(2023-06-15 0:00 UTC)), Some(55));
    }

    #[test]
    fn test_age_at_between_inclusive() {
        let patient = patient_with_birthday(date!(1968 - 06 - 15), "F");
        let now = datetime!(2023-06-15 0:00 UTC);
        assert!(patient.age_at_between(now, 55, 74));
        assert!(patient.age_at_between(now, 51, 55));
        assert!(!patient.age_at_between(now, 56, 74));
    }

    #[test]
    fn test_age_unknown_birthday() {
        let patient = PatientSnapshot::default();
        assert!(patient.age_at(datetime!(2023-01-01 0:00 UTC)).is_none());
        assert!(!patient.age_at_between(datetime!(2023-01-01 0:00 UTC), 0, 200));
    }

    #[test]
    fn test_sex_helpers() {
        assert!(patient_with_birthday(date!(1968 - 06 - 15), "F").is_female());
        assert!(patient_with_birthday(date!(1968 - 06 - 15), "m").is_male());
        assert!(!PatientSnapshot::default().is_female());
    }

    #[test]
    fn test_has_condition_requires_active_status() {
        let diabetes = ValueSet::builder("Diabetes")
            .codes(pathway_core::CodingSystem::Icd10Cm, ["E11.9"])
            .build();
        let frame = Timeframe::ending_at(datetime!(2023-06-15 0:00 UTC), Shift::Years(1));
        let mut patient = PatientSnapshot::default();
        patient.conditions = RecordCollection::new(vec![Condition {
            id: "c1".into(),
            coding: vec![Coding::new("ICD10CM", "E11.9")],
            clinical_status: Some("resolved".into()),
            onset_date: Some(datetime!(2018-04-01 0:00 UTC)),
            ..Default::default()
        }]);
        assert!(!patient.has_condition(&diabetes, &frame));

        patient.conditions = RecordCollection::new(vec![Condition {
            id: "c1".into(),
            coding: vec![Coding::new("ICD10CM", "E11.9")],
            clinical_status: Some("active".into()),
            onset_date: Some(datetime!(2018-04-01 0:00 UTC)),
            ..Default::default()
        }]);
        assert!(patient.has_condition(&diabetes, &frame));
    }

    #[test]
    fn test_has_condition_respects_timeframe() {
        let diabetes = ValueSet::builder("Diabetes")
            .codes(pathway_core::CodingSystem::Icd10Cm, ["E11.9"])
            .build();
        let frame = Timeframe::ending_at(datetime!(2023-06-15 0:00 UTC), Shift::Years(1));
        let mut patient = PatientSnapshot::default();

        // Abated before the frame opened: no longer a match.
        patient.conditions = RecordCollection::new(vec![Condition {
            id: "c1".into(),
            coding: vec![Coding::new("ICD10CM", "E11.9")],
            clinical_status: Some("active".into()),
            onset_date: Some(datetime!(2018-04-01 0:00 UTC)),
            abatement_date: Some(datetime!(2020-01-01 0:00 UTC)),
            ..Default::default()
        }]);
        assert!(!patient.has_condition(&diabetes, &frame));

        // An undated condition never matches.
        patient.conditions = RecordCollection::new(vec![Condition {
            id: "c2".into(),
            coding: vec![Coding::new("ICD10CM", "E11.9")],
            clinical_status: Some("active".into()),
            ..Default::default()
        }]);
        assert!(!patient.has_condition(&diabetes, &frame));
    }

    #[test]
    fn test_has_visit_within_skips_cancelled() {
        let office = ValueSet::builder("Office Visit")
            .codes(pathway_core::CodingSystem::Cpt, ["99213"])
            .build();
        let mut patient = PatientSnapshot::default();
        patient.appointments = RecordCollection::new(vec![Appointment {
            id: "a1".into(),
            start_time: Some(datetime!(2023-03-01 9:00 UTC)),
            status: Some("cancelled".into()),
            note_type: Some(crate::records::AppointmentNoteType {
                code: Some("99213".into()),
                system: Some("CPT".into()),
            }),
            ..Default::default()
        }]);
        let frame = Timeframe::ending_at(datetime!(2023-06-01 0:00 UTC), Shift::Years(1));
        assert!(!patient.has_visit_within(&frame, &office));
    }

    #[test]
    fn test_emergency_contacts() {
        let mut patient = PatientSnapshot::default();
        patient.patient.contacts = vec![
            Contact {
                name: Some("Kin".into()),
                categories: vec!["next_of_kin".into()],
                ..Default::default()
            },
            Contact {
                name: Some("Em".into()),
                categories: vec!["emergency_contact".into()],
                ..Default::default()
            },
        ];
        assert_eq!(patient.emergency_contacts().len(), 1);
    }

    #[test]
    fn test_birth_date_wire_form_is_iso() {
        let patient: PatientSnapshot = serde_json::from_str(
            r#"{"patient": {"key": "p1", "firstName": "Grace", "birthDate": "1985-09-12"}}"#,
        )
        .unwrap();
        assert_eq!(patient.birthday(), Some(date!(1985 - 09 - 12)));

        let json = serde_json::to_value(&patient).unwrap();
        assert_eq!(json["patient"]["birthDate"], "1985-09-12");
    }

    #[test]
    fn test_snapshot_deserializes_with_missing_collections() {
        let patient: PatientSnapshot = serde_json::from_str(
            r#"{"patient": {"key": "p1", "firstName": "Ada"}, "conditions": []}"#,
        )
        .unwrap();
        assert_eq!(patient.first_name(), "Ada");
        assert!(patient.lab_reports.is_empty());
    }
}
