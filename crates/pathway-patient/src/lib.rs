//! Patient record model: typed, temporally-aware, queryable collections.
//!
//! Records arrive from the host as JSON dumps; collections expose
//! `find` (value-set match), `filtered` (attribute predicates), and
//! temporal predicates, all returning new collections in stable
//! chronological order.

pub mod collection;
pub mod query;
pub mod records;
pub mod snapshot;

pub use collection::RecordCollection;
pub use query::{CmpOp, Filter};
pub use records::{
    Appointment, AppointmentNote, AppointmentNoteType, AppointmentStateChange, ClinicalRecord,
    CodedReport, Condition, Immunization, Instruction, Interview, InterviewResponse,
    InterviewResult, LabReport, Medication, MedicationPeriod, Prescription, TaskRecord,
    TaskStatus, VitalSign, VitalSignType,
};
pub use snapshot::{CareTeamMembership, Contact, Demographics, ExternalIdentifier, PatientSnapshot};
