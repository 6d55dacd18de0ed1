//! Fixture-directory harness for exercising protocols.
//!
//! A fixture directory holds one JSON file per record collection
//! (`patient.json`, `conditions.json`, `lab_reports.json`, ...); absent
//! files default to empty collections. The harness assembles the snapshot,
//! builds the evaluation context, and runs `compute_results`, capturing
//! host tasks through a recording stub.

use indexmap::IndexMap;
use pathway_engine::{
    ChangeEvent, EvaluationContext, EvaluationMode, HostEffects, HostTask, Protocol,
    ProtocolResult,
};
use pathway_patient::PatientSnapshot;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to read fixture {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse fixture {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, HarnessError>;

/// Fixture file stem to snapshot field, in snapshot declaration order.
const COLLECTION_FILES: [(&str, &str); 14] = [
    ("conditions", "conditions"),
    ("medications", "medications"),
    ("prescriptions", "prescriptions"),
    ("lab_reports", "labReports"),
    ("vital_signs", "vitalSigns"),
    ("interviews", "interviews"),
    ("appointments", "appointments"),
    ("upcoming_appointments", "upcomingAppointments"),
    ("upcoming_appointment_notes", "upcomingAppointmentNotes"),
    ("tasks", "tasks"),
    ("instructions", "instructions"),
    ("referral_reports", "referralReports"),
    ("imaging_reports", "imagingReports"),
    ("immunizations", "immunizations"),
];

fn read_json(path: &Path) -> Result<Option<Value>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(HarnessError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| HarnessError::Parse {
            path: path.display().to_string(),
            source,
        })
}

/// Assemble a patient snapshot from a fixture directory. Missing files mean
/// empty collections; `patient.json` itself is optional too.
pub fn load_patient(dir: impl AsRef<Path>) -> Result<PatientSnapshot> {
    let dir = dir.as_ref();
    let mut snapshot = Map::new();

    if let Some(demographics) = read_json(&dir.join("patient.json"))? {
        snapshot.insert("patient".to_string(), demographics);
    }
    for (stem, field) in COLLECTION_FILES {
        if let Some(records) = read_json(&dir.join(format!("{stem}.json")))? {
            snapshot.insert(field.to_string(), records);
        }
    }

    let path = dir.join("patient.json");
    serde_json::from_value(Value::Object(snapshot)).map_err(|source| HarnessError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// `HostEffects` stub that records requested tasks for assertion.
#[derive(Debug, Default)]
pub struct RecordingEffects {
    tasks: Mutex<Vec<HostTask>>,
}

impl RecordingEffects {
    pub fn tasks(&self) -> Vec<HostTask> {
        self.tasks.lock().expect("effects lock poisoned").clone()
    }
}

impl HostEffects for RecordingEffects {
    fn create_task(&self, task: HostTask) {
        self.tasks.lock().expect("effects lock poisoned").push(task);
    }
}

/// One-patient test bench: owns the snapshot, the clock, and the recorded
/// side effects across runs.
pub struct Harness {
    pub patient: PatientSnapshot,
    pub now: OffsetDateTime,
    pub settings: IndexMap<String, String>,
    pub mode: EvaluationMode,
    pub event: Option<ChangeEvent>,
    pub effects: RecordingEffects,
}

impl Harness {
    pub fn new(patient: PatientSnapshot, now: OffsetDateTime) -> Self {
        Self {
            patient,
            now,
            settings: IndexMap::new(),
            mode: EvaluationMode::Normal,
            event: None,
            effects: RecordingEffects::default(),
        }
    }

    /// Harness over the snapshot loaded from a fixture directory.
    pub fn from_fixture_dir(dir: impl AsRef<Path>, now: OffsetDateTime) -> Result<Self> {
        Ok(Self::new(load_patient(dir)?, now))
    }

    pub fn with_event(mut self, event: ChangeEvent) -> Self {
        self.event = Some(event);
        self
    }

    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Run one protocol against the harness state.
    pub fn run(&self, protocol: &dyn Protocol) -> pathway_engine::Result<ProtocolResult> {
        let mut ctx = EvaluationContext::new(&self.patient, self.now)
            .with_settings(self.settings.clone())
            .with_mode(self.mode)
            .with_effects(&self.effects);
        if let Some(event) = &self.event {
            ctx = ctx.with_field_changes(event.context());
        }
        protocol.compute_results(&ctx)
    }

    pub fn created_tasks(&self) -> Vec<HostTask> {
        self.effects.tasks()
    }
}
