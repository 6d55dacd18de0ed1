//! The protocol contract: declared metadata, dispatch declarations, and the
//! `compute_results` body.
//!
//! Protocols are plain structs implementing `Protocol`; there is no runtime
//! class loading. The canonical body shape:
//!
//! ```text
//! if in_denominator:
//!     if in_numerator: SATISFIED + satisfying narrative
//!     else:            DUE, due_in = -1, recommendations + narrative
//! else:                NOT_APPLICABLE, narrative documents why
//! ```

use crate::error::Result;
use crate::event::{ChangeContext, ChangeType, EventType};
use crate::result::ProtocolResult;
use indexmap::IndexMap;
use pathway_core::{Shift, Timeframe};
use pathway_patient::PatientSnapshot;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Declared, immutable protocol metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProtocolMeta {
    pub title: String,
    /// Must change on each upload; hot reload keys off it.
    pub version: String,
    pub description: String,
    /// Information URL shown to clinicians.
    pub information: String,
    pub identifiers: Vec<String>,
    pub types: Vec<String>,
    pub authors: Vec<String>,
    pub references: Vec<String>,
    pub funding_source: String,
    pub default_display_interval_in_days: Option<i64>,
    /// When true the engine must not re-run this protocol on bulk-upload
    /// events.
    pub notification_only: bool,
}

/// Evaluation mode. `Report` bypasses qualifying-visit checks in initial
/// populations so registry-style reporting can classify patients who have
/// not been seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    #[default]
    Normal,
    Report,
}

/// A host task requested by a protocol, e.g. a call reminder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostTask {
    pub title: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub due: Option<OffsetDateTime>,
    pub assignee_identifier: Option<String>,
    pub labels: Vec<String>,
    pub patient_key: Option<String>,
}

/// Capability object for host side effects.
///
/// The engine never performs I/O; a protocol that wants the host to act
/// outside the recommendation queue goes through this seam, which tests
/// replace with a recording stub.
pub trait HostEffects: Send + Sync {
    fn create_task(&self, task: HostTask);
}

/// The default capability: requests nothing of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEffects;

impl HostEffects for NoEffects {
    fn create_task(&self, _task: HostTask) {}
}

/// Everything a protocol body may read. Constructed once per evaluation;
/// the snapshot and settings are immutable by contract.
pub struct EvaluationContext<'a> {
    pub patient: &'a PatientSnapshot,
    pub now: OffsetDateTime,
    /// Default measurement frame, anchored at `now`.
    pub timeframe: Timeframe,
    pub field_changes: Option<ChangeContext>,
    pub settings: IndexMap<String, String>,
    pub mode: EvaluationMode,
    pub effects: &'a dyn HostEffects,
}

impl<'a> EvaluationContext<'a> {
    /// Context with the default one-year measurement frame, empty settings
    /// and no host effects.
    pub fn new(patient: &'a PatientSnapshot, now: OffsetDateTime) -> Self {
        static NO_EFFECTS: NoEffects = NoEffects;
        Self {
            patient,
            now,
            timeframe: Timeframe::ending_at(now, Shift::Years(1)),
            field_changes: None,
            settings: IndexMap::new(),
            mode: EvaluationMode::Normal,
            effects: &NO_EFFECTS,
        }
    }

    pub fn with_effects(mut self, effects: &'a dyn HostEffects) -> Self {
        self.effects = effects;
        self
    }

    pub fn with_field_changes(mut self, changes: ChangeContext) -> Self {
        self.field_changes = Some(changes);
        self
    }

    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_settings(mut self, settings: IndexMap<String, String>) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = timeframe;
        self
    }
}

/// A clinical decision-support protocol.
///
/// `compute_results` must be a pure function of the context: repeated calls
/// with equal inputs produce equal outputs.
pub trait Protocol: Send + Sync {
    fn meta(&self) -> ProtocolMeta;

    /// Host event kinds this protocol runs on.
    fn responds_to_event_types(&self) -> Vec<EventType> {
        vec![EventType::HealthMaintenance]
    }

    /// Change tags this protocol re-runs on.
    fn compute_on_change_types(&self) -> Vec<ChangeType>;

    /// Stable key in the registry and in dispatch outcomes: the first
    /// declared identifier, falling back to the title.
    fn identifier(&self) -> String {
        let meta = self.meta();
        meta.identifiers
            .first()
            .cloned()
            .unwrap_or(meta.title)
    }

    /// Demographic / event pre-filter before exclusions.
    fn in_initial_population(&self, _ctx: &EvaluationContext<'_>) -> bool {
        true
    }

    /// The population the protocol applies to: the initial population with
    /// required encounters, minus exclusions.
    fn in_denominator(&self, ctx: &EvaluationContext<'_>) -> bool {
        self.in_initial_population(ctx) && !self.excluded(ctx)
    }

    /// The subset of the denominator already satisfied.
    fn in_numerator(&self, _ctx: &EvaluationContext<'_>) -> bool {
        false
    }

    fn excluded(&self, _ctx: &EvaluationContext<'_>) -> bool {
        false
    }

    /// Days until this protocol first becomes due, when that is knowable.
    fn first_due_in(&self, _ctx: &EvaluationContext<'_>) -> Option<i64> {
        None
    }

    fn compute_results(&self, ctx: &EvaluationContext<'_>) -> Result<ProtocolResult>;
}
