//! Event-driven protocol dispatch.
//!
//! The dispatcher is a pure function of its inputs: it selects the
//! protocols subscribed to an event, runs each in isolation, and returns
//! outcomes in identifier order. One protocol's failure (error or panic)
//! is logged and produces no outcome; the others proceed.

use crate::event::ChangeEvent;
use crate::protocol::{EvaluationContext, EvaluationMode, HostEffects};
use crate::registry::ProtocolRegistry;
use crate::result::ProtocolResult;
use indexmap::IndexMap;
use pathway_patient::PatientSnapshot;
use serde::{Deserialize, Serialize};
use std::panic::{AssertUnwindSafe, catch_unwind};
use time::OffsetDateTime;
use tracing::{debug, error};

/// One protocol's contribution to a dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolOutcome {
    pub identifier: String,
    pub version: String,
    pub result: ProtocolResult,
}

/// Runs registered protocols against change events.
pub struct Dispatcher<'a> {
    registry: &'a ProtocolRegistry,
}

impl<'a> Dispatcher<'a> {
    pub fn new(registry: &'a ProtocolRegistry) -> Self {
        Self { registry }
    }

    /// Select and run every protocol subscribed to `event`. Outcomes come
    /// back in protocol-identifier order; dispatching the same inputs twice
    /// yields identical results.
    pub fn dispatch(
        &self,
        patient: &PatientSnapshot,
        event: &ChangeEvent,
        settings: &IndexMap<String, String>,
        now: OffsetDateTime,
        effects: &dyn HostEffects,
    ) -> Vec<ProtocolOutcome> {
        let snapshot = self.registry.snapshot();
        let mut outcomes = Vec::new();

        for (identifier, protocol) in snapshot.iter() {
            let subscribed = event
                .change_tag
                .is_some_and(|tag| protocol.compute_on_change_types().contains(&tag))
                || event
                    .kind
                    .is_some_and(|kind| protocol.responds_to_event_types().contains(&kind));
            if !subscribed {
                continue;
            }
            let meta = protocol.meta();
            if meta.notification_only && event.is_bulk_upload() {
                debug!(identifier = %identifier, "Skipping notification-only protocol on bulk upload");
                continue;
            }

            let ctx = EvaluationContext::new(patient, now)
                .with_field_changes(event.context())
                .with_settings(settings.clone())
                .with_mode(EvaluationMode::Normal)
                .with_effects(effects);

            match catch_unwind(AssertUnwindSafe(|| protocol.compute_results(&ctx))) {
                Ok(Ok(result)) => outcomes.push(ProtocolOutcome {
                    identifier: identifier.clone(),
                    version: meta.version.clone(),
                    result,
                }),
                Ok(Err(e)) => {
                    error!(
                        identifier = %identifier,
                        version = %meta.version,
                        event = %event.model_name,
                        error = %e,
                        "Protocol failed; no result surfaced"
                    );
                }
                Err(_) => {
                    error!(
                        identifier = %identifier,
                        version = %meta.version,
                        event = %event.model_name,
                        "Protocol panicked; no result surfaced"
                    );
                }
            }
        }

        outcomes
    }
}
