//! Concrete clinical decision-support protocols for the Pathway engine.
//!
//! One protocol per module, each in the canonical shape: denominator check,
//! numerator check, then a DUE result with recommendations or a SATISFIED
//! one with a narrative. `default_registry` pre-loads every shipped
//! protocol.

pub mod appointment_reminder;
pub mod breast_cancer_screening;
pub mod emergency_contact_review;
pub mod hba1c_monitoring;
pub mod phq9_followup;

pub use appointment_reminder::AppointmentReminder;
pub use breast_cancer_screening::BreastCancerScreening;
pub use emergency_contact_review::EmergencyContactReview;
pub use hba1c_monitoring::Hba1cMonitoring;
pub use phq9_followup::Phq9Followup;

use pathway_engine::ProtocolRegistry;
use std::sync::Arc;

/// A registry loaded with every protocol this crate ships.
pub fn default_registry() -> ProtocolRegistry {
    let registry = ProtocolRegistry::new();
    registry.upsert(Arc::new(AppointmentReminder));
    registry.upsert(Arc::new(BreastCancerScreening));
    registry.upsert(Arc::new(EmergencyContactReview));
    registry.upsert(Arc::new(Hba1cMonitoring));
    registry.upsert(Arc::new(Phq9Followup));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_is_loaded() {
        let registry = default_registry();
        assert_eq!(registry.len(), 5);
        let snapshot = registry.snapshot();
        assert!(snapshot.contains_key("CMS125v10"));
        assert!(snapshot.contains_key("AppointmentReminder"));
    }

    #[test]
    fn test_identifiers_are_unique() {
        let registry = default_registry();
        let snapshot = registry.snapshot();
        let mut identifiers: Vec<&str> = snapshot.keys().map(String::as_str).collect();
        identifiers.sort_unstable();
        identifiers.dedup();
        assert_eq!(identifiers.len(), registry.len());
    }
}
