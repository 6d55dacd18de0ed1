//! Hot-reloadable protocol registry.
//!
//! Protocols are registered at build time and keyed by identifier. The
//! whole map sits behind an `ArcSwap`: reads are lock-free snapshots, and
//! uploading a new protocol version rebuilds and swaps the map without
//! disturbing dispatches already running on the old snapshot.

use crate::protocol::Protocol;
use arc_swap::ArcSwap;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

type ProtocolMap = IndexMap<String, Arc<dyn Protocol>>;

/// Registry of runnable protocols, keyed by protocol identifier.
#[derive(Default)]
pub struct ProtocolRegistry {
    inner: ArcSwap<ProtocolMap>,
}

impl ProtocolRegistry {
    pub fn new() -> Self {
        Self {
            inner: ArcSwap::from_pointee(ProtocolMap::new()),
        }
    }

    /// Register a protocol, replacing any entry with the same identifier.
    /// Replacement is how hot reload works: a new upload carries a new
    /// version under the same identifier.
    pub fn upsert(&self, protocol: Arc<dyn Protocol>) {
        let identifier = protocol.identifier();
        let version = protocol.meta().version;
        let mut next: ProtocolMap = (**self.inner.load()).clone();
        let replaced = next.insert(identifier.clone(), protocol).is_some();
        next.sort_keys();
        self.inner.store(Arc::new(next));
        debug!(identifier = %identifier, version = %version, replaced, "Registered protocol");
    }

    /// Remove a protocol by identifier; true when something was removed.
    pub fn remove(&self, identifier: &str) -> bool {
        let mut next: ProtocolMap = (**self.inner.load()).clone();
        let removed = next.shift_remove(identifier).is_some();
        if removed {
            self.inner.store(Arc::new(next));
            debug!(identifier = %identifier, "Removed protocol");
        }
        removed
    }

    /// Lock-free snapshot of the current protocol set, identifier-sorted.
    pub fn snapshot(&self) -> Arc<ProtocolMap> {
        self.inner.load_full()
    }

    pub fn len(&self) -> usize {
        self.inner.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.load().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::event::ChangeType;
    use crate::protocol::{EvaluationContext, ProtocolMeta};
    use crate::result::ProtocolResult;

    struct Versioned(&'static str, &'static str);

    impl Protocol for Versioned {
        fn meta(&self) -> ProtocolMeta {
            ProtocolMeta {
                title: "Versioned".into(),
                version: self.1.into(),
                identifiers: vec![self.0.into()],
                ..Default::default()
            }
        }

        fn compute_on_change_types(&self) -> Vec<ChangeType> {
            vec![ChangeType::Patient]
        }

        fn compute_results(&self, _ctx: &EvaluationContext<'_>) -> Result<ProtocolResult> {
            Ok(ProtocolResult::new())
        }
    }

    #[test]
    fn test_upsert_and_snapshot() {
        let registry = ProtocolRegistry::new();
        registry.upsert(Arc::new(Versioned("B001", "v1")));
        registry.upsert(Arc::new(Versioned("A001", "v1")));
        let snapshot = registry.snapshot();
        let keys: Vec<&str> = snapshot.keys().map(String::as_str).collect();
        assert_eq!(keys, ["A001", "B001"]);
    }

    #[test]
    fn test_upsert_replaces_version() {
        let registry = ProtocolRegistry::new();
        registry.upsert(Arc::new(Versioned("A001", "v1")));
        registry.upsert(Arc::new(Versioned("A001", "v2")));
        assert_eq!(registry.len(), 1);
        let snapshot = registry.snapshot();
        assert_eq!(snapshot["A001"].meta().version, "v2");
    }

    #[test]
    fn test_old_snapshot_survives_reload() {
        let registry = ProtocolRegistry::new();
        registry.upsert(Arc::new(Versioned("A001", "v1")));
        let held = registry.snapshot();
        registry.upsert(Arc::new(Versioned("A001", "v2")));
        // The in-flight snapshot still sees the version it started with.
        assert_eq!(held["A001"].meta().version, "v1");
        assert_eq!(registry.snapshot()["A001"].meta().version, "v2");
    }

    #[test]
    fn test_remove() {
        let registry = ProtocolRegistry::new();
        registry.upsert(Arc::new(Versioned("A001", "v1")));
        assert!(registry.remove("A001"));
        assert!(!registry.remove("A001"));
        assert!(registry.is_empty());
    }
}
