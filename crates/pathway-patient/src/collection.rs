//! Ordered, queryable collections of clinical records.
//!
//! Collections are chronological by canonical date with ties broken by
//! record id, so `last()` is deterministic across runs and hosts. Every
//! query returns a new collection; the snapshot is never mutated.

use crate::query::Filter;
use crate::records::ClinicalRecord;
use pathway_core::Timeframe;
use pathway_valuesets::ValueSet;
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// An ordered sequence of records of one kind.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RecordCollection<T: ClinicalRecord> {
    records: Vec<T>,
}

impl<T: ClinicalRecord> RecordCollection<T> {
    /// Build a collection, sorting chronologically (undated records first,
    /// ties by record id).
    pub fn new(mut records: Vec<T>) -> Self {
        records.sort_by(|a, b| {
            a.canonical_date()
                .cmp(&b.canonical_date())
                .then_with(|| a.record_id().cmp(b.record_id()))
        });
        Self { records }
    }

    pub fn empty() -> Self {
        Self { records: Vec::new() }
    }

    /// Records with at least one coding in the value set.
    pub fn find(&self, value_set: &ValueSet) -> Self {
        self.retain(|r| r.codings().iter().any(|c| value_set.contains_coding(c)))
    }

    /// Records satisfying every clause of the filter.
    pub fn filtered(&self, filter: &Filter) -> Self {
        self.retain(|r| match serde_json::to_value(r) {
            Ok(value) => filter.matches(&value),
            Err(_) => false,
        })
    }

    /// Records whose canonical date falls in `[start, end)`. Undated
    /// records are excluded.
    pub fn within(&self, timeframe: &Timeframe) -> Self {
        self.retain(|r| r.canonical_date().is_some_and(|d| timeframe.contains(d)))
    }

    /// Records dated strictly after `t`.
    pub fn after(&self, t: OffsetDateTime) -> Self {
        self.retain(|r| r.canonical_date().is_some_and(|d| d > t))
    }

    /// Records dated strictly before `t`.
    pub fn before(&self, t: OffsetDateTime) -> Self {
        self.retain(|r| r.canonical_date().is_some_and(|d| d < t))
    }

    /// Records whose effective period starts before `t`.
    pub fn starts_before(&self, t: OffsetDateTime) -> Self {
        self.retain(|r| r.effective_period().0.is_some_and(|d| d < t))
    }

    /// Records whose effective period overlaps the timeframe. With
    /// `still_active`, records whose period closed before the frame's end
    /// are excluded.
    pub fn intersects(&self, timeframe: &Timeframe, still_active: bool) -> Self {
        self.retain(|r| {
            let (start, end) = r.effective_period();
            let Some(start) = start else {
                return false;
            };
            let overlaps = start < timeframe.end && end.is_none_or(|e| e >= timeframe.start);
            let active = !still_active || end.is_none_or(|e| e >= timeframe.end);
            overlaps && active
        })
    }

    /// The most recent record.
    pub fn last(&self) -> Option<&T> {
        self.records.last()
    }

    /// The oldest record.
    pub fn first(&self) -> Option<&T> {
        self.records.first()
    }

    /// The scalar value of the most recent record that has one.
    pub fn last_value(&self) -> Option<String> {
        self.records.iter().rev().find_map(|r| r.scalar_value())
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn retain(&self, keep: impl Fn(&T) -> bool) -> Self {
        // Predicates preserve order, so no re-sort.
        Self {
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}

impl<T: ClinicalRecord> Default for RecordCollection<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ClinicalRecord> From<Vec<T>> for RecordCollection<T> {
    fn from(records: Vec<T>) -> Self {
        Self::new(records)
    }
}

impl<'de, T: ClinicalRecord + Deserialize<'de>> Deserialize<'de> for RecordCollection<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::new(Vec::deserialize(deserializer)?))
    }
}

impl<'a, T: ClinicalRecord> IntoIterator for &'a RecordCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
