//! The normalized protocol result.

use crate::error::{EngineError, Result};
use crate::recommendation::Recommendation;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::Date;

/// Classification a protocol run terminates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolStatus {
    Due,
    Satisfied,
    NotApplicable,
    /// Reserved; never emitted by the core.
    Pending,
}

impl ProtocolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolStatus::Due => "due",
            ProtocolStatus::Satisfied => "satisfied",
            ProtocolStatus::NotApplicable => "not_applicable",
            ProtocolStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for ProtocolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalized output of one protocol run.
///
/// Status starts at `NotApplicable` and moves monotonically to a terminal
/// classification within a single `compute_results` call; after the
/// protocol returns the result is plain data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolResult {
    status: ProtocolStatus,
    /// Negative means overdue, zero due today, positive days-until-due.
    /// When satisfied, days until the next scheduled review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_in: Option<i64>,
    days_of_notice: i64,
    #[serde(
        default,
        with = "pathway_core::time::iso_date::option",
        skip_serializing_if = "Option::is_none"
    )]
    next_review: Option<Date>,
    #[serde(default)]
    narrative: String,
    #[serde(default)]
    recommendations: Vec<Recommendation>,
}

impl Default for ProtocolResult {
    fn default() -> Self {
        Self {
            status: ProtocolStatus::NotApplicable,
            due_in: None,
            days_of_notice: 30,
            next_review: None,
            narrative: String::new(),
            recommendations: Vec::new(),
        }
    }
}

impl ProtocolResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ProtocolStatus {
        self.status
    }

    /// Assign a status. Legal moves: `NotApplicable` to `Due` or
    /// `Satisfied`, and `Due` and `Satisfied` into each other before
    /// emission. Anything else is a programming error in the protocol.
    pub fn set_status(&mut self, status: ProtocolStatus) -> Result<()> {
        let legal = match (self.status, status) {
            (current, next) if current == next => true,
            (ProtocolStatus::NotApplicable, ProtocolStatus::Due)
            | (ProtocolStatus::NotApplicable, ProtocolStatus::Satisfied)
            | (ProtocolStatus::Due, ProtocolStatus::Satisfied)
            | (ProtocolStatus::Satisfied, ProtocolStatus::Due) => true,
            _ => false,
        };
        if !legal {
            return Err(EngineError::illegal_status_transition(
                self.status.as_str(),
                status.as_str(),
            ));
        }
        self.status = status;
        Ok(())
    }

    pub fn due_in(&self) -> Option<i64> {
        self.due_in
    }

    pub fn set_due_in(&mut self, days: i64) {
        self.due_in = Some(days);
    }

    pub fn days_of_notice(&self) -> i64 {
        self.days_of_notice
    }

    pub fn set_days_of_notice(&mut self, days: i64) {
        self.days_of_notice = days;
    }

    pub fn next_review(&self) -> Option<Date> {
        self.next_review
    }

    pub fn set_next_review(&mut self, date: Date) {
        self.next_review = Some(date);
    }

    /// Append a narrative fragment; fragments join with a single space.
    pub fn add_narrative(&mut self, fragment: impl AsRef<str>) {
        let fragment = fragment.as_ref().trim();
        if fragment.is_empty() {
            return;
        }
        if !self.narrative.is_empty() {
            self.narrative.push(' ');
        }
        self.narrative.push_str(fragment);
    }

    pub fn narrative(&self) -> &str {
        &self.narrative
    }

    /// Append a recommendation; keys must be unique within one result.
    pub fn add_recommendation(&mut self, recommendation: Recommendation) -> Result<()> {
        if self
            .recommendations
            .iter()
            .any(|r| r.key == recommendation.key)
        {
            return Err(EngineError::duplicate_recommendation_key(
                recommendation.key,
            ));
        }
        self.recommendations.push(recommendation);
        Ok(())
    }

    /// Recommendations in rank order; equal ranks keep insertion order.
    pub fn recommendations(&self) -> Vec<&Recommendation> {
        let mut ordered: Vec<(usize, &Recommendation)> =
            self.recommendations.iter().enumerate().collect();
        ordered.sort_by_key(|(index, r)| (r.rank, *index));
        ordered.into_iter().map(|(_, r)| r).collect()
    }

    pub fn recommendation_count(&self) -> usize {
        self.recommendations.len()
    }
}
