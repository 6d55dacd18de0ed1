//! Value sets for the Pathway protocol engine.
//!
//! `ValueSet` is the composable criterion leaf: a named bundle of medical
//! codes keyed by coding system, unioned with `|`. The domain modules hold
//! the declared tables (mechanical data); `registry` resolves them by name.

pub mod conditions;
pub mod encounters;
pub mod immunizations;
pub mod instructions;
pub mod labs;
pub mod medications;
pub mod procedures;
pub mod questionnaires;
pub mod registry;
pub mod value_set;

pub use value_set::{ValueSet, ValueSetBuilder};
