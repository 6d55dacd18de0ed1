//! The Pathway protocol evaluation engine.
//!
//! Deterministic core for clinical decision-support protocols: a protocol
//! reads an immutable patient snapshot through value-set and timeframe
//! queries and terminates in exactly one status, carrying a narrative and
//! typed recommendations. The dispatcher selects protocols by change tag or
//! event kind and isolates failures per protocol.

pub mod dispatcher;
pub mod error;
pub mod event;
pub mod protocol;
pub mod recommendation;
pub mod registry;
pub mod result;

pub use dispatcher::{Dispatcher, ProtocolOutcome};
pub use error::{EngineError, Result};
pub use event::{ChangeContext, ChangeEvent, ChangeType, EventType};
pub use protocol::{
    EvaluationContext, EvaluationMode, HostEffects, HostTask, NoEffects, Protocol, ProtocolMeta,
};
pub use recommendation::{
    BannerIntent, BannerPlacement, FollowUpContext, OrderContext, PrescribeContext,
    Recommendation, RecommendationPayload, ReferContext, TaskContext,
};
pub use registry::ProtocolRegistry;
pub use result::{ProtocolResult, ProtocolStatus};
