use thiserror::Error;

/// Engine error types.
///
/// Data misses are not errors (they are non-matches); these variants mark
/// programming errors in a protocol body or failures local to one protocol
/// run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Duplicate recommendation key: {0}")]
    DuplicateRecommendationKey(String),

    #[error("Illegal status transition: {from} -> {to}")]
    IllegalStatusTransition { from: String, to: String },

    #[error("Protocol failure: {0}")]
    ProtocolFailure(String),

    #[error("Core error: {0}")]
    Core(#[from] pathway_core::CoreError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Create a new DuplicateRecommendationKey error
    pub fn duplicate_recommendation_key(key: impl Into<String>) -> Self {
        Self::DuplicateRecommendationKey(key.into())
    }

    /// Create a new IllegalStatusTransition error
    pub fn illegal_status_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::IllegalStatusTransition {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a new ProtocolFailure error
    pub fn protocol_failure(message: impl Into<String>) -> Self {
        Self::ProtocolFailure(message.into())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
