//! Error types for advisor-core
//!
//! One taxonomy for the whole workspace. Construction-time problems
//! (`ContractViolation`, `Config`) are programmer errors and fatal;
//! collaborator problems are recoverable and must stay typed so an
//! orchestrator can branch on them. An audit FAIL is not represented
//! here at all - it is an ordinary `Verdict` value, not an error.

use crate::score::ScoreKind;
use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for advisor operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed tool wrapping or registration (missing description,
    /// missing output type, duplicate names, mis-wired engine slots)
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// A recommendation label outside {BUY, HOLD, AVOID} was handed to
    /// the audit layer
    #[error("invalid recommendation label: {0:?}")]
    InvalidRecommendation(String),

    /// An external collaborator call failed (credentials, rate limit,
    /// network, unparseable output)
    #[error("collaborator '{agent}' failed: {reason}")]
    Collaborator {
        /// Which collaborator failed
        agent: String,
        /// What went wrong
        reason: String,
    },

    /// A collaborator produced a value outside its declared domain,
    /// or a non-finite value
    #[error("{kind} score {value} is outside the declared domain")]
    ScoreOutOfRange {
        /// Which score kind was violated
        kind: ScoreKind,
        /// The offending value
        value: f64,
    },

    /// Malformed lookback window such as "10 d" or "7w"
    #[error("invalid timeframe: {0}")]
    InvalidTimeframe(String),

    /// An aggregation stage was invoked over zero items
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Invalid configuration detected at startup
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON encoding or decoding failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build a collaborator failure for the named agent
    pub fn collaborator(agent: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Collaborator {
            agent: agent.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error is recoverable from the orchestrator's point of
    /// view (collaborator trouble) rather than a programming error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Collaborator { .. }
                | Self::ScoreOutOfRange { .. }
                | Self::InvalidTimeframe(_)
                | Self::EmptyInput(_)
        )
    }
}
