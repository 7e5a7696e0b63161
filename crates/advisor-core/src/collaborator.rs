//! Scoring collaborator contract
//!
//! The four scoring agents (performance, risk, sentiment, impact) are
//! external services from this workspace's point of view - model
//! inference, market-data plumbing and news retrieval all live behind
//! this trait. The core only relies on the declared output contract:
//! a validated [`Score`] of the agent's kind, or a typed failure.

use crate::error::Result;
use crate::score::{Score, ScoreKind};
use async_trait::async_trait;

/// Contract for an external scoring agent
///
/// Implementations must return a score whose kind matches [`Self::kind`];
/// the decision engine rejects mis-wired agents at construction time.
/// Agents with no mutual data dependency may be invoked concurrently.
#[async_trait]
pub trait ScoringAgent: Send + Sync {
    /// Which of the four scores this agent produces
    fn kind(&self) -> ScoreKind;

    /// Score the given instrument
    ///
    /// A failure must surface as an error, never as a sentinel value.
    async fn score(&self, instrument: &str) -> Result<Score>;
}
