//! Decision layer for advisor-rs
//!
//! Combines the four collaborator scores into a final recommendation
//! ([`Commander`]), audits it against an override rule table
//! ([`Evaluator`]), and orchestrates the whole assessment
//! ([`DecisionEngine`]). The `tools` module exposes both steps as
//! contracts in the `decision` namespace.

pub mod commander;
pub mod config;
pub mod engine;
pub mod evaluator;
pub mod record;
pub mod tools;

pub use commander::Commander;
pub use config::{AuditConfig, AuditConfigBuilder, DecisionConfig, DecisionConfigBuilder};
pub use engine::{DecisionEngine, DecisionEngineBuilder};
pub use evaluator::Evaluator;
pub use record::{DecisionRecord, Recommendation, Verdict};
