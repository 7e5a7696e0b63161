//! Core abstractions for the advisor workspace
//!
//! This crate defines the error taxonomy, the score domain types produced
//! by the four scoring collaborators, and the collaborator contract itself.

pub mod collaborator;
pub mod error;
pub mod score;

pub use collaborator::ScoringAgent;
pub use error::{Error, Result};
pub use score::{Score, ScoreKind, ScoreSet};
