//! Rule-table audit of recommendations
//!
//! The evaluator second-guesses the commander: each recommendation is
//! checked against override rules keyed by the label. A FAIL does not
//! change the recommendation; it tells the caller the call is logically
//! unsound under the audit bounds and leaves the remediation to them.

use advisor_core::{Result, ScoreSet};
use tracing::warn;

use crate::config::AuditConfig;
use crate::record::{DecisionRecord, Recommendation, Verdict};

/// Audits recommendations against the override rule table
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: AuditConfig,
}

impl Evaluator {
    /// Create an evaluator with the given audit bounds
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    /// The active audit bounds
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Apply the rule table to one recommendation
    ///
    /// - BUY fails when performance is below the floor or risk is above
    ///   the ceiling.
    /// - HOLD fails when sentiment is below the deep-negative floor.
    /// - AVOID fails when the instrument is too significant to discard:
    ///   impact at or above the high floor with clearly positive
    ///   sentiment.
    pub fn verdict(&self, recommendation: Recommendation, scores: &ScoreSet) -> Verdict {
        let failed = match recommendation {
            Recommendation::Buy => {
                scores.performance() < self.config.performance_floor
                    || scores.risk() > self.config.risk_ceiling
            }
            Recommendation::Hold => {
                scores.sentiment() < self.config.sentiment_deep_negative_floor
            }
            Recommendation::Avoid => {
                scores.impact() >= self.config.impact_high_floor
                    && scores.sentiment() >= self.config.sentiment_positive_floor
            }
        };

        if failed { Verdict::Fail } else { Verdict::Pass }
    }

    /// Audit an arbitrary label against the rule table
    ///
    /// # Errors
    ///
    /// Returns [`advisor_core::Error::InvalidRecommendation`] when the
    /// label is not one of `BUY`, `HOLD`, `AVOID`. That is an input
    /// contract violation, not an audit outcome.
    pub fn verdict_for_label(&self, label: &str, scores: &ScoreSet) -> Result<Verdict> {
        let recommendation: Recommendation = label.parse()?;
        Ok(self.verdict(recommendation, scores))
    }

    /// Complete a record with its audit verdict
    pub fn audit(&self, record: DecisionRecord) -> DecisionRecord {
        let verdict = self.verdict(record.recommendation, &record.scores);
        if verdict == Verdict::Fail {
            warn!(
                recommendation = %record.recommendation,
                final_score = record.final_score,
                "recommendation failed the audit"
            );
        }
        DecisionRecord {
            verdict: Some(verdict),
            ..record
        }
    }
}
