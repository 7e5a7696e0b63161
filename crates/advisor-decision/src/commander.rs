//! Weighted ensemble commander
//!
//! Collapses the four collaborator scores into one final score and maps it
//! onto a recommendation. Pure and deterministic: the same scores under
//! the same configuration always produce the same record.

use advisor_core::ScoreSet;
use tracing::debug;

use crate::config::DecisionConfig;
use crate::record::{DecisionRecord, Recommendation};

/// Combines the four scores into a recommendation
#[derive(Debug, Clone, Default)]
pub struct Commander {
    config: DecisionConfig,
}

impl Commander {
    /// Create a commander with the given configuration
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Weighted sum of the four scores
    pub fn final_score(&self, scores: &ScoreSet) -> f64 {
        self.config.performance_weight * scores.performance()
            + self.config.risk_weight * scores.risk()
            + self.config.sentiment_weight * scores.sentiment()
            + self.config.impact_weight * scores.impact()
    }

    /// Map a final score onto a recommendation
    pub fn classify(&self, final_score: f64) -> Recommendation {
        if final_score > self.config.buy_threshold {
            Recommendation::Buy
        } else if final_score > self.config.hold_threshold {
            Recommendation::Hold
        } else {
            Recommendation::Avoid
        }
    }

    /// Produce an unaudited decision record for a set of scores
    pub fn recommend(&self, scores: ScoreSet) -> DecisionRecord {
        let final_score = self.final_score(&scores);
        let recommendation = self.classify(final_score);
        debug!(final_score, %recommendation, "commander decision");
        DecisionRecord {
            scores,
            final_score,
            recommendation,
            verdict: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_sum_worked_example() {
        let commander = Commander::default();
        let scores = ScoreSet::new(0.9, 0.5, 0.7, 0.25).unwrap();

        let final_score = commander.final_score(&scores);
        assert!((final_score - 0.695).abs() < 1e-12);

        let record = commander.recommend(scores);
        assert_eq!(record.recommendation, Recommendation::Hold);
        assert!(record.verdict.is_none());
    }

    #[test]
    fn test_classify_thresholds_are_strict() {
        let commander = Commander::default();
        assert_eq!(commander.classify(0.71), Recommendation::Buy);
        assert_eq!(commander.classify(0.7), Recommendation::Hold);
        assert_eq!(commander.classify(0.41), Recommendation::Hold);
        assert_eq!(commander.classify(0.4), Recommendation::Avoid);
        assert_eq!(commander.classify(-0.2), Recommendation::Avoid);
    }

    #[test]
    fn test_custom_weights_change_the_call() {
        let config = DecisionConfig::builder()
            .performance_weight(1.0)
            .risk_weight(0.0)
            .sentiment_weight(0.0)
            .impact_weight(0.0)
            .build()
            .unwrap();
        let commander = Commander::new(config);
        let scores = ScoreSet::new(0.95, 1.0, -1.0, 0.0).unwrap();
        assert_eq!(commander.recommend(scores).recommendation, Recommendation::Buy);
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let commander = Commander::default();
        let scores = ScoreSet::new(0.3, 0.4, -0.2, 0.6).unwrap();
        let a = commander.recommend(scores);
        let b = commander.recommend(scores);
        assert_eq!(a.final_score, b.final_score);
        assert_eq!(a.recommendation, b.recommendation);
    }
}
