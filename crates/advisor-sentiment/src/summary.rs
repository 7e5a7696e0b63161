//! Aggregation of per-article labels into a summary
//!
//! The extract and summarize stages are pure: a tally of labels, then a
//! derived score with a qualitative band and a narrative digest.

use std::fmt;

use advisor_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::labels::SentimentLabel;

/// Tally of per-article sentiment labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentStats {
    /// Number of labeled articles
    pub count: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentStats {
    /// Tally a list of per-article labels
    pub fn from_labels(labels: &[SentimentLabel]) -> Self {
        let mut stats = Self {
            count: labels.len(),
            positive: 0,
            neutral: 0,
            negative: 0,
        };
        for label in labels {
            match label {
                SentimentLabel::Positive => stats.positive += 1,
                SentimentLabel::Neutral => stats.neutral += 1,
                SentimentLabel::Negative => stats.negative += 1,
            }
        }
        stats
    }
}

/// Qualitative band for an aggregate sentiment score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentBand {
    StronglyNegative,
    SlightlyNegative,
    Neutral,
    SlightlyPositive,
    StronglyPositive,
}

impl SentimentBand {
    /// Band for an aggregate score in [-1, 1]
    pub fn for_score(score: f64) -> Self {
        if score < -0.5 {
            Self::StronglyNegative
        } else if score < 0.0 {
            Self::SlightlyNegative
        } else if score == 0.0 {
            Self::Neutral
        } else if score < 0.5 {
            Self::SlightlyPositive
        } else {
            Self::StronglyPositive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StronglyNegative => "strongly negative",
            Self::SlightlyNegative => "slightly negative",
            Self::Neutral => "neutral",
            Self::SlightlyPositive => "slightly positive",
            Self::StronglyPositive => "strongly positive",
        }
    }
}

impl fmt::Display for SentimentBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate sentiment over a batch of articles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    /// (positive - negative) / count, in [-1, 1]
    pub score: f64,
    pub band: SentimentBand,
    /// Human-readable digest of the tally
    pub narrative: String,
}

impl SentimentSummary {
    /// Derive score, band, and narrative from a tally
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] when the tally covers zero articles;
    /// there is no meaningful aggregate over nothing.
    pub fn from_stats(stats: &SentimentStats) -> Result<Self> {
        if stats.count == 0 {
            return Err(Error::EmptyInput(
                "cannot summarize sentiment over zero articles".to_string(),
            ));
        }

        let score = (stats.positive as f64 - stats.negative as f64) / stats.count as f64;
        let band = SentimentBand::for_score(score);
        let narrative = format!(
            "Coverage of {} articles is {}: {}% positive, {}% neutral, {}% negative (score {:.2}).",
            stats.count,
            band,
            percent(stats.positive, stats.count),
            percent(stats.neutral, stats.count),
            percent(stats.negative, stats.count),
            score
        );

        Ok(Self {
            score,
            band,
            narrative,
        })
    }
}

/// Integer percentage, floored
fn percent(part: usize, total: usize) -> usize {
    part * 100 / total
}
