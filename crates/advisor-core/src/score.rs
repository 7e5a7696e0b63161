//! Score domain types
//!
//! A `Score` is an ephemeral scalar produced by one of the four scoring
//! collaborators, tagged with its producer and validated against that
//! producer's declared domain. A collaborator that cannot produce a valid
//! value must return an error - a score is never a sentinel.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Which collaborator produced a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    /// Historical growth and forecast strength
    Performance,
    /// Volatility and downside probability, higher = riskier
    Risk,
    /// Aggregated news mood, bearish to bullish
    Sentiment,
    /// Significance of the instrument (ESG / market footprint)
    Impact,
}

impl ScoreKind {
    /// Stable lowercase name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::Risk => "risk",
            Self::Sentiment => "sentiment",
            Self::Impact => "impact",
        }
    }

    /// Declared domain for this kind, if it has a closed one
    ///
    /// Risk and impact are unit-interval scores. Sentiment spans bearish
    /// to bullish. Performance has no closed range - its scale depends on
    /// the producing agent's configuration - so only finiteness applies.
    pub fn domain(&self) -> Option<RangeInclusive<f64>> {
        match self {
            Self::Performance => None,
            Self::Risk | Self::Impact => Some(0.0..=1.0),
            Self::Sentiment => Some(-1.0..=1.0),
        }
    }
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validated score with its producer tag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    kind: ScoreKind,
    value: f64,
}

impl Score {
    /// Create a score, rejecting non-finite values and values outside the
    /// kind's declared domain
    pub fn new(kind: ScoreKind, value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::ScoreOutOfRange { kind, value });
        }
        if let Some(domain) = kind.domain() {
            if !domain.contains(&value) {
                return Err(Error::ScoreOutOfRange { kind, value });
            }
        }
        Ok(Self { kind, value })
    }

    /// The producer tag
    pub fn kind(&self) -> ScoreKind {
        self.kind
    }

    /// The scalar value
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// The four collaborator scores bundled for the decision layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    performance: f64,
    risk: f64,
    sentiment: f64,
    impact: f64,
}

impl ScoreSet {
    /// Build a set from raw values, validating each against its domain
    pub fn new(performance: f64, risk: f64, sentiment: f64, impact: f64) -> Result<Self> {
        Ok(Self {
            performance: Score::new(ScoreKind::Performance, performance)?.value(),
            risk: Score::new(ScoreKind::Risk, risk)?.value(),
            sentiment: Score::new(ScoreKind::Sentiment, sentiment)?.value(),
            impact: Score::new(ScoreKind::Impact, impact)?.value(),
        })
    }

    /// Build a set from four already-validated scores, checking that each
    /// occupies the slot matching its kind
    pub fn from_scores(
        performance: Score,
        risk: Score,
        sentiment: Score,
        impact: Score,
    ) -> Result<Self> {
        for (score, expected) in [
            (&performance, ScoreKind::Performance),
            (&risk, ScoreKind::Risk),
            (&sentiment, ScoreKind::Sentiment),
            (&impact, ScoreKind::Impact),
        ] {
            if score.kind() != expected {
                return Err(Error::ContractViolation(format!(
                    "expected a {expected} score, got {}",
                    score.kind()
                )));
            }
        }

        Ok(Self {
            performance: performance.value(),
            risk: risk.value(),
            sentiment: sentiment.value(),
            impact: impact.value(),
        })
    }

    /// Performance score
    pub fn performance(&self) -> f64 {
        self.performance
    }

    /// Risk score in [0, 1]
    pub fn risk(&self) -> f64 {
        self.risk
    }

    /// Sentiment score in [-1, 1]
    pub fn sentiment(&self) -> f64 {
        self.sentiment
    }

    /// Impact score in [0, 1]
    pub fn impact(&self) -> f64 {
        self.impact
    }
}
