//! Recommendation labels, audit verdicts, and the decision record

use std::fmt;
use std::str::FromStr;

use advisor_core::{Error, ScoreSet};
use serde::{Deserialize, Serialize};

/// Recommendation produced by the commander
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Hold,
    Avoid,
}

impl Recommendation {
    /// Canonical label, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Hold => "HOLD",
            Self::Avoid => "AVOID",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recommendation {
    type Err = Error;

    /// Parse a canonical label
    ///
    /// Only the exact labels `BUY`, `HOLD`, and `AVOID` are accepted;
    /// anything else is an [`Error::InvalidRecommendation`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Self::Buy),
            "HOLD" => Ok(Self::Hold),
            "AVOID" => Ok(Self::Avoid),
            other => Err(Error::InvalidRecommendation(other.to_string())),
        }
    }
}

/// Audit outcome for a recommendation
///
/// A failed audit is data for the caller to branch on, not an error: the
/// recommendation stands, flagged as logically unsound under the rule
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Canonical label, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One complete decision over an instrument
///
/// Produced unaudited by the commander; the evaluator fills in the
/// verdict. The record never changes after that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// The four collaborator scores the decision was made from
    pub scores: ScoreSet,

    /// Weighted final score
    pub final_score: f64,

    /// The commander's call
    pub recommendation: Recommendation,

    /// Audit outcome, `None` until the record has been audited
    pub verdict: Option<Verdict>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for (label, expected) in [
            ("BUY", Recommendation::Buy),
            ("HOLD", Recommendation::Hold),
            ("AVOID", Recommendation::Avoid),
        ] {
            assert_eq!(label.parse::<Recommendation>().unwrap(), expected);
            assert_eq!(expected.to_string(), label);
        }
    }

    #[test]
    fn test_unknown_labels_are_rejected() {
        for label in ["SELL", "buy", "Hold", " AVOID", ""] {
            let err = label.parse::<Recommendation>().unwrap_err();
            assert!(matches!(err, Error::InvalidRecommendation(_)));
        }
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Pass.to_string(), "PASS");
        assert_eq!(Verdict::Fail.to_string(), "FAIL");
        assert!(Verdict::Pass.is_pass());
        assert!(!Verdict::Fail.is_pass());
    }

    #[test]
    fn test_record_serializes_with_canonical_labels() {
        let record = DecisionRecord {
            scores: ScoreSet::new(0.9, 0.5, 0.7, 0.25).unwrap(),
            final_score: 0.695,
            recommendation: Recommendation::Hold,
            verdict: Some(Verdict::Pass),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["recommendation"], "HOLD");
        assert_eq!(json["verdict"], "PASS");
        assert_eq!(json["scores"]["risk"], 0.5);
    }
}
