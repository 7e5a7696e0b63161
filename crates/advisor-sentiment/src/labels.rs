//! Per-article sentiment labels

use std::fmt;
use std::str::FromStr;

use advisor_core::Error;
use serde::{Deserialize, Serialize};

/// Sentiment of one article or paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
}

impl SentimentLabel {
    /// Stable lowercase name, matching the classifier vocabulary
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        }
    }

    /// Polarity on the -1 / 0 / +1 scale
    pub fn polarity(&self) -> i8 {
        match self {
            Self::Negative => -1,
            Self::Neutral => 0,
            Self::Positive => 1,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = Error;

    /// Parse classifier output
    ///
    /// Accepts the declared vocabulary {"positive", "neutral",
    /// "negative"}, tolerating surrounding whitespace and casing.
    /// Anything else means the classifier broke its contract, which is a
    /// collaborator failure.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "negative" => Ok(Self::Negative),
            "neutral" => Ok(Self::Neutral),
            "positive" => Ok(Self::Positive),
            _ => Err(Error::collaborator(
                "text-classifier",
                format!("unrecognized sentiment label {s:?}"),
            )),
        }
    }
}
