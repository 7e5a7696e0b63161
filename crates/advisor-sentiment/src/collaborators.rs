//! Collaborator contracts consumed by the sentiment pipeline
//!
//! The pipeline never talks to the outside world directly; discovery,
//! fetching, and classification are delegated through these traits. Their
//! implementations (news APIs, scrapers, model inference) live outside
//! this crate. Every implementation must either return a value of the
//! declared type or fail with a typed error, never a sentinel.

use async_trait::async_trait;

use advisor_core::Result;

use crate::labels::SentimentLabel;
use crate::timeframe::Timeframe;

/// Discovers article links for an instrument
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// List article URLs covering the instrument
    ///
    /// # Arguments
    ///
    /// * `instrument` - Instrument symbol, e.g. "AAPL"
    /// * `window` - Optional lookback window; `None` means the source's
    ///   own default horizon
    async fn articles(&self, instrument: &str, window: Option<&Timeframe>) -> Result<Vec<String>>;
}

/// Fetches one article and splits it into paragraphs
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Fetch the article body behind a URL as a list of paragraphs
    async fn fetch(&self, url: &str) -> Result<Vec<String>>;
}

/// Classifies a piece of text into a sentiment label
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classify one paragraph of text
    async fn classify(&self, text: &str) -> Result<SentimentLabel>;
}
