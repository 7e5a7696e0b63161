//! The five-stage sentiment pipeline
//!
//! retrieve -> preprocess -> classify -> extract -> summarize, strictly
//! in that order, each stage's output feeding the next stage's input.
//! The stages themselves hold no state between invocations; external
//! effects happen only inside the delegated collaborator calls.

use std::collections::HashSet;
use std::sync::Arc;

use advisor_core::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::collaborators::{ArticleFetcher, ArticleSource, TextClassifier};
use crate::labels::SentimentLabel;
use crate::summary::{SentimentStats, SentimentSummary};
use crate::timeframe::Timeframe;

/// Result of fetching one article
///
/// A failed fetch stays in the batch as an explicit marker so later
/// stages and callers can see which articles were lost; it is never
/// silently dropped or passed off as an empty article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// Article body split into paragraphs
    Fetched {
        url: String,
        paragraphs: Vec<String>,
    },
    /// The fetch failed; the reason is kept for the caller
    Failed { url: String, reason: String },
}

impl FetchOutcome {
    pub fn url(&self) -> &str {
        match self {
            Self::Fetched { url, .. } | Self::Failed { url, .. } => url,
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched { .. })
    }
}

/// News sentiment pipeline over three collaborators
///
/// Construct with [`SentimentPipeline::new`]; add a lookback window with
/// [`with_window`] if the article source should be time-bounded. Each
/// stage is callable on its own, or [`run`] chains all five.
///
/// [`with_window`]: Self::with_window
/// [`run`]: Self::run
pub struct SentimentPipeline {
    source: Arc<dyn ArticleSource>,
    fetcher: Arc<dyn ArticleFetcher>,
    classifier: Arc<dyn TextClassifier>,
    window: Option<Timeframe>,
}

impl SentimentPipeline {
    /// Create a pipeline over the three collaborators
    pub fn new(
        source: Arc<dyn ArticleSource>,
        fetcher: Arc<dyn ArticleFetcher>,
        classifier: Arc<dyn TextClassifier>,
    ) -> Self {
        Self {
            source,
            fetcher,
            classifier,
            window: None,
        }
    }

    /// Bound article discovery to a lookback window
    pub fn with_window(mut self, window: Timeframe) -> Self {
        self.window = Some(window);
        self
    }

    /// The configured lookback window, if any
    pub fn window(&self) -> Option<&Timeframe> {
        self.window.as_ref()
    }

    /// Stage 1: discover article links for an instrument
    ///
    /// Duplicates are removed, keeping the first occurrence of each URL.
    pub async fn retrieve(&self, instrument: &str) -> Result<Vec<String>> {
        let urls = self.source.articles(instrument, self.window.as_ref()).await?;
        let mut seen = HashSet::new();
        let unique: Vec<String> = urls.into_iter().filter(|url| seen.insert(url.clone())).collect();
        debug!(instrument, links = unique.len(), "retrieved article links");
        Ok(unique)
    }

    /// Stage 2: fetch each article into paragraphs
    ///
    /// One outcome per URL, in input order. A failed fetch becomes a
    /// [`FetchOutcome::Failed`] marker instead of dropping the article.
    pub async fn preprocess(&self, urls: &[String]) -> Vec<FetchOutcome> {
        let mut outcomes = Vec::with_capacity(urls.len());
        for url in urls {
            match self.fetcher.fetch(url).await {
                Ok(paragraphs) => {
                    debug!(url = %url, paragraphs = paragraphs.len(), "article fetched");
                    outcomes.push(FetchOutcome::Fetched {
                        url: url.clone(),
                        paragraphs,
                    });
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "article fetch failed");
                    outcomes.push(FetchOutcome::Failed {
                        url: url.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        outcomes
    }

    /// Stage 3: label each fetched article
    ///
    /// Every paragraph of an article is classified and the article takes
    /// the majority label; a label must hold a unique plurality to win,
    /// any tie resolves to neutral. Failed fetches and articles without
    /// paragraphs produce no label.
    ///
    /// # Errors
    ///
    /// A classifier failure aborts the stage; partial label lists are
    /// never returned.
    pub async fn classify(&self, outcomes: &[FetchOutcome]) -> Result<Vec<SentimentLabel>> {
        let mut labels = Vec::new();
        for outcome in outcomes {
            match outcome {
                FetchOutcome::Failed { url, .. } => {
                    debug!(url = %url, "skipping failed fetch");
                }
                FetchOutcome::Fetched { url, paragraphs } if paragraphs.is_empty() => {
                    debug!(url = %url, "article has no paragraphs to classify");
                }
                FetchOutcome::Fetched { url, paragraphs } => {
                    let mut paragraph_labels = Vec::with_capacity(paragraphs.len());
                    for paragraph in paragraphs {
                        paragraph_labels.push(self.classifier.classify(paragraph).await?);
                    }
                    let label = majority_label(&paragraph_labels);
                    debug!(url = %url, label = %label, "article labeled");
                    labels.push(label);
                }
            }
        }
        Ok(labels)
    }

    /// Stage 4: tally the labels
    pub fn extract(&self, labels: &[SentimentLabel]) -> SentimentStats {
        SentimentStats::from_labels(labels)
    }

    /// Stage 5: derive the aggregate summary
    ///
    /// # Errors
    ///
    /// Returns [`advisor_core::Error::EmptyInput`] when the tally covers
    /// zero articles.
    pub fn summarize(&self, stats: &SentimentStats) -> Result<SentimentSummary> {
        SentimentSummary::from_stats(stats)
    }

    /// Run all five stages for an instrument
    pub async fn run(&self, instrument: &str) -> Result<SentimentSummary> {
        info!(instrument, "running sentiment pipeline");
        let urls = self.retrieve(instrument).await?;
        let outcomes = self.preprocess(&urls).await;
        let labels = self.classify(&outcomes).await?;
        let stats = self.extract(&labels);
        let summary = self.summarize(&stats)?;
        info!(
            instrument,
            score = summary.score,
            band = %summary.band,
            "sentiment pipeline complete"
        );
        Ok(summary)
    }
}

/// Majority label with a unique-plurality requirement
///
/// The winning label must be strictly more frequent than every other
/// label; any tie for the lead resolves to neutral.
fn majority_label(labels: &[SentimentLabel]) -> SentimentLabel {
    let tally = [
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Positive,
    ]
    .map(|candidate| (candidate, labels.iter().filter(|&&l| l == candidate).count()));

    let lead = tally.iter().map(|&(_, n)| n).max().unwrap_or(0);
    let mut leaders = tally.iter().filter(|&&(_, n)| n == lead);
    match (leaders.next(), leaders.next()) {
        (Some(&(label, _)), None) => label,
        _ => SentimentLabel::Neutral,
    }
}
