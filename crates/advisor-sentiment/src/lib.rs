//! News sentiment pipeline for advisor-rs
//!
//! A five-stage chain over three collaborators: retrieve article links,
//! preprocess them into paragraphs, classify each article, extract the
//! tally, and summarize it into a score with a qualitative band. The
//! stages are exposed individually, as one [`SentimentPipeline`], as a
//! [`ScoringAgent`](advisor_core::ScoringAgent) adapter, and as tool
//! contracts in the `sentiment` namespace.

pub mod collaborators;
pub mod labels;
pub mod pipeline;
pub mod score_agent;
pub mod summary;
pub mod timeframe;
pub mod tools;

pub use collaborators::{ArticleFetcher, ArticleSource, TextClassifier};
pub use labels::SentimentLabel;
pub use pipeline::{FetchOutcome, SentimentPipeline};
pub use score_agent::SentimentScoreAgent;
pub use summary::{SentimentBand, SentimentStats, SentimentSummary};
pub use timeframe::{Timeframe, TimeframeUnit};
