//! Pipeline-backed scoring agent

use std::sync::Arc;

use async_trait::async_trait;

use advisor_core::{Result, Score, ScoreKind, ScoringAgent};

use crate::pipeline::SentimentPipeline;

/// Presents a sentiment pipeline as the sentiment collaborator of the
/// decision layer
///
/// The pipeline's aggregate score already lives in [-1, 1], so it maps
/// directly onto the sentiment score domain.
pub struct SentimentScoreAgent {
    pipeline: Arc<SentimentPipeline>,
}

impl SentimentScoreAgent {
    pub fn new(pipeline: Arc<SentimentPipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl ScoringAgent for SentimentScoreAgent {
    fn kind(&self) -> ScoreKind {
        ScoreKind::Sentiment
    }

    async fn score(&self, instrument: &str) -> Result<Score> {
        let summary = self.pipeline.run(instrument).await?;
        Score::new(ScoreKind::Sentiment, summary.score)
    }
}
