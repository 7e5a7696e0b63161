//! Tool contracts for the `sentiment` namespace
//!
//! The five pipeline stages, registered in chain order so an orchestrator
//! discovering the namespace sees them the way they compose. The JSON
//! boundary mirrors the stage types: each tool's output feeds the next
//! tool's input unchanged.

use std::sync::Arc;

use advisor_core::{Error, Result};
use advisor_tools::{ToolContract, ToolRegistry, ValueType};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::labels::SentimentLabel;
use crate::pipeline::{FetchOutcome, SentimentPipeline};
use crate::summary::{SentimentStats, SentimentSummary};

#[derive(Debug, Deserialize)]
struct InstrumentParams {
    instrument: String,
}

#[derive(Debug, Deserialize)]
struct UrlsParams {
    urls: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ArticlesParams {
    articles: Vec<FetchOutcome>,
}

#[derive(Debug, Deserialize)]
struct LabelsParams {
    labels: Vec<SentimentLabel>,
}

#[derive(Debug, Deserialize)]
struct StatisticsParams {
    statistics: SentimentStats,
}

fn parse_params<T: DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args)
        .map_err(|e| Error::ContractViolation(format!("invalid tool arguments: {e}")))
}

/// Build the `sentiment` tool namespace around one pipeline
pub fn registry(pipeline: Arc<SentimentPipeline>) -> Result<ToolRegistry> {
    ToolRegistry::builder("sentiment")
        .register(retrieve_article_links(Arc::clone(&pipeline))?)
        .register(preprocess(Arc::clone(&pipeline))?)
        .register(classify(pipeline)?)
        .register(extract()?)
        .register(summarize()?)
        .build()
}

fn retrieve_article_links(pipeline: Arc<SentimentPipeline>) -> Result<ToolContract> {
    ToolContract::builder("retrieve_article_links")
        .description("Discover news article links covering an instrument, deduplicated")
        .arg("instrument", ValueType::String)
        .output(ValueType::Array)
        .operation(move |args| {
            let pipeline = Arc::clone(&pipeline);
            async move {
                let params: InstrumentParams = parse_params(args)?;
                let urls = pipeline.retrieve(&params.instrument).await?;
                Ok(json!(urls))
            }
        })
        .build()
}

fn preprocess(pipeline: Arc<SentimentPipeline>) -> Result<ToolContract> {
    ToolContract::builder("preprocess")
        .description(
            "Fetch each article link into paragraphs; a failed fetch is \
             reported per item, never dropped",
        )
        .arg("urls", ValueType::Array)
        .output(ValueType::Array)
        .operation(move |args| {
            let pipeline = Arc::clone(&pipeline);
            async move {
                let params: UrlsParams = parse_params(args)?;
                let outcomes = pipeline.preprocess(&params.urls).await;
                Ok(serde_json::to_value(outcomes)?)
            }
        })
        .build()
}

fn classify(pipeline: Arc<SentimentPipeline>) -> Result<ToolContract> {
    ToolContract::builder("classify")
        .description("Label each fetched article with its majority paragraph sentiment")
        .arg("articles", ValueType::Array)
        .output(ValueType::Array)
        .operation(move |args| {
            let pipeline = Arc::clone(&pipeline);
            async move {
                let params: ArticlesParams = parse_params(args)?;
                let labels = pipeline.classify(&params.articles).await?;
                Ok(json!(labels))
            }
        })
        .build()
}

fn extract() -> Result<ToolContract> {
    ToolContract::builder("extract")
        .description("Tally per-article sentiment labels into statistics")
        .arg("labels", ValueType::Array)
        .output(ValueType::Object)
        .sync_operation(|args| {
            let params: LabelsParams = parse_params(args)?;
            let stats = SentimentStats::from_labels(&params.labels);
            Ok(serde_json::to_value(stats)?)
        })
        .build()
}

fn summarize() -> Result<ToolContract> {
    ToolContract::builder("summarize")
        .description("Derive the aggregate sentiment score, band, and narrative from statistics")
        .arg("statistics", ValueType::Object)
        .output(ValueType::Object)
        .sync_operation(|args| {
            let params: StatisticsParams = parse_params(args)?;
            let summary = SentimentSummary::from_stats(&params.statistics)?;
            Ok(serde_json::to_value(summary)?)
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{ArticleFetcher, ArticleSource, TextClassifier};
    use crate::timeframe::Timeframe;
    use async_trait::async_trait;

    struct StubCollaborators;

    #[async_trait]
    impl ArticleSource for StubCollaborators {
        async fn articles(
            &self,
            _instrument: &str,
            _window: Option<&Timeframe>,
        ) -> Result<Vec<String>> {
            Ok(vec![
                "https://news.test/a".to_string(),
                "https://news.test/a".to_string(),
                "https://news.test/b".to_string(),
            ])
        }
    }

    #[async_trait]
    impl ArticleFetcher for StubCollaborators {
        async fn fetch(&self, url: &str) -> Result<Vec<String>> {
            if url.ends_with("/b") {
                return Err(Error::collaborator("fetcher", "HTTP 404"));
            }
            Ok(vec!["earnings beat".to_string()])
        }
    }

    #[async_trait]
    impl TextClassifier for StubCollaborators {
        async fn classify(&self, _text: &str) -> Result<SentimentLabel> {
            Ok(SentimentLabel::Positive)
        }
    }

    fn stub_registry() -> ToolRegistry {
        let pipeline = SentimentPipeline::new(
            Arc::new(StubCollaborators),
            Arc::new(StubCollaborators),
            Arc::new(StubCollaborators),
        );
        registry(Arc::new(pipeline)).unwrap()
    }

    #[test]
    fn test_namespace_lists_stages_in_chain_order() {
        let registry = stub_registry();
        assert_eq!(registry.namespace(), "sentiment");
        assert_eq!(
            registry.names(),
            ["retrieve_article_links", "preprocess", "classify", "extract", "summarize"]
        );
    }

    #[tokio::test]
    async fn test_stage_outputs_feed_stage_inputs() {
        let registry = stub_registry();

        let links = registry
            .invoke("retrieve_article_links", json!({ "instrument": "ACME" }))
            .await
            .unwrap();
        assert_eq!(links, json!(["https://news.test/a", "https://news.test/b"]));

        let articles = registry
            .invoke("preprocess", json!({ "urls": links }))
            .await
            .unwrap();
        assert_eq!(articles[0]["status"], "fetched");
        assert_eq!(articles[1]["status"], "failed");

        let labels = registry
            .invoke("classify", json!({ "articles": articles }))
            .await
            .unwrap();
        assert_eq!(labels, json!(["positive"]));

        let statistics = registry
            .invoke("extract", json!({ "labels": labels }))
            .await
            .unwrap();
        assert_eq!(statistics["count"], 1);
        assert_eq!(statistics["positive"], 1);

        let summary = registry
            .invoke("summarize", json!({ "statistics": statistics }))
            .await
            .unwrap();
        assert_eq!(summary["band"], "strongly_positive");
        assert_eq!(summary["score"], 1.0);
    }

    #[tokio::test]
    async fn test_summarize_tool_surfaces_empty_input() {
        let registry = stub_registry();
        let err = registry
            .invoke(
                "summarize",
                json!({
                    "statistics": { "count": 0, "positive": 0, "neutral": 0, "negative": 0 }
                }),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyInput(_)));
    }

    #[tokio::test]
    async fn test_malformed_arguments_are_contract_violations() {
        let registry = stub_registry();
        let err = registry
            .invoke("extract", json!({ "labels": ["bullish"] }))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ContractViolation(_)));
    }
}
