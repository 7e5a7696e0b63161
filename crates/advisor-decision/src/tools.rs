//! Tool contracts for the `decision` namespace
//!
//! Exposes the commander and evaluator to an agent orchestrator as
//! self-describing tools. Arguments arrive as a JSON envelope matching
//! each contract's declared schema.

use advisor_core::{Error, Result, ScoreSet};
use advisor_tools::{ToolContract, ToolRegistry, ValueType};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::commander::Commander;
use crate::config::{AuditConfig, DecisionConfig};
use crate::evaluator::Evaluator;

#[derive(Debug, Deserialize)]
struct RecommendationParams {
    performance: f64,
    risk: f64,
    sentiment: f64,
    impact: f64,
}

#[derive(Debug, Deserialize)]
struct AuditParams {
    recommendation: String,
    performance: f64,
    risk: f64,
    sentiment: f64,
    impact: f64,
}

fn parse_params<T: DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args)
        .map_err(|e| Error::ContractViolation(format!("invalid tool arguments: {e}")))
}

/// Build the `decision` tool namespace with default configuration
pub fn registry() -> Result<ToolRegistry> {
    registry_with(DecisionConfig::default(), AuditConfig::default())
}

/// Build the `decision` tool namespace with explicit configuration
pub fn registry_with(decision: DecisionConfig, audit: AuditConfig) -> Result<ToolRegistry> {
    ToolRegistry::builder("decision")
        .register(make_recommendation(Commander::new(decision))?)
        .register(audit_recommendation(Evaluator::new(audit))?)
        .build()
}

fn make_recommendation(commander: Commander) -> Result<ToolContract> {
    ToolContract::builder("make_recommendation")
        .description(
            "Combine performance, risk, sentiment, and impact scores into a \
             BUY, HOLD, or AVOID recommendation",
        )
        .arg("performance", ValueType::Number)
        .arg("risk", ValueType::Number)
        .arg("sentiment", ValueType::Number)
        .arg("impact", ValueType::Number)
        .output(ValueType::String)
        .sync_operation(move |args| {
            let params: RecommendationParams = parse_params(args)?;
            let scores =
                ScoreSet::new(params.performance, params.risk, params.sentiment, params.impact)?;
            let record = commander.recommend(scores);
            Ok(json!(record.recommendation.as_str()))
        })
        .build()
}

fn audit_recommendation(evaluator: Evaluator) -> Result<ToolContract> {
    ToolContract::builder("audit_recommendation")
        .description(
            "Audit a BUY, HOLD, or AVOID recommendation against the rule \
             table, returning PASS or FAIL",
        )
        .arg("recommendation", ValueType::String)
        .arg("performance", ValueType::Number)
        .arg("risk", ValueType::Number)
        .arg("sentiment", ValueType::Number)
        .arg("impact", ValueType::Number)
        .output(ValueType::String)
        .sync_operation(move |args| {
            let params: AuditParams = parse_params(args)?;
            let scores =
                ScoreSet::new(params.performance, params.risk, params.sentiment, params.impact)?;
            let verdict = evaluator.verdict_for_label(&params.recommendation, &scores)?;
            Ok(json!(verdict.as_str()))
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_lists_tools_in_order() {
        let registry = registry().unwrap();
        assert_eq!(registry.namespace(), "decision");
        assert_eq!(registry.names(), ["make_recommendation", "audit_recommendation"]);
    }

    #[tokio::test]
    async fn test_make_recommendation_tool() {
        let registry = registry().unwrap();
        let out = registry
            .invoke(
                "make_recommendation",
                json!({ "performance": 0.9, "risk": 0.5, "sentiment": 0.7, "impact": 0.25 }),
            )
            .await
            .unwrap();
        assert_eq!(out, json!("HOLD"));
    }

    #[tokio::test]
    async fn test_audit_recommendation_tool() {
        let registry = registry().unwrap();
        let out = registry
            .invoke(
                "audit_recommendation",
                json!({
                    "recommendation": "BUY",
                    "performance": 0.10,
                    "risk": 0.2,
                    "sentiment": 0.0,
                    "impact": 0.0,
                }),
            )
            .await
            .unwrap();
        assert_eq!(out, json!("FAIL"));
    }

    #[tokio::test]
    async fn test_audit_tool_rejects_unknown_labels() {
        let registry = registry().unwrap();
        let err = registry
            .invoke(
                "audit_recommendation",
                json!({
                    "recommendation": "SELL",
                    "performance": 0.5,
                    "risk": 0.5,
                    "sentiment": 0.0,
                    "impact": 0.5,
                }),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRecommendation(_)));
    }

    #[tokio::test]
    async fn test_tools_validate_score_domains() {
        let registry = registry().unwrap();
        let err = registry
            .invoke(
                "make_recommendation",
                json!({ "performance": 0.9, "risk": 1.5, "sentiment": 0.7, "impact": 0.25 }),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ScoreOutOfRange { .. }));
    }

    #[test]
    fn test_contracts_render_their_schemas() {
        let registry = registry().unwrap();
        let contract = registry.get("make_recommendation").unwrap();
        let schema = contract.input_schema();
        assert_eq!(
            schema["required"],
            json!(["performance", "risk", "sentiment", "impact"])
        );
        assert!(contract.to_string().starts_with("Tool Name: make_recommendation"));
    }
}
