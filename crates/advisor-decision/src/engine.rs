//! Concurrent assessment engine
//!
//! Wires the four scoring agents to the commander and evaluator. The
//! agents have no data dependency on each other, so their scores are
//! gathered concurrently; the decision itself stays sequential.

use std::fmt;
use std::sync::Arc;

use advisor_core::{Error, Result, ScoreKind, ScoreSet, ScoringAgent};
use tracing::{debug, info};

use crate::commander::Commander;
use crate::evaluator::Evaluator;
use crate::record::DecisionRecord;

/// Scores, recommends, and audits instruments
pub struct DecisionEngine {
    performance: Arc<dyn ScoringAgent>,
    risk: Arc<dyn ScoringAgent>,
    sentiment: Arc<dyn ScoringAgent>,
    impact: Arc<dyn ScoringAgent>,
    commander: Commander,
    evaluator: Evaluator,
}

impl DecisionEngine {
    /// Create a new engine builder
    pub fn builder() -> DecisionEngineBuilder {
        DecisionEngineBuilder::default()
    }

    /// Assess one instrument end to end
    ///
    /// Gathers the four collaborator scores concurrently, combines them
    /// into a recommendation, and audits it. Any collaborator failure
    /// propagates typed; no score is ever substituted with a sentinel.
    pub async fn assess(&self, instrument: &str) -> Result<DecisionRecord> {
        debug!(instrument, "gathering collaborator scores");
        let (performance, risk, sentiment, impact) = tokio::join!(
            self.performance.score(instrument),
            self.risk.score(instrument),
            self.sentiment.score(instrument),
            self.impact.score(instrument),
        );

        let scores = ScoreSet::from_scores(performance?, risk?, sentiment?, impact?)?;
        let record = self.evaluator.audit(self.commander.recommend(scores));

        info!(
            instrument,
            final_score = record.final_score,
            recommendation = %record.recommendation,
            verdict = ?record.verdict,
            "assessment complete"
        );
        Ok(record)
    }
}

impl fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("commander", &self.commander)
            .field("evaluator", &self.evaluator)
            .finish_non_exhaustive()
    }
}

/// Builder for [`DecisionEngine`]
///
/// Each scoring agent goes into the slot matching its [`ScoreKind`];
/// `build` rejects a mis-wired or missing slot.
#[derive(Default)]
pub struct DecisionEngineBuilder {
    performance: Option<Arc<dyn ScoringAgent>>,
    risk: Option<Arc<dyn ScoringAgent>>,
    sentiment: Option<Arc<dyn ScoringAgent>>,
    impact: Option<Arc<dyn ScoringAgent>>,
    commander: Option<Commander>,
    evaluator: Option<Evaluator>,
}

impl DecisionEngineBuilder {
    /// Set the performance agent
    pub fn performance_agent(mut self, agent: Arc<dyn ScoringAgent>) -> Self {
        self.performance = Some(agent);
        self
    }

    /// Set the risk agent
    pub fn risk_agent(mut self, agent: Arc<dyn ScoringAgent>) -> Self {
        self.risk = Some(agent);
        self
    }

    /// Set the sentiment agent
    pub fn sentiment_agent(mut self, agent: Arc<dyn ScoringAgent>) -> Self {
        self.sentiment = Some(agent);
        self
    }

    /// Set the impact agent
    pub fn impact_agent(mut self, agent: Arc<dyn ScoringAgent>) -> Self {
        self.impact = Some(agent);
        self
    }

    /// Set the commander (defaults to the default configuration)
    pub fn commander(mut self, commander: Commander) -> Self {
        self.commander = Some(commander);
        self
    }

    /// Set the evaluator (defaults to the default audit bounds)
    pub fn evaluator(mut self, evaluator: Evaluator) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Build the engine
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContractViolation`] when a slot is empty or holds
    /// an agent whose `kind()` does not match the slot.
    pub fn build(self) -> Result<DecisionEngine> {
        Ok(DecisionEngine {
            performance: Self::slot(self.performance, ScoreKind::Performance)?,
            risk: Self::slot(self.risk, ScoreKind::Risk)?,
            sentiment: Self::slot(self.sentiment, ScoreKind::Sentiment)?,
            impact: Self::slot(self.impact, ScoreKind::Impact)?,
            commander: self.commander.unwrap_or_default(),
            evaluator: self.evaluator.unwrap_or_default(),
        })
    }

    fn slot(
        agent: Option<Arc<dyn ScoringAgent>>,
        expected: ScoreKind,
    ) -> Result<Arc<dyn ScoringAgent>> {
        let agent = agent.ok_or_else(|| {
            Error::ContractViolation(format!("decision engine is missing a {expected} agent"))
        })?;
        let kind = agent.kind();
        if kind != expected {
            return Err(Error::ContractViolation(format!(
                "agent in the {expected} slot reports kind {kind}"
            )));
        }
        Ok(agent)
    }
}
