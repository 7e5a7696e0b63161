//! Configuration for the decision layer
//!
//! Weights, thresholds, and audit bounds are set once at startup and never
//! mutated. Both configs validate on build, so a commander or evaluator can
//! only ever hold a sound configuration.

use advisor_core::{Error, Result};
use advisor_utils::parse_var;
use serde::{Deserialize, Serialize};

/// Tolerance when checking that the four weights sum to 1
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weights and thresholds for combining scores into a recommendation
///
/// The final score is the weighted sum of the four collaborator scores
/// with every contribution entering positively. Risk is not subtracted;
/// a high-risk instrument is penalized by giving risk a low weight, not
/// by flipping its sign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionConfig {
    /// Weight of the performance score
    pub performance_weight: f64,

    /// Weight of the risk score
    pub risk_weight: f64,

    /// Weight of the sentiment score
    pub sentiment_weight: f64,

    /// Weight of the impact score
    pub impact_weight: f64,

    /// Final scores strictly above this are a BUY
    pub buy_threshold: f64,

    /// Final scores strictly above this (up to the buy threshold) are a
    /// HOLD; everything else is an AVOID
    pub hold_threshold: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            performance_weight: 0.4,
            risk_weight: 0.2,
            sentiment_weight: 0.3,
            impact_weight: 0.1,
            buy_threshold: 0.7,
            hold_threshold: 0.4,
        }
    }
}

impl DecisionConfig {
    /// Create a new configuration builder
    pub fn builder() -> DecisionConfigBuilder {
        DecisionConfigBuilder::default()
    }

    /// Load the configuration from `ADVISOR_*` environment variables
    ///
    /// Unset variables keep their defaults. Recognized variables:
    /// `ADVISOR_PERFORMANCE_WEIGHT`, `ADVISOR_RISK_WEIGHT`,
    /// `ADVISOR_SENTIMENT_WEIGHT`, `ADVISOR_IMPACT_WEIGHT`,
    /// `ADVISOR_BUY_THRESHOLD`, `ADVISOR_HOLD_THRESHOLD`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            performance_weight: env_f64("ADVISOR_PERFORMANCE_WEIGHT", defaults.performance_weight)?,
            risk_weight: env_f64("ADVISOR_RISK_WEIGHT", defaults.risk_weight)?,
            sentiment_weight: env_f64("ADVISOR_SENTIMENT_WEIGHT", defaults.sentiment_weight)?,
            impact_weight: env_f64("ADVISOR_IMPACT_WEIGHT", defaults.impact_weight)?,
            buy_threshold: env_f64("ADVISOR_BUY_THRESHOLD", defaults.buy_threshold)?,
            hold_threshold: env_f64("ADVISOR_HOLD_THRESHOLD", defaults.hold_threshold)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate weights and thresholds
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("performance_weight", self.performance_weight),
            ("risk_weight", self.risk_weight),
            ("sentiment_weight", self.sentiment_weight),
            ("impact_weight", self.impact_weight),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        let sum =
            self.performance_weight + self.risk_weight + self.sentiment_weight + self.impact_weight;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(Error::Config(format!(
                "score weights must sum to 1.0, got {sum}"
            )));
        }

        if !self.buy_threshold.is_finite() || !self.hold_threshold.is_finite() {
            return Err(Error::Config(
                "thresholds must be finite numbers".to_string(),
            ));
        }
        if self.buy_threshold < self.hold_threshold {
            return Err(Error::Config(format!(
                "buy_threshold ({}) must not be below hold_threshold ({})",
                self.buy_threshold, self.hold_threshold
            )));
        }

        Ok(())
    }
}

/// Builder for DecisionConfig
#[derive(Debug, Default)]
pub struct DecisionConfigBuilder {
    performance_weight: Option<f64>,
    risk_weight: Option<f64>,
    sentiment_weight: Option<f64>,
    impact_weight: Option<f64>,
    buy_threshold: Option<f64>,
    hold_threshold: Option<f64>,
}

impl DecisionConfigBuilder {
    /// Set the performance weight
    pub fn performance_weight(mut self, weight: f64) -> Self {
        self.performance_weight = Some(weight);
        self
    }

    /// Set the risk weight
    pub fn risk_weight(mut self, weight: f64) -> Self {
        self.risk_weight = Some(weight);
        self
    }

    /// Set the sentiment weight
    pub fn sentiment_weight(mut self, weight: f64) -> Self {
        self.sentiment_weight = Some(weight);
        self
    }

    /// Set the impact weight
    pub fn impact_weight(mut self, weight: f64) -> Self {
        self.impact_weight = Some(weight);
        self
    }

    /// Set the BUY threshold
    pub fn buy_threshold(mut self, threshold: f64) -> Self {
        self.buy_threshold = Some(threshold);
        self
    }

    /// Set the HOLD threshold
    pub fn hold_threshold(mut self, threshold: f64) -> Self {
        self.hold_threshold = Some(threshold);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DecisionConfig> {
        let defaults = DecisionConfig::default();

        let config = DecisionConfig {
            performance_weight: self.performance_weight.unwrap_or(defaults.performance_weight),
            risk_weight: self.risk_weight.unwrap_or(defaults.risk_weight),
            sentiment_weight: self.sentiment_weight.unwrap_or(defaults.sentiment_weight),
            impact_weight: self.impact_weight.unwrap_or(defaults.impact_weight),
            buy_threshold: self.buy_threshold.unwrap_or(defaults.buy_threshold),
            hold_threshold: self.hold_threshold.unwrap_or(defaults.hold_threshold),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Floors and ceilings for the audit rule table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// A BUY fails the audit when performance is below this floor
    pub performance_floor: f64,

    /// A BUY fails the audit when risk is above this ceiling
    pub risk_ceiling: f64,

    /// A HOLD fails the audit when sentiment is below this floor
    pub sentiment_deep_negative_floor: f64,

    /// An AVOID fails the audit when impact is at or above this floor and
    /// sentiment clears the positive floor
    pub impact_high_floor: f64,

    /// Sentiment at or above this counts as clearly positive for the
    /// AVOID override
    pub sentiment_positive_floor: f64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            performance_floor: 0.2,
            risk_ceiling: 0.8,
            sentiment_deep_negative_floor: -0.8,
            impact_high_floor: 0.9,
            sentiment_positive_floor: 0.5,
        }
    }
}

impl AuditConfig {
    /// Create a new configuration builder
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder::default()
    }

    /// Validate the audit bounds against the score domains
    pub fn validate(&self) -> Result<()> {
        if !self.performance_floor.is_finite() {
            return Err(Error::Config(
                "performance_floor must be a finite number".to_string(),
            ));
        }

        let unit_bounds = [
            ("risk_ceiling", self.risk_ceiling),
            ("impact_high_floor", self.impact_high_floor),
        ];
        for (name, value) in unit_bounds {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        let sentiment_bounds = [
            (
                "sentiment_deep_negative_floor",
                self.sentiment_deep_negative_floor,
            ),
            ("sentiment_positive_floor", self.sentiment_positive_floor),
        ];
        for (name, value) in sentiment_bounds {
            if !(-1.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{name} must be within [-1, 1], got {value}"
                )));
            }
        }

        if self.sentiment_deep_negative_floor > self.sentiment_positive_floor {
            return Err(Error::Config(format!(
                "sentiment_deep_negative_floor ({}) must not exceed sentiment_positive_floor ({})",
                self.sentiment_deep_negative_floor, self.sentiment_positive_floor
            )));
        }

        Ok(())
    }
}

/// Builder for AuditConfig
#[derive(Debug, Default)]
pub struct AuditConfigBuilder {
    performance_floor: Option<f64>,
    risk_ceiling: Option<f64>,
    sentiment_deep_negative_floor: Option<f64>,
    impact_high_floor: Option<f64>,
    sentiment_positive_floor: Option<f64>,
}

impl AuditConfigBuilder {
    /// Set the performance floor for BUY audits
    pub fn performance_floor(mut self, floor: f64) -> Self {
        self.performance_floor = Some(floor);
        self
    }

    /// Set the risk ceiling for BUY audits
    pub fn risk_ceiling(mut self, ceiling: f64) -> Self {
        self.risk_ceiling = Some(ceiling);
        self
    }

    /// Set the deep-negative sentiment floor for HOLD audits
    pub fn sentiment_deep_negative_floor(mut self, floor: f64) -> Self {
        self.sentiment_deep_negative_floor = Some(floor);
        self
    }

    /// Set the impact floor for the AVOID override
    pub fn impact_high_floor(mut self, floor: f64) -> Self {
        self.impact_high_floor = Some(floor);
        self
    }

    /// Set the positive sentiment floor for the AVOID override
    pub fn sentiment_positive_floor(mut self, floor: f64) -> Self {
        self.sentiment_positive_floor = Some(floor);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AuditConfig> {
        let defaults = AuditConfig::default();

        let config = AuditConfig {
            performance_floor: self.performance_floor.unwrap_or(defaults.performance_floor),
            risk_ceiling: self.risk_ceiling.unwrap_or(defaults.risk_ceiling),
            sentiment_deep_negative_floor: self
                .sentiment_deep_negative_floor
                .unwrap_or(defaults.sentiment_deep_negative_floor),
            impact_high_floor: self.impact_high_floor.unwrap_or(defaults.impact_high_floor),
            sentiment_positive_floor: self
                .sentiment_positive_floor
                .unwrap_or(defaults.sentiment_positive_floor),
        };

        config.validate()?;
        Ok(config)
    }
}

fn env_f64(name: &str, default: f64) -> Result<f64> {
    match parse_var::<f64>(name, "a number") {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Ok(default),
        Err(e) => Err(Error::Config(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = DecisionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.performance_weight, 0.4);
        assert_eq!(config.buy_threshold, 0.7);
        assert_eq!(config.hold_threshold, 0.4);
    }

    #[test]
    fn test_builder_overrides_and_validates() {
        let config = DecisionConfig::builder()
            .performance_weight(0.25)
            .risk_weight(0.25)
            .sentiment_weight(0.25)
            .impact_weight(0.25)
            .buy_threshold(0.6)
            .build()
            .unwrap();
        assert_eq!(config.impact_weight, 0.25);
        assert_eq!(config.hold_threshold, 0.4);
    }

    #[test]
    fn test_rejects_buy_below_hold() {
        let err = DecisionConfig::builder()
            .buy_threshold(0.3)
            .hold_threshold(0.5)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_negative_weight() {
        let err = DecisionConfig::builder()
            .performance_weight(-0.1)
            .risk_weight(0.7)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("performance_weight")));
    }

    #[test]
    fn test_rejects_weights_not_summing_to_one() {
        let err = DecisionConfig::builder()
            .performance_weight(0.9)
            .risk_weight(0.5)
            .sentiment_weight(0.7)
            .impact_weight(0.25)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("sum")));
    }

    #[test]
    fn test_equal_thresholds_are_allowed() {
        let config = DecisionConfig::builder()
            .buy_threshold(0.5)
            .hold_threshold(0.5)
            .build()
            .unwrap();
        assert_eq!(config.buy_threshold, config.hold_threshold);
    }

    #[test]
    fn test_default_audit_config_is_valid() {
        let config = AuditConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.performance_floor, 0.2);
        assert_eq!(config.sentiment_deep_negative_floor, -0.8);
    }

    #[test]
    fn test_audit_builder_rejects_out_of_domain_bounds() {
        assert!(AuditConfig::builder().risk_ceiling(1.5).build().is_err());
        assert!(
            AuditConfig::builder()
                .sentiment_positive_floor(2.0)
                .build()
                .is_err()
        );
        assert!(
            AuditConfig::builder()
                .sentiment_deep_negative_floor(0.9)
                .sentiment_positive_floor(0.1)
                .build()
                .is_err()
        );
    }

    // Single test because from_env reads every ADVISOR_* variable and the
    // process environment is shared across test threads
    #[test]
    fn test_from_env_overrides_and_rejects_malformed() {
        unsafe {
            std::env::set_var("ADVISOR_BUY_THRESHOLD", "0.75");
        }
        let config = DecisionConfig::from_env().unwrap();
        assert_eq!(config.buy_threshold, 0.75);
        assert_eq!(config.hold_threshold, 0.4);

        unsafe {
            std::env::set_var("ADVISOR_IMPACT_WEIGHT", "lots");
        }
        let err = DecisionConfig::from_env().unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        unsafe {
            std::env::remove_var("ADVISOR_BUY_THRESHOLD");
            std::env::remove_var("ADVISOR_IMPACT_WEIGHT");
        }
    }
}
