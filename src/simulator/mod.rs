//! Rule-based return-risk simulator for hypothetical products.
//!
//! Independent of the order dataset: the score is a fixed heuristic driven
//! entirely by [`RiskConfig`].

mod config;
mod policy;
mod rules;

pub use config::{InputBounds, RiskConfig, RiskConfigOverrides};
pub use policy::RiskClassification;

use crate::orders::Feedback;
use policy::classify;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Hypothetical product attributes supplied by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub price: f64,
    pub recycled_pct: f64,
    pub feedback: Feedback,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    Baseline,
    HighPrice,
    LowFeedback,
    HighRecycledContent,
    MaterialAdjustment,
    CategoryAdjustment,
}

/// One additive contribution to the score, kept for audit trails.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskComponent {
    pub factor: RiskFactor,
    pub delta: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    /// Clamped to `[0, 100]`.
    pub risk_percentage: f64,
    pub classification: RiskClassification,
    pub classification_label: &'static str,
    pub advice: &'static str,
    pub components: Vec<RiskComponent>,
}

/// Stateless scorer bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct RiskSimulator {
    config: RiskConfig,
}

impl RiskSimulator {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    pub fn score(&self, params: &SimulationParams) -> Result<RiskAssessment, SimulationError> {
        score_risk(params, &self.config)
    }
}

pub fn score_risk(
    params: &SimulationParams,
    config: &RiskConfig,
) -> Result<RiskAssessment, SimulationError> {
    validate(params, config)?;

    let components = rules::score_components(params, config);
    let raw: f64 = components.iter().map(|component| component.delta).sum();
    let risk_percentage = raw.clamp(0.0, 100.0);
    let classification = classify(risk_percentage, config);

    debug!(
        price = params.price,
        recycled_pct = params.recycled_pct,
        feedback = params.feedback.label(),
        risk_percentage,
        ?classification,
        "return risk scored"
    );

    Ok(RiskAssessment {
        risk_percentage,
        classification,
        classification_label: classification.label(),
        advice: classification.advice(),
        components,
    })
}

fn validate(params: &SimulationParams, config: &RiskConfig) -> Result<(), SimulationError> {
    check_input("price", params.price, config.price_bounds)?;
    check_input("recycled_pct", params.recycled_pct, config.recycled_bounds)
}

fn check_input(field: &'static str, value: f64, bounds: InputBounds) -> Result<(), SimulationError> {
    if !value.is_finite() {
        return Err(SimulationError::NotFinite { field });
    }
    if !bounds.contains(value) {
        return Err(SimulationError::OutOfRange {
            field,
            value,
            min: bounds.min,
            max: bounds.max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(price: f64, recycled_pct: f64, feedback: Feedback) -> SimulationParams {
        SimulationParams {
            price,
            recycled_pct,
            feedback,
            material: None,
            category: None,
        }
    }

    #[test]
    fn no_triggers_leaves_baseline() {
        let assessment =
            score_risk(&params(120.0, 50.0, Feedback::Good), &RiskConfig::default()).unwrap();

        assert_eq!(assessment.risk_percentage, 12.0);
        assert_eq!(assessment.classification, RiskClassification::Stable);
        assert_eq!(assessment.components.len(), 1);
        assert_eq!(assessment.components[0].factor, RiskFactor::Baseline);
    }

    #[test]
    fn penalties_and_discount_compose_additively() {
        let assessment =
            score_risk(&params(250.0, 80.0, Feedback::Poor), &RiskConfig::default()).unwrap();

        assert_eq!(assessment.risk_percentage, 29.0);
        assert_eq!(assessment.classification, RiskClassification::HighRisk);
        assert_eq!(assessment.classification_label, "High Risk");
        let factors: Vec<RiskFactor> = assessment
            .components
            .iter()
            .map(|component| component.factor)
            .collect();
        assert_eq!(
            factors,
            vec![
                RiskFactor::Baseline,
                RiskFactor::HighPrice,
                RiskFactor::LowFeedback,
                RiskFactor::HighRecycledContent,
            ]
        );
    }

    #[test]
    fn thresholds_are_strict() {
        let config = RiskConfig::default();
        let at_thresholds = score_risk(&params(200.0, 70.0, Feedback::Average), &config).unwrap();
        assert_eq!(at_thresholds.risk_percentage, 12.0);

        let at_classification = RiskConfig {
            baseline_risk_percent: 18.0,
            ..RiskConfig::default()
        };
        let assessment =
            score_risk(&params(100.0, 10.0, Feedback::Good), &at_classification).unwrap();
        assert_eq!(assessment.classification, RiskClassification::Stable);
    }

    #[test]
    fn unknown_feedback_carries_no_penalty() {
        let assessment =
            score_risk(&params(100.0, 10.0, Feedback::Unknown), &RiskConfig::default()).unwrap();
        assert_eq!(assessment.risk_percentage, 12.0);
    }

    #[test]
    fn out_of_bounds_inputs_are_rejected() {
        let config = RiskConfig::default();
        assert_eq!(
            score_risk(&params(300.0, 50.0, Feedback::Good), &config),
            Err(SimulationError::OutOfRange {
                field: "price",
                value: 300.0,
                min: 40.0,
                max: 270.0,
            })
        );
        assert!(matches!(
            score_risk(&params(100.0, -1.0, Feedback::Good), &config),
            Err(SimulationError::OutOfRange {
                field: "recycled_pct",
                ..
            })
        ));
        assert_eq!(
            score_risk(&params(f64::NAN, 50.0, Feedback::Good), &config),
            Err(SimulationError::NotFinite { field: "price" })
        );
    }

    #[test]
    fn score_is_clamped_to_percentage_range() {
        let generous = RiskConfig {
            baseline_risk_percent: 1.0,
            high_recycled_discount: 10.0,
            ..RiskConfig::default()
        };
        let low = score_risk(&params(100.0, 90.0, Feedback::Good), &generous).unwrap();
        assert_eq!(low.risk_percentage, 0.0);

        let harsh = RiskConfig {
            baseline_risk_percent: 95.0,
            ..RiskConfig::default()
        };
        let high = score_risk(&params(100.0, 10.0, Feedback::Bad), &harsh).unwrap();
        assert_eq!(high.risk_percentage, 100.0);
    }

    #[test]
    fn material_and_category_adjustments_apply_when_configured() {
        let mut config = RiskConfig::default();
        config
            .material_adjustments
            .insert("Hemp".to_string(), -2.0);
        config
            .category_adjustments
            .insert("Jackets".to_string(), 4.5);

        let mut hypothetical = params(100.0, 10.0, Feedback::Good);
        hypothetical.material = Some("Hemp".to_string());
        hypothetical.category = Some("Jackets".to_string());

        let assessment = score_risk(&hypothetical, &config).unwrap();
        assert_eq!(assessment.risk_percentage, 14.5);

        hypothetical.material = Some("Wool".to_string());
        hypothetical.category = None;
        let assessment = score_risk(&hypothetical, &config).unwrap();
        assert_eq!(assessment.risk_percentage, 12.0);
    }

    #[test]
    fn overrides_replace_only_provided_values() {
        let base = RiskConfig::default();
        let merged = base.with_overrides(&RiskConfigOverrides {
            baseline_risk_percent: Some(11.5),
            high_risk_classification_threshold: Some(25.0),
            high_price_penalty: Some(f64::NAN),
            ..RiskConfigOverrides::default()
        });

        assert_eq!(merged.baseline_risk_percent, 11.5);
        assert_eq!(merged.high_risk_classification_threshold, 25.0);
        assert_eq!(merged.high_price_penalty, base.high_price_penalty);
        assert_eq!(merged.low_feedback_penalty, base.low_feedback_penalty);
    }

    #[test]
    fn simulator_uses_bound_configuration() {
        let simulator = RiskSimulator::new(RiskConfig {
            high_risk_classification_threshold: 30.0,
            ..RiskConfig::default()
        });
        let assessment = simulator
            .score(&params(250.0, 80.0, Feedback::Poor))
            .unwrap();
        assert_eq!(assessment.classification, RiskClassification::Stable);
    }
}
