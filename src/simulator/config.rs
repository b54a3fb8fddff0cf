use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inclusive bounds accepted for a simulator input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
}

impl InputBounds {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Heuristic weights and thresholds for the return-risk simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskConfig {
    pub baseline_risk_percent: f64,
    pub high_price_threshold: f64,
    pub high_price_penalty: f64,
    pub low_feedback_penalty: f64,
    pub high_recycled_threshold: f64,
    pub high_recycled_discount: f64,
    pub high_risk_classification_threshold: f64,
    pub price_bounds: InputBounds,
    pub recycled_bounds: InputBounds,
    /// Additive percentage points keyed by material name.
    #[serde(default)]
    pub material_adjustments: BTreeMap<String, f64>,
    /// Additive percentage points keyed by category name.
    #[serde(default)]
    pub category_adjustments: BTreeMap<String, f64>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            baseline_risk_percent: 12.0,
            high_price_threshold: 200.0,
            high_price_penalty: 5.0,
            low_feedback_penalty: 15.0,
            high_recycled_threshold: 70.0,
            high_recycled_discount: 3.0,
            high_risk_classification_threshold: 18.0,
            price_bounds: InputBounds {
                min: 40.0,
                max: 270.0,
            },
            recycled_bounds: InputBounds {
                min: 0.0,
                max: 100.0,
            },
            material_adjustments: BTreeMap::new(),
            category_adjustments: BTreeMap::new(),
        }
    }
}

/// Per-request overrides merged over the configured values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskConfigOverrides {
    #[serde(default)]
    pub baseline_risk_percent: Option<f64>,
    #[serde(default)]
    pub high_price_threshold: Option<f64>,
    #[serde(default)]
    pub high_price_penalty: Option<f64>,
    #[serde(default)]
    pub low_feedback_penalty: Option<f64>,
    #[serde(default)]
    pub high_recycled_threshold: Option<f64>,
    #[serde(default)]
    pub high_recycled_discount: Option<f64>,
    #[serde(default)]
    pub high_risk_classification_threshold: Option<f64>,
}

impl RiskConfig {
    pub fn with_overrides(&self, overrides: &RiskConfigOverrides) -> Self {
        let mut merged = self.clone();
        let fields = [
            (&mut merged.baseline_risk_percent, overrides.baseline_risk_percent),
            (&mut merged.high_price_threshold, overrides.high_price_threshold),
            (&mut merged.high_price_penalty, overrides.high_price_penalty),
            (&mut merged.low_feedback_penalty, overrides.low_feedback_penalty),
            (&mut merged.high_recycled_threshold, overrides.high_recycled_threshold),
            (&mut merged.high_recycled_discount, overrides.high_recycled_discount),
            (
                &mut merged.high_risk_classification_threshold,
                overrides.high_risk_classification_threshold,
            ),
        ];
        for (target, value) in fields {
            if let Some(value) = value.filter(|value| value.is_finite()) {
                *target = value;
            }
        }
        merged
    }
}
