use super::config::RiskConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskClassification {
    Stable,
    HighRisk,
}

impl RiskClassification {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stable => "Stable Risk",
            Self::HighRisk => "High Risk",
        }
    }

    pub const fn advice(self) -> &'static str {
        match self {
            Self::Stable => "Predicted return rate is within normal limits.",
            Self::HighRisk => "Review the product description or sizing guidance.",
        }
    }
}

/// Scores strictly above the configured threshold are high risk.
pub(crate) fn classify(risk_percentage: f64, config: &RiskConfig) -> RiskClassification {
    if risk_percentage > config.high_risk_classification_threshold {
        RiskClassification::HighRisk
    } else {
        RiskClassification::Stable
    }
}
