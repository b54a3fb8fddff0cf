use super::config::RiskConfig;
use super::{RiskComponent, RiskFactor, SimulationParams};

pub(crate) fn score_components(params: &SimulationParams, config: &RiskConfig) -> Vec<RiskComponent> {
    let mut components = vec![RiskComponent {
        factor: RiskFactor::Baseline,
        delta: config.baseline_risk_percent,
        notes: format!("baseline return risk {:.1}%", config.baseline_risk_percent),
    }];

    if params.price > config.high_price_threshold {
        components.push(RiskComponent {
            factor: RiskFactor::HighPrice,
            delta: config.high_price_penalty,
            notes: format!(
                "price {:.2} exceeds {:.2}",
                params.price, config.high_price_threshold
            ),
        });
    }

    if params.feedback.is_low() {
        components.push(RiskComponent {
            factor: RiskFactor::LowFeedback,
            delta: config.low_feedback_penalty,
            notes: format!("expected feedback '{}' is in the lowest tiers", params.feedback.label()),
        });
    }

    if params.recycled_pct > config.high_recycled_threshold {
        components.push(RiskComponent {
            factor: RiskFactor::HighRecycledContent,
            delta: -config.high_recycled_discount,
            notes: format!(
                "recycled content {:.0}% exceeds {:.0}%",
                params.recycled_pct, config.high_recycled_threshold
            ),
        });
    }

    if let Some((material, delta)) = params
        .material
        .as_deref()
        .and_then(|material| config.material_adjustments.get_key_value(material))
    {
        components.push(RiskComponent {
            factor: RiskFactor::MaterialAdjustment,
            delta: *delta,
            notes: format!("material adjustment for {material}"),
        });
    }

    if let Some((category, delta)) = params
        .category
        .as_deref()
        .and_then(|category| config.category_adjustments.get_key_value(category))
    {
        components.push(RiskComponent {
            factor: RiskFactor::CategoryAdjustment,
            delta: *delta,
            notes: format!("category adjustment for {category}"),
        });
    }

    components
}
