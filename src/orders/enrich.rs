use super::domain::{AgeGroup, EnrichedOrder, OrderRecord, ReturnStatus};
use super::loader::normalize_text;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Constants used while deriving per-order attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Estimated kg CO2e emitted by the reverse logistics of a single return.
    pub return_carbon_waste_kg: f64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            return_carbon_waste_kg: 2.5,
        }
    }
}

pub fn enrich(record: OrderRecord, config: &EnrichmentConfig) -> EnrichedOrder {
    let is_returned = record.return_status == ReturnStatus::Returned;
    let age_group = AgeGroup::from_age(record.age);
    if age_group == AgeGroup::Unclassified {
        debug!(age = record.age, "customer age outside bracket range");
    }

    let country = country_from_location(record.location.as_deref());
    let feedback_score = record.feedback.score();
    let return_carbon_waste_kg = if is_returned {
        config.return_carbon_waste_kg
    } else {
        0.0
    };

    EnrichedOrder {
        record,
        is_returned,
        age_group,
        country,
        feedback_score,
        return_carbon_waste_kg,
    }
}

pub fn enrich_all(records: Vec<OrderRecord>, config: &EnrichmentConfig) -> Vec<EnrichedOrder> {
    let enriched: Vec<EnrichedOrder> = records
        .into_iter()
        .map(|record| enrich(record, config))
        .collect();

    let unclassified = enriched
        .iter()
        .filter(|order| order.age_group == AgeGroup::Unclassified)
        .count();
    debug!(orders = enriched.len(), unclassified, "orders enriched");

    enriched
}

/// First comma-delimited token of the location, trimmed.
pub fn country_from_location(location: Option<&str>) -> String {
    location
        .and_then(|value| value.split(',').next())
        .map(normalize_text)
        .filter(|token| !token.is_empty())
        .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::domain::{EcoCertification, Feedback};
    use chrono::NaiveDate;

    fn record(age: i32, status: ReturnStatus, location: Option<&str>) -> OrderRecord {
        OrderRecord {
            order_date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            unit_price: Some(90.0),
            total_revenue: 180.0,
            material: "Hemp".to_string(),
            category: "Pants".to_string(),
            gender: "Female".to_string(),
            age,
            location: location.map(str::to_string),
            return_status: status,
            return_reason: None,
            feedback: Feedback::Bad,
            recycled_pct: 55.0,
            water_usage_liters: 20.0,
            carbon_offset_investment: 3.0,
            eco_certification: EcoCertification::Uncertified,
        }
    }

    #[test]
    fn derives_flags_and_scores() {
        let config = EnrichmentConfig::default();
        let order = enrich(
            record(30, ReturnStatus::Returned, Some("Canada, Toronto")),
            &config,
        );

        assert!(order.is_returned);
        assert_eq!(order.age_group, AgeGroup::YoungAdult);
        assert_eq!(order.country, "Canada");
        assert_eq!(order.feedback_score, 2);
        assert_eq!(order.return_carbon_waste_kg, 2.5);
    }

    #[test]
    fn kept_orders_carry_no_return_waste() {
        let config = EnrichmentConfig {
            return_carbon_waste_kg: 4.0,
        };
        let order = enrich(record(30, ReturnStatus::NotReturned, None), &config);
        assert!(!order.is_returned);
        assert_eq!(order.return_carbon_waste_kg, 0.0);
    }

    #[test]
    fn out_of_range_ages_are_kept_as_unclassified() {
        let config = EnrichmentConfig::default();
        let orders = enrich_all(
            vec![
                record(16, ReturnStatus::NotReturned, None),
                record(104, ReturnStatus::Returned, None),
            ],
            &config,
        );
        assert_eq!(orders.len(), 2);
        assert!(orders
            .iter()
            .all(|order| order.age_group == AgeGroup::Unclassified));
    }

    #[test]
    fn country_uses_first_location_token() {
        assert_eq!(country_from_location(Some("  Chile , Santiago")), "Chile");
        assert_eq!(country_from_location(Some("Germany")), "Germany");
        assert_eq!(country_from_location(Some(" , Lyon")), UNKNOWN_COUNTRY);
        assert_eq!(country_from_location(None), UNKNOWN_COUNTRY);
    }
}
