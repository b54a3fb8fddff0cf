use super::metric::Metric;
use super::views::{KpiSummary, StatusShare};
use crate::orders::domain::{EnrichedOrder, ReturnStatus};

pub fn total_revenue(orders: &[&EnrichedOrder]) -> f64 {
    orders.iter().map(|order| order.record.total_revenue).sum()
}

/// Percentage of returned orders, or `NoData` for an empty set.
pub fn return_rate(orders: &[&EnrichedOrder]) -> Metric {
    let returned = orders.iter().filter(|order| order.is_returned).count();
    Metric::percentage(returned, orders.len())
}

pub fn total_water_usage(orders: &[&EnrichedOrder]) -> f64 {
    orders
        .iter()
        .map(|order| order.record.water_usage_liters)
        .sum()
}

pub fn total_carbon_offset(orders: &[&EnrichedOrder]) -> f64 {
    orders
        .iter()
        .map(|order| order.record.carbon_offset_investment)
        .sum()
}

pub fn revenue_lost_to_returns(orders: &[&EnrichedOrder]) -> f64 {
    orders
        .iter()
        .filter(|order| order.is_returned)
        .map(|order| order.record.total_revenue)
        .sum()
}

pub fn return_carbon_waste(orders: &[&EnrichedOrder]) -> f64 {
    orders
        .iter()
        .map(|order| order.return_carbon_waste_kg)
        .sum()
}

pub fn status_split(orders: &[&EnrichedOrder]) -> Vec<StatusShare> {
    ReturnStatus::ordered()
        .into_iter()
        .map(|status| StatusShare {
            status,
            status_label: status.label(),
            orders: orders
                .iter()
                .filter(|order| order.record.return_status == status)
                .count(),
        })
        .collect()
}

pub fn compute_kpis(orders: &[&EnrichedOrder]) -> KpiSummary {
    KpiSummary {
        order_count: orders.len(),
        returned_count: orders.iter().filter(|order| order.is_returned).count(),
        total_revenue: total_revenue(orders),
        return_rate_pct: return_rate(orders),
        total_water_usage_liters: total_water_usage(orders),
        total_carbon_offset_investment: total_carbon_offset(orders),
        revenue_lost_to_returns: revenue_lost_to_returns(orders),
        return_carbon_waste_kg: return_carbon_waste(orders),
        status_split: status_split(orders),
    }
}
