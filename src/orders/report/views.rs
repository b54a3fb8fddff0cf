use super::metric::Metric;
use crate::orders::domain::{AgeGroup, ReturnStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusShare {
    pub status: ReturnStatus,
    pub status_label: &'static str,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub order_count: usize,
    pub returned_count: usize,
    pub total_revenue: f64,
    pub return_rate_pct: Metric,
    pub total_water_usage_liters: f64,
    pub total_carbon_offset_investment: f64,
    pub revenue_lost_to_returns: f64,
    pub return_carbon_waste_kg: f64,
    pub status_split: Vec<StatusShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRevenue {
    pub period_start: NaiveDate,
    pub label: String,
    pub orders: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRevenue {
    pub country: String,
    pub orders: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialSummary {
    pub material: String,
    pub orders: usize,
    pub avg_recycled_pct: Metric,
    pub return_rate_pct: Metric,
    pub revenue: f64,
}

/// Value aggregated per eco-certification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationMetric {
    #[default]
    ReturnRate,
    AverageRevenue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificationSummary {
    pub certification: String,
    pub orders: usize,
    pub value: Metric,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub age_group: AgeGroup,
    pub age_group_label: &'static str,
    /// Aligned with `ReturnRatePivot::categories`; `null` where no orders exist.
    pub cells: Vec<Metric>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnRatePivot {
    pub categories: Vec<String>,
    pub rows: Vec<PivotRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasonCount {
    pub gender: String,
    pub reason: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnReasonsByGender {
    pub genders: Vec<String>,
    pub reasons: Vec<String>,
    pub counts: Vec<ReasonCount>,
}
