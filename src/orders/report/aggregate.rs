use super::breakdowns::{
    certification_breakdown, material_breakdown, monthly_revenue, return_reasons_by_gender,
    revenue_by_country,
};
use super::kpis::{
    compute_kpis, return_carbon_waste, return_rate, revenue_lost_to_returns, total_carbon_offset,
    total_revenue, total_water_usage,
};
use super::metric::Metric;
use super::pivot::return_rate_pivot;
use super::views::{
    CertificationMetric, CertificationSummary, CountryRevenue, KpiSummary, MaterialSummary,
    MonthlyRevenue, ReturnRatePivot, ReturnReasonsByGender,
};
use crate::orders::domain::EnrichedOrder;
use serde::{Deserialize, Serialize};

/// Which aggregate to compute, together with its grouping parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregateRequest {
    TotalRevenue,
    ReturnRate,
    TotalWaterUsage,
    TotalCarbonOffset,
    RevenueLostToReturns,
    ReturnCarbonWaste,
    Kpis,
    MonthlyRevenue,
    RevenueByCountry {
        #[serde(default)]
        top_n: Option<usize>,
    },
    MaterialBreakdown,
    CertificationBreakdown {
        #[serde(default)]
        metric: CertificationMetric,
    },
    ReturnRatePivot,
    ReturnReasonsByGender,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "data", rename_all = "snake_case")]
pub enum AggregateResult {
    Scalar(Metric),
    Kpis(KpiSummary),
    MonthlyRevenue(Vec<MonthlyRevenue>),
    RevenueByCountry(Vec<CountryRevenue>),
    Materials(Vec<MaterialSummary>),
    Certifications(Vec<CertificationSummary>),
    Pivot(ReturnRatePivot),
    ReasonCounts(ReturnReasonsByGender),
}

impl AggregateResult {
    pub fn as_scalar(&self) -> Option<Metric> {
        match self {
            Self::Scalar(metric) => Some(*metric),
            _ => None,
        }
    }
}

/// Computes a single aggregate over an already-filtered order set.
pub fn aggregate(orders: &[&EnrichedOrder], request: AggregateRequest) -> AggregateResult {
    match request {
        AggregateRequest::TotalRevenue => AggregateResult::Scalar(Metric::Value(total_revenue(orders))),
        AggregateRequest::ReturnRate => AggregateResult::Scalar(return_rate(orders)),
        AggregateRequest::TotalWaterUsage => {
            AggregateResult::Scalar(Metric::Value(total_water_usage(orders)))
        }
        AggregateRequest::TotalCarbonOffset => {
            AggregateResult::Scalar(Metric::Value(total_carbon_offset(orders)))
        }
        AggregateRequest::RevenueLostToReturns => {
            AggregateResult::Scalar(Metric::Value(revenue_lost_to_returns(orders)))
        }
        AggregateRequest::ReturnCarbonWaste => {
            AggregateResult::Scalar(Metric::Value(return_carbon_waste(orders)))
        }
        AggregateRequest::Kpis => AggregateResult::Kpis(compute_kpis(orders)),
        AggregateRequest::MonthlyRevenue => AggregateResult::MonthlyRevenue(monthly_revenue(orders)),
        AggregateRequest::RevenueByCountry { top_n } => {
            AggregateResult::RevenueByCountry(revenue_by_country(orders, top_n))
        }
        AggregateRequest::MaterialBreakdown => AggregateResult::Materials(material_breakdown(orders)),
        AggregateRequest::CertificationBreakdown { metric } => {
            AggregateResult::Certifications(certification_breakdown(orders, metric))
        }
        AggregateRequest::ReturnRatePivot => AggregateResult::Pivot(return_rate_pivot(orders)),
        AggregateRequest::ReturnReasonsByGender => {
            AggregateResult::ReasonCounts(return_reasons_by_gender(orders))
        }
    }
}
