use super::breakdowns::{
    certification_breakdown, material_breakdown, monthly_revenue, return_reasons_by_gender,
    revenue_by_country,
};
use super::kpis::compute_kpis;
use super::pivot::return_rate_pivot;
use super::views::{
    CertificationMetric, CertificationSummary, CountryRevenue, KpiSummary, MaterialSummary,
    MonthlyRevenue, ReturnRatePivot, ReturnReasonsByGender,
};
use crate::orders::domain::EnrichedOrder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardOptions {
    #[serde(default)]
    pub top_countries: Option<usize>,
    #[serde(default)]
    pub certification_metric: CertificationMetric,
}

/// Every dashboard view computed over one filtered order set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub kpis: KpiSummary,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub revenue_by_country: Vec<CountryRevenue>,
    pub materials: Vec<MaterialSummary>,
    pub certifications: Vec<CertificationSummary>,
    pub return_rate_pivot: ReturnRatePivot,
    pub return_reasons: ReturnReasonsByGender,
}

impl DashboardReport {
    pub fn build(orders: &[&EnrichedOrder], options: &DashboardOptions) -> Self {
        Self {
            kpis: compute_kpis(orders),
            monthly_revenue: monthly_revenue(orders),
            revenue_by_country: revenue_by_country(orders, options.top_countries),
            materials: material_breakdown(orders),
            certifications: certification_breakdown(orders, options.certification_metric),
            return_rate_pivot: return_rate_pivot(orders),
            return_reasons: return_reasons_by_gender(orders),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kpis.order_count == 0
    }
}
