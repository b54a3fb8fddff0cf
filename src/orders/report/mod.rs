mod aggregate;
mod breakdowns;
mod kpis;
mod metric;
mod pivot;
mod summary;
pub mod views;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, AggregateRequest, AggregateResult};
pub use breakdowns::{
    certification_breakdown, material_breakdown, monthly_revenue, return_reasons_by_gender,
    revenue_by_country, UNSPECIFIED_REASON,
};
pub use kpis::{
    compute_kpis, return_carbon_waste, return_rate, revenue_lost_to_returns, status_split,
    total_carbon_offset, total_revenue, total_water_usage,
};
pub use metric::Metric;
pub use pivot::return_rate_pivot;
pub use summary::{DashboardOptions, DashboardReport};
