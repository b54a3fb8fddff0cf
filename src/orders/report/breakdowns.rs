use super::metric::Metric;
use super::views::{
    CertificationMetric, CertificationSummary, CountryRevenue, MaterialSummary, MonthlyRevenue,
    ReasonCount, ReturnReasonsByGender,
};
use crate::orders::domain::EnrichedOrder;
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

pub const UNSPECIFIED_REASON: &str = "Unspecified";

#[derive(Default)]
struct Bucket {
    orders: usize,
    returned: usize,
    revenue: f64,
    recycled_pct_sum: f64,
}

impl Bucket {
    fn add(&mut self, order: &EnrichedOrder) {
        self.orders += 1;
        if order.is_returned {
            self.returned += 1;
        }
        self.revenue += order.record.total_revenue;
        self.recycled_pct_sum += order.record.recycled_pct;
    }

    fn return_rate(&self) -> Metric {
        Metric::percentage(self.returned, self.orders)
    }

    fn avg_recycled_pct(&self) -> Metric {
        Metric::average(self.recycled_pct_sum, self.orders)
    }

    fn avg_revenue(&self) -> Metric {
        Metric::average(self.revenue, self.orders)
    }
}

/// Revenue per calendar month in chronological order. Months without orders are omitted.
pub fn monthly_revenue(orders: &[&EnrichedOrder]) -> Vec<MonthlyRevenue> {
    let mut months: BTreeMap<(i32, u32), Bucket> = BTreeMap::new();
    for order in orders {
        let date = order.record.order_date;
        months
            .entry((date.year(), date.month()))
            .or_default()
            .add(order);
    }

    months
        .into_iter()
        .filter_map(|((year, month), bucket)| {
            let period_start = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(MonthlyRevenue {
                period_start,
                label: format!("{year:04}-{month:02}"),
                orders: bucket.orders,
                revenue: bucket.revenue,
            })
        })
        .collect()
}

/// Revenue per country, highest first. Ties fall back to country name.
pub fn revenue_by_country(orders: &[&EnrichedOrder], top_n: Option<usize>) -> Vec<CountryRevenue> {
    let mut countries: HashMap<&str, Bucket> = HashMap::new();
    for order in orders {
        countries.entry(order.country.as_str()).or_default().add(order);
    }

    let mut rows: Vec<CountryRevenue> = countries
        .into_iter()
        .map(|(country, bucket)| CountryRevenue {
            country: country.to_string(),
            orders: bucket.orders,
            revenue: bucket.revenue,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.country.cmp(&b.country))
    });

    if let Some(limit) = top_n {
        rows.truncate(limit);
    }
    rows
}

pub fn material_breakdown(orders: &[&EnrichedOrder]) -> Vec<MaterialSummary> {
    let mut materials: BTreeMap<&str, Bucket> = BTreeMap::new();
    for order in orders {
        materials
            .entry(order.record.material.as_str())
            .or_default()
            .add(order);
    }

    materials
        .into_iter()
        .map(|(material, bucket)| MaterialSummary {
            material: material.to_string(),
            orders: bucket.orders,
            avg_recycled_pct: bucket.avg_recycled_pct(),
            return_rate_pct: bucket.return_rate(),
            revenue: bucket.revenue,
        })
        .collect()
}

/// Per-certification value sorted ascending, ties by certification label.
pub fn certification_breakdown(
    orders: &[&EnrichedOrder],
    metric: CertificationMetric,
) -> Vec<CertificationSummary> {
    let mut certifications: BTreeMap<&str, Bucket> = BTreeMap::new();
    for order in orders {
        certifications
            .entry(order.record.eco_certification.label())
            .or_default()
            .add(order);
    }

    let mut rows: Vec<CertificationSummary> = certifications
        .into_iter()
        .map(|(certification, bucket)| CertificationSummary {
            certification: certification.to_string(),
            orders: bucket.orders,
            value: match metric {
                CertificationMetric::ReturnRate => bucket.return_rate(),
                CertificationMetric::AverageRevenue => bucket.avg_revenue(),
            },
        })
        .collect();

    rows.sort_by(|a, b| {
        let a_value = a.value.value().unwrap_or(f64::INFINITY);
        let b_value = b.value.value().unwrap_or(f64::INFINITY);
        a_value
            .partial_cmp(&b_value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.certification.cmp(&b.certification))
    });
    rows
}

/// Returned-order counts per (gender, reason), zero-filled across every observed pair.
pub fn return_reasons_by_gender(orders: &[&EnrichedOrder]) -> ReturnReasonsByGender {
    let mut genders: BTreeSet<&str> = BTreeSet::new();
    let mut reasons: BTreeSet<&str> = BTreeSet::new();
    let mut counts: HashMap<(&str, &str), usize> = HashMap::new();

    for order in orders.iter().filter(|order| order.is_returned) {
        let gender = order.record.gender.as_str();
        let reason = order
            .record
            .return_reason
            .as_deref()
            .unwrap_or(UNSPECIFIED_REASON);
        genders.insert(gender);
        reasons.insert(reason);
        *counts.entry((gender, reason)).or_default() += 1;
    }

    let mut rows = Vec::with_capacity(genders.len() * reasons.len());
    for gender in &genders {
        for reason in &reasons {
            rows.push(ReasonCount {
                gender: gender.to_string(),
                reason: reason.to_string(),
                count: counts.get(&(*gender, *reason)).copied().unwrap_or(0),
            });
        }
    }

    ReturnReasonsByGender {
        genders: genders.into_iter().map(str::to_string).collect(),
        reasons: reasons.into_iter().map(str::to_string).collect(),
        counts: rows,
    }
}
