use super::common::*;
use crate::orders::domain::ReturnStatus;
use crate::orders::report::{compute_kpis, return_rate, total_revenue, Metric};

#[test]
fn kpis_sum_and_rate_over_filtered_orders() {
    let orders = sample_orders();
    let kpis = compute_kpis(&refs(&orders));

    assert_eq!(kpis.order_count, 6);
    assert_eq!(kpis.returned_count, 3);
    assert_eq!(kpis.total_revenue, 800.0);
    assert_eq!(kpis.return_rate_pct, Metric::Value(50.0));
    assert_eq!(kpis.total_water_usage_liters, 60.0);
    assert_eq!(kpis.total_carbon_offset_investment, 12.0);
    assert_eq!(kpis.revenue_lost_to_returns, 300.0);
    assert_eq!(kpis.return_carbon_waste_kg, 7.5);
}

#[test]
fn status_split_always_lists_both_statuses() {
    let orders = sample_orders();
    let kept: Vec<_> = refs(&orders)
        .into_iter()
        .filter(|order| !order.is_returned)
        .collect();
    let kpis = compute_kpis(&kept);

    assert_eq!(kpis.status_split.len(), 2);
    assert_eq!(kpis.status_split[0].status, ReturnStatus::Returned);
    assert_eq!(kpis.status_split[0].orders, 0);
    assert_eq!(kpis.status_split[1].status_label, "Not Returned");
    assert_eq!(kpis.status_split[1].orders, 3);
}

#[test]
fn empty_set_sums_to_zero_and_rate_is_no_data() {
    let kpis = compute_kpis(&[]);

    assert_eq!(kpis.order_count, 0);
    assert_eq!(kpis.total_revenue, 0.0);
    assert_eq!(kpis.revenue_lost_to_returns, 0.0);
    assert_eq!(kpis.return_carbon_waste_kg, 0.0);
    assert_eq!(kpis.return_rate_pct, Metric::NoData);
    assert_eq!(return_rate(&[]), Metric::NoData);
    assert_eq!(total_revenue(&[]), 0.0);
}

#[test]
fn return_rate_stays_within_percentage_bounds() {
    let orders = sample_orders();
    let all = refs(&orders);
    for size in 1..=all.len() {
        let rate = return_rate(&all[..size]).value().expect("non-empty set has a rate");
        assert!((0.0..=100.0).contains(&rate), "rate {rate} out of bounds");
    }
}
