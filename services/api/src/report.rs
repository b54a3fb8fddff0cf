use crate::infra::{parse_date, parse_feedback};
use chrono::NaiveDate;
use clap::Args;
use order_insights::config::AppConfig;
use order_insights::error::AppError;
use order_insights::orders::filter::apply;
use order_insights::orders::report::views::CertificationMetric;
use order_insights::orders::{
    DashboardOptions, DashboardReport, DateRange, Feedback, FilterState, GenderFilter,
    MaterialSelection, Metric, OrderDataset,
};
use order_insights::simulator::{score_risk, RiskAssessment, SimulationParams};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Order export to analyse (defaults to ORDERS_DATA_PATH)
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
    /// Earliest order date to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Latest order date to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) end: Option<NaiveDate>,
    /// Restrict to these materials (repeatable)
    #[arg(long = "material")]
    pub(crate) materials: Vec<String>,
    /// Restrict to one gender ("All" disables the filter)
    #[arg(long)]
    pub(crate) gender: Option<String>,
    /// Limit the country ranking to the top N entries
    #[arg(long)]
    pub(crate) top_countries: Option<usize>,
    /// Rank certifications by average revenue instead of return rate
    #[arg(long)]
    pub(crate) by_revenue: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Hypothetical unit price
    #[arg(long)]
    pub(crate) price: f64,
    /// Percentage of recycled material (0-100)
    #[arg(long)]
    pub(crate) recycled: f64,
    /// Expected customer feedback tier (Poor, Bad, Average, Good, Excellent)
    #[arg(long, value_parser = parse_feedback)]
    pub(crate) feedback: Feedback,
    /// Material, used for configured per-material adjustments
    #[arg(long)]
    pub(crate) material: Option<String>,
    /// Category, used for configured per-category adjustments
    #[arg(long)]
    pub(crate) category: Option<String>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let path = args.data.clone().unwrap_or(config.dataset.path);
    let dataset = OrderDataset::from_path(&path, &config.enrichment)?;

    let state = filter_state(&args, &dataset)?;
    let matched = apply(dataset.orders(), &state);
    let options = DashboardOptions {
        top_countries: args.top_countries,
        certification_metric: if args.by_revenue {
            CertificationMetric::AverageRevenue
        } else {
            CertificationMetric::ReturnRate
        },
    };
    let report = DashboardReport::build(&matched, &options);

    println!(
        "Order dashboard for {} ({} of {} orders)",
        path.display(),
        matched.len(),
        dataset.len()
    );
    render_dashboard(&report, options.certification_metric);
    Ok(())
}

pub(crate) fn run_simulation(args: SimulateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let params = SimulationParams {
        price: args.price,
        recycled_pct: args.recycled,
        feedback: args.feedback,
        material: args.material,
        category: args.category,
    };
    let assessment = score_risk(&params, &config.risk)?;
    render_assessment(&params, &assessment);
    Ok(())
}

fn filter_state(args: &ReportArgs, dataset: &OrderDataset) -> Result<FilterState, AppError> {
    let date_range = DateRange::new(args.start, args.end)?;
    let materials = if args.materials.is_empty() {
        MaterialSelection::All
    } else {
        MaterialSelection::from_selected(args.materials.iter().cloned(), &dataset.materials())
    };
    let gender = args
        .gender
        .as_deref()
        .map(GenderFilter::parse)
        .unwrap_or_default();
    Ok(FilterState::new(date_range, materials, gender))
}

fn fmt_metric(metric: Metric, suffix: &str) -> String {
    match metric {
        Metric::Value(value) => format!("{value:.2}{suffix}"),
        Metric::NoData => "n/a".to_string(),
    }
}

fn render_dashboard(report: &DashboardReport, certification_metric: CertificationMetric) {
    if report.is_empty() {
        println!("No orders match the current filters.");
        return;
    }

    let kpis = &report.kpis;
    println!("\nKey figures");
    println!("- Total revenue: {:.2}", kpis.total_revenue);
    println!(
        "- Return rate: {} ({} of {} orders)",
        fmt_metric(kpis.return_rate_pct, "%"),
        kpis.returned_count,
        kpis.order_count
    );
    println!("- Revenue lost to returns: {:.2}", kpis.revenue_lost_to_returns);
    println!("- Water usage: {:.1} L", kpis.total_water_usage_liters);
    println!(
        "- Carbon offset investment: {:.2}",
        kpis.total_carbon_offset_investment
    );
    println!("- Return carbon waste: {:.1} kg", kpis.return_carbon_waste_kg);

    println!("\nMonthly revenue");
    for month in &report.monthly_revenue {
        println!("  {}: {:.2} ({} orders)", month.label, month.revenue, month.orders);
    }

    println!("\nRevenue by country");
    for country in &report.revenue_by_country {
        println!("  {}: {:.2}", country.country, country.revenue);
    }

    println!("\nMaterials");
    for material in &report.materials {
        println!(
            "  {}: {} orders | {} recycled | {} returned | {:.2} revenue",
            material.material,
            material.orders,
            fmt_metric(material.avg_recycled_pct, "%"),
            fmt_metric(material.return_rate_pct, "%"),
            material.revenue
        );
    }

    let suffix = match certification_metric {
        CertificationMetric::ReturnRate => "%",
        CertificationMetric::AverageRevenue => "",
    };
    println!("\nEco certifications");
    for certification in &report.certifications {
        println!(
            "  {}: {}",
            certification.certification,
            fmt_metric(certification.value, suffix)
        );
    }

    let pivot = &report.return_rate_pivot;
    println!("\nReturn rate by age group and category");
    println!("  {:<14}{}", "", pivot.categories.join(" | "));
    for row in &pivot.rows {
        let cells: Vec<String> = row.cells.iter().map(|cell| fmt_metric(*cell, "%")).collect();
        println!("  {:<14}{}", row.age_group_label, cells.join(" | "));
    }

    println!("\nReturn reasons by gender");
    for entry in report.return_reasons.counts.iter().filter(|entry| entry.count > 0) {
        println!("  {} / {}: {}", entry.gender, entry.reason, entry.count);
    }
}

fn render_assessment(params: &SimulationParams, assessment: &RiskAssessment) {
    println!(
        "Return risk for price {:.2}, {:.0}% recycled, {} feedback",
        params.price,
        params.recycled_pct,
        params.feedback.label()
    );
    println!(
        "- Predicted return risk: {:.1}% ({})",
        assessment.risk_percentage, assessment.classification_label
    );
    println!("- {}", assessment.advice);
    println!("Score components:");
    for component in &assessment.components {
        println!(
            "  - {:?}: {:+.1} ({})",
            component.factor, component.delta, component.notes
        );
    }
}
