use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use order_insights::error::AppError;
use order_insights::orders::filter::apply;
use order_insights::orders::{
    aggregate, AggregateRequest, AggregateResult, DashboardOptions, DashboardReport, DateRange,
    FilterError, FilterOptions, FilterState, GenderFilter, MaterialSelection, OrderDataset,
};
use order_insights::simulator::{score_risk, RiskAssessment, RiskConfigOverrides, SimulationParams};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Filter controls as submitted by a dashboard client.
///
/// `materials: null` (or omitted) selects every material; an empty list selects none.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FilterRequest {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) end: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) materials: Option<Vec<String>>,
    #[serde(default)]
    pub(crate) gender: Option<String>,
}

impl FilterRequest {
    pub(crate) fn into_state(self, dataset: &OrderDataset) -> Result<FilterState, FilterError> {
        let date_range = DateRange::new(self.start, self.end)?;
        let materials = match self.materials {
            Some(selected) => MaterialSelection::from_selected(selected, &dataset.materials()),
            None => MaterialSelection::All,
        };
        let gender = self
            .gender
            .as_deref()
            .map(GenderFilter::parse)
            .unwrap_or_default();
        Ok(FilterState::new(date_range, materials, gender))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DashboardRequest {
    #[serde(default)]
    pub(crate) filter: FilterRequest,
    #[serde(default)]
    pub(crate) options: DashboardOptions,
}

#[derive(Debug, Serialize)]
pub(crate) struct DashboardResponse {
    pub(crate) total_orders: usize,
    pub(crate) matched_orders: usize,
    pub(crate) filter: FilterState,
    pub(crate) report: DashboardReport,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AggregateRouteRequest {
    #[serde(default)]
    pub(crate) filter: FilterRequest,
    pub(crate) aggregate: AggregateRequest,
}

#[derive(Debug, Serialize)]
pub(crate) struct AggregateResponse {
    pub(crate) matched_orders: usize,
    pub(crate) result: AggregateResult,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RiskScoreRequest {
    pub(crate) params: SimulationParams,
    #[serde(default)]
    pub(crate) overrides: RiskConfigOverrides,
}

pub(crate) fn order_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/orders/options", get(options_endpoint))
        .route("/api/v1/orders/dashboard", post(dashboard_endpoint))
        .route("/api/v1/orders/aggregate", post(aggregate_endpoint))
        .route("/api/v1/risk/score", post(risk_score_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn options_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Json<FilterOptions>, AppError> {
    let dataset = state.dataset.get_or_load()?;
    Ok(Json(dataset.filter_options()))
}

pub(crate) async fn dashboard_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<DashboardRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    let dataset = state.dataset.get_or_load()?;
    let filter = payload.filter.into_state(&dataset)?;
    let matched = apply(dataset.orders(), &filter);
    let report = DashboardReport::build(&matched, &payload.options);

    Ok(Json(DashboardResponse {
        total_orders: dataset.len(),
        matched_orders: matched.len(),
        filter,
        report,
    }))
}

pub(crate) async fn aggregate_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<AggregateRouteRequest>,
) -> Result<Json<AggregateResponse>, AppError> {
    let dataset = state.dataset.get_or_load()?;
    let filter = payload.filter.into_state(&dataset)?;
    let matched = apply(dataset.orders(), &filter);

    Ok(Json(AggregateResponse {
        matched_orders: matched.len(),
        result: aggregate(&matched, payload.aggregate),
    }))
}

pub(crate) async fn risk_score_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RiskScoreRequest>,
) -> Result<Json<RiskAssessment>, AppError> {
    let config = state.risk.with_overrides(&payload.overrides);
    let assessment = score_risk(&payload.params, &config)?;
    Ok(Json(assessment))
}
