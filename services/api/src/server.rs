use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::order_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use order_insights::config::AppConfig;
use order_insights::error::AppError;
use order_insights::orders::DatasetCache;
use order_insights::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.data.take() {
        config.dataset.path = path;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let dataset = Arc::new(DatasetCache::from_path(
        config.dataset.path.clone(),
        config.enrichment,
    ));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        dataset: dataset.clone(),
        risk: Arc::new(config.risk.clone()),
    };

    let app = order_routes().layer(Extension(app_state)).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let loaded = dataset.get_or_load()?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        orders = loaded.len(),
        path = %config.dataset.path.display(),
        "order insights service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
