use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryAssessmentStore, InMemoryOpportunityCatalog, InMemorySubcontractorDirectory,
    SeedData, DEMO_ORGANIZATION,
};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use complyform::config::AppConfig;
use complyform::error::AppError;
use complyform::telemetry;
use complyform::workflows::assessment::{PreBidAssessmentService, ScoringConfig};
use std::sync::atomic::Ordering;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let seed = SeedData::sample(Local::now().date_naive());
    info!(
        opportunities = seed.opportunities.len(),
        network = seed.network.len(),
        directory = seed.directory.len(),
        organization_id = %DEMO_ORGANIZATION,
        "seeded in-memory stores"
    );
    let assessment_service = Arc::new(PreBidAssessmentService::new(
        Arc::new(InMemoryOpportunityCatalog::with(seed.opportunities)),
        Arc::new(InMemorySubcontractorDirectory::with(seed.network, seed.directory)),
        Arc::new(InMemoryAssessmentStore::default()),
        ScoringConfig::default(),
        config.assessment.clone(),
    ));

    let app = with_assessment_routes(assessment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(environment = config.environment.label(), %addr, "pre-bid assessment service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
