use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use complyform::workflows::assessment::{
    assessment_router, AssessmentRepository, OpportunityRepository, PreBidAssessmentService,
    SubcontractorRepository,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_assessment_routes<O, S, A>(
    service: Arc<PreBidAssessmentService<O, S, A>>,
) -> axum::Router
where
    O: OpportunityRepository + 'static,
    S: SubcontractorRepository + 'static,
    A: AssessmentRepository + 'static,
{
    assessment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        InMemoryAssessmentStore, InMemoryOpportunityCatalog, InMemorySubcontractorDirectory,
        SeedData, DEMO_ORGANIZATION,
    };
    use axum::body::Body;
    use axum::http::{Method, Request};
    use chrono::Local;
    use complyform::config::AssessmentSettings;
    use complyform::workflows::assessment::ScoringConfig;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let seed = SeedData::sample(Local::now().date_naive());
        let service = Arc::new(PreBidAssessmentService::new(
            Arc::new(InMemoryOpportunityCatalog::with(seed.opportunities)),
            Arc::new(InMemorySubcontractorDirectory::with(seed.network, seed.directory)),
            Arc::new(InMemoryAssessmentStore::default()),
            ScoringConfig::default(),
            AssessmentSettings::default(),
        ));
        let readiness = Arc::new(AtomicBool::new(false));
        readiness.store(ready, Ordering::Release);
        let state = AppState {
            readiness,
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_assessment_routes(service).layer(Extension(state))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 1 << 20)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app(false).oneshot(get("/health")).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_tracks_startup_flag() {
        let pending = app(false).oneshot(get("/ready")).await.expect("response");
        assert_eq!(pending.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json_body(pending).await["status"], "initializing");

        let ready = app(true).oneshot(get("/ready")).await.expect("response");
        assert_eq!(ready.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn metrics_are_served_as_prometheus_text() {
        let response = app(true).oneshot(get("/metrics")).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn assessment_routes_are_mounted() {
        let uri = format!("/api/v1/organizations/{DEMO_ORGANIZATION}/network");
        let response = app(true).oneshot(get(&uri)).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await.as_array().map(Vec::len), Some(4));
    }
}
