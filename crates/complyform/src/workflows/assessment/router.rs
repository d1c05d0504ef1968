use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{AssessmentId, AssessmentRequest, OrganizationId};
use super::repository::{
    AssessmentRepository, OpportunityRepository, RepositoryError, SubcontractorRepository,
};
use super::service::{AssessmentServiceError, PreBidAssessmentService};
use crate::error::AppError;

type SharedService<O, S, A> = Arc<PreBidAssessmentService<O, S, A>>;

/// Router builder exposing HTTP endpoints for running and reviewing assessments.
pub fn assessment_router<O, S, A>(service: SharedService<O, S, A>) -> Router
where
    O: OpportunityRepository + 'static,
    S: SubcontractorRepository + 'static,
    A: AssessmentRepository + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(perform_handler::<O, S, A>))
        .route(
            "/api/v1/assessments/:assessment_id",
            get(fetch_handler::<O, S, A>),
        )
        .route(
            "/api/v1/organizations/:organization_id/assessments",
            get(history_handler::<O, S, A>),
        )
        .route(
            "/api/v1/organizations/:organization_id/assessments/summary",
            get(summary_handler::<O, S, A>),
        )
        .route(
            "/api/v1/organizations/:organization_id/network",
            get(network_handler::<O, S, A>),
        )
        .with_state(service)
}

pub(crate) async fn perform_handler<O, S, A>(
    State(service): State<SharedService<O, S, A>>,
    axum::Json(request): axum::Json<AssessmentRequest>,
) -> Response
where
    O: OpportunityRepository + 'static,
    S: SubcontractorRepository + 'static,
    A: AssessmentRepository + 'static,
{
    match service.perform_assessment(&request) {
        Ok(result) => (StatusCode::CREATED, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<O, S, A>(
    State(service): State<SharedService<O, S, A>>,
    Path(assessment_id): Path<AssessmentId>,
) -> Response
where
    O: OpportunityRepository + 'static,
    S: SubcontractorRepository + 'static,
    A: AssessmentRepository + 'static,
{
    match service.get_assessment(&assessment_id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(AssessmentServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": format!("assessment {assessment_id} not found"),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn history_handler<O, S, A>(
    State(service): State<SharedService<O, S, A>>,
    Path(organization_id): Path<OrganizationId>,
) -> Response
where
    O: OpportunityRepository + 'static,
    S: SubcontractorRepository + 'static,
    A: AssessmentRepository + 'static,
{
    match service.list_assessments(&organization_id) {
        Ok(records) => (StatusCode::OK, axum::Json(records)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn summary_handler<O, S, A>(
    State(service): State<SharedService<O, S, A>>,
    Path(organization_id): Path<OrganizationId>,
) -> Response
where
    O: OpportunityRepository + 'static,
    S: SubcontractorRepository + 'static,
    A: AssessmentRepository + 'static,
{
    match service.assessment_summary(&organization_id) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn network_handler<O, S, A>(
    State(service): State<SharedService<O, S, A>>,
    Path(organization_id): Path<OrganizationId>,
) -> Response
where
    O: OpportunityRepository + 'static,
    S: SubcontractorRepository + 'static,
    A: AssessmentRepository + 'static,
{
    match service.organization_network(&organization_id) {
        Ok(network) => (StatusCode::OK, axum::Json(network)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: AssessmentServiceError) -> Response {
    AppError::from(error).into_response()
}
