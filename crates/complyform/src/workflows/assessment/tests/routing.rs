use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::assessment::assessment_router;
use crate::workflows::assessment::domain::{AssessmentId, OpportunityId, OrganizationId};

fn post_assessment(organization_id: OrganizationId, opportunity_id: OpportunityId) -> Request<Body> {
    let payload = json!({
        "organization_id": organization_id,
        "opportunity_id": opportunity_id,
    });
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/assessments")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

fn get(uri: String) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn post_creates_assessment() {
    let org = OrganizationId::new();
    let opportunity = opportunity(Some(15.0), None, Some(5_000_000.0), None);
    let fixture = build_service(vec![opportunity.clone()], Vec::new(), Vec::new());
    let router = assessment_router(Arc::new(fixture.service));

    let response = router
        .oneshot(post_assessment(org, opportunity.id))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["overall_risk_score"], 40);
    assert_eq!(body["recommendation"], "CAUTION");
    assert_eq!(body["mbe_gap_percentage"], -15.0);
    assert_eq!(body["organization_id"], json!(org));
    assert_eq!(body["opportunity"]["solicitation_number"], "MDOT-2025-0147");
    assert_eq!(body["risk_factors"].as_array().map(Vec::len), Some(1));
    assert_eq!(fixture.assessments.records().len(), 1);
}

#[tokio::test]
async fn post_unknown_opportunity_returns_not_found() {
    let fixture = build_service(Vec::new(), Vec::new(), Vec::new());
    let router = assessment_router(Arc::new(fixture.service));

    let response = router
        .oneshot(post_assessment(OrganizationId::new(), OpportunityId::new()))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("not found")));
}

#[tokio::test]
async fn post_without_jurisdiction_is_unprocessable() {
    let mut opportunity = opportunity(Some(10.0), None, None, None);
    opportunity.jurisdiction = None;
    let fixture = build_service(vec![opportunity.clone()], Vec::new(), Vec::new());
    let router = assessment_router(Arc::new(fixture.service));

    let response = router
        .oneshot(post_assessment(OrganizationId::new(), opportunity.id))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn stored_assessment_round_trips_through_fetch() {
    let org = OrganizationId::new();
    let opportunity = opportunity(None, None, None, None);
    let fixture = build_service(vec![opportunity.clone()], Vec::new(), Vec::new());
    let stored = fixture
        .service
        .perform_assessment_on(
            &crate::workflows::assessment::AssessmentRequest {
                organization_id: org,
                opportunity_id: opportunity.id,
            },
            today(),
        )
        .expect("assessment succeeds");
    let router = assessment_router(Arc::new(fixture.service));

    let response = router
        .oneshot(get(format!("/api/v1/assessments/{}", stored.id)))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["id"], json!(stored.id));
    assert_eq!(body["recommendation"], "BID");
    assert_eq!(body["available_subcontractors_count"], 0);
}

#[tokio::test]
async fn unknown_assessment_returns_not_found() {
    let fixture = build_service(Vec::new(), Vec::new(), Vec::new());
    let router = assessment_router(Arc::new(fixture.service));
    let missing = AssessmentId::new();

    let response = router
        .oneshot(get(format!("/api/v1/assessments/{missing}")))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], format!("assessment {missing} not found"));
}

#[tokio::test]
async fn summary_endpoint_reports_counts() {
    let org = OrganizationId::new();
    let risky = opportunity(Some(15.0), Some(5.0), None, None);
    let fixture = build_service(vec![risky.clone()], Vec::new(), Vec::new());
    let router = assessment_router(Arc::new(fixture.service));

    let response = router
        .clone()
        .oneshot(post_assessment(org, risky.id))
        .await
        .expect("router response");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = router
        .oneshot(get(format!("/api/v1/organizations/{org}/assessments/summary")))
        .await
        .expect("router response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["total_assessments"], 1);
    assert_eq!(body["no_bid_recommended"], 1);
    assert_eq!(body["average_risk_score"], 60.0);
}

#[tokio::test]
async fn history_and_network_endpoints_scope_to_organization() {
    let org = OrganizationId::new();
    let opportunity = opportunity(None, None, None, None);
    let fixture = build_service(vec![opportunity.clone()], mbe_network(org, 2), Vec::new());
    let router = assessment_router(Arc::new(fixture.service));

    router
        .clone()
        .oneshot(post_assessment(org, opportunity.id))
        .await
        .expect("router response");

    let history = router
        .clone()
        .oneshot(get(format!("/api/v1/organizations/{org}/assessments")))
        .await
        .expect("router response");
    assert_eq!(history.status(), StatusCode::OK);
    let history = read_json_body(history).await;
    assert_eq!(history.as_array().map(Vec::len), Some(1));

    let network = router
        .clone()
        .oneshot(get(format!("/api/v1/organizations/{org}/network")))
        .await
        .expect("router response");
    let network = read_json_body(network).await;
    assert_eq!(network.as_array().map(Vec::len), Some(2));

    let stranger = OrganizationId::new();
    let empty = router
        .oneshot(get(format!("/api/v1/organizations/{stranger}/network")))
        .await
        .expect("router response");
    let empty = read_json_body(empty).await;
    assert_eq!(empty.as_array().map(Vec::len), Some(0));
}
