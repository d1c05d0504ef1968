use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::config::AssessmentSettings;
use crate::workflows::assessment::domain::{
    AssessmentId, Certification, DirectorySubcontractor, Jurisdiction, JurisdictionId,
    Opportunity, OpportunityId, OrganizationId, Subcontractor, SubcontractorId,
};
use crate::workflows::assessment::repository::{
    AssessmentRecord, AssessmentRepository, DirectoryQuery, NewAssessment, OpportunityRepository,
    RepositoryError, SubcontractorRepository,
};
use crate::workflows::assessment::scoring::ScoringConfig;
use crate::workflows::assessment::PreBidAssessmentService;

pub(super) type MemoryService =
    PreBidAssessmentService<MemoryOpportunities, MemorySubcontractors, MemoryAssessments>;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date")
}

pub(super) fn jurisdiction() -> Jurisdiction {
    Jurisdiction {
        id: JurisdictionId::new(),
        code: "MD".to_string(),
        name: "State of Maryland".to_string(),
    }
}

pub(super) fn opportunity(
    mbe_goal: Option<f64>,
    vsbe_goal: Option<f64>,
    total_value: Option<f64>,
    due_in_days: Option<i64>,
) -> Opportunity {
    let jurisdiction = jurisdiction();
    Opportunity {
        id: OpportunityId::new(),
        solicitation_number: "MDOT-2025-0147".to_string(),
        title: "Facilities maintenance services".to_string(),
        agency: Some("Maryland Department of Transportation".to_string()),
        jurisdiction_id: jurisdiction.id,
        jurisdiction: Some(jurisdiction),
        naics_codes: vec!["561210".to_string(), "238220".to_string()],
        mbe_goal,
        vsbe_goal,
        total_value,
        due_date: due_in_days.map(|days| today() + Duration::days(days)),
        posted_date: Some(today() - Duration::days(10)),
        opportunity_url: Some("https://emma.maryland.gov/solicitations/0147".to_string()),
        is_active: true,
        relevance_score: Some(82),
    }
}

/// An empty `naics` slice yields an unrestricted certification.
pub(super) fn certification(cert_type: &str, naics: &[&str]) -> Certification {
    Certification {
        cert_type: cert_type.to_string(),
        naics_codes: (!naics.is_empty())
            .then(|| naics.iter().map(|code| code.to_string()).collect()),
    }
}

pub(super) fn network_sub(
    organization_id: OrganizationId,
    name: &str,
    certifications: Vec<Certification>,
    is_mbe: bool,
) -> Subcontractor {
    Subcontractor {
        id: SubcontractorId::new(),
        organization_id,
        legal_name: name.to_string(),
        certifications,
        is_mbe,
    }
}

pub(super) fn mbe_network(organization_id: OrganizationId, count: usize) -> Vec<Subcontractor> {
    (0..count)
        .map(|index| {
            network_sub(
                organization_id,
                &format!("Network MBE {index}"),
                vec![certification("MBE", &["561210"])],
                false,
            )
        })
        .collect()
}

pub(super) fn directory_sub(name: &str, is_mbe: bool, is_vsbe: bool) -> DirectorySubcontractor {
    DirectorySubcontractor {
        id: SubcontractorId::new(),
        legal_name: name.to_string(),
        federal_id: Some("52-1234567".to_string()),
        certifications: Vec::new(),
        jurisdiction_codes: vec!["MD".to_string()],
        naics_codes: vec!["561210".to_string()],
        capabilities: vec!["Janitorial".to_string()],
        contact_email: Some("bids@example.com".to_string()),
        phone: None,
        location_city: Some("Baltimore".to_string()),
        rating: Some(4.2),
        projects_completed: 12,
        is_verified: true,
        is_mbe,
        is_vsbe,
        created_at: None,
    }
}

pub(super) fn build_service(
    opportunities: Vec<Opportunity>,
    network: Vec<Subcontractor>,
    directory: Vec<DirectorySubcontractor>,
) -> Fixture {
    let assessments = Arc::new(MemoryAssessments::default());
    let subcontractors = Arc::new(MemorySubcontractors::with(network, directory));
    let service = PreBidAssessmentService::new(
        Arc::new(MemoryOpportunities::with(opportunities)),
        subcontractors.clone(),
        assessments.clone(),
        ScoringConfig::default(),
        AssessmentSettings::default(),
    );
    Fixture {
        service,
        assessments,
        subcontractors,
    }
}

pub(super) struct Fixture {
    pub(super) service: MemoryService,
    pub(super) assessments: Arc<MemoryAssessments>,
    pub(super) subcontractors: Arc<MemorySubcontractors>,
}

#[derive(Default)]
pub(super) struct MemoryOpportunities {
    records: HashMap<OpportunityId, Opportunity>,
}

impl MemoryOpportunities {
    pub(super) fn with(opportunities: Vec<Opportunity>) -> Self {
        Self {
            records: opportunities
                .into_iter()
                .map(|opportunity| (opportunity.id, opportunity))
                .collect(),
        }
    }
}

impl OpportunityRepository for MemoryOpportunities {
    fn find_opportunity(&self, id: &OpportunityId) -> Result<Option<Opportunity>, RepositoryError> {
        Ok(self.records.get(id).cloned())
    }
}

#[derive(Default)]
pub(super) struct MemorySubcontractors {
    network: Vec<Subcontractor>,
    directory: Vec<DirectorySubcontractor>,
    queries: Mutex<Vec<DirectoryQuery>>,
}

impl MemorySubcontractors {
    pub(super) fn with(network: Vec<Subcontractor>, directory: Vec<DirectorySubcontractor>) -> Self {
        Self {
            network,
            directory,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn queries(&self) -> Vec<DirectoryQuery> {
        self.queries.lock().expect("query mutex poisoned").clone()
    }
}

impl SubcontractorRepository for MemorySubcontractors {
    fn list_network(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Subcontractor>, RepositoryError> {
        Ok(self
            .network
            .iter()
            .filter(|sub| &sub.organization_id == organization_id)
            .cloned()
            .collect())
    }

    fn match_directory(
        &self,
        query: &DirectoryQuery,
    ) -> Result<Vec<DirectorySubcontractor>, RepositoryError> {
        self.queries
            .lock()
            .expect("query mutex poisoned")
            .push(query.clone());
        Ok(self
            .directory
            .iter()
            .filter(|candidate| query.matches(candidate))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryAssessments {
    records: Mutex<Vec<AssessmentRecord>>,
}

impl MemoryAssessments {
    pub(super) fn records(&self) -> Vec<AssessmentRecord> {
        self.records.lock().expect("assessment mutex poisoned").clone()
    }
}

impl AssessmentRepository for MemoryAssessments {
    fn save(&self, assessment: NewAssessment) -> Result<AssessmentRecord, RepositoryError> {
        let record = AssessmentRecord::from_new(assessment);
        self.records
            .lock()
            .expect("assessment mutex poisoned")
            .push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("assessment mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn list_by_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("assessment mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|record| &record.fields.organization_id == organization_id)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableAssessments;

impl AssessmentRepository for UnavailableAssessments {
    fn save(&self, _assessment: NewAssessment) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_by_organization(
        &self,
        _organization_id: &OrganizationId,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
