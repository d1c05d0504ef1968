use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    AssessmentId, ComplianceCategory, DirectorySubcontractor, Opportunity, OpportunityId,
    OrganizationId, Subcontractor,
};
use super::scoring::Recommendation;

/// Durable subset of an assessment, written once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssessment {
    pub organization_id: OrganizationId,
    pub opportunity_id: OpportunityId,
    pub overall_risk_score: u8,
    pub mbe_gap_percentage: f64,
    pub vsbe_gap_percentage: f64,
    pub available_subcontractors_count: usize,
    pub recommendation: Recommendation,
    pub recommendation_reason: String,
}

/// Stored assessment with the identity and timestamp assigned on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub assessed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: NewAssessment,
}

impl AssessmentRecord {
    pub fn from_new(fields: NewAssessment) -> Self {
        Self {
            id: AssessmentId::new(),
            assessed_at: Utc::now(),
            fields,
        }
    }
}

/// Directory search criteria; implementations should filter with [`DirectoryQuery::matches`].
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryQuery {
    pub naics_codes: Vec<String>,
    pub jurisdiction_code: String,
    pub category: ComplianceCategory,
    pub min_rating: f64,
}

impl DirectoryQuery {
    pub fn matches(&self, candidate: &DirectorySubcontractor) -> bool {
        candidate.holds(self.category)
            && candidate
                .rating
                .map(|rating| rating >= self.min_rating)
                .unwrap_or(false)
            && candidate
                .jurisdiction_codes
                .iter()
                .any(|code| code == &self.jurisdiction_code)
            && self
                .naics_codes
                .iter()
                .any(|code| candidate.naics_codes.contains(code))
    }
}

/// Read access to the opportunity catalog.
pub trait OpportunityRepository: Send + Sync {
    /// Returns the opportunity with its jurisdiction loaded, if it exists.
    fn find_opportunity(&self, id: &OpportunityId) -> Result<Option<Opportunity>, RepositoryError>;
}

/// Read access to organization networks and the shared directory.
pub trait SubcontractorRepository: Send + Sync {
    fn list_network(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Subcontractor>, RepositoryError>;
    fn match_directory(
        &self,
        query: &DirectoryQuery,
    ) -> Result<Vec<DirectorySubcontractor>, RepositoryError>;
}

/// Storage abstraction for assessment records.
pub trait AssessmentRepository: Send + Sync {
    /// Persist every field in one write, assigning id and `assessed_at`.
    fn save(&self, assessment: NewAssessment) -> Result<AssessmentRecord, RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    /// Newest first.
    fn list_by_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<AssessmentRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
