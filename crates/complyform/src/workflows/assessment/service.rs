use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::capacity::{capacity, NetworkMember, NetworkSummary};
use super::domain::{
    AssessmentId, AssessmentRequest, ComplianceCategory, DirectorySubcontractor, Jurisdiction,
    Opportunity, OpportunityId, OpportunitySnapshot, OrganizationId, Subcontractor,
    SubcontractorPreview,
};
use super::repository::{
    AssessmentRecord, AssessmentRepository, DirectoryQuery, NewAssessment, OpportunityRepository,
    RepositoryError, SubcontractorRepository,
};
use super::scoring::{
    AssessmentContext, CategoryCoverage, Recommendation, RiskFinding, ScoringConfig,
    ScoringEngine,
};
use super::summary::AssessmentSummary;
use crate::config::AssessmentSettings;

/// Full assessment returned to callers; only the record fields are persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    pub id: AssessmentId,
    pub assessed_at: DateTime<Utc>,
    pub organization_id: OrganizationId,
    pub opportunity_id: OpportunityId,
    pub overall_risk_score: u8,
    pub mbe_gap_percentage: f64,
    pub vsbe_gap_percentage: f64,
    pub available_subcontractors_count: usize,
    pub recommendation: Recommendation,
    pub recommendation_reason: String,
    pub risk_factors: Vec<String>,
    pub findings: Vec<RiskFinding>,
    pub matching_subcontractors: Vec<SubcontractorPreview>,
    pub opportunity: OpportunitySnapshot,
    pub organization_network: NetworkSummary,
}

/// Service composing the collaborators with the scoring engine.
pub struct PreBidAssessmentService<O, S, A> {
    opportunities: Arc<O>,
    subcontractors: Arc<S>,
    assessments: Arc<A>,
    engine: Arc<ScoringEngine>,
    settings: AssessmentSettings,
}

impl<O, S, A> PreBidAssessmentService<O, S, A>
where
    O: OpportunityRepository + 'static,
    S: SubcontractorRepository + 'static,
    A: AssessmentRepository + 'static,
{
    pub fn new(
        opportunities: Arc<O>,
        subcontractors: Arc<S>,
        assessments: Arc<A>,
        config: ScoringConfig,
        settings: AssessmentSettings,
    ) -> Self {
        Self {
            opportunities,
            subcontractors,
            assessments,
            engine: Arc::new(ScoringEngine::new(config)),
            settings,
        }
    }

    /// Assess an opportunity against today's date.
    pub fn perform_assessment(
        &self,
        request: &AssessmentRequest,
    ) -> Result<AssessmentResult, AssessmentServiceError> {
        self.perform_assessment_on(request, Local::now().date_naive())
    }

    /// Assess an opportunity, measuring the timeline from `today`.
    pub fn perform_assessment_on(
        &self,
        request: &AssessmentRequest,
        today: NaiveDate,
    ) -> Result<AssessmentResult, AssessmentServiceError> {
        let (opportunity, jurisdiction) = self.load_opportunity(&request.opportunity_id)?;

        let network: Vec<NetworkMember> = self
            .subcontractors
            .list_network(&request.organization_id)?
            .into_iter()
            .map(NetworkMember::from)
            .collect();

        let industry_codes =
            (!opportunity.naics_codes.is_empty()).then_some(opportunity.naics_codes.as_slice());
        let network_mbe = capacity(&network, ComplianceCategory::Mbe, industry_codes);
        let network_vsbe = capacity(&network, ComplianceCategory::Vsbe, industry_codes);

        let directory_mbe =
            self.directory_matches(&opportunity, &jurisdiction, ComplianceCategory::Mbe)?;
        let directory_vsbe =
            self.directory_matches(&opportunity, &jurisdiction, ComplianceCategory::Vsbe)?;

        let mut seen = HashSet::new();
        let available: Vec<&DirectorySubcontractor> = directory_mbe
            .iter()
            .chain(directory_vsbe.iter())
            .filter(|candidate| seen.insert(candidate.id))
            .collect();
        let matching_subcontractors: Vec<SubcontractorPreview> = available
            .iter()
            .take(self.settings.preview_limit)
            .map(|candidate| candidate.preview())
            .collect();

        let context = AssessmentContext {
            opportunity: &opportunity,
            mbe: CategoryCoverage {
                category: ComplianceCategory::Mbe,
                goal: opportunity.goal(ComplianceCategory::Mbe),
                network: network_mbe.count,
                directory: directory_mbe.len(),
            },
            vsbe: CategoryCoverage {
                category: ComplianceCategory::Vsbe,
                goal: opportunity.goal(ComplianceCategory::Vsbe),
                network: network_vsbe.count,
                directory: directory_vsbe.len(),
            },
            today,
        };
        let scored = self.engine.score(&context);

        let record = self.assessments.save(NewAssessment {
            organization_id: request.organization_id,
            opportunity_id: request.opportunity_id,
            overall_risk_score: scored.risk_score,
            mbe_gap_percentage: scored.mbe_gap_percentage,
            vsbe_gap_percentage: scored.vsbe_gap_percentage,
            available_subcontractors_count: available.len(),
            recommendation: scored.recommendation,
            recommendation_reason: scored.recommendation.rationale().to_string(),
        })?;

        info!(
            assessment_id = %record.id,
            organization_id = %request.organization_id,
            opportunity_id = %request.opportunity_id,
            risk_score = scored.risk_score,
            recommendation = scored.recommendation.label(),
            "pre-bid assessment recorded"
        );

        let AssessmentRecord {
            id,
            assessed_at,
            fields,
        } = record;

        Ok(AssessmentResult {
            id,
            assessed_at,
            organization_id: fields.organization_id,
            opportunity_id: fields.opportunity_id,
            overall_risk_score: fields.overall_risk_score,
            mbe_gap_percentage: fields.mbe_gap_percentage,
            vsbe_gap_percentage: fields.vsbe_gap_percentage,
            available_subcontractors_count: fields.available_subcontractors_count,
            recommendation: fields.recommendation,
            recommendation_reason: fields.recommendation_reason,
            risk_factors: scored.findings.iter().map(ToString::to_string).collect(),
            findings: scored.findings,
            matching_subcontractors,
            opportunity: opportunity.snapshot(),
            organization_network: NetworkSummary {
                total_count: network.len(),
                mbe_count: network_mbe.count,
                vsbe_count: network_vsbe.count,
            },
        })
    }

    /// Fetch a stored assessment.
    pub fn get_assessment(
        &self,
        assessment_id: &AssessmentId,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let record = self
            .assessments
            .fetch(assessment_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Assessment history for an organization, newest first.
    pub fn list_assessments(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        Ok(self.assessments.list_by_organization(organization_id)?)
    }

    pub fn assessment_summary(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<AssessmentSummary, AssessmentServiceError> {
        let records = self.assessments.list_by_organization(organization_id)?;
        Ok(AssessmentSummary::from_records(&records))
    }

    /// Subcontractors the organization has already added to its network.
    pub fn organization_network(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Subcontractor>, AssessmentServiceError> {
        Ok(self.subcontractors.list_network(organization_id)?)
    }

    fn load_opportunity(
        &self,
        opportunity_id: &OpportunityId,
    ) -> Result<(Opportunity, Jurisdiction), AssessmentServiceError> {
        let Some(opportunity) = self.opportunities.find_opportunity(opportunity_id)? else {
            warn!(%opportunity_id, "assessment requested for unknown opportunity");
            return Err(AssessmentServiceError::OpportunityNotFound(*opportunity_id));
        };

        let Some(jurisdiction) = opportunity.jurisdiction.clone() else {
            warn!(%opportunity_id, "assessment requested for opportunity without jurisdiction");
            return Err(AssessmentServiceError::MissingJurisdiction(*opportunity_id));
        };

        Ok((opportunity, jurisdiction))
    }

    fn directory_matches(
        &self,
        opportunity: &Opportunity,
        jurisdiction: &Jurisdiction,
        category: ComplianceCategory,
    ) -> Result<Vec<DirectorySubcontractor>, AssessmentServiceError> {
        if opportunity.goal(category).is_none() || opportunity.naics_codes.is_empty() {
            return Ok(Vec::new());
        }

        let query = DirectoryQuery {
            naics_codes: opportunity.naics_codes.clone(),
            jurisdiction_code: jurisdiction.code.clone(),
            category,
            min_rating: self.settings.min_directory_rating,
        };
        let matches = self.subcontractors.match_directory(&query)?;
        debug!(
            category = category.code(),
            jurisdiction = %jurisdiction.code,
            matches = matches.len(),
            "directory search complete"
        );
        Ok(matches)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error("opportunity {0} not found")]
    OpportunityNotFound(OpportunityId),
    #[error("opportunity {0} has no associated jurisdiction")]
    MissingJurisdiction(OpportunityId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
