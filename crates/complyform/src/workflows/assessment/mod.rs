//! Pre-bid assessment of government contracting opportunities.
//!
//! An assessment weighs how well an organization can meet an opportunity's MBE and VSBE
//! participation goals (from its own network and the shared directory), how large the
//! contract is, and how close the due date is, then recommends whether to bid.

pub mod capacity;
pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod summary;

#[cfg(test)]
mod tests;

pub use capacity::{capacity, Eligibility, NetworkCapacity, NetworkMember, NetworkSummary};
pub use domain::{
    AssessmentId, AssessmentRequest, Certification, ComplianceCategory, DirectorySubcontractor,
    Jurisdiction, JurisdictionId, Opportunity, OpportunityId, OpportunitySnapshot,
    OrganizationId, Subcontractor, SubcontractorId, SubcontractorPreview,
};
pub use repository::{
    AssessmentRecord, AssessmentRepository, DirectoryQuery, NewAssessment, OpportunityRepository,
    RepositoryError, SubcontractorRepository,
};
pub use router::assessment_router;
pub use scoring::{
    Recommendation, RiskAssessment, RiskDimension, RiskFinding, ScoringConfig, ScoringEngine,
    Severity,
};
pub use service::{AssessmentResult, AssessmentServiceError, PreBidAssessmentService};
pub use summary::AssessmentSummary;
