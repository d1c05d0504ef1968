use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

identifier!(
    /// Bidding organization that owns a subcontractor network.
    OrganizationId
);
identifier!(
    /// Solicitation tracked by the opportunity catalog.
    OpportunityId
);
identifier!(JurisdictionId);
identifier!(
    /// Identity shared by network and directory subcontractors.
    SubcontractorId
);
identifier!(AssessmentId);

/// Participation programs an opportunity can set goals for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceCategory {
    /// Minority business enterprise.
    Mbe,
    /// Veteran-owned small business enterprise.
    Vsbe,
}

impl ComplianceCategory {
    pub fn code(&self) -> &'static str {
        match self {
            ComplianceCategory::Mbe => "MBE",
            ComplianceCategory::Vsbe => "VSBE",
        }
    }
}

/// Regulatory area an opportunity is let in; its code scopes directory searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jurisdiction {
    pub id: JurisdictionId,
    pub code: String,
    pub name: String,
}

/// Solicitation as read from the opportunity catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: OpportunityId,
    pub solicitation_number: String,
    pub title: String,
    pub agency: Option<String>,
    pub jurisdiction_id: JurisdictionId,
    #[serde(default)]
    pub jurisdiction: Option<Jurisdiction>,
    #[serde(default)]
    pub naics_codes: Vec<String>,
    pub mbe_goal: Option<f64>,
    pub vsbe_goal: Option<f64>,
    pub total_value: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub posted_date: Option<NaiveDate>,
    pub opportunity_url: Option<String>,
    pub is_active: bool,
    pub relevance_score: Option<i32>,
}

impl Opportunity {
    /// Participation goal for a category, only when one is actually set.
    pub fn goal(&self, category: ComplianceCategory) -> Option<f64> {
        let goal = match category {
            ComplianceCategory::Mbe => self.mbe_goal,
            ComplianceCategory::Vsbe => self.vsbe_goal,
        };
        goal.filter(|value| *value > 0.0)
    }

    pub fn snapshot(&self) -> OpportunitySnapshot {
        OpportunitySnapshot {
            id: self.id,
            solicitation_number: self.solicitation_number.clone(),
            title: self.title.clone(),
            jurisdiction_id: self.jurisdiction_id,
            agency: self.agency.clone(),
            mbe_goal: self.mbe_goal,
            vsbe_goal: self.vsbe_goal,
            total_value: self.total_value,
            naics_codes: self.naics_codes.clone(),
            due_date: self.due_date,
            posted_date: self.posted_date,
            opportunity_url: self.opportunity_url.clone(),
            is_active: self.is_active,
            relevance_score: self.relevance_score,
        }
    }
}

/// Opportunity fields echoed back alongside an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpportunitySnapshot {
    pub id: OpportunityId,
    pub solicitation_number: String,
    pub title: String,
    pub jurisdiction_id: JurisdictionId,
    pub agency: Option<String>,
    pub mbe_goal: Option<f64>,
    pub vsbe_goal: Option<f64>,
    pub total_value: Option<f64>,
    pub naics_codes: Vec<String>,
    pub due_date: Option<NaiveDate>,
    pub posted_date: Option<NaiveDate>,
    pub opportunity_url: Option<String>,
    pub is_active: bool,
    pub relevance_score: Option<i32>,
}

/// Certification held by a network subcontractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub cert_type: String,
    /// NAICS codes the certification is scoped to; `None` means unrestricted.
    #[serde(default)]
    pub naics_codes: Option<Vec<String>>,
}

/// Subcontractor already in an organization's network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcontractor {
    pub id: SubcontractorId,
    pub organization_id: OrganizationId,
    pub legal_name: String,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    /// Precomputed MBE eligibility kept for records that predate certifications.
    #[serde(default)]
    pub is_mbe: bool,
}

/// Subcontractor from the shared directory, not owned by any organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorySubcontractor {
    pub id: SubcontractorId,
    pub legal_name: String,
    pub federal_id: Option<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub jurisdiction_codes: Vec<String>,
    #[serde(default)]
    pub naics_codes: Vec<String>,
    #[serde(default)]
    pub capabilities: Vec<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub location_city: Option<String>,
    pub rating: Option<f64>,
    #[serde(default)]
    pub projects_completed: u32,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_mbe: bool,
    #[serde(default)]
    pub is_vsbe: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl DirectorySubcontractor {
    pub fn holds(&self, category: ComplianceCategory) -> bool {
        match category {
            ComplianceCategory::Mbe => self.is_mbe,
            ComplianceCategory::Vsbe => self.is_vsbe,
        }
    }

    pub fn preview(&self) -> SubcontractorPreview {
        SubcontractorPreview {
            id: self.id,
            legal_name: self.legal_name.clone(),
            federal_id: self.federal_id.clone(),
            certifications: self.certifications.clone(),
            jurisdiction_codes: self.jurisdiction_codes.clone(),
            naics_codes: self.naics_codes.clone(),
            capabilities: self.capabilities.clone(),
            contact_email: self.contact_email.clone(),
            phone: self.phone.clone(),
            location_city: self.location_city.clone(),
            rating: self.rating.unwrap_or(0.0),
            projects_completed: self.projects_completed,
            is_verified: self.is_verified,
            created_at: self.created_at,
        }
    }
}

/// Display-ready view of a directory match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcontractorPreview {
    pub id: SubcontractorId,
    pub legal_name: String,
    pub federal_id: Option<String>,
    pub certifications: Vec<String>,
    pub jurisdiction_codes: Vec<String>,
    pub naics_codes: Vec<String>,
    pub capabilities: Vec<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub location_city: Option<String>,
    pub rating: f64,
    pub projects_completed: u32,
    pub is_verified: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Inbound request to assess one opportunity for one organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub organization_id: OrganizationId,
    pub opportunity_id: OpportunityId,
}
