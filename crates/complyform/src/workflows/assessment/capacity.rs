use serde::Serialize;

use super::domain::{ComplianceCategory, Subcontractor};

/// Category grant derived from a certification record or the legacy MBE flag.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Grant {
    cert_type: String,
    naics_codes: Option<Vec<String>>,
}

impl Grant {
    fn covers(&self, category: ComplianceCategory, industry_codes: Option<&[String]>) -> bool {
        if !self.cert_type.contains(category.code()) {
            return false;
        }

        match (industry_codes, &self.naics_codes) {
            (Some(wanted), Some(held)) if !held.is_empty() => {
                wanted.iter().any(|code| held.contains(code))
            }
            _ => true,
        }
    }
}

/// Everything a subcontractor qualifies for, computed once when the network is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Eligibility {
    grants: Vec<Grant>,
}

impl Eligibility {
    pub fn from_subcontractor(subcontractor: &Subcontractor) -> Self {
        let mut grants: Vec<Grant> = subcontractor
            .certifications
            .iter()
            .filter(|cert| !cert.cert_type.trim().is_empty())
            .map(|cert| Grant {
                cert_type: cert.cert_type.to_uppercase(),
                naics_codes: cert.naics_codes.clone(),
            })
            .collect();

        // The flag predates certification records and is not NAICS scoped.
        if subcontractor.is_mbe {
            grants.push(Grant {
                cert_type: ComplianceCategory::Mbe.code().to_string(),
                naics_codes: None,
            });
        }

        Self { grants }
    }

    pub fn qualifies(&self, category: ComplianceCategory, industry_codes: Option<&[String]>) -> bool {
        let industry_codes = industry_codes.filter(|codes| !codes.is_empty());
        self.grants
            .iter()
            .any(|grant| grant.covers(category, industry_codes))
    }
}

/// Network subcontractor paired with its derived eligibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkMember {
    pub subcontractor: Subcontractor,
    pub eligibility: Eligibility,
}

impl From<Subcontractor> for NetworkMember {
    fn from(subcontractor: Subcontractor) -> Self {
        let eligibility = Eligibility::from_subcontractor(&subcontractor);
        Self {
            subcontractor,
            eligibility,
        }
    }
}

/// Qualifying subset of a network for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkCapacity {
    pub count: usize,
    pub subcontractors: Vec<Subcontractor>,
}

/// Count network members eligible for `category`, optionally narrowed to shared NAICS codes.
pub fn capacity(
    members: &[NetworkMember],
    category: ComplianceCategory,
    industry_codes: Option<&[String]>,
) -> NetworkCapacity {
    let subcontractors: Vec<Subcontractor> = members
        .iter()
        .filter(|member| member.eligibility.qualifies(category, industry_codes))
        .map(|member| member.subcontractor.clone())
        .collect();

    NetworkCapacity {
        count: subcontractors.len(),
        subcontractors,
    }
}

/// Headcount of the organization's network per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkSummary {
    pub total_count: usize,
    pub mbe_count: usize,
    pub vsbe_count: usize,
}
