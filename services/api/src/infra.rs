use chrono::{Duration, NaiveDate};
use complyform::workflows::assessment::{
    AssessmentId, AssessmentRecord, AssessmentRepository, Certification, DirectoryQuery,
    DirectorySubcontractor, Jurisdiction, JurisdictionId, NewAssessment, Opportunity,
    OpportunityId, OpportunityRepository, OrganizationId, RepositoryError, Subcontractor,
    SubcontractorId, SubcontractorRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Organization that owns the seeded subcontractor network.
pub(crate) const DEMO_ORGANIZATION: OrganizationId =
    OrganizationId(Uuid::from_u128(0x6f1c_2d7e_0a4b_4c1e_9d3f_5b8a_1e2c_0001));

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryOpportunityCatalog {
    records: Arc<Mutex<HashMap<OpportunityId, Opportunity>>>,
}

impl InMemoryOpportunityCatalog {
    pub(crate) fn with(opportunities: Vec<Opportunity>) -> Self {
        let records = opportunities
            .into_iter()
            .map(|opportunity| (opportunity.id, opportunity))
            .collect();
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub(crate) fn by_solicitation(&self, solicitation_number: &str) -> Option<Opportunity> {
        let guard = self.records.lock().expect("catalog mutex poisoned");
        guard
            .values()
            .find(|opportunity| {
                opportunity
                    .solicitation_number
                    .eq_ignore_ascii_case(solicitation_number.trim())
            })
            .cloned()
    }

    /// Active opportunities ordered by due date, undated last.
    pub(crate) fn active(&self) -> Vec<Opportunity> {
        let guard = self.records.lock().expect("catalog mutex poisoned");
        let mut active: Vec<Opportunity> = guard
            .values()
            .filter(|opportunity| opportunity.is_active)
            .cloned()
            .collect();
        active.sort_by_key(|opportunity| (opportunity.due_date.is_none(), opportunity.due_date));
        active
    }
}

impl OpportunityRepository for InMemoryOpportunityCatalog {
    fn find_opportunity(&self, id: &OpportunityId) -> Result<Option<Opportunity>, RepositoryError> {
        let guard = self.records.lock().expect("catalog mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySubcontractorDirectory {
    network: Arc<Mutex<Vec<Subcontractor>>>,
    directory: Arc<Mutex<Vec<DirectorySubcontractor>>>,
}

impl InMemorySubcontractorDirectory {
    pub(crate) fn with(network: Vec<Subcontractor>, directory: Vec<DirectorySubcontractor>) -> Self {
        Self {
            network: Arc::new(Mutex::new(network)),
            directory: Arc::new(Mutex::new(directory)),
        }
    }
}

impl SubcontractorRepository for InMemorySubcontractorDirectory {
    fn list_network(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Subcontractor>, RepositoryError> {
        let guard = self.network.lock().expect("network mutex poisoned");
        Ok(guard
            .iter()
            .filter(|subcontractor| &subcontractor.organization_id == organization_id)
            .cloned()
            .collect())
    }

    fn match_directory(
        &self,
        query: &DirectoryQuery,
    ) -> Result<Vec<DirectorySubcontractor>, RepositoryError> {
        let guard = self.directory.lock().expect("directory mutex poisoned");
        let mut matches: Vec<DirectorySubcontractor> = guard
            .iter()
            .filter(|candidate| query.matches(candidate))
            .cloned()
            .collect();
        // Best rated first.
        matches.sort_by(|left, right| {
            right
                .rating
                .unwrap_or_default()
                .total_cmp(&left.rating.unwrap_or_default())
        });
        Ok(matches)
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentStore {
    records: Arc<Mutex<Vec<AssessmentRecord>>>,
}

impl AssessmentRepository for InMemoryAssessmentStore {
    fn save(&self, assessment: NewAssessment) -> Result<AssessmentRecord, RepositoryError> {
        let record = AssessmentRecord::from_new(assessment);
        let mut guard = self.records.lock().expect("assessment mutex poisoned");
        guard.push(record.clone());
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

/// Sample catalog, network and directory used by `serve` and `demo`.
pub(crate) struct SeedData {
    pub(crate) opportunities: Vec<Opportunity>,
    pub(crate) network: Vec<Subcontractor>,
    pub(crate) directory: Vec<DirectorySubcontractor>,
}

impl SeedData {
    /// Due dates are laid out relative to `today`.
    pub(crate) fn sample(today: NaiveDate) -> Self {
        let maryland = Jurisdiction {
            id: JurisdictionId(Uuid::from_u128(0x4d44_0000_0000_4000_8000_0000_0000_0001)),
            code: "MD".to_string(),
            name: "State of Maryland".to_string(),
        };

        let opportunities = vec![
            seed_opportunity(
                0x0412,
                "MDOT-SHA-25-0412",
                "Roadside facilities maintenance",
                "Maryland Department of Transportation",
                &maryland,
                &["561730", "238220"],
                (Some(22.0), Some(3.0)),
                Some(3_800_000.0),
                Some(today + Duration::days(21)),
            ),
            seed_opportunity(
                0x1187,
                "DGS-25-1187",
                "Statewide HVAC modernization",
                "Department of General Services",
                &maryland,
                &["238220"],
                (Some(30.0), Some(1.0)),
                Some(14_500_000.0),
                Some(today + Duration::days(9)),
            ),
            seed_opportunity(
                0x0077,
                "BCPS-25-077",
                "Custodial supply delivery",
                "Baltimore County Public Schools",
                &maryland,
                &["424130"],
                (None, None),
                Some(85_000.0),
                Some(today + Duration::days(35)),
            ),
        ];

        let network = vec![
            network_member(
                0x01,
                "Patapsco Mechanical LLC",
                vec![certification("MBE", Some(&["238220"][..]))],
                false,
            ),
            network_member(
                0x02,
                "Severn Grounds & Facilities",
                vec![certification("MBE/DBE", None)],
                false,
            ),
            network_member(
                0x03,
                "Fort Meade Veterans Contracting",
                vec![certification("vsbe", None)],
                false,
            ),
            network_member(0x04, "Harford Site Services", Vec::new(), true),
        ];

        let directory = vec![
            directory_listing(0x11, "Chesapeake Air Systems", &["238220"], Some(4.6), true, false),
            directory_listing(0x12, "Baybridge Landscaping", &["561730"], Some(3.9), true, true),
            directory_listing(0x13, "Old Line HVAC Partners", &["238220"], Some(2.4), false, true),
            directory_listing(0x14, "Annapolis Facility Group", &["561730"], Some(1.5), true, false),
            directory_listing(0x15, "Monocacy Controls", &["238220"], None, true, false),
        ];

        Self {
            opportunities,
            network,
            directory,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_opportunity(
    suffix: u128,
    solicitation_number: &str,
    title: &str,
    agency: &str,
    jurisdiction: &Jurisdiction,
    naics_codes: &[&str],
    (mbe_goal, vsbe_goal): (Option<f64>, Option<f64>),
    total_value: Option<f64>,
    due_date: Option<NaiveDate>,
) -> Opportunity {
    Opportunity {
        id: OpportunityId(Uuid::from_u128(0x0990_0000_0000_4000_8000_0000_0000_0000 | suffix)),
        solicitation_number: solicitation_number.to_string(),
        title: title.to_string(),
        agency: Some(agency.to_string()),
        jurisdiction_id: jurisdiction.id,
        jurisdiction: Some(jurisdiction.clone()),
        naics_codes: to_strings(naics_codes),
        mbe_goal,
        vsbe_goal,
        total_value,
        due_date,
        posted_date: due_date.map(|due| due - Duration::days(45)),
        opportunity_url: None,
        is_active: true,
        relevance_score: None,
    }
}

fn certification(cert_type: &str, naics_codes: Option<&[&str]>) -> Certification {
    Certification {
        cert_type: cert_type.to_string(),
        naics_codes: naics_codes.map(to_strings),
    }
}

fn network_member(
    suffix: u128,
    legal_name: &str,
    certifications: Vec<Certification>,
    is_mbe: bool,
) -> Subcontractor {
    Subcontractor {
        id: SubcontractorId(Uuid::from_u128(0x5ab0_0000_0000_4000_8000_0000_0000_0000 | suffix)),
        organization_id: DEMO_ORGANIZATION,
        legal_name: legal_name.to_string(),
        certifications,
        is_mbe,
    }
}

fn directory_listing(
    suffix: u128,
    legal_name: &str,
    naics_codes: &[&str],
    rating: Option<f64>,
    is_mbe: bool,
    is_vsbe: bool,
) -> DirectorySubcontractor {
    let mut certifications = Vec::new();
    if is_mbe {
        certifications.push("MBE".to_string());
    }
    if is_vsbe {
        certifications.push("VSBE".to_string());
    }

    DirectorySubcontractor {
        id: SubcontractorId(Uuid::from_u128(0xd1e0_0000_0000_4000_8000_0000_0000_0000 | suffix)),
        legal_name: legal_name.to_string(),
        federal_id: None,
        certifications,
        jurisdiction_codes: vec!["MD".to_string()],
        naics_codes: to_strings(naics_codes),
        capabilities: Vec::new(),
        contact_email: None,
        phone: None,
        location_city: None,
        rating,
        projects_completed: 0,
        is_verified: rating.is_some(),
        is_mbe,
        is_vsbe,
        created_at: None,
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
