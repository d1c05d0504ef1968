mod config;
mod policy;
mod rules;

pub use config::{
    ContractValuePolicy, CoveragePolicy, RecommendationThresholds, ScoringConfig, TimelinePolicy,
};
pub use policy::Recommendation;

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{ComplianceCategory, Opportunity};
use policy::classify;

/// Tag prefixed to every finding so readers can triage at a glance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    Warning,
    Caution,
    Info,
    Good,
    Excellent,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Warning => "WARNING",
            Severity::Caution => "CAUTION",
            Severity::Info => "INFO",
            Severity::Good => "GOOD",
            Severity::Excellent => "EXCELLENT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskDimension {
    MbeCoverage,
    VsbeCoverage,
    ContractValue,
    Timeline,
}

/// One scored observation; `points` is what it added to the risk total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFinding {
    pub dimension: RiskDimension,
    pub severity: Severity,
    pub points: u8,
    pub message: String,
}

impl fmt::Display for RiskFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity.label(), self.message)
    }
}

/// Available subcontractors for a category, split by where they came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryCoverage {
    pub category: ComplianceCategory,
    pub goal: Option<f64>,
    pub network: usize,
    pub directory: usize,
}

/// Branch a category falls into once its goal and headcounts are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageLevel {
    Absent,
    NetworkSufficient,
    Limited,
    Sufficient,
}

impl CategoryCoverage {
    pub fn available(&self) -> usize {
        self.network + self.directory
    }

    /// `None` when the opportunity sets no goal for the category.
    pub fn level(&self, policy: &CoveragePolicy) -> Option<CoverageLevel> {
        self.goal?;
        let level = if self.available() == 0 {
            CoverageLevel::Absent
        } else if self.network >= policy.network_threshold {
            CoverageLevel::NetworkSufficient
        } else if self.available() < policy.network_threshold {
            CoverageLevel::Limited
        } else {
            CoverageLevel::Sufficient
        };
        Some(level)
    }

    /// Shortfall against the goal; zero or negative.
    pub fn gap(&self, policy: &CoveragePolicy) -> f64 {
        match (self.level(policy), self.goal) {
            (Some(CoverageLevel::Absent), Some(goal)) => -goal,
            (Some(CoverageLevel::Limited), _) => policy.limited_gap.min(0.0),
            _ => 0.0,
        }
    }
}

/// Inputs the risk evaluators read from.
#[derive(Debug, Clone)]
pub struct AssessmentContext<'a> {
    pub opportunity: &'a Opportunity,
    pub mbe: CategoryCoverage,
    pub vsbe: CategoryCoverage,
    pub today: NaiveDate,
}

impl AssessmentContext<'_> {
    pub fn coverage(&self, category: ComplianceCategory) -> &CategoryCoverage {
        match category {
            ComplianceCategory::Mbe => &self.mbe,
            ComplianceCategory::Vsbe => &self.vsbe,
        }
    }

    pub fn days_until_due(&self) -> Option<i64> {
        self.opportunity
            .due_date
            .map(|due| (due - self.today).num_days())
    }
}

/// Scored outcome of a context, before persistence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub risk_score: u8,
    pub mbe_gap_percentage: f64,
    pub vsbe_gap_percentage: f64,
    pub findings: Vec<RiskFinding>,
    pub recommendation: Recommendation,
}

/// Stateless scorer that applies the configured policy to a context.
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, context: &AssessmentContext<'_>) -> RiskAssessment {
        let (findings, risk_score) = rules::score_context(context, &self.config);
        let recommendation = classify(risk_score, &self.config.thresholds);

        RiskAssessment {
            risk_score,
            mbe_gap_percentage: context.mbe.gap(&self.config.mbe),
            vsbe_gap_percentage: context.vsbe.gap(&self.config.vsbe),
            findings,
            recommendation,
        }
    }
}
