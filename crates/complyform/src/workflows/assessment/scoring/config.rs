use serde::{Deserialize, Serialize};

use super::super::domain::ComplianceCategory;
use super::Severity;

/// Thresholds and penalties for one participation category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoveragePolicy {
    /// Network headcount that covers the goal on its own.
    pub network_threshold: usize,
    pub absent_points: u8,
    pub absent_severity: Severity,
    pub limited_points: u8,
    pub limited_severity: Severity,
    /// Gap recorded when some, but too few, subcontractors are available.
    pub limited_gap: f64,
    pub network_severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractValuePolicy {
    pub high_value_threshold: f64,
    pub high_value_points: u8,
    pub small_value_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePolicy {
    pub critical_days: i64,
    pub critical_points: u8,
    pub warning_days: i64,
    pub warning_points: u8,
}

/// Lower bounds (inclusive) of the riskier recommendation bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationThresholds {
    pub caution: u8,
    pub no_bid: u8,
}

/// Tunable scoring policy for pre-bid assessments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub mbe: CoveragePolicy,
    pub vsbe: CoveragePolicy,
    pub contract_value: ContractValuePolicy,
    pub timeline: TimelinePolicy,
    pub thresholds: RecommendationThresholds,
    pub max_score: u8,
}

impl ScoringConfig {
    pub fn coverage(&self, category: ComplianceCategory) -> &CoveragePolicy {
        match category {
            ComplianceCategory::Mbe => &self.mbe,
            ComplianceCategory::Vsbe => &self.vsbe,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mbe: CoveragePolicy {
                network_threshold: 3,
                absent_points: 40,
                absent_severity: Severity::Critical,
                limited_points: 25,
                limited_severity: Severity::Warning,
                limited_gap: -10.0,
                network_severity: Severity::Excellent,
            },
            vsbe: CoveragePolicy {
                network_threshold: 2,
                absent_points: 20,
                absent_severity: Severity::Warning,
                limited_points: 10,
                limited_severity: Severity::Caution,
                limited_gap: -5.0,
                network_severity: Severity::Good,
            },
            contract_value: ContractValuePolicy {
                high_value_threshold: 10_000_000.0,
                high_value_points: 15,
                small_value_threshold: 100_000.0,
            },
            timeline: TimelinePolicy {
                critical_days: 7,
                critical_points: 30,
                warning_days: 14,
                warning_points: 15,
            },
            thresholds: RecommendationThresholds {
                caution: 30,
                no_bid: 60,
            },
            max_score: 100,
        }
    }
}
