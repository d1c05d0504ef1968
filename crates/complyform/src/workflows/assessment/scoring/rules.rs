use super::super::domain::ComplianceCategory;
use super::config::ScoringConfig;
use super::{AssessmentContext, CoverageLevel, RiskDimension, RiskFinding, Severity};

pub(crate) type Evaluator = fn(&AssessmentContext<'_>, &ScoringConfig) -> Option<RiskFinding>;

/// Evaluation order is also the order findings are reported in.
pub(crate) const EVALUATORS: [Evaluator; 4] = [
    mbe_coverage,
    vsbe_coverage,
    contract_value,
    timeline,
];

pub(crate) fn score_context(
    context: &AssessmentContext<'_>,
    config: &ScoringConfig,
) -> (Vec<RiskFinding>, u8) {
    let findings: Vec<RiskFinding> = EVALUATORS
        .iter()
        .filter_map(|evaluate| evaluate(context, config))
        .collect();

    let total: u32 = findings.iter().map(|finding| u32::from(finding.points)).sum();
    let risk_score = total.min(u32::from(config.max_score)) as u8;

    (findings, risk_score)
}

pub(crate) fn mbe_coverage(
    context: &AssessmentContext<'_>,
    config: &ScoringConfig,
) -> Option<RiskFinding> {
    coverage_finding(context, config, ComplianceCategory::Mbe)
}

pub(crate) fn vsbe_coverage(
    context: &AssessmentContext<'_>,
    config: &ScoringConfig,
) -> Option<RiskFinding> {
    coverage_finding(context, config, ComplianceCategory::Vsbe)
}

fn coverage_finding(
    context: &AssessmentContext<'_>,
    config: &ScoringConfig,
    category: ComplianceCategory,
) -> Option<RiskFinding> {
    let policy = config.coverage(category);
    let coverage = context.coverage(category);
    let level = coverage.level(policy)?;
    let goal = coverage.goal?;

    let code = category.code();
    let network = coverage.network;
    let directory = coverage.directory;
    let available = coverage.available();

    let (severity, points, message) = match (level, category) {
        (CoverageLevel::Absent, _) => (
            policy.absent_severity,
            policy.absent_points,
            format!(
                "No {code} subcontractors in your network or directory. Need {goal}% participation."
            ),
        ),
        (CoverageLevel::NetworkSufficient, ComplianceCategory::Mbe) => (
            policy.network_severity,
            0,
            format!("You have {network} {code} subcontractors in your network to meet {goal}% goal."),
        ),
        (CoverageLevel::NetworkSufficient, ComplianceCategory::Vsbe) => (
            policy.network_severity,
            0,
            format!("You have {network} {code} subcontractors in your network."),
        ),
        (CoverageLevel::Limited, ComplianceCategory::Mbe) => (
            policy.limited_severity,
            policy.limited_points,
            format!(
                "Only {available} {code} subcontractors available ({network} in your network, \
                 {directory} in directory). Limited options to meet {goal}% goal."
            ),
        ),
        (CoverageLevel::Limited, ComplianceCategory::Vsbe) => (
            policy.limited_severity,
            policy.limited_points,
            format!(
                "Only {available} {code} subcontractors available ({network} in your network, \
                 {directory} in directory)."
            ),
        ),
        (CoverageLevel::Sufficient, ComplianceCategory::Mbe) => (
            Severity::Good,
            0,
            format!(
                "{available} {code} subcontractors available ({network} in your network, \
                 {directory} in directory) to meet {goal}% goal."
            ),
        ),
        (CoverageLevel::Sufficient, ComplianceCategory::Vsbe) => (
            Severity::Good,
            0,
            format!("{available} {code} subcontractors available."),
        ),
    };

    let dimension = match category {
        ComplianceCategory::Mbe => RiskDimension::MbeCoverage,
        ComplianceCategory::Vsbe => RiskDimension::VsbeCoverage,
    };

    Some(RiskFinding {
        dimension,
        severity,
        points,
        message,
    })
}

pub(crate) fn contract_value(
    context: &AssessmentContext<'_>,
    config: &ScoringConfig,
) -> Option<RiskFinding> {
    let policy = &config.contract_value;
    let value = context.opportunity.total_value.filter(|value| *value > 0.0)?;

    if value > policy.high_value_threshold {
        Some(RiskFinding {
            dimension: RiskDimension::ContractValue,
            severity: Severity::Caution,
            points: policy.high_value_points,
            message: format!(
                "High-value contract (${value:.0}, over ${}M) requires strong team and capacity.",
                policy.high_value_threshold / 1_000_000.0
            ),
        })
    } else if value < policy.small_value_threshold {
        Some(RiskFinding {
            dimension: RiskDimension::ContractValue,
            severity: Severity::Info,
            points: 0,
            message: format!("Small contract value (${value:.0}) may have lower margins."),
        })
    } else {
        None
    }
}

pub(crate) fn timeline(
    context: &AssessmentContext<'_>,
    config: &ScoringConfig,
) -> Option<RiskFinding> {
    let policy = &config.timeline;
    let days = context.days_until_due()?;

    let (severity, points, message) = if days < policy.critical_days {
        (
            Severity::Critical,
            policy.critical_points,
            format!("Only {days} days until due date. Very tight timeline."),
        )
    } else if days < policy.warning_days {
        (
            Severity::Warning,
            policy.warning_points,
            format!("Only {days} days until due date. Limited prep time."),
        )
    } else {
        (
            Severity::Good,
            0,
            format!("{days} days until due date. Adequate preparation time."),
        )
    };

    Some(RiskFinding {
        dimension: RiskDimension::Timeline,
        severity,
        points,
        message,
    })
}
