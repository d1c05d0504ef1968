use crate::infra::{
    parse_date, InMemoryAssessmentStore, InMemoryOpportunityCatalog,
    InMemorySubcontractorDirectory, SeedData, DEMO_ORGANIZATION,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use complyform::config::AssessmentSettings;
use complyform::error::AppError;
use complyform::workflows::assessment::{
    AssessmentRequest, AssessmentResult, AssessmentSummary, PreBidAssessmentService,
    ScoringConfig,
};
use serde::Serialize;
use std::io;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for due-date risk (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Assess a single seeded solicitation number instead of every active one.
    #[arg(long)]
    pub(crate) opportunity: Option<String>,
    /// Print the assessments as JSON instead of a readable report.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct DemoReport {
    pub(crate) today: NaiveDate,
    pub(crate) assessments: Vec<AssessmentResult>,
    pub(crate) summary: AssessmentSummary,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let report = assess_seeded(today, args.opportunity.as_deref())?;

    if args.json {
        let rendered = serde_json::to_string_pretty(&report).map_err(io::Error::from)?;
        println!("{rendered}");
    } else {
        render_report(&report);
    }

    Ok(())
}

pub(crate) fn assess_seeded(
    today: NaiveDate,
    solicitation_number: Option<&str>,
) -> Result<DemoReport, AppError> {
    let seed = SeedData::sample(today);
    let catalog = InMemoryOpportunityCatalog::with(seed.opportunities);

    let targets = match solicitation_number {
        Some(number) => {
            let opportunity = catalog.by_solicitation(number).ok_or_else(|| {
                let known: Vec<String> = catalog
                    .active()
                    .into_iter()
                    .map(|opportunity| opportunity.solicitation_number)
                    .collect();
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!(
                        "no seeded opportunity '{number}' (known: {})",
                        known.join(", ")
                    ),
                )
            })?;
            vec![opportunity]
        }
        None => catalog.active(),
    };

    let service = PreBidAssessmentService::new(
        Arc::new(catalog),
        Arc::new(InMemorySubcontractorDirectory::with(
            seed.network,
            seed.directory,
        )),
        Arc::new(InMemoryAssessmentStore::default()),
        ScoringConfig::default(),
        AssessmentSettings::default(),
    );

    let assessments = targets
        .iter()
        .map(|opportunity| {
            service.perform_assessment_on(
                &AssessmentRequest {
                    organization_id: DEMO_ORGANIZATION,
                    opportunity_id: opportunity.id,
                },
                today,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    let summary = service.assessment_summary(&DEMO_ORGANIZATION)?;

    Ok(DemoReport {
        today,
        assessments,
        summary,
    })
}

fn render_report(report: &DemoReport) {
    println!("Pre-bid assessment demo (as of {})", report.today);

    if let Some(first) = report.assessments.first() {
        let network = &first.organization_network;
        println!(
            "Organization network: {} subcontractors | {} MBE | {} VSBE",
            network.total_count, network.mbe_count, network.vsbe_count
        );
    }

    for assessment in &report.assessments {
        render_assessment(assessment);
    }

    let summary = &report.summary;
    println!("\nPortfolio summary");
    println!(
        "- {} assessments | {} bid | {} caution | {} no bid",
        summary.total_assessments,
        summary.bid_recommended,
        summary.caution_recommended,
        summary.no_bid_recommended
    );
    println!("- Average risk score {:.2}", summary.average_risk_score);
}

fn render_assessment(assessment: &AssessmentResult) {
    let opportunity = &assessment.opportunity;
    println!(
        "\n{} {}",
        opportunity.solicitation_number, opportunity.title
    );
    if let Some(agency) = &opportunity.agency {
        println!("  {agency}");
    }
    match opportunity.due_date {
        Some(due) => println!("  Due {due}"),
        None => println!("  Due date not published"),
    }
    println!(
        "- Recommendation: {} (risk {}/100)",
        assessment.recommendation.label(),
        assessment.overall_risk_score
    );
    println!(
        "- MBE gap {:.1}% | VSBE gap {:.1}% | {} directory matches",
        assessment.mbe_gap_percentage,
        assessment.vsbe_gap_percentage,
        assessment.available_subcontractors_count
    );

    if assessment.risk_factors.is_empty() {
        println!("- No risk factors recorded");
    } else {
        println!("Risk factors:");
        for factor in &assessment.risk_factors {
            println!("  - {factor}");
        }
    }

    if !assessment.matching_subcontractors.is_empty() {
        println!("Suggested partners:");
        for partner in &assessment.matching_subcontractors {
            println!("  - {} (rating {:.1})", partner.legal_name, partner.rating);
        }
    }

    println!("{}", assessment.recommendation_reason);
}
