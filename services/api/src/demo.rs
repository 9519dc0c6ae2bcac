use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::infra::{parse_date, seed_candidates, InMemoryPlacementRepository};
use placement_plus::error::AppError;
use placement_plus::workflows::placements::{
    Branch, BranchStatisticsView, JobPosting, OpportunityType, PlacementRecordingService,
    PlacementSubmission, RecordedOffer, StudentId,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Override the recording date for the seeded placements (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct StatsArgs {
    /// Restrict the report to one branch label (e.g. CSE)
    #[arg(long)]
    pub(crate) branch: Option<String>,
    /// Override the recording date for the seeded placements (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

fn submission(
    id: &str,
    offer: RecordedOffer,
    month: &str,
    recorded_on: NaiveDate,
) -> PlacementSubmission {
    PlacementSubmission {
        student_id: StudentId(id.to_string()),
        company: "Meridian Softworks".to_string(),
        offer,
        month: month.to_string(),
        recorded_on,
    }
}

/// Build a service over seeded candidates with a season's worth of recordings.
fn seeded_service(
    recorded_on: NaiveDate,
) -> Result<Arc<PlacementRecordingService<InMemoryPlacementRepository>>, AppError> {
    let repository = Arc::new(InMemoryPlacementRepository::default());
    let service = Arc::new(PlacementRecordingService::new(repository));

    for profile in seed_candidates() {
        service.register_candidate(profile)?;
    }

    let full_time = |ctc_lpa: f64| RecordedOffer::FullTime { ctc_lpa };
    service.record_placement(submission(
        "2026-cse-014",
        full_time(10.0),
        "01",
        recorded_on,
    ))?;
    service.record_placement(submission(
        "2026-cse-027",
        full_time(20.0),
        "02",
        recorded_on,
    ))?;
    service.record_placement(submission(
        "2026-cse-033",
        full_time(30.0),
        "03",
        recorded_on,
    ))?;
    service.record_placement(submission(
        "2026-cse-014",
        full_time(25.0),
        "04",
        recorded_on,
    ))?;
    service.record_placement(submission(
        "2026-ece-118",
        full_time(12.0),
        "01",
        recorded_on,
    ))?;
    service.record_placement(submission(
        "2026-me-251",
        RecordedOffer::Internship {
            monthly_stipend: 45_000.0,
        },
        "05",
        recorded_on,
    ))?;

    Ok(service)
}

fn posting(company: &str, opportunity: OpportunityType, ctc_lpa: Option<f64>) -> JobPosting {
    JobPosting {
        company: company.to_string(),
        opportunity,
        ctc_lpa,
        monthly_stipend: matches!(opportunity, OpportunityType::Internship).then_some(50_000.0),
        cgpa_criteria: 7.5,
        eligible_branches: BTreeSet::from([
            Branch::ComputerScience,
            Branch::Electronics,
            Branch::Mechanical,
        ]),
        eligible_batches: BTreeSet::from([2026]),
    }
}

pub(crate) fn run_stats_report(args: StatsArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let service = seeded_service(today)?;

    let views: Vec<BranchStatisticsView> = match args.branch {
        Some(label) => {
            let Some(branch) = Branch::from_label(&label) else {
                eprintln!("unknown branch '{label}'");
                std::process::exit(2);
            };
            match service.branch_statistics(branch)? {
                Some(stats) => vec![BranchStatisticsView::from_statistics(&stats)],
                None => vec![BranchStatisticsView::empty(branch)],
            }
        }
        None => service
            .statistics_overview()?
            .iter()
            .map(BranchStatisticsView::from_statistics)
            .collect(),
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&views).expect("views serialize")
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let service = seeded_service(today)?;

    println!("== branch statistics ==");
    let views: Vec<BranchStatisticsView> = service
        .statistics_overview()?
        .iter()
        .map(BranchStatisticsView::from_statistics)
        .collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&views).expect("views serialize")
    );

    println!("\n== application checks ==");
    let checks = [
        (
            "2026-cse-014",
            posting("Helios Analytics", OpportunityType::FullTime, Some(12.0)),
        ),
        (
            "2026-cse-014",
            posting("Northwind Cloud", OpportunityType::FullTime, Some(28.0)),
        ),
        (
            "2026-me-251",
            posting("Forge Dynamics", OpportunityType::Internship, None),
        ),
    ];

    for (student, posting) in checks {
        let decision =
            service.evaluate_application(&StudentId(student.to_string()), &posting)?;
        println!(
            "{student} -> {} ({}): {}",
            posting.company,
            if decision.is_eligible() {
                "eligible"
            } else {
                "ineligible"
            },
            decision.summary()
        );
    }

    Ok(())
}
