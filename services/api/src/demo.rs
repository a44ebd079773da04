use crate::infra::{seed_sample_data, InMemoryCommunityRepository, InMemoryReportRepository};
use citycare::assistant::classify;
use citycare::community::CommunityService;
use citycare::error::AppError;
use citycare::reports::{
    CommentDraft, IssueCategory, ReportService, ReportStatus, ReportSubmission, UrgencyLevel,
};
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ChatArgs {
    /// The message to classify
    pub(crate) message: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the assistant portion of the demo
    #[arg(long)]
    pub(crate) skip_assistant: bool,
}

pub(crate) fn run_chat(args: ChatArgs) -> Result<(), AppError> {
    let reply = classify(&args.message);

    println!("Category: {:?}", reply.category);
    println!("Reply: {}", reply.response);
    if !reply.actions.is_empty() {
        println!("Suggested actions:");
        for action in &reply.actions {
            println!("  - {} -> {}", action.label, action.target);
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("CityCare reporting workflow demo");

    let report_repository = Arc::new(InMemoryReportRepository::default());
    let community_repository = Arc::new(InMemoryCommunityRepository::default());
    seed_sample_data(&report_repository, &community_repository);

    let reports = ReportService::new(report_repository);
    let community = CommunityService::new(community_repository);

    match reports.stats() {
        Ok(stats) => println!(
            "Seeded ledger: {} reports ({} submitted, {} in progress, {} resolved)",
            stats.total, stats.submitted, stats.in_progress, stats.resolved
        ),
        Err(err) => {
            println!("Ledger unavailable: {err}");
            return Ok(());
        }
    }

    println!("\nFiling a new streetlight report");
    let submission = ReportSubmission {
        category: IssueCategory::Streetlights,
        title: "Streetlight out on Park Avenue".to_string(),
        description: "The lamp opposite house 42 has been dark for a week".to_string(),
        urgency_level: UrgencyLevel::Medium,
        latitude: 20.5942,
        longitude: 78.9633,
        address: "Park Avenue".to_string(),
        landmark: None,
        ward: Some("Ward 5".to_string()),
        contact_email: "demo@example.com".to_string(),
        contact_phone: None,
        image_paths: Vec::new(),
    };
    let report = match reports.submit(submission) {
        Ok(report) => report,
        Err(err) => {
            println!("  Submission rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Accepted {} -> status {}",
        report.id.0,
        report.status.label()
    );

    if let Err(err) = reports.update_status(&report.id, ReportStatus::InProgress) {
        println!("  Status update failed: {err}");
        return Ok(());
    }
    println!("- Moved {} to in-progress", report.id.0);

    if let Err(err) = reports.comment(
        &report.id,
        CommentDraft {
            user_id: "demo".to_string(),
            user_name: "Demo User".to_string(),
            text: "Crew scheduled for Thursday".to_string(),
        },
    ) {
        println!("  Comment failed: {err}");
        return Ok(());
    }

    match reports.nearby(report.location.latitude, report.location.longitude, 2.0) {
        Ok(nearby) => {
            println!("\nIssues within 2 km of the new report:");
            for entry in nearby {
                println!(
                    "- {} ({}) at {:.2} km, status {}",
                    entry.report.title,
                    entry.report.category.label(),
                    entry.distance_km,
                    entry.report.status.label()
                );
            }
        }
        Err(err) => println!("Nearby lookup unavailable: {err}"),
    }

    match reports.analytics(chrono::Utc::now().date_naive()) {
        Ok(analytics) => {
            println!("\nCategory distribution:");
            for entry in &analytics.categories {
                println!("- {}: {}", entry.label, entry.count);
            }
        }
        Err(err) => println!("Analytics unavailable: {err}"),
    }

    match community.groups() {
        Ok(groups) => {
            println!("\nCommunity groups:");
            for group in groups {
                println!(
                    "- {} ({}), {} members, {}",
                    group.name, group.location, group.member_count, group.activity
                );
            }
        }
        Err(err) => println!("Community directory unavailable: {err}"),
    }

    if args.skip_assistant {
        return Ok(());
    }

    println!("\nAssistant samples");
    for utterance in [
        "I want to report a broken streetlight",
        "check my complaint status",
        "where can I pay property tax?",
    ] {
        let reply = classify(utterance);
        println!("> {utterance}");
        println!("  [{:?}] {}", reply.category, reply.response);
    }

    Ok(())
}
