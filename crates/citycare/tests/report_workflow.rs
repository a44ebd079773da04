//! End-to-end scenarios for report intake, tracking, and the derived
//! read models, driven through the public service facade and HTTP router
//! the way the production wiring uses them.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use citycare::reports::{
        IssueCategory, Report, ReportComment, ReportId, ReportRepository, ReportService,
        ReportSubmission, RepositoryError, UrgencyLevel,
    };

    #[derive(Default)]
    pub(super) struct MemoryReports {
        records: Mutex<HashMap<String, Report>>,
        comments: Mutex<Vec<ReportComment>>,
    }

    impl ReportRepository for MemoryReports {
        fn insert(&self, report: Report) -> Result<Report, RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            if guard.contains_key(&report.id.0) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(report.id.0.clone(), report.clone());
            Ok(report)
        }

        fn update(&self, report: Report) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            if guard.contains_key(&report.id.0) {
                guard.insert(report.id.0.clone(), report);
                Ok(())
            } else {
                Err(RepositoryError::NotFound)
            }
        }

        fn fetch(&self, id: &ReportId) -> Result<Option<Report>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.get(&id.0).cloned())
        }

        fn list(&self) -> Result<Vec<Report>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.values().cloned().collect())
        }

        fn delete(&self, id: &ReportId) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            if guard.remove(&id.0).is_none() {
                return Err(RepositoryError::NotFound);
            }
            let mut comments = self.comments.lock().expect("comment mutex poisoned");
            comments.retain(|comment| comment.report_id != *id);
            Ok(())
        }

        fn insert_comment(&self, comment: ReportComment) -> Result<(), RepositoryError> {
            let mut guard = self.comments.lock().expect("comment mutex poisoned");
            guard.push(comment);
            Ok(())
        }

        fn comments(&self, id: &ReportId) -> Result<Vec<ReportComment>, RepositoryError> {
            let guard = self.comments.lock().expect("comment mutex poisoned");
            let mut matching: Vec<ReportComment> = guard
                .iter()
                .filter(|comment| comment.report_id == *id)
                .cloned()
                .collect();
            matching.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            Ok(matching)
        }
    }

    pub(super) fn build_service() -> (Arc<ReportService<MemoryReports>>, Arc<MemoryReports>) {
        let repository = Arc::new(MemoryReports::default());
        let service = Arc::new(ReportService::new(repository.clone()));
        (service, repository)
    }

    pub(super) fn submission() -> ReportSubmission {
        ReportSubmission {
            category: IssueCategory::Roads,
            title: "Large pothole on Main Street".to_string(),
            description: "Dangerous pothole near the intersection of Main and 5th".to_string(),
            urgency_level: UrgencyLevel::High,
            latitude: 20.5937,
            longitude: 78.9629,
            address: "Main Street, City Center".to_string(),
            landmark: Some("Near Central Park".to_string()),
            ward: Some("Ward 5".to_string()),
            contact_email: "user@example.com".to_string(),
            contact_phone: Some("+1234567890".to_string()),
            image_paths: Vec::new(),
        }
    }

    pub(super) fn submission_at(
        category: IssueCategory,
        latitude: f64,
        longitude: f64,
        email: &str,
    ) -> ReportSubmission {
        ReportSubmission {
            category,
            latitude,
            longitude,
            contact_email: email.to_string(),
            ..submission()
        }
    }
}

use common::{build_service, submission, submission_at};

use citycare::reports::{
    report_router, IssueCategory, ReportFilter, ReportRepository, ReportStatus, UrgencyLevel,
    ValidationError,
};
use citycare::reports::{CommentDraft, ReportId, ReportServiceError};
use tower::ServiceExt;

#[test]
fn submission_assigns_server_side_fields() {
    let (service, _) = build_service();

    let report = service.submit(submission()).expect("submission succeeds");

    assert!(!report.id.0.is_empty());
    assert_eq!(report.status, ReportStatus::Submitted);
    assert_eq!(report.upvotes, 0);
    assert_eq!(report.comments_count, 0);
    assert_eq!(report.location.ward.as_deref(), Some("Ward 5"));
    assert_eq!(report.contact.email, "user@example.com");
    assert_eq!(report.created_at, report.updated_at);
}

#[test]
fn submission_rejects_missing_required_fields() {
    let (service, _) = build_service();

    let mut incomplete = submission();
    incomplete.description = String::new();

    let err = service
        .submit(incomplete)
        .expect_err("validation must fail");
    assert!(matches!(
        err,
        ReportServiceError::Validation(ValidationError::MissingField("description"))
    ));
}

#[test]
fn status_updates_touch_the_record_without_transition_rules() {
    let (service, _) = build_service();
    let report = service.submit(submission()).expect("submission succeeds");

    service
        .update_status(&report.id, ReportStatus::Resolved)
        .expect("resolved");
    // Backwards movement is allowed: there is no transition graph.
    service
        .update_status(&report.id, ReportStatus::Submitted)
        .expect("back to submitted");

    let details = service.get(&report.id).expect("report exists");
    assert_eq!(details.report.status, ReportStatus::Submitted);
    assert!(details.report.updated_at >= details.report.created_at);
}

#[test]
fn status_update_on_unknown_report_is_not_found() {
    let (service, _) = build_service();

    let err = service
        .update_status(&ReportId("missing".to_string()), ReportStatus::Resolved)
        .expect_err("must fail");
    assert!(matches!(
        err,
        ReportServiceError::Repository(citycare::reports::RepositoryError::NotFound)
    ));
}

#[test]
fn comments_accumulate_and_bump_the_counter() {
    let (service, _) = build_service();
    let report = service.submit(submission()).expect("submission succeeds");

    service
        .comment(
            &report.id,
            CommentDraft {
                user_id: "user-1".to_string(),
                user_name: "John Doe".to_string(),
                text: "This has been here for weeks!".to_string(),
            },
        )
        .expect("first comment");
    service
        .comment(
            &report.id,
            CommentDraft {
                user_id: "anonymous".to_string(),
                user_name: "Anonymous".to_string(),
                text: "Almost fell here yesterday".to_string(),
            },
        )
        .expect("second comment");

    let details = service.get(&report.id).expect("report exists");
    assert_eq!(details.report.comments_count, 2);
    assert_eq!(details.comments.len(), 2);
    assert_eq!(details.comments[0].user_name, "John Doe");
}

#[test]
fn stats_count_by_lifecycle_tag() {
    let (service, _) = build_service();

    let first = service.submit(submission()).expect("submission succeeds");
    let second = service
        .submit(submission_at(
            IssueCategory::Water,
            20.5950,
            78.9640,
            "user3@example.com",
        ))
        .expect("submission succeeds");
    service.submit(submission()).expect("submission succeeds");

    service
        .update_status(&first.id, ReportStatus::InProgress)
        .expect("in progress");
    service
        .update_status(&second.id, ReportStatus::Resolved)
        .expect("resolved");

    let stats = service.stats().expect("stats build");
    assert_eq!(stats.submitted, 1);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.resolved, 1);
    assert_eq!(stats.total, 3);
}

#[test]
fn filter_matches_status_category_and_search_terms() {
    let (service, _) = build_service();

    let pothole = service.submit(submission()).expect("submission succeeds");
    service
        .submit(submission_at(
            IssueCategory::Water,
            20.5950,
            78.9640,
            "user3@example.com",
        ))
        .expect("submission succeeds");

    service
        .update_status(&pothole.id, ReportStatus::InProgress)
        .expect("in progress");

    let by_status = service
        .filter(&ReportFilter {
            status: vec!["in-progress".to_string()],
            ..ReportFilter::default()
        })
        .expect("filter runs");
    assert_eq!(by_status.len(), 1);
    assert_eq!(by_status[0].id, pothole.id);

    let by_category = service
        .filter(&ReportFilter {
            categories: vec!["water".to_string()],
            ..ReportFilter::default()
        })
        .expect("filter runs");
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].category, IssueCategory::Water);

    let by_search = service
        .filter(&ReportFilter {
            search: Some("MAIN street".to_string()),
            ..ReportFilter::default()
        })
        .expect("filter runs");
    assert_eq!(by_search.len(), 2, "address search is case-insensitive");

    let unknown_status = service
        .filter(&ReportFilter {
            status: vec!["escalated".to_string()],
            ..ReportFilter::default()
        })
        .expect("filter runs");
    assert!(unknown_status.is_empty(), "unknown values match nothing");
}

#[test]
fn nearby_keeps_only_reports_in_radius_sorted_by_distance() {
    let (service, _) = build_service();

    let close = service
        .submit(submission_at(
            IssueCategory::Roads,
            20.5940,
            78.9630,
            "close@example.com",
        ))
        .expect("submission succeeds");
    let closer = service
        .submit(submission_at(
            IssueCategory::Water,
            20.5937,
            78.9629,
            "closer@example.com",
        ))
        .expect("submission succeeds");
    service
        .submit(submission_at(
            IssueCategory::Parks,
            28.6139,
            77.2090,
            "faraway@example.com",
        ))
        .expect("submission succeeds");

    let nearby = service
        .nearby(20.5937, 78.9629, 2.0)
        .expect("nearby query runs");

    assert_eq!(nearby.len(), 2);
    assert_eq!(nearby[0].report.id, closer.id);
    assert_eq!(nearby[0].distance_km, 0.0);
    assert_eq!(nearby[1].report.id, close.id);
    assert!(nearby[1].distance_km > 0.0 && nearby[1].distance_km <= 2.0);
}

#[test]
fn contributors_roll_up_by_email() {
    let (service, _) = build_service();

    service.submit(submission()).expect("submission succeeds");
    service.submit(submission()).expect("submission succeeds");
    service
        .submit(submission_at(
            IssueCategory::Water,
            20.5950,
            78.9640,
            "user3@example.com",
        ))
        .expect("submission succeeds");

    let contributors = service.contributors().expect("roll-up builds");
    assert_eq!(contributors.len(), 2);

    let heavy = contributors
        .iter()
        .find(|c| c.email == "user@example.com")
        .expect("repeat reporter present");
    assert_eq!(heavy.report_count, 2);
    assert!(heavy.joined_date <= heavy.last_activity);
}

#[test]
fn analytics_breaks_down_the_ledger() {
    let (service, _) = build_service();

    let first = service.submit(submission()).expect("submission succeeds");
    service
        .submit(submission_at(
            IssueCategory::Water,
            20.5950,
            78.9640,
            "user3@example.com",
        ))
        .expect("submission succeeds");
    service.submit(submission()).expect("submission succeeds");

    service
        .update_status(&first.id, ReportStatus::Resolved)
        .expect("resolved");

    let analytics = service
        .analytics(chrono::Utc::now().date_naive())
        .expect("analytics build");

    assert_eq!(analytics.categories[0].label, "roads");
    assert_eq!(analytics.categories[0].count, 2);
    assert!(analytics
        .status
        .iter()
        .any(|entry| entry.label == "resolved" && entry.count == 1));
    assert!(analytics
        .urgency
        .iter()
        .all(|entry| UrgencyLevel::parse(&entry.label).is_some()));
    assert_eq!(analytics.wards[0].label, "Ward 5");
    // Everything was filed just now, so it all lands in today's bucket.
    let activity_total: u64 = analytics
        .recent_activity
        .iter()
        .map(|day| day.report_count)
        .sum();
    assert_eq!(activity_total, 3);
}

#[test]
fn delete_removes_the_report_and_its_comments() {
    let (service, repository) = build_service();
    let report = service.submit(submission()).expect("submission succeeds");
    service
        .comment(
            &report.id,
            CommentDraft {
                user_id: "anonymous".to_string(),
                user_name: "Anonymous".to_string(),
                text: "gone soon".to_string(),
            },
        )
        .expect("comment lands");

    service.delete(&report.id).expect("delete succeeds");

    assert!(repository.fetch(&report.id).expect("fetch runs").is_none());
    assert!(repository
        .comments(&report.id)
        .expect("comment query runs")
        .is_empty());
    assert!(service.delete(&report.id).is_err(), "second delete fails");
}

#[test]
fn csv_export_contains_header_and_one_row_per_report() {
    let (service, _) = build_service();
    service.submit(submission()).expect("submission succeeds");
    service
        .submit(submission_at(
            IssueCategory::Water,
            20.5950,
            78.9640,
            "user3@example.com",
        ))
        .expect("submission succeeds");

    let csv = service.export_csv().expect("export builds");
    let lines: Vec<&str> = csv.trim_end().lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,category,title"));
    assert!(lines.iter().skip(1).any(|line| line.contains("water")));
}

#[test]
fn pagination_slices_the_ledger() {
    let (service, _) = build_service();
    for i in 0..5 {
        service
            .submit(submission_at(
                IssueCategory::Roads,
                20.59 + f64::from(i) * 0.001,
                78.96,
                &format!("user{i}@example.com"),
            ))
            .expect("submission succeeds");
    }

    let page = service.page(1, 2).expect("page builds");
    assert_eq!(page.total, 5);
    assert_eq!(page.reports.len(), 2);

    let tail = service.page(3, 2).expect("page builds");
    assert_eq!(tail.reports.len(), 1);

    let beyond = service.page(9, 2).expect("page builds");
    assert!(beyond.reports.is_empty());
}

#[tokio::test]
async fn submit_route_round_trips_through_the_router() {
    let (service, _) = build_service();
    let router = report_router(service.clone());

    let response = router
        .oneshot(
            axum::http::Request::post("/api/submit-report")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&submission()).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("body is json");
    assert_eq!(payload["success"], serde_json::json!(true));
    let report_id = payload["report_id"].as_str().expect("id returned");

    let details = service
        .get(&ReportId(report_id.to_string()))
        .expect("stored report readable");
    assert_eq!(details.report.title, "Large pothole on Main Street");
}

#[tokio::test]
async fn status_route_rejects_values_outside_the_vocabulary() {
    let (service, _) = build_service();
    let report = service.submit(submission()).expect("submission succeeds");
    let router = report_router(service);

    let response = router
        .oneshot(
            axum::http::Request::put(format!("/api/reports/{}/status", report.id.0))
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&serde_json::json!({ "status": "escalated" })).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn nearby_route_reads_query_parameters() {
    let (service, _) = build_service();
    service.submit(submission()).expect("submission succeeds");
    let router = report_router(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/reports/nearby?lat=20.5937&lng=78.9629&radius=2")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("body is json");
    assert_eq!(payload["reports"].as_array().map(Vec::len), Some(1));
    assert_eq!(payload["reports"][0]["distance_km"], serde_json::json!(0.0));
}
