use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use citycare::community::{
    CommunityRepository, CommunityStoreError, ForumPost, WhatsappGroup,
};
use citycare::reports::{
    ContactDetails, IssueCategory, IssueLocation, Report, ReportComment, ReportId,
    ReportRepository, ReportStatus, RepositoryError, UrgencyLevel,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryReportRepository {
    records: Arc<Mutex<HashMap<String, Report>>>,
    comments: Arc<Mutex<Vec<ReportComment>>>,
}

impl InMemoryReportRepository {
    pub(crate) fn is_empty(&self) -> bool {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .is_empty()
    }
}

impl ReportRepository for InMemoryReportRepository {
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
        drop(guard);

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

#[derive(Default, Clone)]
pub(crate) struct InMemoryCommunityRepository {
    groups: Arc<Mutex<Vec<WhatsappGroup>>>,
    posts: Arc<Mutex<Vec<ForumPost>>>,
}

impl CommunityRepository for InMemoryCommunityRepository {
    fn insert_group(&self, group: WhatsappGroup) -> Result<WhatsappGroup, CommunityStoreError> {
        let mut guard = self.groups.lock().expect("group mutex poisoned");
        if guard.iter().any(|existing| existing.id == group.id) {
            return Err(CommunityStoreError::Conflict);
        }
        guard.push(group.clone());
        Ok(group)
    }

    fn groups(&self) -> Result<Vec<WhatsappGroup>, CommunityStoreError> {
        Ok(self.groups.lock().expect("group mutex poisoned").clone())
    }

    fn insert_post(&self, post: ForumPost) -> Result<ForumPost, CommunityStoreError> {
        let mut guard = self.posts.lock().expect("post mutex poisoned");
        guard.push(post.clone());
        Ok(post)
    }

    fn posts(&self) -> Result<Vec<ForumPost>, CommunityStoreError> {
        Ok(self.posts.lock().expect("post mutex poisoned").clone())
    }
}

/// Populate an empty deployment with a small, recognizable data set so
/// the tracker, map, and community pages have something to show.
pub(crate) fn seed_sample_data(
    reports: &InMemoryReportRepository,
    community: &InMemoryCommunityRepository,
) {
    if !reports.is_empty() {
        return;
    }
    info!("initializing sample data");

    for report in sample_reports() {
        if let Err(err) = reports.insert(report) {
            warn!(error = %err, "sample report skipped");
        }
    }
    for comment in sample_comments() {
        if let Err(err) = reports.insert_comment(comment) {
            warn!(error = %err, "sample comment skipped");
        }
    }
    for group in sample_groups() {
        if let Err(err) = community.insert_group(group) {
            warn!(error = %err, "sample group skipped");
        }
    }
    for post in sample_posts() {
        if let Err(err) = community.insert_post(post) {
            warn!(error = %err, "sample post skipped");
        }
    }
}

fn sample_reports() -> Vec<Report> {
    let now = Utc::now();
    vec![
        Report {
            id: ReportId("report-1".to_string()),
            category: IssueCategory::Roads,
            title: "Large pothole on Main Street".to_string(),
            description: "There's a dangerous pothole near the intersection of Main and 5th Street"
                .to_string(),
            urgency_level: UrgencyLevel::High,
            location: IssueLocation {
                latitude: 20.5937,
                longitude: 78.9629,
                address: "Main Street, City Center".to_string(),
                landmark: Some("Near Central Park".to_string()),
                ward: Some("Ward 5".to_string()),
            },
            contact: ContactDetails {
                email: "user@example.com".to_string(),
                phone: Some("+1234567890".to_string()),
            },
            status: ReportStatus::Submitted,
            image_paths: Vec::new(),
            upvotes: 5,
            comments_count: 2,
            created_at: now,
            updated_at: now,
        },
        Report {
            id: ReportId("report-2".to_string()),
            category: IssueCategory::Sanitation,
            title: "Garbage not collected for 3 days".to_string(),
            description: "The garbage truck hasn't come to our area for 3 consecutive days"
                .to_string(),
            urgency_level: UrgencyLevel::Medium,
            location: IssueLocation {
                latitude: 20.5940,
                longitude: 78.9630,
                address: "Green Park Residence".to_string(),
                landmark: Some("Behind City Mall".to_string()),
                ward: Some("Ward 3".to_string()),
            },
            contact: ContactDetails {
                email: "user2@example.com".to_string(),
                phone: Some("+1234567891".to_string()),
            },
            status: ReportStatus::InProgress,
            image_paths: Vec::new(),
            upvotes: 3,
            comments_count: 1,
            created_at: now,
            updated_at: now,
        },
        Report {
            id: ReportId("report-3".to_string()),
            category: IssueCategory::Water,
            title: "No water supply since morning".to_string(),
            description: "There has been no water supply in our area since 8 AM today".to_string(),
            urgency_level: UrgencyLevel::High,
            location: IssueLocation {
                latitude: 20.5950,
                longitude: 78.9640,
                address: "River View Apartments".to_string(),
                landmark: Some("Near Police Station".to_string()),
                ward: Some("Ward 4".to_string()),
            },
            contact: ContactDetails {
                email: "user3@example.com".to_string(),
                phone: Some("+1234567892".to_string()),
            },
            status: ReportStatus::Submitted,
            image_paths: Vec::new(),
            upvotes: 2,
            comments_count: 0,
            created_at: now,
            updated_at: now,
        },
    ]
}

fn sample_comments() -> Vec<ReportComment> {
    let now = Utc::now();
    vec![
        ReportComment {
            id: "comment-1".to_string(),
            report_id: ReportId("report-1".to_string()),
            user_id: "user1".to_string(),
            user_name: "John Doe".to_string(),
            text: "This has been here for weeks!".to_string(),
            created_at: now,
        },
        ReportComment {
            id: "comment-2".to_string(),
            report_id: ReportId("report-1".to_string()),
            user_id: "user2".to_string(),
            user_name: "Jane Smith".to_string(),
            text: "I almost fell here yesterday!".to_string(),
            created_at: now,
        },
        ReportComment {
            id: "comment-3".to_string(),
            report_id: ReportId("report-2".to_string()),
            user_id: "user3".to_string(),
            user_name: "Mike Johnson".to_string(),
            text: "Same issue in my area too".to_string(),
            created_at: now,
        },
    ]
}

fn sample_groups() -> Vec<WhatsappGroup> {
    let now = Utc::now();
    vec![
        WhatsappGroup {
            id: "group-1".to_string(),
            name: "City Care - Ward 5 Residents".to_string(),
            description: "Group for residents of Ward 5 to discuss civic issues".to_string(),
            location: "Ward 5".to_string(),
            link: "https://chat.whatsapp.com/example1".to_string(),
            member_count: 45,
            activity: "Active".to_string(),
            created_at: now,
            created_by: "user".to_string(),
        },
        WhatsappGroup {
            id: "group-2".to_string(),
            name: "Road Safety Volunteers".to_string(),
            description: "Group for reporting and discussing road safety issues".to_string(),
            location: "City Wide".to_string(),
            link: "https://chat.whatsapp.com/example2".to_string(),
            member_count: 89,
            activity: "Very Active".to_string(),
            created_at: now,
            created_by: "user".to_string(),
        },
    ]
}

fn sample_posts() -> Vec<ForumPost> {
    let now = Utc::now();
    vec![
        ForumPost {
            id: "post-1".to_string(),
            title: "How to effectively report water supply issues?".to_string(),
            content: "I've been facing water supply problems in my area. What's the best way to \
                      get this resolved quickly?"
                .to_string(),
            category: "Water Supply".to_string(),
            author: "Community Member".to_string(),
            author_initials: "CM".to_string(),
            comments: 7,
            views: 124,
            likes: 15,
            created_at: now,
            updated_at: now,
        },
        ForumPost {
            id: "post-2".to_string(),
            title: "Property Tax Payment Issues".to_string(),
            content: "Has anyone else faced issues with the online property tax payment portal?"
                .to_string(),
            category: "Taxes".to_string(),
            author: "Tax Payer".to_string(),
            author_initials: "TP".to_string(),
            comments: 12,
            views: 256,
            likes: 8,
            created_at: now,
            updated_at: now,
        },
    ]
}
