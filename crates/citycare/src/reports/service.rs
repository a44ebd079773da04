use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{
    CommentDraft, Report, ReportComment, ReportId, ReportStats, ReportStatus, ReportSubmission,
    ValidationError,
};
use super::geo::haversine_km;
use super::repository::{ReportRepository, RepositoryError};

/// Error raised by the report service.
#[derive(Debug, thiserror::Error)]
pub enum ReportServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("csv export failed: {0}")]
    Export(String),
}

/// A report with its discussion attached, as the tracker renders it.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDetails {
    #[serde(flatten)]
    pub report: Report,
    pub comments: Vec<ReportComment>,
}

/// One page of the report ledger.
#[derive(Debug, Clone, Serialize)]
pub struct ReportPage {
    pub reports: Vec<Report>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

/// A report annotated with its distance from a query point.
#[derive(Debug, Clone, Serialize)]
pub struct NearbyReport {
    #[serde(flatten)]
    pub report: Report,
    pub distance_km: f64,
}

/// Per-citizen roll-up for the administrative users view.
#[derive(Debug, Clone, Serialize)]
pub struct ContributorSummary {
    pub email: String,
    pub report_count: u64,
    pub last_activity: chrono::DateTime<Utc>,
    pub joined_date: chrono::DateTime<Utc>,
}

/// Tracker-side filter. Unknown status or category strings simply match
/// nothing; the filter surface is lenient where intake is strict.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportFilter {
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub report_count: u64,
}

/// Distributions backing the administrative analytics dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsBreakdown {
    pub categories: Vec<CountEntry>,
    pub status: Vec<CountEntry>,
    pub urgency: Vec<CountEntry>,
    pub recent_activity: Vec<DailyCount>,
    pub wards: Vec<CountEntry>,
}

/// Service composing intake validation, the repository, and the derived
/// read models shared by the tracker, map, and admin surfaces.
pub struct ReportService<R> {
    repository: Arc<R>,
}

impl<R> ReportService<R>
where
    R: ReportRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate and persist a new report. The server assigns the id,
    /// timestamps, initial status, and zeroed counters.
    pub fn submit(&self, submission: ReportSubmission) -> Result<Report, ReportServiceError> {
        submission.validate()?;

        let now = Utc::now();
        let report = Report {
            id: ReportId(Uuid::new_v4().to_string()),
            category: submission.category,
            title: submission.title.trim().to_string(),
            description: submission.description.trim().to_string(),
            urgency_level: submission.urgency_level,
            location: submission.location(),
            contact: submission.contact(),
            status: ReportStatus::Submitted,
            image_paths: submission.image_paths.clone(),
            upvotes: 0,
            comments_count: 0,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(report)?;
        Ok(stored)
    }

    /// Every report, newest first, with comments attached.
    pub fn list(&self) -> Result<Vec<ReportDetails>, ReportServiceError> {
        let mut reports = self.repository.list()?;
        sort_newest_first(&mut reports);

        let mut details = Vec::with_capacity(reports.len());
        for report in reports {
            let comments = self.repository.comments(&report.id)?;
            details.push(ReportDetails { report, comments });
        }
        Ok(details)
    }

    /// One page of the ledger, newest first. Page numbering starts at 1.
    pub fn page(&self, page: u32, per_page: u32) -> Result<ReportPage, ReportServiceError> {
        let page = page.max(1);
        let per_page = per_page.max(1);

        let mut reports = self.repository.list()?;
        sort_newest_first(&mut reports);

        let total = reports.len() as u64;
        let reports = reports
            .into_iter()
            .skip(((page - 1) * per_page) as usize)
            .take(per_page as usize)
            .collect();

        Ok(ReportPage {
            reports,
            total,
            page,
            per_page,
        })
    }

    pub fn get(&self, id: &ReportId) -> Result<ReportDetails, ReportServiceError> {
        let report = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        let comments = self.repository.comments(id)?;
        Ok(ReportDetails { report, comments })
    }

    /// Apply the tracker filter, newest first.
    pub fn filter(&self, filter: &ReportFilter) -> Result<Vec<Report>, ReportServiceError> {
        let needle = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut reports = self
            .repository
            .list()?
            .into_iter()
            .filter(|report| {
                if !filter.status.is_empty()
                    && !filter.status.iter().any(|s| s == report.status.label())
                {
                    return false;
                }
                if !filter.categories.is_empty()
                    && !filter
                        .categories
                        .iter()
                        .any(|c| c == report.category.label())
                {
                    return false;
                }
                match &needle {
                    Some(needle) => {
                        report.title.to_lowercase().contains(needle)
                            || report.description.to_lowercase().contains(needle)
                            || report.location.address.to_lowercase().contains(needle)
                    }
                    None => true,
                }
            })
            .collect::<Vec<_>>();

        sort_newest_first(&mut reports);
        Ok(reports)
    }

    /// Replace the lifecycle tag. Any vocabulary value is accepted in any
    /// order; there is no transition graph.
    pub fn update_status(
        &self,
        id: &ReportId,
        status: ReportStatus,
    ) -> Result<(), ReportServiceError> {
        let mut report = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        report.status = status;
        report.updated_at = Utc::now();
        self.repository.update(report)?;
        Ok(())
    }

    pub fn delete(&self, id: &ReportId) -> Result<(), ReportServiceError> {
        self.repository.delete(id)?;
        Ok(())
    }

    /// Attach a comment and bump the report's counter.
    pub fn comment(
        &self,
        id: &ReportId,
        draft: CommentDraft,
    ) -> Result<ReportComment, ReportServiceError> {
        let mut report = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;

        let comment = ReportComment {
            id: Uuid::new_v4().to_string(),
            report_id: id.clone(),
            user_id: draft.user_id,
            user_name: draft.user_name,
            text: draft.text,
            created_at: Utc::now(),
        };
        self.repository.insert_comment(comment.clone())?;

        report.comments_count += 1;
        report.updated_at = Utc::now();
        self.repository.update(report)?;

        Ok(comment)
    }

    pub fn stats(&self) -> Result<ReportStats, ReportServiceError> {
        let mut stats = ReportStats::default();
        for report in self.repository.list()? {
            match report.status {
                ReportStatus::Submitted => stats.submitted += 1,
                ReportStatus::InProgress => stats.in_progress += 1,
                ReportStatus::Resolved => stats.resolved += 1,
                ReportStatus::Rejected => {}
            }
            stats.total += 1;
        }
        Ok(stats)
    }

    /// Distribution views for the admin dashboard. `today` anchors the
    /// seven-day activity window.
    pub fn analytics(&self, today: NaiveDate) -> Result<AnalyticsBreakdown, ReportServiceError> {
        let reports = self.repository.list()?;

        let mut categories: HashMap<&'static str, u64> = HashMap::new();
        let mut status: HashMap<&'static str, u64> = HashMap::new();
        let mut urgency: HashMap<&'static str, u64> = HashMap::new();
        let mut wards: HashMap<String, u64> = HashMap::new();
        let mut activity: HashMap<NaiveDate, u64> = HashMap::new();

        let window_start = today - Duration::days(7);
        for report in &reports {
            *categories.entry(report.category.label()).or_default() += 1;
            *status.entry(report.status.label()).or_default() += 1;
            *urgency.entry(report.urgency_level.label()).or_default() += 1;

            if let Some(ward) = report.location.ward.as_deref() {
                if !ward.is_empty() {
                    *wards.entry(ward.to_string()).or_default() += 1;
                }
            }

            let day = report.created_at.date_naive();
            if day >= window_start && day <= today {
                *activity.entry(day).or_default() += 1;
            }
        }

        let mut recent_activity: Vec<DailyCount> = activity
            .into_iter()
            .map(|(date, report_count)| DailyCount { date, report_count })
            .collect();
        recent_activity.sort_by_key(|entry| entry.date);

        let mut wards = into_sorted_counts(wards);
        wards.truncate(10);

        Ok(AnalyticsBreakdown {
            categories: into_sorted_counts(
                categories
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            ),
            status: into_sorted_counts(
                status.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            ),
            urgency: into_sorted_counts(
                urgency
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect(),
            ),
            recent_activity,
            wards,
        })
    }

    /// Reports within `radius_km` of the query point, nearest first.
    pub fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<NearbyReport>, ReportServiceError> {
        let mut nearby: Vec<NearbyReport> = self
            .repository
            .list()?
            .into_iter()
            .filter_map(|report| {
                let distance_km = haversine_km(
                    latitude,
                    longitude,
                    report.location.latitude,
                    report.location.longitude,
                );
                (distance_km <= radius_km).then_some(NearbyReport { report, distance_km })
            })
            .collect();

        nearby.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(Ordering::Equal)
        });
        Ok(nearby)
    }

    /// Per-email activity roll-up, most recently active first.
    pub fn contributors(&self) -> Result<Vec<ContributorSummary>, ReportServiceError> {
        let mut by_email: HashMap<String, ContributorSummary> = HashMap::new();

        for report in self.repository.list()? {
            let entry = by_email
                .entry(report.contact.email.clone())
                .or_insert_with(|| ContributorSummary {
                    email: report.contact.email.clone(),
                    report_count: 0,
                    last_activity: report.created_at,
                    joined_date: report.created_at,
                });
            entry.report_count += 1;
            entry.last_activity = entry.last_activity.max(report.created_at);
            entry.joined_date = entry.joined_date.min(report.created_at);
        }

        let mut contributors: Vec<ContributorSummary> = by_email.into_values().collect();
        contributors.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
        Ok(contributors)
    }

    /// Flat CSV of the full ledger for offline processing.
    pub fn export_csv(&self) -> Result<String, ReportServiceError> {
        let mut reports = self.repository.list()?;
        sort_newest_first(&mut reports);

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "id",
                "category",
                "title",
                "description",
                "urgency_level",
                "status",
                "latitude",
                "longitude",
                "address",
                "landmark",
                "ward",
                "contact_email",
                "contact_phone",
                "upvotes",
                "comments_count",
                "created_at",
                "updated_at",
            ])
            .map_err(|err| ReportServiceError::Export(err.to_string()))?;

        for report in &reports {
            writer
                .write_record([
                    report.id.0.as_str(),
                    report.category.label(),
                    report.title.as_str(),
                    report.description.as_str(),
                    report.urgency_level.label(),
                    report.status.label(),
                    &report.location.latitude.to_string(),
                    &report.location.longitude.to_string(),
                    report.location.address.as_str(),
                    report.location.landmark.as_deref().unwrap_or(""),
                    report.location.ward.as_deref().unwrap_or(""),
                    report.contact.email.as_str(),
                    report.contact.phone.as_deref().unwrap_or(""),
                    &report.upvotes.to_string(),
                    &report.comments_count.to_string(),
                    &report.created_at.to_rfc3339(),
                    &report.updated_at.to_rfc3339(),
                ])
                .map_err(|err| ReportServiceError::Export(err.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| ReportServiceError::Export(err.to_string()))?;
        String::from_utf8(bytes).map_err(|err| ReportServiceError::Export(err.to_string()))
    }
}

fn sort_newest_first(reports: &mut [Report]) {
    reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn into_sorted_counts(counts: HashMap<String, u64>) -> Vec<CountEntry> {
    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(label, count)| CountEntry { label, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    entries
}
