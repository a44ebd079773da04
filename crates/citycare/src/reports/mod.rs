//! Citizen report intake, tracking, and the derived read models shared
//! by the tracker, city map, and administrative dashboards.

pub mod domain;
pub mod geo;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    format_status, status_badge_class, urgency_badge_class, CommentDraft, ContactDetails,
    IssueCategory, IssueLocation, Report, ReportComment, ReportId, ReportStats, ReportStatus,
    ReportSubmission, UrgencyLevel, ValidationError,
};
pub use geo::haversine_km;
pub use repository::{ReportRepository, RepositoryError};
pub use router::report_router;
pub use service::{
    AnalyticsBreakdown, ContributorSummary, CountEntry, DailyCount, NearbyReport, ReportDetails,
    ReportFilter, ReportPage, ReportService, ReportServiceError,
};
