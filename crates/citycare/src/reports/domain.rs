use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for citizen reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub String);

/// Closed set of civic service categories a report can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueCategory {
    Roads,
    Sanitation,
    Streetlights,
    Water,
    Traffic,
    Parks,
    Other,
}

impl IssueCategory {
    pub const fn label(self) -> &'static str {
        match self {
            IssueCategory::Roads => "roads",
            IssueCategory::Sanitation => "sanitation",
            IssueCategory::Streetlights => "streetlights",
            IssueCategory::Water => "water",
            IssueCategory::Traffic => "traffic",
            IssueCategory::Parks => "parks",
            IssueCategory::Other => "other",
        }
    }

    pub const ALL: [IssueCategory; 7] = [
        IssueCategory::Roads,
        IssueCategory::Sanitation,
        IssueCategory::Streetlights,
        IssueCategory::Water,
        IssueCategory::Traffic,
        IssueCategory::Parks,
        IssueCategory::Other,
    ];
}

/// Citizen-assigned severity tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
}

impl UrgencyLevel {
    pub const fn label(self) -> &'static str {
        match self {
            UrgencyLevel::Low => "low",
            UrgencyLevel::Medium => "medium",
            UrgencyLevel::High => "high",
        }
    }

    pub const fn badge_class(self) -> &'static str {
        match self {
            UrgencyLevel::Low => "urgency-low",
            UrgencyLevel::Medium => "urgency-medium",
            UrgencyLevel::High => "urgency-high",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "low" => Some(UrgencyLevel::Low),
            "medium" => Some(UrgencyLevel::Medium),
            "high" => Some(UrgencyLevel::High),
            _ => None,
        }
    }

    pub const ALL: [UrgencyLevel; 3] = [UrgencyLevel::Low, UrgencyLevel::Medium, UrgencyLevel::High];
}

/// Server-assigned lifecycle tag. Forward-only in practice, but no
/// transition rules are enforced: any vocabulary value may replace any
/// other through the status update operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    Submitted,
    InProgress,
    Resolved,
    Rejected,
}

impl ReportStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ReportStatus::Submitted => "submitted",
            ReportStatus::InProgress => "in-progress",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Rejected => "rejected",
        }
    }

    pub const fn display_label(self) -> &'static str {
        match self {
            ReportStatus::Submitted => "Submitted",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Resolved => "Resolved",
            ReportStatus::Rejected => "Rejected",
        }
    }

    pub const fn badge_class(self) -> &'static str {
        match self {
            ReportStatus::Submitted => "status-pending",
            ReportStatus::InProgress => "status-progress",
            ReportStatus::Resolved => "status-resolved",
            ReportStatus::Rejected => "status-rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "submitted" => Some(ReportStatus::Submitted),
            "in-progress" => Some(ReportStatus::InProgress),
            "resolved" => Some(ReportStatus::Resolved),
            "rejected" => Some(ReportStatus::Rejected),
            _ => None,
        }
    }

    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Submitted,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
        ReportStatus::Rejected,
    ];
}

/// Badge class for a raw status string. Total over arbitrary input:
/// unrecognized values get the pending style, never an error.
pub fn status_badge_class(raw: &str) -> &'static str {
    ReportStatus::parse(raw)
        .map(ReportStatus::badge_class)
        .unwrap_or("status-pending")
}

/// Badge class for a raw urgency string; unrecognized values read as medium.
pub fn urgency_badge_class(raw: &str) -> &'static str {
    UrgencyLevel::parse(raw)
        .map(UrgencyLevel::badge_class)
        .unwrap_or("urgency-medium")
}

/// Human label for a raw status string; unrecognized values echo as-is.
pub fn format_status(raw: &str) -> String {
    match ReportStatus::parse(raw) {
        Some(status) => status.display_label().to_string(),
        None => raw.to_string(),
    }
}

/// Where the issue is. Address is the one required component; landmark
/// and ward are citizen-supplied refinements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ward: Option<String>,
}

/// How to reach the citizen who filed the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A citizen-submitted civic issue record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub category: IssueCategory,
    pub title: String,
    pub description: String,
    pub urgency_level: UrgencyLevel,
    pub location: IssueLocation,
    pub contact: ContactDetails,
    pub status: ReportStatus,
    pub image_paths: Vec<String>,
    pub upvotes: u32,
    pub comments_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Intake payload: the report shape minus everything the server assigns.
/// Wire fields stay flat, matching the submission form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSubmission {
    pub category: IssueCategory,
    pub title: String,
    pub description: String,
    pub urgency_level: UrgencyLevel,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    #[serde(default)]
    pub landmark: Option<String>,
    #[serde(default)]
    pub ward: Option<String>,
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub image_paths: Vec<String>,
}

impl ReportSubmission {
    /// Presence checks over the required intake fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::MissingField("description"));
        }
        if self.address.trim().is_empty() {
            return Err(ValidationError::MissingField("address"));
        }
        if self.contact_email.trim().is_empty() {
            return Err(ValidationError::MissingField("contact_email"));
        }
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(ValidationError::InvalidCoordinates);
        }
        Ok(())
    }

    pub(crate) fn location(&self) -> IssueLocation {
        IssueLocation {
            latitude: self.latitude,
            longitude: self.longitude,
            address: self.address.clone(),
            landmark: normalize_optional(&self.landmark),
            ward: normalize_optional(&self.ward),
        }
    }

    pub(crate) fn contact(&self) -> ContactDetails {
        ContactDetails {
            email: self.contact_email.clone(),
            phone: normalize_optional(&self.contact_phone),
        }
    }
}

fn normalize_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Intake validation failures, phrased the way the submission endpoint
/// reports them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Coordinates must be finite numbers")]
    InvalidCoordinates,
}

/// A discussion entry attached to a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportComment {
    pub id: String,
    pub report_id: ReportId,
    pub user_id: String,
    pub user_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Comment intake; author fields fall back to the anonymous identity.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentDraft {
    #[serde(default = "anonymous_user_id")]
    pub user_id: String,
    #[serde(default = "anonymous_user_name")]
    pub user_name: String,
    pub text: String,
}

fn anonymous_user_id() -> String {
    "anonymous".to_string()
}

fn anonymous_user_name() -> String {
    "Anonymous".to_string()
}

/// Dashboard counters shared by the tracker and the map view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    pub submitted: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub total: u64,
}
