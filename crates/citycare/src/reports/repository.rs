use super::domain::{Report, ReportComment, ReportId};

/// Storage abstraction so the report service can be exercised in
/// isolation. Implementations make no ordering promises; the service
/// sorts where the surface requires it.
pub trait ReportRepository: Send + Sync {
    fn insert(&self, report: Report) -> Result<Report, RepositoryError>;
    fn update(&self, report: Report) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ReportId) -> Result<Option<Report>, RepositoryError>;
    fn list(&self) -> Result<Vec<Report>, RepositoryError>;
    /// Removes the report and every comment attached to it.
    fn delete(&self, id: &ReportId) -> Result<(), RepositoryError>;
    fn insert_comment(&self, comment: ReportComment) -> Result<(), RepositoryError>;
    fn comments(&self, id: &ReportId) -> Result<Vec<ReportComment>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
