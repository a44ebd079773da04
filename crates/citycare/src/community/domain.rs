use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A neighborhood WhatsApp group listed in the community directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhatsappGroup {
    pub id: String,
    pub name: String,
    pub description: String,
    pub location: String,
    pub link: String,
    pub member_count: u32,
    pub activity: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

/// Citizen-submitted group listing; the server assigns everything else.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupDraft {
    pub name: String,
    pub description: String,
    pub location: String,
    pub link: String,
}

impl GroupDraft {
    pub fn validate(&self) -> Result<(), DraftError> {
        require("name", &self.name)?;
        require("description", &self.description)?;
        require("location", &self.location)?;
        require("link", &self.link)
    }
}

/// A discussion thread opener on the community forum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub author_initials: String,
    pub comments: u32,
    pub views: u32,
    pub likes: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub category: String,
}

impl PostDraft {
    pub fn validate(&self) -> Result<(), DraftError> {
        require("title", &self.title)?;
        require("content", &self.content)?;
        require("category", &self.category)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), DraftError> {
    if value.trim().is_empty() {
        Err(DraftError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Draft validation failures, phrased the way the community endpoints
/// report them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}
