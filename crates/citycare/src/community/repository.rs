use super::domain::{ForumPost, WhatsappGroup};

/// Storage abstraction for the community directory collections.
pub trait CommunityRepository: Send + Sync {
    fn insert_group(&self, group: WhatsappGroup) -> Result<WhatsappGroup, CommunityStoreError>;
    fn groups(&self) -> Result<Vec<WhatsappGroup>, CommunityStoreError>;
    fn insert_post(&self, post: ForumPost) -> Result<ForumPost, CommunityStoreError>;
    fn posts(&self) -> Result<Vec<ForumPost>, CommunityStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CommunityStoreError {
    #[error("record already exists")]
    Conflict,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
