use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::domain::{DraftError, ForumPost, GroupDraft, PostDraft, WhatsappGroup};
use super::repository::{CommunityRepository, CommunityStoreError};

/// How many forum posts the community page shows at once.
const RECENT_POST_LIMIT: usize = 10;

/// Error raised by the community service.
#[derive(Debug, thiserror::Error)]
pub enum CommunityServiceError {
    #[error(transparent)]
    Validation(#[from] DraftError),
    #[error(transparent)]
    Store(#[from] CommunityStoreError),
}

/// Service backing the community directory: WhatsApp groups and the
/// citizen forum.
pub struct CommunityService<R> {
    repository: Arc<R>,
}

impl<R> CommunityService<R>
where
    R: CommunityRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// List a new WhatsApp group. New listings start with the creator as
    /// the only member and the "New" activity tag.
    pub fn create_group(&self, draft: GroupDraft) -> Result<WhatsappGroup, CommunityServiceError> {
        draft.validate()?;

        let group = WhatsappGroup {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            description: draft.description.trim().to_string(),
            location: draft.location.trim().to_string(),
            link: draft.link.trim().to_string(),
            member_count: 1,
            activity: "New".to_string(),
            created_at: Utc::now(),
            created_by: "user".to_string(),
        };

        let stored = self.repository.insert_group(group)?;
        Ok(stored)
    }

    pub fn groups(&self) -> Result<Vec<WhatsappGroup>, CommunityServiceError> {
        Ok(self.repository.groups()?)
    }

    /// Open a forum thread under the anonymous community identity.
    pub fn create_post(&self, draft: PostDraft) -> Result<ForumPost, CommunityServiceError> {
        draft.validate()?;

        let now = Utc::now();
        let post = ForumPost {
            id: Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            content: draft.content.trim().to_string(),
            category: draft.category.trim().to_string(),
            author: "User".to_string(),
            author_initials: "US".to_string(),
            comments: 0,
            views: 0,
            likes: 0,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert_post(post)?;
        Ok(stored)
    }

    pub fn group_count(&self) -> Result<u64, CommunityServiceError> {
        Ok(self.repository.groups()?.len() as u64)
    }

    pub fn post_count(&self) -> Result<u64, CommunityServiceError> {
        Ok(self.repository.posts()?.len() as u64)
    }

    /// Latest forum posts, newest first, capped for the community page.
    pub fn recent_posts(&self) -> Result<Vec<ForumPost>, CommunityServiceError> {
        let mut posts = self.repository.posts()?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(RECENT_POST_LIMIT);
        Ok(posts)
    }
}
