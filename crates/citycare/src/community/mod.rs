//! Community directory: WhatsApp group listings and the citizen forum.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{DraftError, ForumPost, GroupDraft, PostDraft, WhatsappGroup};
pub use repository::{CommunityRepository, CommunityStoreError};
pub use router::community_router;
pub use service::{CommunityService, CommunityServiceError};
