//! Citizen assistant: rule-based intent classification with an optional
//! remote AI tier layered in front of it.
//!
//! The classifier is the source of truth for navigation suggestions; the
//! remote tier only ever replaces the reply text. Any remote failure is
//! absorbed here so the chat surface never errors toward citizens.

pub mod gateway;
pub mod intent;
pub mod router;

pub use gateway::{
    AssistantGateway, ChatBackend, ChatBackendError, ChatPrompt, RemoteChatBackend,
};
pub use intent::{classify, IntentReply, NavigationAction, ServiceCategory};
pub use router::assistant_router;
