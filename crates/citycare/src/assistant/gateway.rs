use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::intent::{self, IntentReply};

/// Outbound chat request forwarded to the upstream AI tier.
#[derive(Debug, Clone, Serialize)]
pub struct ChatPrompt {
    pub message: String,
    pub language: String,
}

impl ChatPrompt {
    pub fn new(message: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            language: language.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UpstreamReply {
    reply: String,
}

/// Failure modes of the remote tier. Every one of them degrades the
/// assistant to the local classifier; none of them surfaces to callers.
#[derive(Debug, thiserror::Error)]
pub enum ChatBackendError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream answered with status {0}")]
    Status(u16),
    #[error("upstream reply body was not understood: {0}")]
    MalformedBody(String),
}

/// One attempt against a chat backend. No retry, no backoff.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn reply(&self, prompt: &ChatPrompt) -> Result<String, ChatBackendError>;
}

/// Backend that POSTs the prompt to a configured HTTP endpoint.
pub struct RemoteChatBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteChatBackend {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl ChatBackend for RemoteChatBackend {
    async fn reply(&self, prompt: &ChatPrompt) -> Result<String, ChatBackendError> {
        let response = self.client.post(&self.endpoint).json(prompt).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatBackendError::Status(status.as_u16()));
        }

        let parsed = response
            .json::<UpstreamReply>()
            .await
            .map_err(|err| ChatBackendError::MalformedBody(err.to_string()))?;

        Ok(parsed.reply)
    }
}

/// Two-tier assistant: one shot at the remote backend, with the local
/// intent classifier substituting its output on any failure. When the
/// remote tier answers, its text is paired with the classifier's
/// navigation actions so the reply stays actionable.
pub struct AssistantGateway<B> {
    backend: Option<Arc<B>>,
}

impl<B> AssistantGateway<B>
where
    B: ChatBackend,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Assistant with no remote tier configured: pure classifier.
    pub fn offline() -> Self {
        Self { backend: None }
    }

    /// Total: always produces a reply.
    pub async fn respond(&self, prompt: &ChatPrompt) -> IntentReply {
        let local = intent::classify(&prompt.message);

        let backend = match &self.backend {
            Some(backend) => backend,
            None => return local,
        };

        match backend.reply(prompt).await {
            Ok(text) => IntentReply {
                category: local.category,
                response: text,
                actions: local.actions,
            },
            Err(err) => {
                warn!(error = %err, "chat upstream unavailable, answering from intent rules");
                local
            }
        }
    }
}
