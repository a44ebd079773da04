use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::json;

use super::gateway::{AssistantGateway, ChatBackend, ChatPrompt};

#[derive(Debug, Deserialize)]
pub(crate) struct ChatRequest {
    #[serde(default)]
    message: String,
    #[serde(default = "default_language")]
    language: String,
}

fn default_language() -> String {
    "en".to_string()
}

/// Router builder exposing the citizen chat endpoint.
pub fn assistant_router<B>(gateway: Arc<AssistantGateway<B>>) -> Router
where
    B: ChatBackend + 'static,
{
    Router::new()
        .route("/api/chat", post(chat_handler::<B>))
        .with_state(gateway)
}

pub(crate) async fn chat_handler<B>(
    State(gateway): State<Arc<AssistantGateway<B>>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse
where
    B: ChatBackend + 'static,
{
    let prompt = ChatPrompt::new(request.message, request.language);
    let reply = gateway.respond(&prompt).await;

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "reply": reply.response,
            "category": reply.category,
            "actions": reply.actions,
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::gateway::RemoteChatBackend;
    use tower::ServiceExt;

    async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    #[tokio::test]
    async fn chat_route_answers_from_intent_rules_when_offline() {
        let gateway = Arc::new(AssistantGateway::<RemoteChatBackend>::offline());
        let router = assistant_router(gateway);

        let response = router
            .oneshot(
                axum::http::Request::post("/api/chat")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        serde_json::to_vec(&json!({ "message": "report a pothole" })).unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["success"], json!(true));
        assert_eq!(payload["category"], json!("reporting"));
        assert!(payload["reply"]
            .as_str()
            .unwrap_or_default()
            .contains("report a civic issue"));
    }
}
