use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::domain::{GroupDraft, PostDraft};
use super::repository::CommunityRepository;
use super::service::{CommunityService, CommunityServiceError};

/// Router builder exposing the community directory endpoints.
pub fn community_router<R>(service: Arc<CommunityService<R>>) -> Router
where
    R: CommunityRepository + 'static,
{
    Router::new()
        .route(
            "/api/whatsapp-groups",
            get(list_groups_handler::<R>).post(create_group_handler::<R>),
        )
        .route(
            "/api/forum-posts",
            get(list_posts_handler::<R>).post(create_post_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_groups_handler<R>(
    State(service): State<Arc<CommunityService<R>>>,
) -> Response
where
    R: CommunityRepository + 'static,
{
    match service.groups() {
        Ok(groups) => (
            StatusCode::OK,
            Json(json!({ "success": true, "groups": groups })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_group_handler<R>(
    State(service): State<Arc<CommunityService<R>>>,
    Json(draft): Json<GroupDraft>,
) -> Response
where
    R: CommunityRepository + 'static,
{
    match service.create_group(draft) {
        Ok(_group) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Group created successfully" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_posts_handler<R>(
    State(service): State<Arc<CommunityService<R>>>,
) -> Response
where
    R: CommunityRepository + 'static,
{
    match service.recent_posts() {
        Ok(posts) => (
            StatusCode::OK,
            Json(json!({ "success": true, "posts": posts })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_post_handler<R>(
    State(service): State<Arc<CommunityService<R>>>,
    Json(draft): Json<PostDraft>,
) -> Response
where
    R: CommunityRepository + 'static,
{
    match service.create_post(draft) {
        Ok(_post) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Post created successfully" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: CommunityServiceError) -> Response {
    match err {
        CommunityServiceError::Validation(err) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": err.to_string() })),
        )
            .into_response(),
        CommunityServiceError::Store(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "message": err.to_string() })),
        )
            .into_response(),
    }
}
