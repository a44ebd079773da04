use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{CommentDraft, ReportId, ReportStatus, ReportSubmission};
use super::repository::{ReportRepository, RepositoryError};
use super::service::{ReportFilter, ReportService, ReportServiceError};

/// Router builder exposing the citizen-facing report endpoints.
pub fn report_router<R>(service: Arc<ReportService<R>>) -> Router
where
    R: ReportRepository + 'static,
{
    Router::new()
        .route("/api/submit-report", post(submit_handler::<R>))
        .route("/api/user-reports", get(user_reports_handler::<R>))
        .route("/api/reports", get(paged_reports_handler::<R>))
        .route("/api/reports/filter", post(filter_handler::<R>))
        .route("/api/reports/stats", get(stats_handler::<R>))
        .route("/api/reports/nearby", get(nearby_handler::<R>))
        .route("/api/reports/:report_id", get(report_handler::<R>))
        .route(
            "/api/reports/:report_id/status",
            put(status_handler::<R>),
        )
        .route(
            "/api/reports/:report_id/comment",
            post(comment_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageQuery {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_per_page")]
    per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    10
}

#[derive(Debug, Deserialize)]
pub(crate) struct NearbyQuery {
    lat: f64,
    lng: f64,
    #[serde(default = "default_radius_km")]
    radius: f64,
}

fn default_radius_km() -> f64 {
    2.0
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdateRequest {
    status: String,
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ReportService<R>>>,
    Json(submission): Json<ReportSubmission>,
) -> Response
where
    R: ReportRepository + 'static,
{
    match service.submit(submission) {
        Ok(report) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Report submitted successfully!",
                "report_id": report.id.0,
            })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn user_reports_handler<R>(
    State(service): State<Arc<ReportService<R>>>,
) -> Response
where
    R: ReportRepository + 'static,
{
    match service.list() {
        Ok(reports) => (
            StatusCode::OK,
            Json(json!({ "success": true, "reports": reports })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn paged_reports_handler<R>(
    State(service): State<Arc<ReportService<R>>>,
    Query(query): Query<PageQuery>,
) -> Response
where
    R: ReportRepository + 'static,
{
    match service.page(query.page, query.per_page) {
        Ok(page) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "reports": page.reports,
                "total": page.total,
                "page": page.page,
                "per_page": page.per_page,
            })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn filter_handler<R>(
    State(service): State<Arc<ReportService<R>>>,
    Json(filter): Json<ReportFilter>,
) -> Response
where
    R: ReportRepository + 'static,
{
    match service.filter(&filter) {
        Ok(reports) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "total": reports.len(),
                "reports": reports,
            })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn stats_handler<R>(State(service): State<Arc<ReportService<R>>>) -> Response
where
    R: ReportRepository + 'static,
{
    match service.stats() {
        Ok(stats) => (
            StatusCode::OK,
            Json(json!({ "success": true, "stats": stats })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn nearby_handler<R>(
    State(service): State<Arc<ReportService<R>>>,
    Query(query): Query<NearbyQuery>,
) -> Response
where
    R: ReportRepository + 'static,
{
    match service.nearby(query.lat, query.lng, query.radius) {
        Ok(reports) => (
            StatusCode::OK,
            Json(json!({ "success": true, "reports": reports })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<ReportService<R>>>,
    Path(report_id): Path<String>,
) -> Response
where
    R: ReportRepository + 'static,
{
    match service.get(&ReportId(report_id)) {
        Ok(details) => (
            StatusCode::OK,
            Json(json!({ "success": true, "report": details })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<ReportService<R>>>,
    Path(report_id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> Response
where
    R: ReportRepository + 'static,
{
    let status = match ReportStatus::parse(&request.status) {
        Some(status) => status,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "message": "Invalid status" })),
            )
                .into_response();
        }
    };

    match service.update_status(&ReportId(report_id), status) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Status updated successfully" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn comment_handler<R>(
    State(service): State<Arc<ReportService<R>>>,
    Path(report_id): Path<String>,
    Json(draft): Json<CommentDraft>,
) -> Response
where
    R: ReportRepository + 'static,
{
    match service.comment(&ReportId(report_id), draft) {
        Ok(_comment) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Comment added successfully" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn error_response(err: ReportServiceError) -> Response {
    match err {
        ReportServiceError::Validation(err) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": err.to_string() })),
        )
            .into_response(),
        ReportServiceError::Repository(RepositoryError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "message": "Report not found" })),
        )
            .into_response(),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "message": other.to_string() })),
        )
            .into_response(),
    }
}
