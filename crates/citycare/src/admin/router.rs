use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::AdminDirectory;
use crate::reports::domain::{ReportId, ReportStatus};
use crate::reports::repository::ReportRepository;
use crate::reports::router::error_response;
use crate::reports::service::ReportService;

/// State shared by the admin endpoints: the report service plus the
/// credential directory.
pub struct AdminState<R> {
    pub service: Arc<ReportService<R>>,
    pub directory: Arc<AdminDirectory>,
}

impl<R> Clone for AdminState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            directory: Arc::clone(&self.directory),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Router builder exposing the administrative surface.
pub fn admin_router<R>(
    service: Arc<ReportService<R>>,
    directory: Arc<AdminDirectory>,
) -> Router
where
    R: ReportRepository + 'static,
{
    Router::new()
        .route("/admin/login", post(login_handler::<R>))
        .route("/api/admin/reports", get(reports_handler::<R>))
        .route("/api/admin/reports/export", get(export_handler::<R>))
        .route(
            "/api/admin/reports/:report_id/status",
            put(status_handler::<R>),
        )
        .route(
            "/api/admin/reports/:report_id/details",
            get(details_handler::<R>),
        )
        .route(
            "/api/admin/reports/:report_id",
            delete(delete_handler::<R>),
        )
        .route("/api/admin/users", get(users_handler::<R>))
        .route("/api/admin/analytics", get(analytics_handler::<R>))
        .with_state(AdminState { service, directory })
}

pub(crate) async fn login_handler<R>(
    State(state): State<AdminState<R>>,
    Json(request): Json<LoginRequest>,
) -> Response
where
    R: ReportRepository + 'static,
{
    match state
        .directory
        .authenticate(&request.username, &request.password)
    {
        Some(identity) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Login successful",
                "user": identity,
            })),
        )
            .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid admin credentials" })),
        )
            .into_response(),
    }
}

pub(crate) async fn reports_handler<R>(State(state): State<AdminState<R>>) -> Response
where
    R: ReportRepository + 'static,
{
    match state.service.list() {
        Ok(reports) => (
            StatusCode::OK,
            Json(json!({ "success": true, "reports": reports })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R>(
    State(state): State<AdminState<R>>,
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

    match state.service.update_status(&ReportId(report_id), status) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Status updated successfully" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdateRequest {
    status: String,
}

pub(crate) async fn details_handler<R>(
    State(state): State<AdminState<R>>,
    Path(report_id): Path<String>,
) -> Response
where
    R: ReportRepository + 'static,
{
    match state.service.get(&ReportId(report_id)) {
        Ok(details) => (
            StatusCode::OK,
            Json(json!({ "success": true, "report": details })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(state): State<AdminState<R>>,
    Path(report_id): Path<String>,
) -> Response
where
    R: ReportRepository + 'static,
{
    match state.service.delete(&ReportId(report_id)) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Report deleted successfully" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn users_handler<R>(State(state): State<AdminState<R>>) -> Response
where
    R: ReportRepository + 'static,
{
    match state.service.contributors() {
        Ok(users) => (
            StatusCode::OK,
            Json(json!({ "success": true, "users": users })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn analytics_handler<R>(State(state): State<AdminState<R>>) -> Response
where
    R: ReportRepository + 'static,
{
    match state.service.analytics(Utc::now().date_naive()) {
        Ok(analytics) => (
            StatusCode::OK,
            Json(json!({ "success": true, "analytics": analytics })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_handler<R>(State(state): State<AdminState<R>>) -> Response
where
    R: ReportRepository + 'static,
{
    match state.service.export_csv() {
        Ok(csv) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            csv,
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}
