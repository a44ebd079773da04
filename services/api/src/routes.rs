use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::Utc;
use citycare::admin::{admin_router, AdminDirectory};
use citycare::assistant::{assistant_router, AssistantGateway, ChatBackend};
use citycare::community::{community_router, CommunityRepository, CommunityService};
use citycare::reports::{report_router, ReportRepository, ReportService};
use serde_json::json;

use crate::infra::AppState;

/// State for the service-level health probe, which reports how much data
/// each collection holds.
pub(crate) struct HealthState<R, C> {
    pub(crate) reports: Arc<ReportService<R>>,
    pub(crate) community: Arc<CommunityService<C>>,
}

impl<R, C> Clone for HealthState<R, C> {
    fn clone(&self) -> Self {
        Self {
            reports: Arc::clone(&self.reports),
            community: Arc::clone(&self.community),
        }
    }
}

/// Compose the full application router: citizen, assistant, community,
/// and admin surfaces plus the operational endpoints.
pub(crate) fn compose_routes<R, C, B>(
    reports: Arc<ReportService<R>>,
    community: Arc<CommunityService<C>>,
    gateway: Arc<AssistantGateway<B>>,
    directory: Arc<AdminDirectory>,
) -> Router
where
    R: ReportRepository + 'static,
    C: CommunityRepository + 'static,
    B: ChatBackend + 'static,
{
    let health_state = HealthState {
        reports: reports.clone(),
        community: community.clone(),
    };

    report_router(reports.clone())
        .merge(assistant_router(gateway))
        .merge(community_router(community))
        .merge(admin_router(reports, directory))
        .merge(
            Router::new()
                .route("/api/health", get(api_health_endpoint::<R, C>))
                .with_state(health_state),
        )
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn api_health_endpoint<R, C>(
    axum::extract::State(state): axum::extract::State<HealthState<R, C>>,
) -> Response
where
    R: ReportRepository + 'static,
    C: CommunityRepository + 'static,
{
    let stats = match state.reports.stats() {
        Ok(stats) => stats,
        Err(err) => return unhealthy(err.to_string()),
    };
    let groups = match state.community.group_count() {
        Ok(count) => count,
        Err(err) => return unhealthy(err.to_string()),
    };
    let posts = match state.community.post_count() {
        Ok(count) => count,
        Err(err) => return unhealthy(err.to_string()),
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "timestamp": Utc::now().to_rfc3339(),
            "reports": stats.total,
            "groups": groups,
            "posts": posts,
        })),
    )
        .into_response()
}

fn unhealthy(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "status": "unhealthy", "message": message })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        seed_sample_data, InMemoryCommunityRepository, InMemoryReportRepository,
    };
    use citycare::assistant::RemoteChatBackend;
    use tower::ServiceExt;

    fn seeded_router() -> Router {
        let report_repo = Arc::new(InMemoryReportRepository::default());
        let community_repo = Arc::new(InMemoryCommunityRepository::default());
        seed_sample_data(&report_repo, &community_repo);

        compose_routes(
            Arc::new(ReportService::new(report_repo)),
            Arc::new(CommunityService::new(community_repo)),
            Arc::new(AssistantGateway::<RemoteChatBackend>::offline()),
            Arc::new(AdminDirectory::builtin()),
        )
    }

    async fn read_json_body(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        serde_json::from_slice(&bytes).expect("body is json")
    }

    #[tokio::test]
    async fn api_health_reports_seeded_counts() {
        let router = seeded_router();

        let response = router
            .oneshot(
                axum::http::Request::get("/api/health")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["status"], json!("healthy"));
        assert_eq!(payload["reports"], json!(3));
        assert_eq!(payload["groups"], json!(2));
        assert_eq!(payload["posts"], json!(2));
    }

    #[tokio::test]
    async fn stats_route_reflects_the_seeded_ledger() {
        let router = seeded_router();

        let response = router
            .oneshot(
                axum::http::Request::get("/api/reports/stats")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["stats"]["submitted"], json!(2));
        assert_eq!(payload["stats"]["in_progress"], json!(1));
        assert_eq!(payload["stats"]["resolved"], json!(0));
        assert_eq!(payload["stats"]["total"], json!(3));
    }

    #[tokio::test]
    async fn admin_login_accepts_builtin_credentials() {
        let router = seeded_router();

        let response = router
            .oneshot(
                axum::http::Request::post("/admin/login")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        serde_json::to_vec(&json!({
                            "username": "citycare",
                            "password": "citycare2024",
                        }))
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(payload["user"]["role"], json!("Administrator"));
    }

    #[tokio::test]
    async fn admin_login_rejects_bad_credentials() {
        let router = seeded_router();

        let response = router
            .oneshot(
                axum::http::Request::post("/admin/login")
                    .header(axum::http::header::CONTENT_TYPE, "application/json")
                    .body(axum::body::Body::from(
                        serde_json::to_vec(&json!({
                            "username": "admin",
                            "password": "wrong",
                        }))
                        .unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn csv_export_route_serves_the_ledger() {
        let router = seeded_router();

        let response = router
            .oneshot(
                axum::http::Request::get("/api/admin/reports/export")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/csv"));

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body reads");
        let csv = String::from_utf8(bytes.to_vec()).expect("csv is utf-8");
        assert_eq!(csv.trim_end().lines().count(), 4);
    }
}
