use crate::cli::ServeArgs;
use crate::infra::{
    seed_sample_data, AppState, InMemoryCommunityRepository, InMemoryReportRepository,
};
use crate::routes::compose_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use citycare::admin::AdminDirectory;
use citycare::assistant::{AssistantGateway, RemoteChatBackend};
use citycare::community::CommunityService;
use citycare::config::AppConfig;
use citycare::error::AppError;
use citycare::reports::ReportService;
use citycare::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let report_repository = Arc::new(InMemoryReportRepository::default());
    let community_repository = Arc::new(InMemoryCommunityRepository::default());
    seed_sample_data(&report_repository, &community_repository);

    let report_service = Arc::new(ReportService::new(report_repository));
    let community_service = Arc::new(CommunityService::new(community_repository));
    let directory = Arc::new(AdminDirectory::builtin());

    let gateway = match &config.assistant.upstream_url {
        Some(url) => {
            let backend =
                RemoteChatBackend::new(url.clone(), config.assistant.request_timeout())?;
            info!(upstream = %url, "chat upstream configured");
            Arc::new(AssistantGateway::new(Arc::new(backend)))
        }
        None => Arc::new(AssistantGateway::<RemoteChatBackend>::offline()),
    };

    let app = compose_routes(report_service, community_service, gateway, directory)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "citycare service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
