use crate::cli::ServeArgs;
use crate::infra::{default_policy, default_slots, AppState, InMemoryApplicantRepository, InMemorySlotRepository};
use crate::routes::with_recruitment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use interview_desk::config::AppConfig;
use interview_desk::error::AppError;
use interview_desk::telemetry;
use interview_desk::workflows::recruitment::applicants::RecruitmentService;
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

    let applicants = Arc::new(InMemoryApplicantRepository::default());
    let slots = Arc::new(InMemorySlotRepository::new(default_slots()));
    let policy = default_policy(&config.recruitment);
    let recruitment_service = Arc::new(RecruitmentService::new(applicants, slots, policy));

    let app = with_recruitment_routes(recruitment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        cycle = %config.recruitment.cycle_name,
        applications_open = config.recruitment.applications_open,
        "interview desk ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
