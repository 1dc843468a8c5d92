use crate::infra::AppState;
use crate::schedule::ScheduleSnapshot;
use axum::body::Bytes;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use interview_desk::error::AppError;
use interview_desk::workflows::recruitment::applicants::{
    recruitment_router, ApplicantRepository, RecruitmentService, SlotRepository,
};
use interview_desk::workflows::recruitment::scheduling::AssignmentResult;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_recruitment_routes<A, S>(service: Arc<RecruitmentService<A, S>>) -> axum::Router
where
    A: ApplicantRepository + 'static,
    S: SlotRepository + 'static,
{
    recruitment_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/schedule/snapshot",
            axum::routing::post(snapshot_endpoint),
        )
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

/// Schedule an uploaded snapshot without touching stored applicants.
pub(crate) async fn snapshot_endpoint(body: Bytes) -> Result<Json<AssignmentResult>, AppError> {
    let snapshot = ScheduleSnapshot::from_slice(&body)?;
    Ok(Json(snapshot.assign()))
}
