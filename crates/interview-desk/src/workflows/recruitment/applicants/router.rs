use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicantId, ApplicantStatus, ApplicationSubmission, NoteDraft};
use super::repository::{ApplicantRepository, RepositoryError, SlotRepository};
use super::service::{ApplicantFilter, RecruitmentService, RecruitmentServiceError};
use crate::workflows::recruitment::domain::SlotId;

type SharedService<A, S> = Arc<RecruitmentService<A, S>>;

#[derive(Debug, Deserialize)]
pub(crate) struct StatusChange {
    pub(crate) status: ApplicantStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SlotChoice {
    pub(crate) slot_id: SlotId,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OutreachQuery {
    #[serde(default)]
    pub(crate) location: Option<String>,
}

/// Router exposing intake, pipeline management, and scheduling endpoints.
pub fn recruitment_router<A, S>(service: SharedService<A, S>) -> Router
where
    A: ApplicantRepository + 'static,
    S: SlotRepository + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(submit_handler::<A, S>))
        .route("/api/v1/applicants", get(list_handler::<A, S>))
        .route(
            "/api/v1/applicants/:applicant_id",
            get(applicant_handler::<A, S>),
        )
        .route(
            "/api/v1/applicants/:applicant_id/status",
            post(status_handler::<A, S>),
        )
        .route(
            "/api/v1/applicants/:applicant_id/notes",
            post(note_handler::<A, S>),
        )
        .route(
            "/api/v1/applicants/:applicant_id/slot",
            axum::routing::put(assign_handler::<A, S>).delete(unassign_handler::<A, S>),
        )
        .route("/api/v1/schedule/slots", get(roster_handler::<A, S>))
        .route(
            "/api/v1/schedule/auto-assign/preview",
            post(preview_handler::<A, S>),
        )
        .route(
            "/api/v1/schedule/auto-assign/commit",
            post(commit_handler::<A, S>),
        )
        .route("/api/v1/outreach", get(outreach_handler::<A, S>))
        .with_state(service)
}

pub(crate) fn error_response(error: RecruitmentServiceError) -> Response {
    let status = match &error {
        RecruitmentServiceError::Intake(_) | RecruitmentServiceError::EmptyNote => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        RecruitmentServiceError::Repository(RepositoryError::NotFound)
        | RecruitmentServiceError::UnknownSlot(_) => StatusCode::NOT_FOUND,
        RecruitmentServiceError::Repository(RepositoryError::Conflict)
        | RecruitmentServiceError::InvalidTransition { .. }
        | RecruitmentServiceError::SlotNotOffered { .. }
        | RecruitmentServiceError::SlotFull(_)
        | RecruitmentServiceError::NotScheduled(_)
        | RecruitmentServiceError::NoLongerWaiting(_)
        | RecruitmentServiceError::NoActiveSlots
        | RecruitmentServiceError::NoEligibleApplicants => StatusCode::CONFLICT,
        RecruitmentServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

pub(crate) async fn submit_handler<A, S>(
    State(service): State<SharedService<A, S>>,
    Json(submission): Json<ApplicationSubmission>,
) -> Response
where
    A: ApplicantRepository + 'static,
    S: SlotRepository + 'static,
{
    match service.submit(submission) {
        Ok(applicant) => (StatusCode::ACCEPTED, Json(applicant.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<A, S>(
    State(service): State<SharedService<A, S>>,
    Query(filter): Query<ApplicantFilter>,
) -> Response
where
    A: ApplicantRepository + 'static,
    S: SlotRepository + 'static,
{
    match service.list(&filter) {
        Ok(applicants) => {
            let views: Vec<_> = applicants.iter().map(|applicant| applicant.view()).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn applicant_handler<A, S>(
    State(service): State<SharedService<A, S>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    A: ApplicantRepository + 'static,
    S: SlotRepository + 'static,
{
    match service.get(&ApplicantId(applicant_id)) {
        Ok(applicant) => (StatusCode::OK, Json(applicant)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<A, S>(
    State(service): State<SharedService<A, S>>,
    Path(applicant_id): Path<String>,
    Json(change): Json<StatusChange>,
) -> Response
where
    A: ApplicantRepository + 'static,
    S: SlotRepository + 'static,
{
    match service.transition(&ApplicantId(applicant_id), change.status) {
        Ok(applicant) => (StatusCode::OK, Json(applicant.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn note_handler<A, S>(
    State(service): State<SharedService<A, S>>,
    Path(applicant_id): Path<String>,
    Json(draft): Json<NoteDraft>,
) -> Response
where
    A: ApplicantRepository + 'static,
    S: SlotRepository + 'static,
{
    match service.add_note(&ApplicantId(applicant_id), draft) {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assign_handler<A, S>(
    State(service): State<SharedService<A, S>>,
    Path(applicant_id): Path<String>,
    Json(choice): Json<SlotChoice>,
) -> Response
where
    A: ApplicantRepository + 'static,
    S: SlotRepository + 'static,
{
    match service.assign(&ApplicantId(applicant_id), &choice.slot_id) {
        Ok(applicant) => (StatusCode::OK, Json(applicant.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn unassign_handler<A, S>(
    State(service): State<SharedService<A, S>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    A: ApplicantRepository + 'static,
    S: SlotRepository + 'static,
{
    match service.unassign(&ApplicantId(applicant_id)) {
        Ok(applicant) => (StatusCode::OK, Json(applicant.view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn roster_handler<A, S>(State(service): State<SharedService<A, S>>) -> Response
where
    A: ApplicantRepository + 'static,
    S: SlotRepository + 'static,
{
    match service.roster() {
        Ok(roster) => (StatusCode::OK, Json(roster)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn preview_handler<A, S>(State(service): State<SharedService<A, S>>) -> Response
where
    A: ApplicantRepository + 'static,
    S: SlotRepository + 'static,
{
    match service.preview_auto_assignment() {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn commit_handler<A, S>(State(service): State<SharedService<A, S>>) -> Response
where
    A: ApplicantRepository + 'static,
    S: SlotRepository + 'static,
{
    match service.commit_auto_assignment() {
        Ok(report) => {
            let status = if report.is_partial() {
                StatusCode::MULTI_STATUS
            } else {
                StatusCode::OK
            };
            (status, Json(report)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn outreach_handler<A, S>(
    State(service): State<SharedService<A, S>>,
    Query(query): Query<OutreachQuery>,
) -> Response
where
    A: ApplicantRepository + 'static,
    S: SlotRepository + 'static,
{
    match service.outreach(query.location.as_deref()) {
        Ok(groups) => (StatusCode::OK, Json(groups)).into_response(),
        Err(error) => error_response(error),
    }
}
