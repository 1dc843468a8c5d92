use super::common::*;
use std::sync::Arc;

use crate::workflows::recruitment::applicants::domain::{ApplicantId, ApplicantStatus, NoteDraft};
use crate::workflows::recruitment::applicants::intake::IntakeViolation;
use crate::workflows::recruitment::applicants::repository::RepositoryError;
use crate::workflows::recruitment::applicants::{
    ApplicantFilter, RecruitmentService, RecruitmentServiceError,
};
use crate::workflows::recruitment::domain::SlotId;

fn draft(content: &str) -> NoteDraft {
    NoteDraft {
        author_id: "staff-1".to_string(),
        author_name: "Jordan Reviewer".to_string(),
        content: content.to_string(),
    }
}

#[test]
fn submit_stores_a_normalized_applied_record() {
    let (service, repository) = build_service(Vec::new(), catalog());

    let stored = service
        .submit(submission("Ana@Example.EDU"))
        .expect("submission accepted");

    assert_eq!(stored.status, ApplicantStatus::Applied);
    assert_eq!(stored.email, "ana@example.edu");
    assert_eq!(stored.first_name, "Ana");
    assert_eq!(stored.graduation_year, Some(2026));
    assert_eq!(stored.assigned_slot, None);
    assert_eq!(
        stored.available_slots,
        vec![SlotId::new("tue-pm"), SlotId::new("mon-am")]
    );
    assert_eq!(repository.stored(&stored.id.0), stored);
}

#[test]
fn submit_propagates_intake_violations() {
    let (service, repository) = build_service(Vec::new(), catalog());
    let mut thin = submission("ana@example.edu");
    thin.available_slots = vec![SlotId::new("mon-am")];

    match service.submit(thin) {
        Err(RecruitmentServiceError::Intake(IntakeViolation::NotEnoughAvailability {
            required: 2,
            provided: 1,
        })) => {}
        other => panic!("expected availability violation, got {other:?}"),
    }
    assert!(repository.snapshot().is_empty());
}

#[test]
fn resubmission_keeps_the_id_and_restarts_the_pipeline() {
    let (service, repository) = build_service(Vec::new(), catalog());
    let first = service
        .submit(submission("ana@example.edu"))
        .expect("first submission");
    service
        .transition(&first.id, ApplicantStatus::Interviewing)
        .expect("advance to interviewing");
    service
        .add_note(&first.id, draft("Strong portfolio"))
        .expect("note added");

    let mut revised = submission("ANA@example.edu");
    revised.major = "Mathematics".to_string();
    let second = service.submit(revised).expect("resubmission accepted");

    assert_eq!(second.id, first.id);
    assert_eq!(second.status, ApplicantStatus::Applied);
    assert_eq!(second.major, "Mathematics");
    assert!(second.notes.is_empty());
    assert_eq!(repository.snapshot().len(), 1);
}

#[test]
fn get_propagates_not_found() {
    let (service, _) = build_service(Vec::new(), catalog());

    match service.get(&ApplicantId("missing".to_string())) {
        Err(RecruitmentServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn repository_outages_surface_as_repository_errors() {
    let service = RecruitmentService::new(
        Arc::new(UnavailableApplicants),
        Arc::new(MemorySlots(catalog())),
        policy(),
    );

    match service.submit(submission("ana@example.edu")) {
        Err(RecruitmentServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected unavailable repository, got {other:?}"),
    }
}

#[test]
fn list_filters_by_status_and_search_newest_first() {
    let mut economist = interviewing("c", &["mon-am"], 30);
    economist.major = "Economics".to_string();
    let (service, _) = build_service(
        vec![
            interviewing("a", &["mon-am"], 0),
            applicant("b", ApplicantStatus::Applied, &["mon-am"], 10),
            economist,
        ],
        catalog(),
    );

    let everyone: Vec<_> = service
        .list(&ApplicantFilter::default())
        .expect("list")
        .into_iter()
        .map(|applicant| applicant.id.0)
        .collect();
    assert_eq!(everyone, vec!["c", "b", "a"]);

    let interviewing_only: Vec<_> = service
        .list(&ApplicantFilter {
            status: Some(ApplicantStatus::Interviewing),
            search: None,
        })
        .expect("list")
        .into_iter()
        .map(|applicant| applicant.id.0)
        .collect();
    assert_eq!(interviewing_only, vec!["c", "a"]);

    let searched: Vec<_> = service
        .list(&ApplicantFilter {
            status: None,
            search: Some("  ECONOM ".to_string()),
        })
        .expect("list")
        .into_iter()
        .map(|applicant| applicant.id.0)
        .collect();
    assert_eq!(searched, vec!["c"]);
}

#[test]
fn transition_rejects_skipping_the_interview() {
    let (service, repository) = build_service(
        vec![applicant("a", ApplicantStatus::Applied, &["mon-am"], 0)],
        catalog(),
    );

    match service.transition(&ApplicantId("a".to_string()), ApplicantStatus::Accepted) {
        Err(RecruitmentServiceError::InvalidTransition { from, to, .. }) => {
            assert_eq!(from, "applied");
            assert_eq!(to, "accepted");
        }
        other => panic!("expected invalid transition, got {other:?}"),
    }
    assert_eq!(repository.stored("a").status, ApplicantStatus::Applied);
}

#[test]
fn add_note_trims_content_and_rejects_blank_notes() {
    let (service, repository) = build_service(vec![interviewing("a", &["mon-am"], 0)], catalog());
    let id = ApplicantId("a".to_string());

    assert!(matches!(
        service.add_note(&id, draft("   ")),
        Err(RecruitmentServiceError::EmptyNote)
    ));

    let note = service
        .add_note(&id, draft("  Follow up on availability  "))
        .expect("note added");
    assert_eq!(note.content, "Follow up on availability");
    assert_eq!(repository.stored("a").notes, vec![note]);
}

#[test]
fn assign_enforces_declared_availability_and_capacity() {
    let mut seated = interviewing("seated", &["mon-am"], 0);
    seated.status = ApplicantStatus::Scheduled;
    seated.assigned_slot = Some(SlotId::new("mon-am"));
    let (service, repository) = build_service(
        vec![seated, interviewing("a", &["mon-am", "tue-pm"], 5)],
        catalog(),
    );
    let id = ApplicantId("a".to_string());

    assert!(matches!(
        service.assign(&id, &SlotId::new("wed-am")),
        Err(RecruitmentServiceError::SlotNotOffered { .. })
    ));
    assert!(matches!(
        service.assign(&id, &SlotId::new("fri-pm")),
        Err(RecruitmentServiceError::UnknownSlot(_))
    ));
    assert!(matches!(
        service.assign(&id, &SlotId::new("mon-am")),
        Err(RecruitmentServiceError::SlotFull(_))
    ));

    let assigned = service
        .assign(&id, &SlotId::new("tue-pm"))
        .expect("tuesday has room");
    assert_eq!(assigned.status, ApplicantStatus::Scheduled);
    assert_eq!(
        repository.stored("a").assigned_slot,
        Some(SlotId::new("tue-pm"))
    );

    assert!(matches!(
        service.assign(&id, &SlotId::new("tue-pm")),
        Err(RecruitmentServiceError::InvalidTransition { .. })
    ));
}

#[test]
fn unassign_returns_the_applicant_to_the_queue() {
    let (service, repository) = build_service(
        vec![interviewing("a", &["mon-am"], 0)],
        catalog(),
    );
    let id = ApplicantId("a".to_string());

    assert!(matches!(
        service.unassign(&id),
        Err(RecruitmentServiceError::NotScheduled(_))
    ));

    service
        .assign(&id, &SlotId::new("mon-am"))
        .expect("assign");
    let released = service.unassign(&id).expect("unassign");

    assert_eq!(released.status, ApplicantStatus::Interviewing);
    assert_eq!(released.assigned_slot, None);
    assert_eq!(repository.stored("a"), released);
}
