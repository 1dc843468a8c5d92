//! Applicant intake, pipeline transitions, and the scheduling service facade.

pub mod domain;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Applicant, ApplicantId, ApplicantStatus, ApplicantSummary, ApplicationSubmission,
    FreeResponseAnswer, FreeResponseQuestion, Note, NoteDraft, SubmittedAnswer,
};
pub use intake::{IntakePolicy, IntakeViolation};
pub use repository::{ApplicantRepository, ApplicantView, RepositoryError, SlotRepository};
pub use router::recruitment_router;
pub use service::{
    ApplicantFilter, CommitReport, PlacementFailure, RecruitmentService,
    RecruitmentServiceError, ScheduledPlacement,
};
