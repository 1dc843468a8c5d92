use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{
    Applicant, ApplicantId, ApplicantStatus, ApplicationSubmission, Note, NoteDraft,
};
use super::intake::{IntakeGuard, IntakePolicy, IntakeViolation};
use super::repository::{ApplicantRepository, RepositoryError, SlotRepository};
use crate::workflows::recruitment::domain::SlotId;
use crate::workflows::recruitment::outreach::{build_outreach, OutreachGroup};
use crate::workflows::recruitment::scheduling::{
    auto_assign_interviews, build_roster, eligible_applicants, AssignmentResult,
    SlotCapacityState, SlotRoster,
};

/// Service composing intake validation, applicant storage, and interview scheduling.
pub struct RecruitmentService<A, S> {
    applicants: Arc<A>,
    slots: Arc<S>,
    policy: Arc<IntakePolicy>,
}

static APPLICANT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_applicant_id() -> ApplicantId {
    let id = APPLICANT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicantId(format!("applicant-{id:06}"))
}

/// Dashboard filter; `search` matches name, e-mail, or major case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApplicantFilter {
    #[serde(default)]
    pub status: Option<ApplicantStatus>,
    #[serde(default, rename = "q")]
    pub search: Option<String>,
}

impl ApplicantFilter {
    fn matches(&self, applicant: &Applicant) -> bool {
        if let Some(status) = self.status {
            if applicant.status != status {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                [
                    applicant.full_name(),
                    applicant.email.clone(),
                    applicant.major.clone(),
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            }
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledPlacement {
    pub applicant_id: ApplicantId,
    pub slot_id: SlotId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementFailure {
    pub applicant_id: ApplicantId,
    pub slot_id: SlotId,
    pub reason: String,
}

/// Outcome of persisting an auto-assignment run, one entry per applicant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitReport {
    pub scheduled: Vec<ScheduledPlacement>,
    pub failed: Vec<PlacementFailure>,
    pub unplaceable: Vec<ApplicantId>,
}

impl CommitReport {
    pub fn is_partial(&self) -> bool {
        !self.failed.is_empty()
    }
}

impl<A, S> RecruitmentService<A, S>
where
    A: ApplicantRepository + 'static,
    S: SlotRepository + 'static,
{
    pub fn new(applicants: Arc<A>, slots: Arc<S>, policy: IntakePolicy) -> Self {
        Self {
            applicants,
            slots,
            policy: Arc::new(policy),
        }
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    /// Accept an application. A resubmission from the same e-mail replaces the earlier
    /// record and starts the pipeline over.
    pub fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<Applicant, RecruitmentServiceError> {
        let active_slots = self.slots.active()?;
        let validated = IntakeGuard::new(&self.policy).validate(submission, &active_slots)?;
        let existing = self.applicants.find_by_email(&validated.email)?;
        let now = Utc::now();

        let applicant = Applicant {
            id: existing
                .as_ref()
                .map(|previous| previous.id.clone())
                .unwrap_or_else(next_applicant_id),
            first_name: validated.first_name,
            last_name: validated.last_name,
            email: validated.email,
            phone: validated.phone,
            major: validated.major,
            graduation_year: Some(validated.graduation_year),
            resume_url: validated.resume_url,
            frq_responses: validated.frq_responses,
            available_slots: validated.available_slots,
            status: ApplicantStatus::Applied,
            assigned_slot: None,
            notes: Vec::new(),
            applied_date: now,
            last_updated: now,
        };

        if existing.is_some() {
            self.applicants.update(applicant.clone())?;
            info!(applicant_id = %applicant.id, "application resubmitted");
            Ok(applicant)
        } else {
            let stored = self.applicants.insert(applicant)?;
            info!(applicant_id = %stored.id, "application received");
            Ok(stored)
        }
    }

    pub fn get(&self, id: &ApplicantId) -> Result<Applicant, RecruitmentServiceError> {
        let applicant = self
            .applicants
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(applicant)
    }

    /// Matching applicants, newest application first.
    pub fn list(&self, filter: &ApplicantFilter) -> Result<Vec<Applicant>, RecruitmentServiceError> {
        let mut applicants: Vec<Applicant> = self
            .applicants
            .list()?
            .into_iter()
            .filter(|applicant| filter.matches(applicant))
            .collect();
        applicants.sort_by(|a, b| {
            b.applied_date
                .cmp(&a.applied_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(applicants)
    }

    /// Move an applicant along the pipeline.
    pub fn transition(
        &self,
        id: &ApplicantId,
        next: ApplicantStatus,
    ) -> Result<Applicant, RecruitmentServiceError> {
        let mut applicant = self.get(id)?;
        if !applicant.status.can_transition_to(next) {
            return Err(RecruitmentServiceError::InvalidTransition {
                id: applicant.id,
                from: applicant.status.label(),
                to: next.label(),
            });
        }

        applicant.status = next;
        applicant.last_updated = Utc::now();
        self.applicants.update(applicant.clone())?;
        info!(applicant_id = %applicant.id, status = next.label(), "applicant status updated");
        Ok(applicant)
    }

    pub fn add_note(
        &self,
        id: &ApplicantId,
        draft: NoteDraft,
    ) -> Result<Note, RecruitmentServiceError> {
        let content = draft.content.trim();
        if content.is_empty() {
            return Err(RecruitmentServiceError::EmptyNote);
        }

        let mut applicant = self.get(id)?;
        let now = Utc::now();
        let note = Note {
            author_id: draft.author_id,
            author_name: draft.author_name,
            content: content.to_string(),
            created_at: now,
        };
        applicant.notes.push(note.clone());
        applicant.last_updated = now;
        self.applicants.update(applicant)?;
        Ok(note)
    }

    /// Manually seat an interviewing applicant in one of the slots they declared.
    pub fn assign(
        &self,
        id: &ApplicantId,
        slot_id: &SlotId,
    ) -> Result<Applicant, RecruitmentServiceError> {
        let mut applicant = self.get(id)?;
        if !applicant.status.awaits_interview() || applicant.assigned_slot.is_some() {
            return Err(RecruitmentServiceError::InvalidTransition {
                id: applicant.id,
                from: applicant.status.label(),
                to: ApplicantStatus::Scheduled.label(),
            });
        }

        let active_slots = self.slots.active()?;
        if !active_slots.iter().any(|slot| &slot.id == slot_id) {
            return Err(RecruitmentServiceError::UnknownSlot(slot_id.clone()));
        }
        if !applicant.offers_slot(slot_id) {
            return Err(RecruitmentServiceError::SlotNotOffered {
                applicant: applicant.id,
                slot: slot_id.clone(),
            });
        }

        let everyone = self.applicants.list()?;
        let capacity = SlotCapacityState::from_snapshot(&everyone, &active_slots);
        if !capacity.has_room(slot_id) {
            return Err(RecruitmentServiceError::SlotFull(slot_id.clone()));
        }

        applicant.assigned_slot = Some(slot_id.clone());
        applicant.status = ApplicantStatus::Scheduled;
        applicant.last_updated = Utc::now();
        self.applicants.update(applicant.clone())?;
        info!(applicant_id = %applicant.id, slot_id = %slot_id, "interview slot assigned");
        Ok(applicant)
    }

    /// Release a scheduled applicant's seat and send them back to the interview queue.
    pub fn unassign(&self, id: &ApplicantId) -> Result<Applicant, RecruitmentServiceError> {
        let mut applicant = self.get(id)?;
        if applicant.status != ApplicantStatus::Scheduled || applicant.assigned_slot.is_none() {
            return Err(RecruitmentServiceError::NotScheduled(applicant.id));
        }

        applicant.assigned_slot = None;
        applicant.status = ApplicantStatus::Interviewing;
        applicant.last_updated = Utc::now();
        self.applicants.update(applicant.clone())?;
        info!(applicant_id = %applicant.id, "interview slot released");
        Ok(applicant)
    }

    /// Compute an auto-assignment against the current records without writing anything.
    pub fn preview_auto_assignment(&self) -> Result<AssignmentResult, RecruitmentServiceError> {
        let applicants = self.applicants.list()?;
        let slots = self.slots.active()?;

        if slots.is_empty() {
            return Err(RecruitmentServiceError::NoActiveSlots);
        }
        if eligible_applicants(&applicants).is_empty() {
            return Err(RecruitmentServiceError::NoEligibleApplicants);
        }

        Ok(auto_assign_interviews(&applicants, &slots))
    }

    /// Recompute the assignment and persist each placement on its own. A failed update
    /// is reported and skipped; the rest of the batch still goes through.
    pub fn commit_auto_assignment(&self) -> Result<CommitReport, RecruitmentServiceError> {
        let result = self.preview_auto_assignment()?;
        let mut report = CommitReport {
            unplaceable: result.unplaceable_ids(),
            ..CommitReport::default()
        };

        for placement in result.placed {
            let applicant_id = placement.applicant.id;
            let slot_id = placement.slot.id;

            match self.schedule_placement(&applicant_id, &slot_id) {
                Ok(()) => report.scheduled.push(ScheduledPlacement {
                    applicant_id,
                    slot_id,
                }),
                Err(error) => {
                    warn!(
                        applicant_id = %applicant_id,
                        slot_id = %slot_id,
                        %error,
                        "failed to persist interview placement"
                    );
                    report.failed.push(PlacementFailure {
                        applicant_id,
                        slot_id,
                        reason: error.to_string(),
                    });
                }
            }
        }

        info!(
            scheduled = report.scheduled.len(),
            failed = report.failed.len(),
            unplaceable = report.unplaceable.len(),
            "auto-assignment committed"
        );
        Ok(report)
    }

    /// Apply one placement to the stored record, touching only the scheduling fields.
    /// Records that changed state since the preview are left alone.
    fn schedule_placement(
        &self,
        id: &ApplicantId,
        slot_id: &SlotId,
    ) -> Result<(), RecruitmentServiceError> {
        let mut live = self.get(id)?;
        if !live.status.awaits_interview() || live.assigned_slot.is_some() {
            return Err(RecruitmentServiceError::NoLongerWaiting(live.id));
        }

        live.assigned_slot = Some(slot_id.clone());
        live.status = ApplicantStatus::Scheduled;
        live.last_updated = Utc::now();
        self.applicants.update(live)?;
        Ok(())
    }

    pub fn roster(&self) -> Result<Vec<SlotRoster>, RecruitmentServiceError> {
        let applicants = self.applicants.list()?;
        let slots = self.slots.active()?;
        Ok(build_roster(&applicants, &slots))
    }

    pub fn outreach(
        &self,
        location: Option<&str>,
    ) -> Result<Vec<OutreachGroup>, RecruitmentServiceError> {
        let applicants = self.applicants.list()?;
        let slots = self.slots.active()?;
        Ok(build_outreach(
            &applicants,
            &slots,
            &self.policy.templates,
            location,
        ))
    }
}

/// Error raised by the recruitment service.
#[derive(Debug, thiserror::Error)]
pub enum RecruitmentServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("cannot move applicant {id} from {from} to {to}")]
    InvalidTransition {
        id: ApplicantId,
        from: &'static str,
        to: &'static str,
    },
    #[error("note content must not be empty")]
    EmptyNote,
    #[error("time slot {0} is not open for interviews")]
    UnknownSlot(SlotId),
    #[error("applicant {applicant} did not list time slot {slot} as available")]
    SlotNotOffered { applicant: ApplicantId, slot: SlotId },
    #[error("time slot {0} is full")]
    SlotFull(SlotId),
    #[error("applicant {0} has no scheduled interview")]
    NotScheduled(ApplicantId),
    #[error("applicant {0} is no longer waiting for an interview slot")]
    NoLongerWaiting(ApplicantId),
    #[error("no active time slots are configured")]
    NoActiveSlots,
    #[error("no applicants are waiting for an interview slot")]
    NoEligibleApplicants,
}
