use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::recruitment::domain::SlotId;

/// Identifier wrapper for applicants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub String);

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pipeline stage of an applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicantStatus {
    Applied,
    Interviewing,
    Scheduled,
    Rejected,
    RejectedAfterInterview,
    Accepted,
}

impl ApplicantStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicantStatus::Applied => "applied",
            ApplicantStatus::Interviewing => "interviewing",
            ApplicantStatus::Scheduled => "scheduled",
            ApplicantStatus::Rejected => "rejected",
            ApplicantStatus::RejectedAfterInterview => "rejected_after_interview",
            ApplicantStatus::Accepted => "accepted",
        }
    }

    /// Whether applicants in this stage are waiting for an interview slot.
    pub const fn awaits_interview(self) -> bool {
        match self {
            ApplicantStatus::Interviewing => true,
            ApplicantStatus::Applied
            | ApplicantStatus::Scheduled
            | ApplicantStatus::Rejected
            | ApplicantStatus::RejectedAfterInterview
            | ApplicantStatus::Accepted => false,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            ApplicantStatus::Rejected
                | ApplicantStatus::RejectedAfterInterview
                | ApplicantStatus::Accepted
        )
    }

    /// Staff-driven transitions. Scheduling in and out of `Scheduled` goes through the
    /// slot assignment operations instead.
    pub const fn can_transition_to(self, next: ApplicantStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        matches!(
            (self, next),
            (ApplicantStatus::Applied, ApplicantStatus::Interviewing)
                | (ApplicantStatus::Applied, ApplicantStatus::Rejected)
                | (ApplicantStatus::Interviewing, ApplicantStatus::Rejected)
                | (ApplicantStatus::Scheduled, ApplicantStatus::Accepted)
                | (
                    ApplicantStatus::Scheduled,
                    ApplicantStatus::RejectedAfterInterview
                )
        )
    }
}

/// Staff note attached to an applicant record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub author_id: String,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Free-response question configured for the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeResponseQuestion {
    pub id: String,
    pub question: String,
    pub max_chars: usize,
}

/// Stored answer, keeping the question text as it read at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeResponseAnswer {
    pub question_id: String,
    pub question_text: String,
    pub answer: String,
}

/// Applicant record as persisted by the surrounding system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub graduation_year: Option<u16>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub frq_responses: Vec<FreeResponseAnswer>,
    /// Acceptable slots in the applicant's own order of preference.
    #[serde(default)]
    pub available_slots: Vec<SlotId>,
    pub status: ApplicantStatus,
    #[serde(default)]
    pub assigned_slot: Option<SlotId>,
    #[serde(default)]
    pub notes: Vec<Note>,
    pub applied_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Applicant {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Awaiting an interview, not yet holding a slot, and offering at least one slot.
    pub fn is_eligible_for_auto_assignment(&self) -> bool {
        self.status.awaits_interview()
            && self.assigned_slot.is_none()
            && !self.available_slots.is_empty()
    }

    pub fn offers_slot(&self, slot_id: &SlotId) -> bool {
        self.available_slots.iter().any(|candidate| candidate == slot_id)
    }

    pub fn summary(&self) -> ApplicantSummary {
        ApplicantSummary {
            id: self.id.clone(),
            name: self.full_name(),
            email: self.email.clone(),
            status: self.status.label(),
        }
    }
}

/// Inbound application payload collected by the intake form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub major: String,
    pub graduation_year: u16,
    #[serde(default)]
    pub resume_url: Option<String>,
    /// Answers keyed by question id.
    #[serde(default)]
    pub frq_responses: Vec<SubmittedAnswer>,
    pub available_slots: Vec<SlotId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub answer: String,
}

/// Note content as typed by a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub author_id: String,
    pub author_name: String,
    pub content: String,
}

/// Compact applicant view used by rosters and scheduling responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicantSummary {
    pub id: ApplicantId,
    pub name: String,
    pub email: String,
    pub status: &'static str,
}
