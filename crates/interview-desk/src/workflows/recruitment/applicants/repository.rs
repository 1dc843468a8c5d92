use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{Applicant, ApplicantId};
use crate::workflows::recruitment::domain::{SlotId, TimeSlot};

/// Storage abstraction for applicant records so the service can be exercised in isolation.
pub trait ApplicantRepository: Send + Sync {
    fn insert(&self, applicant: Applicant) -> Result<Applicant, RepositoryError>;
    /// Replace the stored record with the same id. Idempotent for identical input.
    fn update(&self, applicant: Applicant) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicantId) -> Result<Option<Applicant>, RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Applicant>, RepositoryError>;
    fn list(&self) -> Result<Vec<Applicant>, RepositoryError>;
}

/// Read access to the interview slot catalog.
pub trait SlotRepository: Send + Sync {
    /// Slots currently open for scheduling.
    fn active(&self) -> Result<Vec<TimeSlot>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Listing view returned by intake and search endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicantView {
    pub applicant_id: ApplicantId,
    pub name: String,
    pub email: String,
    pub major: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_slot: Option<SlotId>,
    pub available_slots: usize,
    pub note_count: usize,
    pub applied_date: DateTime<Utc>,
}

impl Applicant {
    pub fn view(&self) -> ApplicantView {
        ApplicantView {
            applicant_id: self.id.clone(),
            name: self.full_name(),
            email: self.email.clone(),
            major: self.major.clone(),
            status: self.status.label(),
            assigned_slot: self.assigned_slot.clone(),
            available_slots: self.available_slots.len(),
            note_count: self.notes.len(),
            applied_date: self.applied_date,
        }
    }
}
