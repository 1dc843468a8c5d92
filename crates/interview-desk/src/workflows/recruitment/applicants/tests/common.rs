use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveTime, Weekday};
use serde_json::Value;

use crate::workflows::recruitment::applicants::domain::{
    Applicant, ApplicantId, ApplicantStatus, ApplicationSubmission, FreeResponseQuestion,
    SubmittedAnswer,
};
use crate::workflows::recruitment::applicants::intake::IntakePolicy;
use crate::workflows::recruitment::applicants::repository::{
    ApplicantRepository, RepositoryError, SlotRepository,
};
use crate::workflows::recruitment::applicants::{recruitment_router, RecruitmentService};
use crate::workflows::recruitment::domain::{SlotId, TimeSlot};
use crate::workflows::recruitment::outreach::EmailTemplates;

pub(super) use crate::workflows::recruitment::scheduling::tests::applicant;

pub(super) fn policy() -> IntakePolicy {
    IntakePolicy {
        cycle_name: "Spring 2025".to_string(),
        applications_open: true,
        minimum_available_slots: 2,
        questions: vec![FreeResponseQuestion {
            id: "why".to_string(),
            question: "Why do you want to join?".to_string(),
            max_chars: 120,
        }],
        templates: EmailTemplates {
            interview: "See you at {{slot}} in {{location}}.".to_string(),
            rejected: "Thanks for applying.".to_string(),
            rejected_after_interview: "Thanks for interviewing.".to_string(),
            accepted: "Welcome!".to_string(),
        },
    }
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

pub(super) fn time_slot(id: &str, day: Weekday, start: u32, max_capacity: u32) -> TimeSlot {
    TimeSlot {
        id: SlotId::new(id),
        day_of_week: day,
        start_time: time(start, 0),
        end_time: time(start + 1, 0),
        display_label: id.to_uppercase(),
        max_capacity,
        is_active: true,
    }
}

/// Monday morning seats one, Tuesday afternoon two, Wednesday morning one.
pub(super) fn catalog() -> Vec<TimeSlot> {
    vec![
        time_slot("mon-am", Weekday::Mon, 9, 1),
        time_slot("tue-pm", Weekday::Tue, 14, 2),
        time_slot("wed-am", Weekday::Wed, 10, 1),
    ]
}

pub(super) fn submission(email: &str) -> ApplicationSubmission {
    ApplicationSubmission {
        first_name: " Ana ".to_string(),
        last_name: "Lopez".to_string(),
        email: email.to_string(),
        phone: "555-0100".to_string(),
        major: "Economics".to_string(),
        graduation_year: 2026,
        resume_url: Some("https://files.example.edu/ana.pdf".to_string()),
        frq_responses: vec![SubmittedAnswer {
            question_id: "why".to_string(),
            answer: "  I like building things with people.  ".to_string(),
        }],
        available_slots: vec![
            SlotId::new("tue-pm"),
            SlotId::new("mon-am"),
            SlotId::new("tue-pm"),
        ],
    }
}

pub(super) fn interviewing(id: &str, available: &[&str], applied_offset: i64) -> Applicant {
    applicant(id, ApplicantStatus::Interviewing, available, applied_offset)
}

type PendingEdit = Box<dyn FnOnce(&mut Applicant) + Send>;

#[derive(Default, Clone)]
pub(super) struct MemoryApplicants {
    records: Arc<Mutex<BTreeMap<ApplicantId, Applicant>>>,
    failing_updates: Arc<Mutex<HashSet<ApplicantId>>>,
    edits_after_list: Arc<Mutex<Vec<(ApplicantId, PendingEdit)>>>,
}

impl MemoryApplicants {
    pub(super) fn seeded(applicants: Vec<Applicant>) -> Self {
        let repository = Self::default();
        {
            let mut guard = repository.records.lock().expect("repository mutex poisoned");
            for applicant in applicants {
                guard.insert(applicant.id.clone(), applicant);
            }
        }
        repository
    }

    pub(super) fn fail_updates_for(&self, id: &str) {
        self.failing_updates
            .lock()
            .expect("failure mutex poisoned")
            .insert(ApplicantId(id.to_string()));
    }

    pub(super) fn clear_failures(&self) {
        self.failing_updates
            .lock()
            .expect("failure mutex poisoned")
            .clear();
    }

    /// Change a stored record right after the next `list()` snapshot is taken, the way a
    /// staff edit landing between a read and a write would.
    pub(super) fn edit_after_next_list(
        &self,
        id: &str,
        edit: impl FnOnce(&mut Applicant) + Send + 'static,
    ) {
        self.edits_after_list
            .lock()
            .expect("edit mutex poisoned")
            .push((ApplicantId(id.to_string()), Box::new(edit)));
    }

    pub(super) fn stored(&self, id: &str) -> Applicant {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .get(&ApplicantId(id.to_string()))
            .cloned()
            .expect("record present")
    }

    pub(super) fn snapshot(&self) -> Vec<Applicant> {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .values()
            .cloned()
            .collect()
    }
}

impl ApplicantRepository for MemoryApplicants {
    fn insert(&self, applicant: Applicant) -> Result<Applicant, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&applicant.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(applicant.id.clone(), applicant.clone());
        Ok(applicant)
    }

    fn update(&self, applicant: Applicant) -> Result<(), RepositoryError> {
        if self
            .failing_updates
            .lock()
            .expect("failure mutex poisoned")
            .contains(&applicant.id)
        {
            return Err(RepositoryError::Unavailable("write timed out".to_string()));
        }
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if !guard.contains_key(&applicant.id) {
            return Err(RepositoryError::NotFound);
        }
        guard.insert(applicant.id.clone(), applicant);
        Ok(())
    }

    fn fetch(&self, id: &ApplicantId) -> Result<Option<Applicant>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Applicant>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|applicant| applicant.email == email)
            .cloned())
    }

    fn list(&self) -> Result<Vec<Applicant>, RepositoryError> {
        let snapshot = self.snapshot();
        let edits: Vec<_> = self
            .edits_after_list
            .lock()
            .expect("edit mutex poisoned")
            .drain(..)
            .collect();
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        for (id, edit) in edits {
            if let Some(record) = guard.get_mut(&id) {
                edit(record);
            }
        }
        Ok(snapshot)
    }
}

pub(super) struct MemorySlots(pub(super) Vec<TimeSlot>);

impl SlotRepository for MemorySlots {
    fn active(&self) -> Result<Vec<TimeSlot>, RepositoryError> {
        Ok(self.0.iter().filter(|slot| slot.is_active).cloned().collect())
    }
}

pub(super) struct UnavailableApplicants;

impl ApplicantRepository for UnavailableApplicants {
    fn insert(&self, _applicant: Applicant) -> Result<Applicant, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _applicant: Applicant) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicantId) -> Result<Option<Applicant>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_email(&self, _email: &str) -> Result<Option<Applicant>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Applicant>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) type MemoryService = RecruitmentService<MemoryApplicants, MemorySlots>;

pub(super) fn build_service(
    applicants: Vec<Applicant>,
    slots: Vec<TimeSlot>,
) -> (MemoryService, Arc<MemoryApplicants>) {
    let repository = Arc::new(MemoryApplicants::seeded(applicants));
    let service = RecruitmentService::new(repository.clone(), Arc::new(MemorySlots(slots)), policy());
    (service, repository)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    recruitment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
