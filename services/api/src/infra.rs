use chrono::{NaiveTime, Weekday};
use interview_desk::config::RecruitmentConfig;
use interview_desk::workflows::recruitment::applicants::{
    Applicant, ApplicantId, ApplicantRepository, FreeResponseQuestion, IntakePolicy,
    RepositoryError, SlotRepository,
};
use interview_desk::workflows::recruitment::outreach::EmailTemplates;
use interview_desk::workflows::recruitment::{SlotId, TimeSlot};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, RwLock};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicantRepository {
    records: Arc<Mutex<HashMap<ApplicantId, Applicant>>>,
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("applicant store lock poisoned".to_string())
}

impl ApplicantRepository for InMemoryApplicantRepository {
    fn insert(&self, applicant: Applicant) -> Result<Applicant, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&applicant.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(applicant.id.clone(), applicant.clone());
        Ok(applicant)
    }

    fn update(&self, applicant: Applicant) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&applicant.id) {
            guard.insert(applicant.id.clone(), applicant);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ApplicantId) -> Result<Option<Applicant>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Applicant>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard
            .values()
            .find(|applicant| applicant.email == email)
            .cloned())
    }

    fn list(&self) -> Result<Vec<Applicant>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.values().cloned().collect())
    }
}

/// Slot catalog held in memory; inactive slots stay stored but are never offered.
#[derive(Default, Clone)]
pub(crate) struct InMemorySlotRepository {
    slots: Arc<RwLock<Vec<TimeSlot>>>,
}

impl InMemorySlotRepository {
    pub(crate) fn new(slots: Vec<TimeSlot>) -> Self {
        Self {
            slots: Arc::new(RwLock::new(slots)),
        }
    }
}

impl SlotRepository for InMemorySlotRepository {
    fn active(&self) -> Result<Vec<TimeSlot>, RepositoryError> {
        let guard = self
            .slots
            .read()
            .map_err(|_| RepositoryError::Unavailable("slot catalog lock poisoned".to_string()))?;
        Ok(guard.iter().filter(|slot| slot.is_active).cloned().collect())
    }
}

pub(crate) fn default_questions() -> Vec<FreeResponseQuestion> {
    vec![
        FreeResponseQuestion {
            id: "motivation".to_string(),
            question: "Why do you want to join this cycle?".to_string(),
            max_chars: 1_000,
        },
        FreeResponseQuestion {
            id: "experience".to_string(),
            question: "Tell us about a team project you contributed to.".to_string(),
            max_chars: 1_000,
        },
    ]
}

pub(crate) fn default_templates() -> EmailTemplates {
    EmailTemplates {
        interview: "Hi! Your interview is booked for {{slot}} in {{location}}. Reply to this \
                    e-mail if you can no longer make it."
            .to_string(),
        rejected: "Thank you for applying. We are unable to move forward with your \
                   application this cycle."
            .to_string(),
        rejected_after_interview: "Thank you for interviewing with us. We will not be \
                                   extending an offer this cycle."
            .to_string(),
        accepted: "Congratulations! We are excited to welcome you to the team.".to_string(),
    }
}

pub(crate) fn default_policy(config: &RecruitmentConfig) -> IntakePolicy {
    IntakePolicy::from_config(config, default_questions(), default_templates())
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn slot(id: &str, label: &str, day: Weekday, start: (u32, u32), max_capacity: u32) -> TimeSlot {
    let (hour, minute) = start;
    TimeSlot {
        id: SlotId::new(id),
        day_of_week: day,
        start_time: at(hour, minute),
        end_time: at(hour, minute + 30),
        display_label: label.to_string(),
        max_capacity,
        is_active: true,
    }
}

/// Interview week used by the local server and the demo.
pub(crate) fn default_slots() -> Vec<TimeSlot> {
    vec![
        slot("mon-0900", "Monday morning", Weekday::Mon, (9, 0), 2),
        slot("mon-1300", "Monday afternoon", Weekday::Mon, (13, 0), 2),
        slot("tue-1000", "Tuesday morning", Weekday::Tue, (10, 0), 1),
        slot("wed-1500", "Wednesday afternoon", Weekday::Wed, (15, 0), 2),
        slot("thu-1100", "Thursday late morning", Weekday::Thu, (11, 0), 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_repository_hides_inactive_slots() {
        let mut slots = default_slots();
        slots[0].is_active = false;
        let repository = InMemorySlotRepository::new(slots);

        let active = repository.active().expect("slots readable");
        assert_eq!(active.len(), 4);
        assert!(active.iter().all(|slot| slot.id.as_str() != "mon-0900"));
    }

    #[test]
    fn default_slots_have_unique_ids() {
        let slots = default_slots();
        let mut ids: Vec<_> = slots.iter().map(|slot| slot.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), slots.len());
    }
}
