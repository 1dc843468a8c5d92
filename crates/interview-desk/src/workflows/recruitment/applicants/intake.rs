use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicationSubmission, FreeResponseAnswer, FreeResponseQuestion};
use crate::config::RecruitmentConfig;
use crate::workflows::recruitment::domain::{SlotId, TimeSlot};
use crate::workflows::recruitment::outreach::EmailTemplates;

/// Validation errors raised while accepting an application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("applications are closed for {0}")]
    ApplicationsClosed(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("'{0}' is not a valid e-mail address")]
    InvalidEmail(String),
    #[error("question {0} requires an answer")]
    MissingResponse(String),
    #[error("answer to question {question_id} exceeds {max_chars} characters")]
    ResponseTooLong { question_id: String, max_chars: usize },
    #[error("select at least {required} available time slots (got {provided})")]
    NotEnoughAvailability { required: usize, provided: usize },
    #[error("time slot {0} is not open for interviews")]
    UnknownSlot(SlotId),
}

/// Cycle-level settings the intake guard and outreach rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakePolicy {
    pub cycle_name: String,
    pub applications_open: bool,
    pub minimum_available_slots: usize,
    pub questions: Vec<FreeResponseQuestion>,
    pub templates: EmailTemplates,
}

impl IntakePolicy {
    pub fn from_config(
        config: &RecruitmentConfig,
        questions: Vec<FreeResponseQuestion>,
        templates: EmailTemplates,
    ) -> Self {
        Self {
            cycle_name: config.cycle_name.clone(),
            applications_open: config.applications_open,
            minimum_available_slots: config.minimum_available_slots,
            questions,
            templates,
        }
    }
}

/// Normalized submission ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidatedApplication {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub major: String,
    pub graduation_year: u16,
    pub resume_url: Option<String>,
    pub frq_responses: Vec<FreeResponseAnswer>,
    pub available_slots: Vec<SlotId>,
}

/// Guard turning raw submissions into `ValidatedApplication`s.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IntakeGuard<'a> {
    policy: &'a IntakePolicy,
}

impl<'a> IntakeGuard<'a> {
    pub(crate) fn new(policy: &'a IntakePolicy) -> Self {
        Self { policy }
    }

    pub(crate) fn validate(
        &self,
        submission: ApplicationSubmission,
        active_slots: &[TimeSlot],
    ) -> Result<ValidatedApplication, IntakeViolation> {
        if !self.policy.applications_open {
            return Err(IntakeViolation::ApplicationsClosed(
                self.policy.cycle_name.clone(),
            ));
        }

        let first_name = required("first_name", &submission.first_name)?;
        let last_name = required("last_name", &submission.last_name)?;
        let phone = required("phone", &submission.phone)?;
        let major = required("major", &submission.major)?;
        let email = normalize_email(&submission.email)?;

        let frq_responses = self.collect_answers(&submission)?;
        let available_slots = self.check_availability(submission.available_slots, active_slots)?;

        let resume_url = submission
            .resume_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        Ok(ValidatedApplication {
            first_name,
            last_name,
            email,
            phone,
            major,
            graduation_year: submission.graduation_year,
            resume_url,
            frq_responses,
            available_slots,
        })
    }

    fn collect_answers(
        &self,
        submission: &ApplicationSubmission,
    ) -> Result<Vec<FreeResponseAnswer>, IntakeViolation> {
        self.policy
            .questions
            .iter()
            .map(|question| {
                let answer = submission
                    .frq_responses
                    .iter()
                    .find(|response| response.question_id == question.id)
                    .map(|response| response.answer.trim())
                    .unwrap_or_default();

                if answer.is_empty() {
                    return Err(IntakeViolation::MissingResponse(question.id.clone()));
                }
                if answer.chars().count() > question.max_chars {
                    return Err(IntakeViolation::ResponseTooLong {
                        question_id: question.id.clone(),
                        max_chars: question.max_chars,
                    });
                }

                Ok(FreeResponseAnswer {
                    question_id: question.id.clone(),
                    question_text: question.question.clone(),
                    answer: answer.to_string(),
                })
            })
            .collect()
    }

    /// De-duplicate while keeping the applicant's order, then check every id is open.
    fn check_availability(
        &self,
        declared: Vec<SlotId>,
        active_slots: &[TimeSlot],
    ) -> Result<Vec<SlotId>, IntakeViolation> {
        let mut seen = HashSet::new();
        let unique: Vec<SlotId> = declared
            .into_iter()
            .filter(|slot_id| seen.insert(slot_id.clone()))
            .collect();

        if let Some(unknown) = unique
            .iter()
            .find(|slot_id| !active_slots.iter().any(|slot| &slot.id == *slot_id))
        {
            return Err(IntakeViolation::UnknownSlot(unknown.clone()));
        }

        if unique.len() < self.policy.minimum_available_slots {
            return Err(IntakeViolation::NotEnoughAvailability {
                required: self.policy.minimum_available_slots,
                provided: unique.len(),
            });
        }

        Ok(unique)
    }
}

fn required(field: &'static str, value: &str) -> Result<String, IntakeViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(IntakeViolation::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn normalize_email(raw: &str) -> Result<String, IntakeViolation> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(IntakeViolation::MissingField("email"));
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };

    if valid {
        Ok(email)
    } else {
        Err(IntakeViolation::InvalidEmail(raw.trim().to_string()))
    }
}
