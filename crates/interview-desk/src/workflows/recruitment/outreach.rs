//! Notification groups for candidate e-mails.

use serde::{Deserialize, Serialize};

use super::applicants::domain::{Applicant, ApplicantId, ApplicantStatus};
use super::domain::{SlotId, TimeSlot};

const SLOT_PLACEHOLDER: &str = "{{slot}}";
const LOCATION_PLACEHOLDER: &str = "{{location}}";
const MISSING_LOCATION: &str = "[Location not set]";

/// Message bodies configured for the cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailTemplates {
    pub interview: String,
    pub rejected: String,
    pub rejected_after_interview: String,
    pub accepted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutreachGroupKind {
    Interview { slot_id: SlotId },
    Rejected,
    RejectedAfterInterview,
    Accepted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    pub applicant_id: ApplicantId,
    pub name: String,
    pub email: String,
}

impl From<&Applicant> for Recipient {
    fn from(applicant: &Applicant) -> Self {
        Self {
            applicant_id: applicant.id.clone(),
            name: applicant.full_name(),
            email: applicant.email.clone(),
        }
    }
}

/// One batch of recipients sharing a rendered message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutreachGroup {
    pub kind: OutreachGroupKind,
    pub label: String,
    pub recipients: Vec<Recipient>,
    pub body: String,
}

/// Substitute every slot and location placeholder in an interview invitation.
pub fn render_interview_body(template: &str, slot: &TimeSlot, location: Option<&str>) -> String {
    let location = location
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(MISSING_LOCATION);

    template
        .replace(SLOT_PLACEHOLDER, &slot.describe())
        .replace(LOCATION_PLACEHOLDER, location)
}

/// Interview groups per scheduled slot in calendar order, followed by the decision
/// groups. Groups without recipients are omitted.
pub fn build_outreach(
    applicants: &[Applicant],
    slots: &[TimeSlot],
    templates: &EmailTemplates,
    location: Option<&str>,
) -> Vec<OutreachGroup> {
    let mut ordered: Vec<&TimeSlot> = slots.iter().collect();
    ordered.sort_by_key(|slot| slot.calendar_key());

    let mut groups: Vec<OutreachGroup> = ordered
        .into_iter()
        .filter_map(|slot| {
            let recipients: Vec<Recipient> = applicants
                .iter()
                .filter(|a| a.status == ApplicantStatus::Scheduled)
                .filter(|a| a.assigned_slot.as_ref() == Some(&slot.id))
                .map(Recipient::from)
                .collect();
            if recipients.is_empty() {
                return None;
            }
            Some(OutreachGroup {
                kind: OutreachGroupKind::Interview {
                    slot_id: slot.id.clone(),
                },
                label: slot.display_label.clone(),
                recipients,
                body: render_interview_body(&templates.interview, slot, location),
            })
        })
        .collect();

    let decisions = [
        (
            ApplicantStatus::Rejected,
            OutreachGroupKind::Rejected,
            "Rejected",
            &templates.rejected,
        ),
        (
            ApplicantStatus::RejectedAfterInterview,
            OutreachGroupKind::RejectedAfterInterview,
            "Rejected after interview",
            &templates.rejected_after_interview,
        ),
        (
            ApplicantStatus::Accepted,
            OutreachGroupKind::Accepted,
            "Accepted",
            &templates.accepted,
        ),
    ];

    for (status, kind, label, template) in decisions {
        let recipients: Vec<Recipient> = applicants
            .iter()
            .filter(|a| a.status == status)
            .map(Recipient::from)
            .collect();
        if recipients.is_empty() {
            continue;
        }
        groups.push(OutreachGroup {
            kind,
            label: label.to_string(),
            recipients,
            body: template.clone(),
        });
    }

    groups
}
