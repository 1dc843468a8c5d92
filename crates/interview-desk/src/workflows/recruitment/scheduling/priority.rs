use std::cmp::Ordering;

use crate::workflows::recruitment::applicants::domain::Applicant;

use super::capacity::SlotCapacityState;

/// Eligible applicant with the priority key fixed at the start of the run.
#[derive(Debug, Clone, Copy)]
pub struct RankedApplicant<'a> {
    pub applicant: &'a Applicant,
    pub flexibility: usize,
    position: usize,
}

/// Declared slots that have room in the starting snapshot. Repeated ids count each time.
pub fn flexibility(applicant: &Applicant, capacity: &SlotCapacityState) -> usize {
    applicant
        .available_slots
        .iter()
        .filter(|slot_id| capacity.has_room(slot_id))
        .count()
}

/// Most-constrained first, then earliest application; full ties keep input order.
pub(crate) fn rank<'a>(
    eligible: Vec<&'a Applicant>,
    capacity: &SlotCapacityState,
) -> Vec<RankedApplicant<'a>> {
    let mut ranked: Vec<RankedApplicant<'a>> = eligible
        .into_iter()
        .enumerate()
        .map(|(position, applicant)| RankedApplicant {
            applicant,
            flexibility: flexibility(applicant, capacity),
            position,
        })
        .collect();

    ranked.sort_by(compare);
    ranked
}

fn compare(left: &RankedApplicant<'_>, right: &RankedApplicant<'_>) -> Ordering {
    left.flexibility
        .cmp(&right.flexibility)
        .then_with(|| left.applicant.applied_date.cmp(&right.applicant.applied_date))
        .then_with(|| left.position.cmp(&right.position))
}
