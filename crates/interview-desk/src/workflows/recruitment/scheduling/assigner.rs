use std::collections::HashMap;

use crate::workflows::recruitment::applicants::domain::Applicant;
use crate::workflows::recruitment::domain::{SlotId, TimeSlot};

use super::capacity::SlotCapacityState;
use super::priority::RankedApplicant;
use super::{AssignmentResult, Placement};

/// Single greedy pass over the ranked applicants. Each placement takes its seat
/// immediately, so later applicants see the reduced capacity.
pub(crate) fn assign(
    ranked: Vec<RankedApplicant<'_>>,
    mut capacity: SlotCapacityState,
    slots: &[TimeSlot],
) -> AssignmentResult {
    let mut catalog: HashMap<&SlotId, &TimeSlot> = HashMap::with_capacity(slots.len());
    for slot in slots {
        catalog.entry(&slot.id).or_insert(slot);
    }

    let mut result = AssignmentResult::default();

    for candidate in ranked {
        if candidate.flexibility == 0 {
            result.unplaceable.push(candidate.applicant.clone());
            continue;
        }

        match claim_first_open_slot(candidate.applicant, &mut capacity, &catalog) {
            Some(slot) => {
                let mut applicant = candidate.applicant.clone();
                applicant.assigned_slot = Some(slot.id.clone());
                result.placed.push(Placement {
                    applicant,
                    slot: slot.clone(),
                });
            }
            None => result.unplaceable.push(candidate.applicant.clone()),
        }
    }

    result
}

/// Walk the applicant's own preference order; the first slot with a live seat wins.
fn claim_first_open_slot<'s>(
    applicant: &Applicant,
    capacity: &mut SlotCapacityState,
    catalog: &HashMap<&SlotId, &'s TimeSlot>,
) -> Option<&'s TimeSlot> {
    for slot_id in &applicant.available_slots {
        let Some(&slot) = catalog.get(slot_id) else {
            continue;
        };
        if capacity.reserve(slot_id) {
            return Some(slot);
        }
    }
    None
}
