use serde::Serialize;

use crate::workflows::recruitment::applicants::domain::{Applicant, ApplicantSummary};
use crate::workflows::recruitment::domain::TimeSlot;

use super::capacity::SlotCapacityState;

/// Slot with the applicants currently holding a seat in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotRoster {
    pub slot: TimeSlot,
    pub applicants: Vec<ApplicantSummary>,
    pub occupied: u32,
    /// Seats left, floored at zero for display.
    pub remaining: u32,
}

impl SlotRoster {
    pub fn is_full(&self) -> bool {
        self.remaining == 0
    }
}

/// Slots in calendar order with their current occupants.
pub fn build_roster(applicants: &[Applicant], slots: &[TimeSlot]) -> Vec<SlotRoster> {
    let capacity = SlotCapacityState::from_snapshot(applicants, slots);

    let mut ordered: Vec<&TimeSlot> = slots.iter().collect();
    ordered.sort_by_key(|slot| slot.calendar_key());

    ordered
        .into_iter()
        .map(|slot| {
            let occupants: Vec<ApplicantSummary> = applicants
                .iter()
                .filter(|applicant| applicant.assigned_slot.as_ref() == Some(&slot.id))
                .map(Applicant::summary)
                .collect();
            let occupied = capacity
                .get(&slot.id)
                .map(|seats| seats.occupied)
                .unwrap_or_default();

            SlotRoster {
                slot: slot.clone(),
                applicants: occupants,
                occupied,
                remaining: slot.max_capacity.saturating_sub(occupied),
            }
        })
        .collect()
}
