//! Interview-slot auto-assignment.
//!
//! A single synchronous pass: seat accounting from the current snapshot, eligibility,
//! flexibility scoring against the starting capacity, most-constrained-first ordering,
//! and a greedy walk that commits each placement before looking at the next applicant.
//! Nothing here performs I/O; callers persist `placed` themselves.

mod assigner;
mod capacity;
pub mod export;
mod priority;
pub mod roster;

pub use capacity::{SlotCapacity, SlotCapacityState};
pub use export::{write_csv, ExportError};
pub use priority::{flexibility, RankedApplicant};
pub use roster::{build_roster, SlotRoster};

use serde::Serialize;
use tracing::debug;

use crate::workflows::recruitment::applicants::domain::{Applicant, ApplicantId};
use crate::workflows::recruitment::domain::TimeSlot;

/// Applicant snapshot paired with the slot it was given. `applicant.assigned_slot`
/// already points at `slot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub applicant: Applicant,
    pub slot: TimeSlot,
}

/// Outcome of one auto-assignment run, both lists in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssignmentResult {
    pub placed: Vec<Placement>,
    pub unplaceable: Vec<Applicant>,
}

impl AssignmentResult {
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty() && self.unplaceable.is_empty()
    }

    pub fn unplaceable_ids(&self) -> Vec<ApplicantId> {
        self.unplaceable.iter().map(|a| a.id.clone()).collect()
    }
}

/// Applicants still waiting for a slot. Everyone else is left out of the run entirely.
pub fn eligible_applicants(applicants: &[Applicant]) -> Vec<&Applicant> {
    applicants
        .iter()
        .filter(|applicant| applicant.is_eligible_for_auto_assignment())
        .collect()
}

/// Assign eligible applicants to interview slots.
///
/// `slots` must already be limited to slots open for scheduling. Unknown slot ids in an
/// applicant's availability are treated as full. When an id is defined twice, seats come
/// from the last definition and placements carry the first.
pub fn auto_assign_interviews(applicants: &[Applicant], slots: &[TimeSlot]) -> AssignmentResult {
    let capacity = SlotCapacityState::from_snapshot(applicants, slots);
    let eligible = eligible_applicants(applicants);
    let candidates = eligible.len();

    let ranked = priority::rank(eligible, &capacity);
    let result = assigner::assign(ranked, capacity, slots);

    debug!(
        candidates,
        placed = result.placed.len(),
        unplaceable = result.unplaceable.len(),
        "auto-assignment pass complete"
    );

    result
}
