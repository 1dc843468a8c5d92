use std::collections::HashMap;

use serde::Serialize;

use crate::workflows::recruitment::applicants::domain::Applicant;
use crate::workflows::recruitment::domain::{SlotId, TimeSlot};

/// Seat accounting for a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotCapacity {
    pub max_capacity: u32,
    pub occupied: u32,
    /// `max_capacity - occupied`; negative when a snapshot is already over-booked.
    pub remaining: i64,
}

impl SlotCapacity {
    fn new(max_capacity: u32, occupied: u32) -> Self {
        Self {
            max_capacity,
            occupied,
            remaining: i64::from(max_capacity) - i64::from(occupied),
        }
    }

    pub fn has_room(&self) -> bool {
        self.remaining > 0
    }
}

/// Per-run capacity ledger, built from a read-only snapshot and owned by one invocation.
#[derive(Debug, Clone, Default)]
pub struct SlotCapacityState {
    slots: HashMap<SlotId, SlotCapacity>,
}

impl SlotCapacityState {
    /// Every applicant pointing at a slot occupies a seat, whatever their status.
    pub fn from_snapshot(applicants: &[Applicant], slots: &[TimeSlot]) -> Self {
        let mut occupancy: HashMap<&SlotId, u32> = HashMap::new();
        for slot_id in applicants.iter().filter_map(|a| a.assigned_slot.as_ref()) {
            *occupancy.entry(slot_id).or_default() += 1;
        }

        let mut ledger = HashMap::with_capacity(slots.len());
        for slot in slots {
            let occupied = occupancy.get(&slot.id).copied().unwrap_or(0);
            // A repeated id takes the capacity of its last definition.
            ledger.insert(slot.id.clone(), SlotCapacity::new(slot.max_capacity, occupied));
        }

        Self { slots: ledger }
    }

    pub fn get(&self, slot_id: &SlotId) -> Option<&SlotCapacity> {
        self.slots.get(slot_id)
    }

    /// Unknown slots never have room.
    pub fn has_room(&self, slot_id: &SlotId) -> bool {
        self.get(slot_id).is_some_and(SlotCapacity::has_room)
    }

    /// Take one seat. Returns `false` and leaves the ledger untouched when the slot is
    /// unknown or full.
    pub(crate) fn reserve(&mut self, slot_id: &SlotId) -> bool {
        match self.slots.get_mut(slot_id) {
            Some(capacity) if capacity.has_room() => {
                capacity.remaining -= 1;
                capacity.occupied += 1;
                true
            }
            _ => false,
        }
    }
}
