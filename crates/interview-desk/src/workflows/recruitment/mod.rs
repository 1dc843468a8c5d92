//! Recruitment pipeline: application intake, interview scheduling, and outreach.

pub mod applicants;
pub mod domain;
pub mod outreach;
pub mod scheduling;

pub use domain::{SlotId, TimeSlot};
