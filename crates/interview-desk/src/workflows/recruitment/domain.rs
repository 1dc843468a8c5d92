use std::fmt;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for interview time slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub String);

impl SlotId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Interview time slot offered to applicants during the cycle.
///
/// Only `id` and `max_capacity` matter to auto-assignment; the remaining fields are
/// carried through for rosters and outreach copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: SlotId,
    pub day_of_week: Weekday,
    #[serde(with = "clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "clock_time")]
    pub end_time: NaiveTime,
    pub display_label: String,
    pub max_capacity: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl TimeSlot {
    /// Human readable description used in interview invitations.
    pub fn describe(&self) -> String {
        format!(
            "{} ({}, {}-{})",
            self.display_label,
            weekday_name(self.day_of_week),
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }

    /// Sort key placing slots in calendar order within the week.
    pub fn calendar_key(&self) -> (u32, NaiveTime) {
        (self.day_of_week.num_days_from_monday(), self.start_time)
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// `HH:MM` wire format for slot boundaries.
pub(crate) mod clock_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub(crate) fn parse(raw: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(raw.trim(), FORMAT)
            .map_err(|err| format!("failed to parse '{raw}' as HH:MM ({err})"))
    }

    pub fn serialize<S>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}
