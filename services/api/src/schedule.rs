use clap::Args;
use interview_desk::error::AppError;
use interview_desk::workflows::recruitment::applicants::Applicant;
use interview_desk::workflows::recruitment::scheduling::{
    auto_assign_interviews, write_csv, AssignmentResult,
};
use interview_desk::workflows::recruitment::TimeSlot;
use serde::Deserialize;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

/// Applicants and slots exported from the admin dashboard.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ScheduleSnapshot {
    pub(crate) applicants: Vec<Applicant>,
    pub(crate) slots: Vec<TimeSlot>,
}

impl ScheduleSnapshot {
    /// Parse raw JSON bytes; invalid UTF-8 is a parse error, not a lossy repair.
    pub(crate) fn from_slice(raw: &[u8]) -> Result<Self, AppError> {
        Ok(serde_json::from_slice(raw)?)
    }

    /// Run auto-assignment over the active slots only.
    pub(crate) fn assign(&self) -> AssignmentResult {
        let active: Vec<TimeSlot> = self
            .slots
            .iter()
            .filter(|slot| slot.is_active)
            .cloned()
            .collect();
        auto_assign_interviews(&self.applicants, &active)
    }
}

#[derive(Args, Debug)]
pub(crate) struct PreviewArgs {
    /// JSON file with `applicants` and `slots` arrays
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Emit the placement sheet as CSV instead of a text summary
    #[arg(long)]
    pub(crate) csv: bool,
}

pub(crate) fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let raw = fs::read(&args.input)?;
    let snapshot = ScheduleSnapshot::from_slice(&raw)?;
    let result = snapshot.assign();
    info!(
        input = %args.input.display(),
        placed = result.placed.len(),
        unplaceable = result.unplaceable.len(),
        "snapshot scheduled"
    );

    let stdout = io::stdout();
    if args.csv {
        write_csv(&result, stdout.lock())?;
    } else {
        render_summary(&result, &mut stdout.lock())?;
    }
    Ok(())
}

pub(crate) fn render_summary<W: Write>(result: &AssignmentResult, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Auto-assignment preview: {} placed, {} unplaceable",
        result.placed.len(),
        result.unplaceable.len()
    )?;

    if !result.placed.is_empty() {
        writeln!(out, "\nPlaced")?;
        for placement in &result.placed {
            writeln!(
                out,
                "- {} <{}> -> {}",
                placement.applicant.full_name(),
                placement.applicant.email,
                placement.slot.describe()
            )?;
        }
    }

    if !result.unplaceable.is_empty() {
        writeln!(out, "\nNeeds manual follow-up")?;
        for applicant in &result.unplaceable {
            writeln!(out, "- {} <{}>", applicant.full_name(), applicant.email)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "applicants": [
            {
                "id": "a-1",
                "first_name": "Noor",
                "last_name": "Haddad",
                "email": "noor@example.edu",
                "available_slots": ["mon", "tue"],
                "status": "interviewing",
                "applied_date": "2025-02-03T09:00:00Z",
                "last_updated": "2025-02-03T09:00:00Z"
            },
            {
                "id": "a-2",
                "first_name": "Ravi",
                "last_name": "Shah",
                "email": "ravi@example.edu",
                "available_slots": ["mon"],
                "status": "interviewing",
                "applied_date": "2025-02-03T10:00:00Z",
                "last_updated": "2025-02-03T10:00:00Z"
            }
        ],
        "slots": [
            {
                "id": "mon",
                "day_of_week": "Mon",
                "start_time": "09:00",
                "end_time": "09:30",
                "display_label": "Monday block",
                "max_capacity": 1
            },
            {
                "id": "tue",
                "day_of_week": "Tue",
                "start_time": "14:00",
                "end_time": "14:30",
                "display_label": "Tuesday block",
                "max_capacity": 1,
                "is_active": false
            }
        ]
    }"#;

    #[test]
    fn inactive_slots_are_ignored() {
        let snapshot = ScheduleSnapshot::from_slice(SNAPSHOT.as_bytes()).expect("snapshot parses");
        let result = snapshot.assign();

        assert_eq!(result.placed.len(), 1);
        assert_eq!(result.placed[0].applicant.id.0, "a-1");
        assert_eq!(result.placed[0].slot.id.as_str(), "mon");
        assert_eq!(result.unplaceable_ids()[0].0, "a-2");
    }

    #[test]
    fn summary_lists_both_outcomes() {
        let snapshot = ScheduleSnapshot::from_slice(SNAPSHOT.as_bytes()).expect("snapshot parses");
        let mut out = Vec::new();
        render_summary(&snapshot.assign(), &mut out).expect("render");
        let text = String::from_utf8(out).expect("utf8");

        assert!(text.starts_with("Auto-assignment preview: 1 placed, 1 unplaceable"));
        assert!(text.contains("Noor Haddad <noor@example.edu> -> Monday block (Monday, 09:00-09:30)"));
        assert!(text.contains("- Ravi Shah <ravi@example.edu>"));
    }

    #[test]
    fn malformed_snapshot_is_rejected() {
        assert!(matches!(
            ScheduleSnapshot::from_slice(br#"{"applicants": []}"#),
            Err(AppError::Snapshot(_))
        ));
    }

    #[test]
    fn snapshots_with_invalid_utf8_are_rejected() {
        let mut bytes = SNAPSHOT.replace("Monday block", "Monday ~block").into_bytes();
        let marker = bytes.iter().position(|b| *b == b'~').expect("marker present");
        bytes[marker] = 0xff;

        assert!(matches!(
            ScheduleSnapshot::from_slice(&bytes),
            Err(AppError::Snapshot(_))
        ));
    }
}
