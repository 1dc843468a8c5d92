use std::io::Write;

use serde::Serialize;

use super::AssignmentResult;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode schedule row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush schedule export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct ScheduleRow<'a> {
    applicant_id: &'a str,
    name: String,
    email: &'a str,
    outcome: &'static str,
    slot_id: Option<&'a str>,
    slot_label: Option<&'a str>,
}

/// Write placed rows followed by unplaceable rows, each group in processing order.
pub fn write_csv<W: Write>(result: &AssignmentResult, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for placement in &result.placed {
        csv_writer.serialize(ScheduleRow {
            applicant_id: &placement.applicant.id.0,
            name: placement.applicant.full_name(),
            email: &placement.applicant.email,
            outcome: "placed",
            slot_id: Some(placement.slot.id.as_str()),
            slot_label: Some(&placement.slot.display_label),
        })?;
    }

    for applicant in &result.unplaceable {
        csv_writer.serialize(ScheduleRow {
            applicant_id: &applicant.id.0,
            name: applicant.full_name(),
            email: &applicant.email,
            outcome: "unplaceable",
            slot_id: None,
            slot_label: None,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}
