//! Period archiving: snapshot building and the shift-log scan.
//!
//! # Invariants
//! - Shift logs follow category order, then position within the category.
//! - The record owns clones of every category; nothing is shared.

use crate::model::call_out::CalledOutShift;
use crate::model::person::ShiftStatus;
use crate::model::record::{BiweeklyRecord, ShiftLog, PERIOD_LENGTH_DAYS};
use crate::rotation::roster::Roster;
use chrono::{Duration, NaiveDate};

/// Builds the record for a period starting on `start_date`.
///
/// `called_out_shifts` is moved into the record as-is.
pub fn snapshot_period(
    roster: &Roster,
    called_out_shifts: Vec<CalledOutShift>,
    start_date: NaiveDate,
) -> BiweeklyRecord {
    let mut picked_up_shifts = Vec::new();
    let mut called_shifts = Vec::new();

    for category in roster.categories() {
        for person in &category.people {
            let (Some(status), Some(date)) = (person.shift_status, person.moved_on) else {
                continue;
            };
            let log = ShiftLog {
                date,
                person_id: person.id.clone(),
                category: category.key.clone(),
            };
            match status {
                ShiftStatus::PickedUp => picked_up_shifts.push(log),
                ShiftStatus::Called => called_shifts.push(log),
            }
        }
    }

    BiweeklyRecord {
        start_date,
        end_date: start_date + Duration::days(PERIOD_LENGTH_DAYS),
        categories: roster.categories().to_vec(),
        picked_up_shifts,
        called_shifts,
        called_out_shifts,
    }
}
