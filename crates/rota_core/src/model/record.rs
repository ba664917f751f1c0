//! Archived two-week period records.
//!
//! # Responsibility
//! - Hold an immutable snapshot of roster and ledger at archive time.
//! - Resolve person references inside the snapshot for read views.
//!
//! # Invariants
//! - `categories` is an owned deep copy; later roster edits never reach it.
//! - `end_date == start_date + PERIOD_LENGTH_DAYS`.

use crate::model::call_out::{resolve_call_outs, CalledOutShift, ResolvedCallOut};
use crate::model::category::{Category, CategoryKey};
use crate::model::person::{Person, PersonId, ShiftStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Fixed rotation cadence.
pub const PERIOD_LENGTH_DAYS: i64 = 14;

/// One extra shift derived from a person's status at archive time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftLog {
    /// The person's `moved_on` timestamp.
    pub date: DateTime<Utc>,
    pub person_id: PersonId,
    pub category: CategoryKey,
}

/// Snapshot of one archived period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiweeklyRecord {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub categories: Vec<Category>,
    pub picked_up_shifts: Vec<ShiftLog>,
    pub called_shifts: Vec<ShiftLog>,
    pub called_out_shifts: Vec<CalledOutShift>,
}

impl BiweeklyRecord {
    /// Finds a person anywhere in the archived snapshot.
    pub fn find_person(&self, id: &PersonId) -> Option<&Person> {
        self.categories
            .iter()
            .find_map(|category| category.find(id))
    }

    pub fn total_people(&self) -> usize {
        self.categories.iter().map(Category::len).sum()
    }

    pub fn shifts(&self, status: ShiftStatus) -> &[ShiftLog] {
        match status {
            ShiftStatus::PickedUp => &self.picked_up_shifts,
            ShiftStatus::Called => &self.called_shifts,
        }
    }

    /// Shift logs joined with their person; dangling ids are skipped.
    pub fn resolved_shifts(&self, status: ShiftStatus) -> Vec<(&ShiftLog, &Person)> {
        self.shifts(status)
            .iter()
            .filter_map(|log| self.find_person(&log.person_id).map(|person| (log, person)))
            .collect()
    }

    /// Call-outs joined with their people; dangling call-outs are skipped.
    pub fn resolved_call_outs(&self) -> Vec<ResolvedCallOut<'_>> {
        resolve_call_outs(&self.called_out_shifts, |id| self.find_person(id))
    }
}
