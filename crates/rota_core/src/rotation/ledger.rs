//! Call-out ledger for the active period.
//!
//! # Invariants
//! - Entries are never removed within a period; `take_entries` empties the
//!   ledger only when a period is archived.
//! - Coverage assignment only touches `covered_by_person_id`.

use crate::model::call_out::CalledOutShift;
use crate::model::category::CategoryKey;
use crate::model::person::PersonId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// How strictly call-outs are checked against the roster.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerPolicy {
    /// Person and category references must resolve on the live roster.
    #[default]
    Strict,
    /// References are stored as given.
    Permissive,
}

/// Errors for ledger operations. The ledger is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    IndexOutOfRange { index: usize, len: usize },
    UnknownCategory(CategoryKey),
    UnknownPerson(PersonId),
    PersonNotInCategory {
        person_id: PersonId,
        category: CategoryKey,
    },
    UnknownCoverer(PersonId),
}

impl Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "call-out index {index} out of range for ledger with {len} entries")
            }
            Self::UnknownCategory(key) => write!(f, "call-out category not found: {key}"),
            Self::UnknownPerson(id) => write!(f, "called-out person not found: {id}"),
            Self::PersonNotInCategory {
                person_id,
                category,
            } => write!(f, "person {person_id} is not in category {category}"),
            Self::UnknownCoverer(id) => write!(f, "covering person not found: {id}"),
        }
    }
}

impl Error for LedgerError {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallOutLedger {
    entries: Vec<CalledOutShift>,
}

impl CallOutLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CalledOutShift] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CalledOutShift> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries still waiting for coverage, with their ledger index.
    pub fn uncovered(&self) -> impl Iterator<Item = (usize, &CalledOutShift)> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.is_covered())
    }

    /// Appends an entry and returns its index.
    pub fn record(&mut self, entry: CalledOutShift) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Sets the covering person; an existing assignment is overwritten.
    pub fn assign_coverage(
        &mut self,
        index: usize,
        covered_by: PersonId,
    ) -> Result<&CalledOutShift, LedgerError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(LedgerError::IndexOutOfRange { index, len })?;
        entry.covered_by_person_id = Some(covered_by);
        Ok(entry)
    }

    /// Moves every entry out, leaving the ledger empty.
    pub(crate) fn take_entries(&mut self) -> Vec<CalledOutShift> {
        std::mem::take(&mut self.entries)
    }
}
