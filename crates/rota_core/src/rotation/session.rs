//! Rotation session: the single owner of roster, ledger and history.
//!
//! # Responsibility
//! - Expose every rotation operation behind one `&mut self` entry point.
//! - Apply the ledger validation policy against the live roster.
//! - Emit structured `event=` log lines for state transitions.
//!
//! # Invariants
//! - `archive_period` observes one consistent roster/ledger state.
//! - Failed operations leave the session unchanged.

use crate::clock::Clock;
use crate::model::call_out::{resolve_call_outs, CallOutRequest, CalledOutShift, ResolvedCallOut};
use crate::model::category::CategoryKey;
use crate::model::person::{Person, PersonId, PersonPatch, ShiftStatus};
use crate::model::record::BiweeklyRecord;
use crate::rotation::archiver::snapshot_period;
use crate::rotation::history::HistoryLog;
use crate::rotation::ledger::{CallOutLedger, LedgerError, LedgerPolicy};
use crate::rotation::roster::{Roster, RosterResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Mutable per-period state, persisted as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    pub roster: Roster,
    pub ledger: CallOutLedger,
}

#[derive(Debug, Clone)]
pub struct RotationSession {
    state: RotationState,
    history: HistoryLog,
    policy: LedgerPolicy,
    clock: Arc<dyn Clock>,
}

impl RotationSession {
    pub fn new(roster: Roster, policy: LedgerPolicy, clock: Arc<dyn Clock>) -> Self {
        Self::restore(
            RotationState {
                roster,
                ledger: CallOutLedger::new(),
            },
            HistoryLog::new(),
            policy,
            clock,
        )
    }

    /// Rebuilds a session from previously saved state and history.
    pub fn restore(
        state: RotationState,
        history: HistoryLog,
        policy: LedgerPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state,
            history,
            policy,
            clock,
        }
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    pub fn roster(&self) -> &Roster {
        &self.state.roster
    }

    pub fn ledger(&self) -> &CallOutLedger {
        &self.state.ledger
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn policy(&self) -> LedgerPolicy {
        self.policy
    }

    pub fn move_status(
        &mut self,
        key: &CategoryKey,
        index: usize,
        status: ShiftStatus,
    ) -> RosterResult<&Person> {
        let now = self.clock.now();
        match self.state.roster.move_status(key, index, status, now) {
            Ok(person) => {
                info!(
                    "event=move_status module=rotation status=ok category={} person={} shift_status={} shift_count={}",
                    key, person.id, status, person.shift_count
                );
                Ok(person)
            }
            Err(err) => {
                warn!(
                    "event=move_status module=rotation status=error category={} index={} error={}",
                    key, index, err
                );
                Err(err)
            }
        }
    }

    pub fn update_notes(
        &mut self,
        key: &CategoryKey,
        index: usize,
        notes: impl Into<String>,
    ) -> RosterResult<&Person> {
        self.state.roster.update_notes(key, index, notes)
    }

    pub fn add_person(&mut self, key: &CategoryKey, person: Person) -> RosterResult<&Person> {
        let added = self.state.roster.add_person(key, person)?;
        info!(
            "event=person_add module=rotation status=ok category={} person={}",
            key, added.id
        );
        Ok(added)
    }

    pub fn remove_person(&mut self, key: &CategoryKey, person_id: &PersonId) -> RosterResult<Person> {
        let removed = self.state.roster.remove_person(key, person_id)?;
        info!(
            "event=person_remove module=rotation status=ok category={} person={}",
            key, removed.id
        );
        Ok(removed)
    }

    pub fn update_person(
        &mut self,
        key: &CategoryKey,
        person_id: &PersonId,
        patch: &PersonPatch,
    ) -> RosterResult<&Person> {
        self.state.roster.update_person(key, person_id, patch)
    }

    pub fn rename_category(
        &mut self,
        key: &CategoryKey,
        new_title: impl Into<String>,
    ) -> RosterResult<()> {
        self.state.roster.rename_category(key, new_title)
    }

    /// Records a call-out stamped with the current time; returns its index.
    ///
    /// Under `LedgerPolicy::Strict` the person must belong to the named
    /// category on the live roster.
    pub fn record_call_out(&mut self, request: CallOutRequest) -> Result<usize, LedgerError> {
        if self.policy == LedgerPolicy::Strict {
            if let Err(err) = self.check_call_out(&request) {
                warn!(
                    "event=call_out_record module=rotation status=error person={} category={} error={}",
                    request.person_id, request.category, err
                );
                return Err(err);
            }
        }

        let entry = CalledOutShift::from_request(request, self.clock.now());
        info!(
            "event=call_out_record module=rotation status=ok person={} category={} reason={}",
            entry.called_out_person_id,
            entry.category,
            entry.reason.label()
        );
        Ok(self.state.ledger.record(entry))
    }

    /// Assigns coverage for the call-out at `index`.
    ///
    /// Under `LedgerPolicy::Strict` the coverer must be on the live roster.
    pub fn assign_coverage(
        &mut self,
        index: usize,
        covered_by: PersonId,
    ) -> Result<&CalledOutShift, LedgerError> {
        if self.policy == LedgerPolicy::Strict && self.state.roster.find_person(&covered_by).is_none() {
            return Err(LedgerError::UnknownCoverer(covered_by));
        }

        let entry = self.state.ledger.assign_coverage(index, covered_by)?;
        info!(
            "event=coverage_assign module=rotation status=ok index={} person={}",
            index, entry.called_out_person_id
        );
        Ok(entry)
    }

    /// Live call-outs joined with roster people; dangling entries are omitted.
    pub fn resolved_call_outs(&self) -> Vec<ResolvedCallOut<'_>> {
        let roster = &self.state.roster;
        resolve_call_outs(self.state.ledger.entries(), |id| {
            roster.find_person(id).map(|(_, person)| person)
        })
    }

    /// Archives the current period and starts a fresh one.
    ///
    /// Snapshots roster and ledger into a new newest-first history record,
    /// clears the ledger, and resets every person's rotation fields.
    pub fn archive_period(&mut self) -> &BiweeklyRecord {
        let start_date = self.clock.today();
        let call_outs = self.state.ledger.take_entries();
        let record = snapshot_period(&self.state.roster, call_outs, start_date);
        self.state.roster.reset_rotation();

        info!(
            "event=period_archive module=rotation status=ok start_date={} end_date={} picked_up={} called={} call_outs={}",
            record.start_date,
            record.end_date,
            record.picked_up_shifts.len(),
            record.called_shifts.len(),
            record.called_out_shifts.len()
        );
        self.history.prepend(record)
    }

    fn check_call_out(&self, request: &CallOutRequest) -> Result<(), LedgerError> {
        let category = self
            .state
            .roster
            .category(&request.category)
            .map_err(|_| LedgerError::UnknownCategory(request.category.clone()))?;
        if category.find(&request.person_id).is_some() {
            return Ok(());
        }
        if self.state.roster.find_person(&request.person_id).is_some() {
            return Err(LedgerError::PersonNotInCategory {
                person_id: request.person_id.clone(),
                category: request.category.clone(),
            });
        }
        Err(LedgerError::UnknownPerson(request.person_id.clone()))
    }
}
