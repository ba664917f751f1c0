//! Durable rotation use-case service.
//!
//! # Responsibility
//! - Front a `RotationSession` with a `RotationRepository`.
//! - Commit every mutation copy-on-write: apply to a clone, persist, swap.
//!
//! # Invariants
//! - In-memory state only changes after the repository accepted it.
//! - Persistence failures are returned, never swallowed.

use crate::clock::Clock;
use crate::config::RotaConfig;
use crate::model::call_out::{CallOutRequest, CalledOutShift};
use crate::model::category::CategoryKey;
use crate::model::person::{Person, PersonId, PersonPatch, ShiftStatus};
use crate::model::record::BiweeklyRecord;
use crate::repo::rotation_repo::{RepoError, RotationRepository};
use crate::rotation::history::HistoryLog;
use crate::rotation::ledger::{CallOutLedger, LedgerError};
use crate::rotation::roster::RosterError;
use crate::rotation::session::{RotationSession, RotationState};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Errors from durable rotation operations.
#[derive(Debug)]
pub enum ServiceError {
    Roster(RosterError),
    Ledger(LedgerError),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Roster(err) => write!(f, "{err}"),
            Self::Ledger(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Roster(err) => Some(err),
            Self::Ledger(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RosterError> for ServiceError {
    fn from(value: RosterError) -> Self {
        Self::Roster(value)
    }
}

impl From<LedgerError> for ServiceError {
    fn from(value: LedgerError) -> Self {
        Self::Ledger(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

pub struct RotationService<R: RotationRepository> {
    repo: R,
    session: RotationSession,
}

impl<R: RotationRepository> RotationService<R> {
    /// Restores saved state and history, or seeds a new rotation from `config`.
    ///
    /// A freshly seeded state is persisted before returning.
    pub fn open(mut repo: R, config: &RotaConfig, clock: Arc<dyn Clock>) -> ServiceResult<Self> {
        let history = HistoryLog::from_newest_first(repo.list_records()?);
        let session = match repo.load_state()? {
            Some(state) => {
                info!(
                    "event=rotation_open module=service status=ok source=restored people={} periods={}",
                    state.roster.total_people(),
                    history.len()
                );
                RotationSession::restore(state, history, config.ledger_policy, clock)
            }
            None => {
                let state = RotationState {
                    roster: config.build_roster()?,
                    ledger: CallOutLedger::new(),
                };
                repo.save_state(&state)?;
                info!(
                    "event=rotation_open module=service status=ok source=config people={}",
                    state.roster.total_people()
                );
                RotationSession::restore(state, history, config.ledger_policy, clock)
            }
        };

        Ok(Self { repo, session })
    }

    /// Read-only view of the committed session.
    pub fn session(&self) -> &RotationSession {
        &self.session
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    pub fn move_status(
        &mut self,
        key: &CategoryKey,
        index: usize,
        status: ShiftStatus,
    ) -> ServiceResult<Person> {
        self.commit("move_status", |session| {
            Ok(session.move_status(key, index, status)?.clone())
        })
    }

    pub fn update_notes(
        &mut self,
        key: &CategoryKey,
        index: usize,
        notes: impl Into<String>,
    ) -> ServiceResult<Person> {
        let notes = notes.into();
        self.commit("update_notes", |session| {
            Ok(session.update_notes(key, index, notes)?.clone())
        })
    }

    pub fn add_person(&mut self, key: &CategoryKey, person: Person) -> ServiceResult<Person> {
        self.commit("add_person", |session| {
            Ok(session.add_person(key, person)?.clone())
        })
    }

    pub fn remove_person(&mut self, key: &CategoryKey, person_id: &PersonId) -> ServiceResult<Person> {
        self.commit("remove_person", |session| {
            Ok(session.remove_person(key, person_id)?)
        })
    }

    pub fn update_person(
        &mut self,
        key: &CategoryKey,
        person_id: &PersonId,
        patch: &PersonPatch,
    ) -> ServiceResult<Person> {
        self.commit("update_person", |session| {
            Ok(session.update_person(key, person_id, patch)?.clone())
        })
    }

    pub fn rename_category(
        &mut self,
        key: &CategoryKey,
        new_title: impl Into<String>,
    ) -> ServiceResult<()> {
        let new_title = new_title.into();
        self.commit("rename_category", |session| {
            Ok(session.rename_category(key, new_title)?)
        })
    }

    pub fn record_call_out(&mut self, request: CallOutRequest) -> ServiceResult<usize> {
        self.commit("record_call_out", |session| {
            Ok(session.record_call_out(request)?)
        })
    }

    pub fn assign_coverage(
        &mut self,
        index: usize,
        covered_by: PersonId,
    ) -> ServiceResult<CalledOutShift> {
        self.commit("assign_coverage", |session| {
            Ok(session.assign_coverage(index, covered_by)?.clone())
        })
    }

    /// Archives the period; the record and reset state are stored together.
    pub fn archive_period(&mut self) -> ServiceResult<BiweeklyRecord> {
        let mut next = self.session.clone();
        let record = next.archive_period().clone();
        if let Err(err) = self.repo.archive_period(&record, next.state()) {
            error!(
                "event=rotation_commit module=service status=error op=archive_period error={}",
                err
            );
            return Err(err.into());
        }
        self.session = next;
        Ok(record)
    }

    fn commit<T, F>(&mut self, op: &str, apply: F) -> ServiceResult<T>
    where
        F: FnOnce(&mut RotationSession) -> ServiceResult<T>,
    {
        let mut next = self.session.clone();
        let output = apply(&mut next)?;
        if let Err(err) = self.repo.save_state(next.state()) {
            error!(
                "event=rotation_commit module=service status=error op={} error={}",
                op, err
            );
            return Err(err.into());
        }
        self.session = next;
        Ok(output)
    }
}
