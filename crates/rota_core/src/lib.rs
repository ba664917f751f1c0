//! Core domain logic for the staff rotation tracker.
//! This crate is the single source of truth for rotation invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod rotation;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CategoryConfig, ConfigError, RotaConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::call_out::{CallOutReason, CallOutRequest, CalledOutShift, ResolvedCallOut};
pub use model::category::{Category, CategoryKey, CategoryKeyError};
pub use model::house::{House, Staff, StaffRole};
pub use model::person::{Person, PersonId, PersonPatch, PersonValidationError, ShiftStatus};
pub use model::record::{BiweeklyRecord, ShiftLog, PERIOD_LENGTH_DAYS};
pub use repo::rotation_repo::{RepoError, RepoResult, RotationRepository, SqliteRotationRepository};
pub use rotation::history::HistoryLog;
pub use rotation::ledger::{CallOutLedger, LedgerError, LedgerPolicy};
pub use rotation::roster::{Roster, RosterError, RosterResult};
pub use rotation::session::{RotationSession, RotationState};
pub use service::house_service::{
    HouseDirectory, HouseFilter, HouseListing, HouseSource, HouseSourceError, StaticHouseSource,
};
pub use service::rotation_service::{RotationService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
