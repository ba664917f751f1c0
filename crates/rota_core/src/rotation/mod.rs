//! In-memory rotation state machine.
//!
//! # Responsibility
//! - Roster store, call-out ledger, period archiver and history log.
//! - `RotationSession` ties them together behind one owner.
//!
//! # Invariants
//! - State is owned by exactly one session; there are no globals.
//! - Archived records never share containers with live state.

pub mod archiver;
pub mod history;
pub mod ledger;
pub mod roster;
pub mod session;
