//! Domain model for the staff rotation tracker.
//!
//! # Responsibility
//! - Define canonical data structures used by the rotation state machine.
//! - Keep identity (`PersonId`, `CategoryKey`) separate from display text.
//!
//! # Invariants
//! - Every person is identified by a stable `PersonId`.
//! - A person's `shift_status` is set if and only if `moved_on` is set.
//! - Archived records own their data; nothing is shared with live state.

pub mod call_out;
pub mod category;
pub mod house;
pub mod person;
pub mod record;
