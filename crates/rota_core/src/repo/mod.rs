//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage contract the rotation service commits through.
//! - Isolate SQLite query details from the state machine.
//!
//! # Invariants
//! - Repository APIs surface transport and decoding failures as `RepoError`;
//!   nothing is silently dropped.

pub mod rotation_repo;
