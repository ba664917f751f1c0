//! Person domain model.
//!
//! # Responsibility
//! - Define the staff member record tracked by the rotation.
//! - Provide the rotation transitions (`record_shift`, `reset_rotation`).
//!
//! # Invariants
//! - `id` is stable, non-blank and never reused for another person.
//! - `shift_status.is_some() == moved_on.is_some()`.
//! - `shift_count` only grows within a period and returns to zero on reset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a staff member.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    /// Wraps a caller-provided identifier verbatim.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for PersonId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// How a person fulfilled an extra shift in the current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftStatus {
    /// Volunteered for the shift.
    PickedUp,
    /// Was called in for the shift.
    Called,
}

impl ShiftStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PickedUp => "picked_up",
            Self::Called => "called",
        }
    }
}

impl Display for ShiftStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for person invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    BlankId,
    StatusWithoutTimestamp { id: PersonId },
    TimestampWithoutStatus { id: PersonId },
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "person id must not be blank"),
            Self::StatusWithoutTimestamp { id } => {
                write!(f, "person {id} has a shift status but no moved_on timestamp")
            }
            Self::TimestampWithoutStatus { id } => {
                write!(f, "person {id} has a moved_on timestamp but no shift status")
            }
        }
    }
}

impl Error for PersonValidationError {}

/// Staff member tracked by the rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersonWire")]
pub struct Person {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    /// Free-form scheduler notes.
    pub notes: String,
    /// Extra shifts taken in the current period.
    pub shift_count: u32,
    pub shift_status: Option<ShiftStatus>,
    /// When the person last moved to the end of their category.
    pub moved_on: Option<DateTime<Utc>>,
}

impl Person {
    /// Creates an idle person with a caller-provided id.
    ///
    /// # Errors
    /// - Returns `BlankId` when `id` is empty after trim.
    pub fn new(
        id: PersonId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, PersonValidationError> {
        let person = Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            notes: String::new(),
            shift_count: 0,
            shift_status: None,
            moved_on: None,
        };
        person.validate()?;
        Ok(person)
    }

    /// Creates an idle person with a generated id.
    pub fn generate(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: PersonId::generate(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
            notes: String::new(),
            shift_count: 0,
            shift_status: None,
            moved_on: None,
        }
    }

    /// Validates the status/timestamp pairing and id shape.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(PersonValidationError::BlankId);
        }
        match (self.shift_status, self.moved_on) {
            (Some(_), None) => Err(PersonValidationError::StatusWithoutTimestamp {
                id: self.id.clone(),
            }),
            (None, Some(_)) => Err(PersonValidationError::TimestampWithoutStatus {
                id: self.id.clone(),
            }),
            _ => Ok(()),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns whether the person has not taken an extra shift this period.
    pub fn is_idle(&self) -> bool {
        self.shift_status.is_none()
    }

    /// Records one extra shift taken at `at`.
    pub fn record_shift(&mut self, status: ShiftStatus, at: DateTime<Utc>) {
        self.shift_status = Some(status);
        self.shift_count = self.shift_count.saturating_add(1);
        self.moved_on = Some(at);
    }

    /// Clears every per-period rotation field.
    pub fn reset_rotation(&mut self) {
        self.shift_status = None;
        self.moved_on = None;
        self.shift_count = 0;
    }

    /// Merges the set fields of `patch` into this person.
    pub fn apply_patch(&mut self, patch: &PersonPatch) {
        if let Some(value) = &patch.first_name {
            self.first_name = value.clone();
        }
        if let Some(value) = &patch.last_name {
            self.last_name = value.clone();
        }
        if let Some(value) = &patch.phone {
            self.phone = value.clone();
        }
        if let Some(value) = &patch.notes {
            self.notes = value.clone();
        }
    }
}

/// Partial update for contact and notes fields.
///
/// Rotation fields only change through `record_shift` and `reset_rotation`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl PersonPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.notes.is_none()
    }
}

#[derive(Deserialize)]
struct PersonWire {
    id: PersonId,
    first_name: String,
    last_name: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    shift_count: u32,
    #[serde(default)]
    shift_status: Option<ShiftStatus>,
    #[serde(default)]
    moved_on: Option<DateTime<Utc>>,
}

impl TryFrom<PersonWire> for Person {
    type Error = PersonValidationError;

    fn try_from(wire: PersonWire) -> Result<Self, Self::Error> {
        let person = Self {
            id: wire.id,
            first_name: wire.first_name,
            last_name: wire.last_name,
            phone: wire.phone,
            notes: wire.notes,
            shift_count: wire.shift_count,
            shift_status: wire.shift_status,
            moved_on: wire.moved_on,
        };
        person.validate()?;
        Ok(person)
    }
}
