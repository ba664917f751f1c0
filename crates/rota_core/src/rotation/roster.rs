//! Roster store: categorized, ordered staff lists.
//!
//! # Responsibility
//! - Own category membership and display titles as separate mappings.
//! - Apply the per-person rotation transitions.
//!
//! # Invariants
//! - Membership is a partition: a person id appears in at most one category.
//! - Every category key has exactly one title.
//! - Every mutator either applies fully or leaves the roster unchanged.
//! - A status change moves the person to the end of its category.

use crate::model::category::{Category, CategoryKey};
use crate::model::person::{Person, PersonId, PersonPatch, PersonValidationError, ShiftStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RosterResult<T> = Result<T, RosterError>;

/// Errors for roster mutations. State is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    UnknownCategory(CategoryKey),
    DuplicateCategory(CategoryKey),
    IndexOutOfRange {
        category: CategoryKey,
        index: usize,
        len: usize,
    },
    PersonNotFound {
        category: CategoryKey,
        person_id: PersonId,
    },
    DuplicatePersonId(PersonId),
    BlankTitle(CategoryKey),
    InvalidPerson(PersonValidationError),
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCategory(key) => write!(f, "category not found: {key}"),
            Self::DuplicateCategory(key) => write!(f, "category already exists: {key}"),
            Self::IndexOutOfRange {
                category,
                index,
                len,
            } => write!(
                f,
                "index {index} out of range for category {category} with {len} people"
            ),
            Self::PersonNotFound {
                category,
                person_id,
            } => write!(f, "person {person_id} not found in category {category}"),
            Self::DuplicatePersonId(id) => write!(f, "person id already on roster: {id}"),
            Self::BlankTitle(key) => write!(f, "title for category {key} must not be blank"),
            Self::InvalidPerson(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPerson(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PersonValidationError> for RosterError {
    fn from(value: PersonValidationError) -> Self {
        Self::InvalidPerson(value)
    }
}

/// Live roster of categorized staff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RosterWire")]
pub struct Roster {
    categories: Vec<Category>,
    titles: BTreeMap<CategoryKey, String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a category in iteration order.
    ///
    /// # Errors
    /// - `DuplicateCategory` when `key` already exists.
    /// - `BlankTitle` when `title` is blank after trim.
    /// - `DuplicatePersonId` / `InvalidPerson` when `people` would break the
    ///   partition or person invariants.
    pub fn insert_category(
        &mut self,
        key: CategoryKey,
        title: impl Into<String>,
        people: Vec<Person>,
    ) -> RosterResult<()> {
        if self.titles.contains_key(&key) {
            return Err(RosterError::DuplicateCategory(key));
        }
        let title = normalize_title(&key, title.into())?;

        let mut seen: HashSet<&PersonId> = self.person_ids().collect();
        for person in &people {
            person.validate()?;
            if !seen.insert(&person.id) {
                return Err(RosterError::DuplicatePersonId(person.id.clone()));
            }
        }

        self.titles.insert(key.clone(), title);
        self.categories.push(Category::new(key, people));
        Ok(())
    }

    /// Categories in configuration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, key: &CategoryKey) -> RosterResult<&Category> {
        self.categories
            .iter()
            .find(|category| &category.key == key)
            .ok_or_else(|| RosterError::UnknownCategory(key.clone()))
    }

    pub fn title(&self, key: &CategoryKey) -> Option<&str> {
        self.titles.get(key).map(String::as_str)
    }

    pub fn titles(&self) -> &BTreeMap<CategoryKey, String> {
        &self.titles
    }

    /// Finds a person in any category together with its category key.
    pub fn find_person(&self, id: &PersonId) -> Option<(&CategoryKey, &Person)> {
        self.categories.iter().find_map(|category| {
            category
                .find(id)
                .map(|person| (&category.key, person))
        })
    }

    pub fn total_people(&self) -> usize {
        self.categories.iter().map(Category::len).sum()
    }

    /// Moves the person at `index` to the end with a new shift status.
    ///
    /// Increments `shift_count` and stamps `moved_on` with `now`.
    pub fn move_status(
        &mut self,
        key: &CategoryKey,
        index: usize,
        status: ShiftStatus,
        now: DateTime<Utc>,
    ) -> RosterResult<&Person> {
        let category = self.category_mut(key)?;
        let len = category.people.len();
        if index >= len {
            return Err(RosterError::IndexOutOfRange {
                category: key.clone(),
                index,
                len,
            });
        }

        let mut person = category.people.remove(index);
        person.record_shift(status, now);
        category.people.push(person);
        Ok(&category.people[len - 1])
    }

    /// Replaces the notes of the person at `index` without reordering.
    pub fn update_notes(
        &mut self,
        key: &CategoryKey,
        index: usize,
        notes: impl Into<String>,
    ) -> RosterResult<&Person> {
        let category = self.category_mut(key)?;
        let len = category.people.len();
        let person = category
            .people
            .get_mut(index)
            .ok_or_else(|| RosterError::IndexOutOfRange {
                category: key.clone(),
                index,
                len,
            })?;
        person.notes = notes.into();
        Ok(person)
    }

    /// Appends a new person at the end of the category.
    pub fn add_person(&mut self, key: &CategoryKey, person: Person) -> RosterResult<&Person> {
        person.validate()?;
        if self.find_person(&person.id).is_some() {
            return Err(RosterError::DuplicatePersonId(person.id));
        }

        let category = self.category_mut(key)?;
        category.people.push(person);
        let last = category.people.len() - 1;
        Ok(&category.people[last])
    }

    /// Removes and returns the person with `person_id`.
    pub fn remove_person(&mut self, key: &CategoryKey, person_id: &PersonId) -> RosterResult<Person> {
        let category = self.category_mut(key)?;
        let position = category
            .position_of(person_id)
            .ok_or_else(|| RosterError::PersonNotFound {
                category: key.clone(),
                person_id: person_id.clone(),
            })?;
        Ok(category.people.remove(position))
    }

    /// Merges `patch` into the matching person in place.
    pub fn update_person(
        &mut self,
        key: &CategoryKey,
        person_id: &PersonId,
        patch: &PersonPatch,
    ) -> RosterResult<&Person> {
        let category = self.category_mut(key)?;
        let person = category
            .people
            .iter_mut()
            .find(|person| &person.id == person_id)
            .ok_or_else(|| RosterError::PersonNotFound {
                category: key.clone(),
                person_id: person_id.clone(),
            })?;
        person.apply_patch(patch);
        Ok(person)
    }

    /// Changes the display title only; key and membership are untouched.
    pub fn rename_category(
        &mut self,
        key: &CategoryKey,
        new_title: impl Into<String>,
    ) -> RosterResult<()> {
        let title = normalize_title(key, new_title.into())?;
        let slot = self
            .titles
            .get_mut(key)
            .ok_or_else(|| RosterError::UnknownCategory(key.clone()))?;
        *slot = title;
        Ok(())
    }

    /// Clears per-period fields of every person; order and membership stay.
    pub(crate) fn reset_rotation(&mut self) {
        for category in &mut self.categories {
            for person in &mut category.people {
                person.reset_rotation();
            }
        }
    }

    fn category_mut(&mut self, key: &CategoryKey) -> RosterResult<&mut Category> {
        self.categories
            .iter_mut()
            .find(|category| &category.key == key)
            .ok_or_else(|| RosterError::UnknownCategory(key.clone()))
    }

    fn person_ids(&self) -> impl Iterator<Item = &PersonId> {
        self.categories
            .iter()
            .flat_map(|category| category.people.iter().map(|person| &person.id))
    }
}

fn normalize_title(key: &CategoryKey, title: String) -> RosterResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(RosterError::BlankTitle(key.clone()));
    }
    Ok(trimmed.to_string())
}

#[derive(Deserialize)]
struct RosterWire {
    categories: Vec<Category>,
    titles: BTreeMap<CategoryKey, String>,
}

impl TryFrom<RosterWire> for Roster {
    type Error = RosterError;

    fn try_from(wire: RosterWire) -> Result<Self, Self::Error> {
        let mut titles = wire.titles;
        let mut roster = Roster::new();
        for category in wire.categories {
            let title = titles
                .remove(&category.key)
                .ok_or_else(|| RosterError::UnknownCategory(category.key.clone()))?;
            roster.insert_category(category.key, title, category.people)?;
        }
        Ok(roster)
    }
}
