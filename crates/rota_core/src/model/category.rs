//! Category identity and membership.
//!
//! # Invariants
//! - `CategoryKey` is an identifier (`^[A-Za-z][A-Za-z0-9_-]*$`), never display text.
//! - `Category::people` order is "least recently moved first".

use crate::model::person::{Person, PersonId};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static CATEGORY_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("valid category key regex"));

/// Category key did not match the identifier syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryKeyError(pub String);

impl Display for CategoryKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid category key `{}`", self.0)
    }
}

impl Error for CategoryKeyError {}

/// Stable category identifier, distinct from the editable title.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryKey(String);

impl CategoryKey {
    pub fn parse(value: &str) -> Result<Self, CategoryKeyError> {
        let trimmed = value.trim();
        if CATEGORY_KEY_RE.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(CategoryKeyError(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for CategoryKey {
    type Err = CategoryKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CategoryKey {
    type Error = CategoryKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<CategoryKey> for String {
    fn from(value: CategoryKey) -> Self {
        value.0
    }
}

impl Display for CategoryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered membership of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: CategoryKey,
    pub people: Vec<Person>,
}

impl Category {
    pub fn new(key: CategoryKey, people: Vec<Person>) -> Self {
        Self { key, people }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn position_of(&self, id: &PersonId) -> Option<usize> {
        self.people.iter().position(|person| &person.id == id)
    }

    pub fn find(&self, id: &PersonId) -> Option<&Person> {
        self.people.iter().find(|person| &person.id == id)
    }
}
