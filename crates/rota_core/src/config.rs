//! Initial roster configuration.
//!
//! # Responsibility
//! - Load `{key, title, people}` category definitions from JSON.
//! - Provide the built-in seed roster used when no file is given.
//!
//! # Invariants
//! - A successfully built roster satisfies every `Roster` invariant.
//! - Category order in the file is the roster iteration order.

use crate::model::category::CategoryKey;
use crate::model::person::{Person, PersonId};
use crate::rotation::ledger::LedgerPolicy;
use crate::rotation::roster::{Roster, RosterError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(RosterError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read roster config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse roster config: {err}"),
            Self::Invalid(err) => write!(f, "invalid roster config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<RosterError> for ConfigError {
    fn from(value: RosterError) -> Self {
        Self::Invalid(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub key: CategoryKey,
    pub title: String,
    #[serde(default)]
    pub people: Vec<Person>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotaConfig {
    pub categories: Vec<CategoryConfig>,
    #[serde(default)]
    pub ledger_policy: LedgerPolicy,
}

impl RotaConfig {
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source).map_err(ConfigError::Parse)?;
        config.build_roster()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json_str(&source)
    }

    /// Builds a fresh roster in configuration order.
    pub fn build_roster(&self) -> Result<Roster, RosterError> {
        let mut roster = Roster::new();
        for category in &self.categories {
            roster.insert_category(
                category.key.clone(),
                category.title.clone(),
                category.people.clone(),
            )?;
        }
        Ok(roster)
    }

    /// Built-in eight-category roster.
    pub fn seed() -> Self {
        let categories = SEED_ROSTER
            .iter()
            .filter_map(|(key, title, people)| {
                let key = CategoryKey::parse(key).ok()?;
                let people = people
                    .iter()
                    .filter_map(|(id, first, last, phone)| {
                        Person::new(PersonId::new(*id), *first, *last, *phone).ok()
                    })
                    .collect();
                Some(CategoryConfig {
                    key,
                    title: (*title).to_string(),
                    people,
                })
            })
            .collect();

        Self {
            categories,
            ledger_policy: LedgerPolicy::default(),
        }
    }
}

type SeedPerson = (&'static str, &'static str, &'static str, &'static str);

const SEED_ROSTER: &[(&str, &str, &[SeedPerson])] = &[
    (
        "fullTimeStaff",
        "Full Time Staff",
        &[
            ("ft1", "John", "Smith", "(123) 555-0101"),
            ("ft2", "Sarah", "Johnson", "(123) 555-0102"),
            ("ft3", "Michael", "Brown", "(123) 555-0103"),
            ("ft4", "Emily", "Davis", "(123) 555-0104"),
            ("ft5", "James", "Wilson", "(123) 555-0105"),
        ],
    ),
    (
        "partTimeStaff",
        "Part Time Staff",
        &[
            ("pt1", "Emma", "Taylor", "(123) 555-0201"),
            ("pt2", "Daniel", "Anderson", "(123) 555-0202"),
            ("pt3", "Sophia", "Martinez", "(123) 555-0203"),
            ("pt4", "Oliver", "Thompson", "(123) 555-0204"),
            ("pt5", "Ava", "White", "(123) 555-0205"),
        ],
    ),
    (
        "category1",
        "Part Time RS",
        &[
            ("1", "Alice", "Johnson", "(123) 456-7890"),
            ("2", "Bob", "Smith", "(234) 567-8901"),
            ("3", "Charlie", "Brown", "(345) 678-9012"),
            ("4", "David", "Williams", "(456) 789-0123"),
            ("5", "Eve", "Davis", "(567) 890-1234"),
        ],
    ),
    (
        "category2",
        "Overnight Staff from Home",
        &[
            ("6", "Frank", "Miller", "(678) 901-2345"),
            ("7", "Grace", "Wilson", "(789) 012-3456"),
            ("8", "Helen", "Moore", "(890) 123-4567"),
            ("9", "Ivan", "Taylor", "(901) 234-5678"),
            ("10", "Judy", "Anderson", "(012) 345-6789"),
        ],
    ),
    (
        "category3",
        "Other Unionized Staff",
        &[
            ("11", "Kevin", "Lee", "(123) 987-6543"),
            ("12", "Laura", "King", "(234) 876-5432"),
            ("13", "Megan", "Scott", "(345) 765-4321"),
            ("14", "Nina", "Young", "(456) 654-3210"),
            ("15", "Oscar", "Harris", "(567) 543-2109"),
        ],
    ),
    (
        "category4",
        "Casual Staff",
        &[
            ("16", "Paul", "Garcia", "(678) 432-1098"),
            ("17", "Quincy", "Martinez", "(789) 321-0987"),
            ("18", "Rita", "Lopez", "(890) 210-9876"),
            ("19", "Sam", "Gonzalez", "(901) 109-8765"),
            ("20", "Tina", "Perez", "(012) 098-7654"),
        ],
    ),
    (
        "category5",
        "RS with Approved Overtime",
        &[
            ("21", "Uma", "Singh", "(123) 765-4321"),
            ("22", "Vera", "Patel", "(234) 654-3210"),
            ("23", "Will", "Chen", "(345) 543-2109"),
            ("24", "Xander", "Zhang", "(456) 432-1098"),
            ("25", "Yara", "Kim", "(567) 321-0987"),
        ],
    ),
    (
        "category6",
        "Other Unionized Staff with Approved Overtime",
        &[
            ("26", "Lisa", "Johnson", "(123) 476-7891"),
            ("27", "Richard", "Smith", "(234) 123-8901"),
            ("28", "Charles", "Pink", "(345) 699-9012"),
            ("29", "Joseph", "Willias", "(456) 123-0123"),
            ("30", "Evie", "Davis", "(567) 890-4321"),
        ],
    ),
];
