//! Role-scoped house directory.
//!
//! # Responsibility
//! - Decide which houses a viewer may list.
//! - Degrade source failures to an empty, flagged listing.
//!
//! # Invariants
//! - CIL and management viewers query every house; everyone else queries
//!   only the houses they are assigned to.
//! - `visible_houses` never returns an error; failures are logged.

use crate::model::house::{House, Staff};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Filter passed to the house source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HouseFilter {
    All,
    Ids(Vec<String>),
}

impl HouseFilter {
    /// Builds the filter for `viewer`; anonymous viewers get no houses.
    pub fn for_viewer(viewer: Option<&Staff>) -> Self {
        match viewer {
            Some(staff) if staff.role.sees_all_houses() => Self::All,
            Some(staff) => Self::Ids(staff.houses.clone()),
            None => Self::Ids(Vec::new()),
        }
    }

    pub fn matches(&self, house: &House) -> bool {
        match self {
            Self::All => true,
            Self::Ids(ids) => ids.iter().any(|id| id == &house.id),
        }
    }
}

/// Failure reported by a house source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseSourceError(pub String);

impl Display for HouseSourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "house source failed: {}", self.0)
    }
}

impl Error for HouseSourceError {}

/// External store that serves houses.
pub trait HouseSource {
    fn fetch_houses(&self, filter: &HouseFilter) -> Result<Vec<House>, HouseSourceError>;
}

/// In-process source over a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticHouseSource {
    houses: Vec<House>,
}

impl StaticHouseSource {
    pub fn new(houses: Vec<House>) -> Self {
        Self { houses }
    }
}

impl HouseSource for StaticHouseSource {
    fn fetch_houses(&self, filter: &HouseFilter) -> Result<Vec<House>, HouseSourceError> {
        Ok(self
            .houses
            .iter()
            .filter(|house| filter.matches(house))
            .cloned()
            .collect())
    }
}

/// Houses visible to one viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HouseListing {
    pub houses: Vec<House>,
    /// Set when the source failed and `houses` is a fallback.
    pub degraded: bool,
}

pub struct HouseDirectory<S: HouseSource> {
    source: S,
}

impl<S: HouseSource> HouseDirectory<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn visible_houses(&self, viewer: Option<&Staff>) -> HouseListing {
        let filter = HouseFilter::for_viewer(viewer);
        match self.source.fetch_houses(&filter) {
            Ok(houses) => {
                info!(
                    "event=houses_fetch module=houses status=ok scope={} count={}",
                    scope_label(&filter),
                    houses.len()
                );
                HouseListing {
                    houses,
                    degraded: false,
                }
            }
            Err(err) => {
                error!(
                    "event=houses_fetch module=houses status=error scope={} error={}",
                    scope_label(&filter),
                    err
                );
                HouseListing {
                    houses: Vec::new(),
                    degraded: true,
                }
            }
        }
    }
}

fn scope_label(filter: &HouseFilter) -> &'static str {
    match filter {
        HouseFilter::All => "all",
        HouseFilter::Ids(_) => "assigned",
    }
}
