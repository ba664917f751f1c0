//! House directory model.
//!
//! Read-only projection of houses and their assigned staff, as served by an
//! external store.

use serde::{Deserialize, Serialize};

/// Viewer role used to scope the house directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    Cil,
    Management,
    Staff,
}

impl StaffRole {
    /// Roles that may see every house regardless of assignment.
    pub fn sees_all_houses(self) -> bool {
        matches!(self, Self::Cil | Self::Management)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Staff {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: StaffRole,
    /// Ids of houses this staff member is assigned to.
    #[serde(default)]
    pub houses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct House {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub staff: Vec<Staff>,
}
