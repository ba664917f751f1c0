//! Call-out (absence) records and their coverage.
//!
//! # Invariants
//! - `covered_by` starts as `None` and only changes through coverage assignment.
//! - Person references may dangle; readers resolve them to "absent".

use crate::model::category::CategoryKey;
use crate::model::person::{Person, PersonId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Reported reason for an absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallOutReason {
    #[serde(rename = "Sick Leave")]
    SickLeave,
    #[serde(rename = "Family Emergency")]
    FamilyEmergency,
    #[serde(rename = "Personal Emergency")]
    PersonalEmergency,
    #[serde(rename = "Medical Appointment")]
    MedicalAppointment,
    #[serde(rename = "Transportation Issues")]
    TransportationIssues,
    #[serde(rename = "Weather Related")]
    WeatherRelated,
    Other,
}

impl CallOutReason {
    pub const ALL: [CallOutReason; 7] = [
        Self::SickLeave,
        Self::FamilyEmergency,
        Self::PersonalEmergency,
        Self::MedicalAppointment,
        Self::TransportationIssues,
        Self::WeatherRelated,
        Self::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SickLeave => "Sick Leave",
            Self::FamilyEmergency => "Family Emergency",
            Self::PersonalEmergency => "Personal Emergency",
            Self::MedicalAppointment => "Medical Appointment",
            Self::TransportationIssues => "Transportation Issues",
            Self::WeatherRelated => "Weather Related",
            Self::Other => "Other",
        }
    }
}

impl Display for CallOutReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Reason text matched none of the known labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownReason(pub String);

impl Display for UnknownReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown call-out reason `{}`", self.0)
    }
}

impl Error for UnknownReason {}

impl FromStr for CallOutReason {
    type Err = UnknownReason;

    /// Accepts the display label case-insensitively (`"sick leave"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|reason| reason.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownReason(s.to_string()))
    }
}

/// Input for recording one call-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOutRequest {
    pub person_id: PersonId,
    /// Free-text shift description, e.g. `"AM"`.
    pub shift: String,
    pub notes: String,
    pub category: CategoryKey,
    pub reason: CallOutReason,
}

/// One recorded absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalledOutShift {
    pub date: DateTime<Utc>,
    pub called_out_person_id: PersonId,
    pub covered_by_person_id: Option<PersonId>,
    pub category: CategoryKey,
    pub shift: String,
    pub notes: String,
    pub reason: CallOutReason,
}

impl CalledOutShift {
    /// Builds an uncovered entry stamped at `date`.
    pub fn from_request(request: CallOutRequest, date: DateTime<Utc>) -> Self {
        Self {
            date,
            called_out_person_id: request.person_id,
            covered_by_person_id: None,
            category: request.category,
            shift: request.shift,
            notes: request.notes,
            reason: request.reason,
        }
    }

    pub fn is_covered(&self) -> bool {
        self.covered_by_person_id.is_some()
    }
}

/// Call-out joined with the people it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedCallOut<'a> {
    pub call_out: &'a CalledOutShift,
    pub person: &'a Person,
    /// `None` when uncovered or when the coverer no longer resolves.
    pub covered_by: Option<&'a Person>,
}

/// Resolves call-outs against a person lookup.
///
/// Entries whose called-out person does not resolve are omitted.
pub fn resolve_call_outs<'a, F>(entries: &'a [CalledOutShift], lookup: F) -> Vec<ResolvedCallOut<'a>>
where
    F: Fn(&PersonId) -> Option<&'a Person>,
{
    entries
        .iter()
        .filter_map(|call_out| {
            let person = lookup(&call_out.called_out_person_id)?;
            let covered_by = call_out.covered_by_person_id.as_ref().and_then(&lookup);
            Some(ResolvedCallOut {
                call_out,
                person,
                covered_by,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::CallOutReason;

    #[test]
    fn reason_parses_labels_case_insensitively() {
        assert_eq!(
            "sick leave".parse::<CallOutReason>().unwrap(),
            CallOutReason::SickLeave
        );
        assert_eq!(
            " Weather Related ".parse::<CallOutReason>().unwrap(),
            CallOutReason::WeatherRelated
        );
        assert!("Vacation".parse::<CallOutReason>().is_err());
    }

    #[test]
    fn reason_serializes_as_label() {
        let json = serde_json::to_value(CallOutReason::TransportationIssues).unwrap();
        assert_eq!(json, "Transportation Issues");
    }
}
