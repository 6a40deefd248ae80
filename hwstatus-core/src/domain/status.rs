//! Review status domain model
//!
//! The API reports a homework's review state as one of three fixed strings.
//! Anything else is a schema violation, not a new state.

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Review state of a homework, as reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// Review finished, no remarks
    Approved,

    /// A reviewer picked the work up
    Reviewing,

    /// Review finished with change requests
    Rejected,
}

impl ReviewStatus {
    /// Parses the wire representation used by the API.
    pub fn parse(value: &str) -> Result<Self, SchemaError> {
        match value {
            "approved" => Ok(Self::Approved),
            "reviewing" => Ok(Self::Reviewing),
            "rejected" => Ok(Self::Rejected),
            other => Err(SchemaError::UnknownStatus(other.to_string())),
        }
    }

    /// Verdict text shown to the user for this status.
    pub fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewStatus::Approved => write!(f, "approved"),
            ReviewStatus::Reviewing => write!(f, "reviewing"),
            ReviewStatus::Rejected => write!(f, "rejected"),
        }
    }
}
