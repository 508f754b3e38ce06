//! Shared traits and enums used across the finance models.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for stored entities.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
/// Time range applied to the transaction list and summary statistics.
pub enum FilterRange {
    Week,
    #[default]
    Month,
    Year,
}

impl FilterRange {
    pub const ALL: [FilterRange; 3] = [FilterRange::Week, FilterRange::Month, FilterRange::Year];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterRange::Week => "week",
            FilterRange::Month => "month",
            FilterRange::Year => "year",
        }
    }
}

impl fmt::Display for FilterRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterRange {
    type Err = ParseFilterRangeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" | "w" => Ok(FilterRange::Week),
            "month" | "m" => Ok(FilterRange::Month),
            "year" | "y" => Ok(FilterRange::Year),
            _ => Err(ParseFilterRangeError(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFilterRangeError(pub String);

impl fmt::Display for ParseFilterRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown range `{}` (expected week, month or year)", self.0)
    }
}

impl std::error::Error for ParseFilterRangeError {}

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use serde;
pub use uuid;
