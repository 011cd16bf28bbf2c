//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A dose was zero, negative, or not a finite number.
    #[error("{field} must be a positive number, got {value}")]
    NonPositiveDose { field: &'static str, value: f64 },

    /// Unknown supplement category.
    #[error("invalid category: {value}")]
    InvalidCategory { value: String },

    /// Unknown time slot.
    #[error("invalid time slot: {value}")]
    InvalidTimeSlot { value: String },
}

/// Checks that a dose is finite and strictly positive.
pub fn validate_dose(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NonPositiveDose { field, value })
    }
}

/// Checks that a display name has content once trimmed.
pub fn validate_name(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_string())
}

/// Broad supplement category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Vitamin,
    Mineral,
    FattyAcid,
    Probiotic,
    #[default]
    Other,
}

impl Category {
    /// String representation for database storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Vitamin => "vitamin",
            Self::Mineral => "mineral",
            Self::FattyAcid => "fatty-acid",
            Self::Probiotic => "probiotic",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vitamin" => Ok(Self::Vitamin),
            "mineral" => Ok(Self::Mineral),
            "fatty-acid" => Ok(Self::FattyAcid),
            "probiotic" => Ok(Self::Probiotic),
            "other" => Ok(Self::Other),
            _ => Err(ValidationError::InvalidCategory {
                value: s.to_string(),
            }),
        }
    }
}

/// Coarse period of the day a goal or log belongs to.
///
/// Variants are declared in the order they occur during a day, so the derived
/// `Ord` sorts morning first and bedtime last.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    #[default]
    Morning,
    Afternoon,
    Evening,
    Bedtime,
}

impl TimeSlot {
    /// All slots in day order.
    pub const ALL: [Self; 4] = [Self::Morning, Self::Afternoon, Self::Evening, Self::Bedtime];

    /// String representation for database storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Bedtime => "bedtime",
        }
    }

    /// Position of the slot within a day, starting at 0.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Morning => 0,
            Self::Afternoon => 1,
            Self::Evening => 2,
            Self::Bedtime => 3,
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TimeSlot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            "bedtime" => Ok(Self::Bedtime),
            _ => Err(ValidationError::InvalidTimeSlot {
                value: s.to_string(),
            }),
        }
    }
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated supplement identifier.
    SupplementId, "supplement ID"
);

define_string_id!(
    /// A validated daily goal identifier.
    GoalId, "goal ID"
);

define_string_id!(
    /// A validated intake log identifier.
    LogId, "log ID"
);
