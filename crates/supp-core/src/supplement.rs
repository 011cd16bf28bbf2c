//! Supplements, their daily goals, and the intake log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Category, GoalId, LogId, SupplementId, TimeSlot};

/// A supplement the user keeps on hand.
///
/// Deleting a supplement removes its goals and intake logs with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Supplement {
    /// Unique identifier (UUID).
    pub id: SupplementId,

    /// Display name.
    pub name: String,

    /// Manufacturer or brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Unit the dose is measured in (e.g., "mg", "IU").
    pub dosage_unit: String,

    /// Dose suggested when logging an intake.
    pub default_dose: f64,

    /// Emoji or short glyph shown next to the name.
    pub icon: String,

    /// Display color as a hex string.
    pub color: String,

    pub category: Category,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub is_active: bool,

    /// Manual display order; also breaks ties between goals in the same slot.
    pub order: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// "Take this supplement, at this dose, in this slot, every day."
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyGoal {
    pub id: GoalId,
    pub supplement_id: SupplementId,
    pub target_dose: f64,
    pub time_slot: TimeSlot,

    /// Only active goals count toward adherence.
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

/// A dose taken at a specific instant. Immutable once recorded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntakeLog {
    pub id: LogId,
    pub supplement_id: SupplementId,
    pub dose: f64,
    pub taken_at: DateTime<Utc>,

    /// Slot the dose was logged under, copied at logging time.
    pub time_slot: TimeSlot,
}
