//! The query capability the adherence engine reads from.
//!
//! The engine never writes. Implementations decide how each query is served;
//! `supp-db` answers them from SQLite.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::day::TimeRange;
use crate::types::SupplementId;

/// The two fields of an intake log the engine needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub taken_at: DateTime<Utc>,
    pub supplement_id: SupplementId,
}

/// An active goal joined with the display fields of its supplement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveGoal {
    pub supplement_id: SupplementId,
    pub supplement_name: String,
    pub supplement_icon: String,
}

/// Read-only queries over intake logs and active goals.
///
/// Ranges are half-open `[start, end)`. Each call is expected to see a
/// consistent snapshot on its own; consecutive calls need not.
pub trait IntakeStore {
    /// Error raised when the store cannot answer.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of goals with `is_active` set.
    fn count_active_goals(&self) -> Result<usize, Self::Error>;

    /// Number of intake log rows, optionally restricted to a range.
    fn count_intake_logs(&self, range: Option<TimeRange>) -> Result<usize, Self::Error>;

    /// Number of intake log rows for one supplement within a range.
    fn count_supplement_logs(
        &self,
        supplement_id: &SupplementId,
        range: TimeRange,
    ) -> Result<usize, Self::Error>;

    /// Intake logs within a range.
    fn list_intake_logs(&self, range: TimeRange) -> Result<Vec<LogEntry>, Self::Error>;

    /// Active goals with their supplement's name and icon, in display order
    /// (time slot, then supplement order).
    fn list_active_goals_with_supplement(&self) -> Result<Vec<ActiveGoal>, Self::Error>;
}
