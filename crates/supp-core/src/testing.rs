//! In-memory store used by the engine's unit tests.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

use crate::day::{TimeRange, local_midnight_to_utc};
use crate::store::{ActiveGoal, IntakeStore, LogEntry};
use crate::types::SupplementId;

#[derive(Debug, Error)]
#[error("memory store is offline")]
pub struct OfflineError;

/// Vec-backed store; `fail` makes every query error.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub goals: Vec<ActiveGoal>,
    pub logs: Vec<LogEntry>,
    pub fail: bool,
}

impl MemoryStore {
    pub fn log(&mut self, supplement: &str, taken_at: DateTime<Utc>) {
        self.logs.push(LogEntry {
            taken_at,
            supplement_id: SupplementId::new(supplement).unwrap(),
        });
    }

    fn check(&self) -> Result<(), OfflineError> {
        if self.fail { Err(OfflineError) } else { Ok(()) }
    }
}

impl IntakeStore for MemoryStore {
    type Error = OfflineError;

    fn count_active_goals(&self) -> Result<usize, Self::Error> {
        self.check()?;
        Ok(self.goals.len())
    }

    fn count_intake_logs(&self, range: Option<TimeRange>) -> Result<usize, Self::Error> {
        self.check()?;
        Ok(self
            .logs
            .iter()
            .filter(|log| range.is_none_or(|r| r.contains(log.taken_at)))
            .count())
    }

    fn count_supplement_logs(
        &self,
        supplement_id: &SupplementId,
        range: TimeRange,
    ) -> Result<usize, Self::Error> {
        self.check()?;
        Ok(self
            .logs
            .iter()
            .filter(|log| &log.supplement_id == supplement_id && range.contains(log.taken_at))
            .count())
    }

    fn list_intake_logs(&self, range: TimeRange) -> Result<Vec<LogEntry>, Self::Error> {
        self.check()?;
        Ok(self
            .logs
            .iter()
            .filter(|log| range.contains(log.taken_at))
            .cloned()
            .collect())
    }

    fn list_active_goals_with_supplement(&self) -> Result<Vec<ActiveGoal>, Self::Error> {
        self.check()?;
        Ok(self.goals.clone())
    }
}

/// An active goal whose supplement name and id are both `id`.
pub fn goal(id: &str) -> ActiveGoal {
    ActiveGoal {
        supplement_id: SupplementId::new(id).unwrap(),
        supplement_name: id.to_string(),
        supplement_icon: "pill".to_string(),
    }
}

/// A local wall-clock time on `date`, as UTC.
pub fn at_local(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
    let offset = NaiveTime::from_hms_opt(hour, minute, 0).unwrap() - NaiveTime::MIN;
    local_midnight_to_utc(date) + offset
}
