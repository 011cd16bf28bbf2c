//! Storage layer for the supplement tracker.
//!
//! Provides persistence for supplements, daily goals, and intake logs using
//! `rusqlite`, and answers the adherence engine's queries through
//! [`supp_core::IntakeStore`].
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! This means a `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization.
//!
//! For multi-threaded access, either:
//! - Use a `Mutex<Database>` to serialize access
//! - Use separate `Database` instances per thread
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! Timestamps are stored as TEXT in fixed-width RFC 3339 format with millisecond
//! precision (e.g., `2024-01-15T10:30:00.000Z`). Because every value has the same
//! width and is in UTC, lexicographic ordering matches chronological ordering and
//! range filters can compare strings directly.
//!
//! ## Ownership
//!
//! `daily_goals` and `intake_logs` reference `supplements` with
//! `ON DELETE CASCADE`: removing a supplement removes everything it owns.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;
use supp_core::types::{validate_dose, validate_name};
use supp_core::{
    ActiveGoal, Category, DailyGoal, GoalId, IntakeLog, IntakeStore, LogEntry, LogId, Supplement,
    SupplementId, TimeRange, TimeSlot, ValidationError,
};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Input or stored data failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// No row with the given ID.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    /// Failed to parse a stored timestamp.
    #[error("invalid timestamp for {id}: {timestamp}")]
    TimestampParse {
        id: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// Fields for a new supplement.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupplement {
    pub name: String,
    pub brand: Option<String>,
    pub dosage_unit: String,
    pub default_dose: f64,
    pub icon: String,
    pub color: String,
    pub category: Category,
    pub notes: Option<String>,
    /// When set, an active daily goal for this slot is created alongside.
    pub time_slot: Option<TimeSlot>,
}

impl NewSupplement {
    /// A supplement with the default unit, icon, color, and category.
    pub fn new(name: impl Into<String>, default_dose: f64) -> Self {
        Self {
            name: name.into(),
            brand: None,
            dosage_unit: "mg".to_string(),
            default_dose,
            icon: "💊".to_string(),
            color: "#6366f1".to_string(),
            category: Category::Other,
            notes: None,
            time_slot: None,
        }
    }
}

/// Changes to apply to an existing supplement; `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupplementPatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub dosage_unit: Option<String>,
    pub default_dose: Option<f64>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub category: Option<Category>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

/// Fields for a new intake log.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIntakeLog {
    pub supplement_id: SupplementId,
    pub dose: f64,
    pub time_slot: TimeSlot,
    pub taken_at: DateTime<Utc>,
}

/// A supplement with the number of intake logs recorded for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplementSummary {
    #[serde(flatten)]
    pub supplement: Supplement,
    pub log_count: usize,
}

/// A goal joined with its supplement's display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalDetail {
    #[serde(flatten)]
    pub goal: DailyGoal,
    pub supplement_name: String,
    pub supplement_icon: String,
    pub dosage_unit: String,
}

/// An intake log joined with its supplement's display fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeLogDetail {
    #[serde(flatten)]
    pub log: IntakeLog,
    pub supplement_name: String,
    pub supplement_icon: String,
    pub dosage_unit: String,
}

const SUPPLEMENT_COLUMNS: &str = "s.id, s.name, s.brand, s.dosage_unit, s.default_dose, s.icon, \
     s.color, s.category, s.notes, s.is_active, s.sort_order, s.created_at, s.updated_at";

const GOAL_COLUMNS: &str =
    "g.id, g.supplement_id, g.target_dose, g.time_slot, g.is_active, g.created_at";

const LOG_COLUMNS: &str = "l.id, l.supplement_id, l.dose, l.taken_at, l.time_slot";

/// Sorts goals by slot in day order rather than alphabetically.
const SLOT_ORDER: &str = "CASE g.time_slot \
     WHEN 'morning' THEN 0 WHEN 'afternoon' THEN 1 WHEN 'evening' THEN 2 ELSE 3 END";

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS supplements (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                brand TEXT,
                dosage_unit TEXT NOT NULL,
                default_dose REAL NOT NULL,
                icon TEXT NOT NULL,
                color TEXT NOT NULL,
                category TEXT NOT NULL DEFAULT 'other',
                notes TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_supplements_order ON supplements(sort_order);

            CREATE TABLE IF NOT EXISTS daily_goals (
                id TEXT PRIMARY KEY,
                supplement_id TEXT NOT NULL,
                target_dose REAL NOT NULL,
                time_slot TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                FOREIGN KEY (supplement_id) REFERENCES supplements(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_goals_supplement ON daily_goals(supplement_id);
            CREATE INDEX IF NOT EXISTS idx_goals_active ON daily_goals(is_active);

            -- Intake logs: one row per dose taken
            -- taken_at: RFC 3339 UTC with milliseconds (e.g., '2024-01-15T10:30:00.000Z')
            -- time_slot: slot the dose was logged under, copied at logging time
            CREATE TABLE IF NOT EXISTS intake_logs (
                id TEXT PRIMARY KEY,
                supplement_id TEXT NOT NULL,
                dose REAL NOT NULL,
                taken_at TEXT NOT NULL,
                time_slot TEXT NOT NULL,
                FOREIGN KEY (supplement_id) REFERENCES supplements(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_logs_taken_at ON intake_logs(taken_at);
            CREATE INDEX IF NOT EXISTS idx_logs_supplement_taken_at
                ON intake_logs(supplement_id, taken_at);
            ",
        )?;
        Ok(())
    }

    // ========== Supplements ==========

    /// Inserts a supplement at the end of the display order.
    ///
    /// If `time_slot` is set, an active goal for that slot is created in the
    /// same transaction with the default dose as its target.
    pub fn insert_supplement(&mut self, new: &NewSupplement) -> Result<Supplement, DbError> {
        self.insert_supplement_at(new, Utc::now())
    }

    fn insert_supplement_at(
        &mut self,
        new: &NewSupplement,
        now: DateTime<Utc>,
    ) -> Result<Supplement, DbError> {
        let name = validate_name("name", &new.name)?;
        let default_dose = validate_dose("default dose", new.default_dose)?;
        let id = SupplementId::new(Uuid::new_v4().to_string())?;
        let created_at = format_timestamp(now);

        let tx = self.conn.transaction()?;
        let order: i64 = tx.query_row(
            "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM supplements",
            [],
            |row| row.get(0),
        )?;
        tx.execute(
            "
            INSERT INTO supplements
            (id, name, brand, dosage_unit, default_dose, icon, color, category, notes,
             is_active, sort_order, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?, ?)
            ",
            params![
                id.as_str(),
                name,
                new.brand,
                new.dosage_unit,
                default_dose,
                new.icon,
                new.color,
                new.category.as_str(),
                new.notes,
                order,
                created_at,
                created_at,
            ],
        )?;
        if let Some(slot) = new.time_slot {
            tx.execute(
                "
                INSERT INTO daily_goals (id, supplement_id, target_dose, time_slot, is_active, created_at)
                VALUES (?, ?, ?, ?, 1, ?)
                ",
                params![
                    Uuid::new_v4().to_string(),
                    id.as_str(),
                    default_dose,
                    slot.as_str(),
                    created_at,
                ],
            )?;
        }
        tx.commit()?;
        debug!(supplement_id = %id, order, goal_slot = ?new.time_slot, "inserted supplement");

        self.get_supplement(&id)?.ok_or_else(|| DbError::NotFound {
            kind: "supplement",
            id: id.to_string(),
        })
    }

    /// Fetches a supplement by ID.
    pub fn get_supplement(&self, id: &SupplementId) -> Result<Option<Supplement>, DbError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {SUPPLEMENT_COLUMNS} FROM supplements s WHERE s.id = ?"),
                [id.as_str()],
                SupplementRow::from_row,
            )
            .optional()?;
        row.map(SupplementRow::into_supplement).transpose()
    }

    /// Lists supplements in display order with their intake log counts.
    pub fn list_supplements(&self) -> Result<Vec<SupplementSummary>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {SUPPLEMENT_COLUMNS},
                   (SELECT COUNT(*) FROM intake_logs l WHERE l.supplement_id = s.id)
            FROM supplements s
            ORDER BY s.sort_order ASC, s.id ASC
            "
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok((SupplementRow::from_row(row)?, row.get::<_, i64>(13)?))
        })?;
        let mut summaries = Vec::new();
        for row in rows {
            let (supplement, log_count) = row?;
            summaries.push(SupplementSummary {
                supplement: supplement.into_supplement()?,
                log_count: to_count(log_count),
            });
        }
        Ok(summaries)
    }

    /// Applies a patch to a supplement and returns the updated record.
    pub fn update_supplement(
        &mut self,
        id: &SupplementId,
        patch: &SupplementPatch,
    ) -> Result<Supplement, DbError> {
        self.update_supplement_at(id, patch, Utc::now())
    }

    fn update_supplement_at(
        &mut self,
        id: &SupplementId,
        patch: &SupplementPatch,
        now: DateTime<Utc>,
    ) -> Result<Supplement, DbError> {
        let mut supplement = self.get_supplement(id)?.ok_or_else(|| DbError::NotFound {
            kind: "supplement",
            id: id.to_string(),
        })?;

        if let Some(name) = &patch.name {
            supplement.name = validate_name("name", name)?;
        }
        if let Some(dose) = patch.default_dose {
            supplement.default_dose = validate_dose("default dose", dose)?;
        }
        if let Some(brand) = &patch.brand {
            supplement.brand = Some(brand.clone());
        }
        if let Some(unit) = &patch.dosage_unit {
            supplement.dosage_unit.clone_from(unit);
        }
        if let Some(icon) = &patch.icon {
            supplement.icon.clone_from(icon);
        }
        if let Some(color) = &patch.color {
            supplement.color.clone_from(color);
        }
        if let Some(category) = patch.category {
            supplement.category = category;
        }
        if let Some(notes) = &patch.notes {
            supplement.notes = Some(notes.clone());
        }
        if let Some(is_active) = patch.is_active {
            supplement.is_active = is_active;
        }
        supplement.updated_at = now;

        self.conn.execute(
            "
            UPDATE supplements
            SET name = ?, brand = ?, dosage_unit = ?, default_dose = ?, icon = ?, color = ?,
                category = ?, notes = ?, is_active = ?, updated_at = ?
            WHERE id = ?
            ",
            params![
                supplement.name,
                supplement.brand,
                supplement.dosage_unit,
                supplement.default_dose,
                supplement.icon,
                supplement.color,
                supplement.category.as_str(),
                supplement.notes,
                supplement.is_active,
                format_timestamp(now),
                id.as_str(),
            ],
        )?;
        debug!(supplement_id = %id, "updated supplement");
        Ok(supplement)
    }

    /// Deletes a supplement together with its goals and intake logs.
    pub fn delete_supplement(&mut self, id: &SupplementId) -> Result<(), DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM supplements WHERE id = ?", [id.as_str()])?;
        if deleted == 0 {
            return Err(DbError::NotFound {
                kind: "supplement",
                id: id.to_string(),
            });
        }
        debug!(supplement_id = %id, "deleted supplement");
        Ok(())
    }

    // ========== Daily goals ==========

    /// Adds an active goal for a supplement.
    pub fn insert_goal(
        &mut self,
        supplement_id: &SupplementId,
        target_dose: f64,
        time_slot: TimeSlot,
    ) -> Result<DailyGoal, DbError> {
        self.insert_goal_at(supplement_id, target_dose, time_slot, Utc::now())
    }

    fn insert_goal_at(
        &mut self,
        supplement_id: &SupplementId,
        target_dose: f64,
        time_slot: TimeSlot,
        now: DateTime<Utc>,
    ) -> Result<DailyGoal, DbError> {
        let target_dose = validate_dose("target dose", target_dose)?;
        self.require_supplement(supplement_id)?;

        let goal = DailyGoal {
            id: GoalId::new(Uuid::new_v4().to_string())?,
            supplement_id: supplement_id.clone(),
            target_dose,
            time_slot,
            is_active: true,
            created_at: now,
        };
        self.conn.execute(
            "
            INSERT INTO daily_goals (id, supplement_id, target_dose, time_slot, is_active, created_at)
            VALUES (?, ?, ?, ?, 1, ?)
            ",
            params![
                goal.id.as_str(),
                goal.supplement_id.as_str(),
                goal.target_dose,
                goal.time_slot.as_str(),
                format_timestamp(now),
            ],
        )?;
        debug!(goal_id = %goal.id, supplement_id = %supplement_id, slot = %time_slot, "inserted goal");
        Ok(goal)
    }

    /// Lists goals ordered by time slot, then supplement display order.
    pub fn list_goals(&self, active_only: bool) -> Result<Vec<GoalDetail>, DbError> {
        let filter = if active_only {
            "WHERE g.is_active = 1"
        } else {
            ""
        };
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {GOAL_COLUMNS}, s.name, s.icon, s.dosage_unit
            FROM daily_goals g
            JOIN supplements s ON s.id = g.supplement_id
            {filter}
            ORDER BY {SLOT_ORDER}, s.sort_order ASC, g.id ASC
            "
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok((
                GoalRow::from_row(row)?,
                row.get::<_, String>(6)?,
                row.get::<_, String>(7)?,
                row.get::<_, String>(8)?,
            ))
        })?;
        let mut goals = Vec::new();
        for row in rows {
            let (goal, supplement_name, supplement_icon, dosage_unit) = row?;
            goals.push(GoalDetail {
                goal: goal.into_goal()?,
                supplement_name,
                supplement_icon,
                dosage_unit,
            });
        }
        Ok(goals)
    }

    /// Activates or deactivates a goal.
    pub fn set_goal_active(&mut self, id: &GoalId, is_active: bool) -> Result<(), DbError> {
        let updated = self.conn.execute(
            "UPDATE daily_goals SET is_active = ? WHERE id = ?",
            params![is_active, id.as_str()],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound {
                kind: "goal",
                id: id.to_string(),
            });
        }
        debug!(goal_id = %id, is_active, "updated goal");
        Ok(())
    }

    // ========== Intake logs ==========

    /// Records a dose.
    pub fn insert_intake_log(&mut self, new: &NewIntakeLog) -> Result<IntakeLog, DbError> {
        let dose = validate_dose("dose", new.dose)?;
        self.require_supplement(&new.supplement_id)?;

        let log = IntakeLog {
            id: LogId::new(Uuid::new_v4().to_string())?,
            supplement_id: new.supplement_id.clone(),
            dose,
            taken_at: new.taken_at,
            time_slot: new.time_slot,
        };
        self.conn.execute(
            "
            INSERT INTO intake_logs (id, supplement_id, dose, taken_at, time_slot)
            VALUES (?, ?, ?, ?, ?)
            ",
            params![
                log.id.as_str(),
                log.supplement_id.as_str(),
                log.dose,
                format_timestamp(log.taken_at),
                log.time_slot.as_str(),
            ],
        )?;
        debug!(log_id = %log.id, supplement_id = %log.supplement_id, "inserted intake log");
        Ok(log)
    }

    /// Lists intake logs within a range, newest first.
    ///
    /// The range is inclusive of `start` and exclusive of `end`.
    pub fn list_intake_log_details(
        &self,
        range: TimeRange,
    ) -> Result<Vec<IntakeLogDetail>, DbError> {
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {LOG_COLUMNS}, s.name, s.icon, s.dosage_unit
            FROM intake_logs l
            JOIN supplements s ON s.id = l.supplement_id
            WHERE l.taken_at >= ? AND l.taken_at < ?
            ORDER BY l.taken_at DESC, l.id ASC
            "
        ))?;
        let rows = stmt.query_map(
            [format_timestamp(range.start), format_timestamp(range.end)],
            |row| {
                Ok((
                    LogRow::from_row(row)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, String>(7)?,
                ))
            },
        )?;
        let mut logs = Vec::new();
        for row in rows {
            let (log, supplement_name, supplement_icon, dosage_unit) = row?;
            logs.push(IntakeLogDetail {
                log: log.into_log()?,
                supplement_name,
                supplement_icon,
                dosage_unit,
            });
        }
        Ok(logs)
    }

    /// Deletes a single intake log.
    pub fn delete_intake_log(&mut self, id: &LogId) -> Result<(), DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM intake_logs WHERE id = ?", [id.as_str()])?;
        if deleted == 0 {
            return Err(DbError::NotFound {
                kind: "intake log",
                id: id.to_string(),
            });
        }
        debug!(log_id = %id, "deleted intake log");
        Ok(())
    }

    /// Removes every supplement, goal, and intake log.
    pub fn clear(&mut self) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            "
            DELETE FROM intake_logs;
            DELETE FROM daily_goals;
            DELETE FROM supplements;
            ",
        )?;
        tx.commit()?;
        debug!("cleared all records");
        Ok(())
    }

    fn require_supplement(&self, id: &SupplementId) -> Result<(), DbError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM supplements WHERE id = ?)",
            [id.as_str()],
            |row| row.get(0),
        )?;
        if exists {
            Ok(())
        } else {
            Err(DbError::NotFound {
                kind: "supplement",
                id: id.to_string(),
            })
        }
    }
}

impl IntakeStore for Database {
    type Error = DbError;

    fn count_active_goals(&self) -> Result<usize, Self::Error> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM daily_goals WHERE is_active = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(to_count(count))
    }

    fn count_intake_logs(&self, range: Option<TimeRange>) -> Result<usize, Self::Error> {
        let count: i64 = match range {
            None => self
                .conn
                .query_row("SELECT COUNT(*) FROM intake_logs", [], |row| row.get(0))?,
            Some(range) if range.is_empty() => 0,
            Some(range) => self.conn.query_row(
                "SELECT COUNT(*) FROM intake_logs WHERE taken_at >= ? AND taken_at < ?",
                [format_timestamp(range.start), format_timestamp(range.end)],
                |row| row.get(0),
            )?,
        };
        Ok(to_count(count))
    }

    fn count_supplement_logs(
        &self,
        supplement_id: &SupplementId,
        range: TimeRange,
    ) -> Result<usize, Self::Error> {
        if range.is_empty() {
            return Ok(0);
        }
        let count: i64 = self.conn.query_row(
            "
            SELECT COUNT(*) FROM intake_logs
            WHERE supplement_id = ? AND taken_at >= ? AND taken_at < ?
            ",
            params![
                supplement_id.as_str(),
                format_timestamp(range.start),
                format_timestamp(range.end),
            ],
            |row| row.get(0),
        )?;
        Ok(to_count(count))
    }

    fn list_intake_logs(&self, range: TimeRange) -> Result<Vec<LogEntry>, Self::Error> {
        if range.is_empty() {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(
            "
            SELECT id, taken_at, supplement_id
            FROM intake_logs
            WHERE taken_at >= ? AND taken_at < ?
            ORDER BY taken_at ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map(
            [format_timestamp(range.start), format_timestamp(range.end)],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        )?;
        let mut entries = Vec::new();
        for row in rows {
            let (id, taken_at, supplement_id) = row?;
            entries.push(LogEntry {
                taken_at: parse_timestamp(&taken_at, &id)?,
                supplement_id: SupplementId::new(supplement_id)?,
            });
        }
        Ok(entries)
    }

    fn list_active_goals_with_supplement(&self) -> Result<Vec<ActiveGoal>, Self::Error> {
        Ok(self
            .list_goals(true)?
            .into_iter()
            .map(|detail| ActiveGoal {
                supplement_id: detail.goal.supplement_id,
                supplement_name: detail.supplement_name,
                supplement_icon: detail.supplement_icon,
            })
            .collect())
    }
}

#[derive(Debug)]
struct SupplementRow {
    id: String,
    name: String,
    brand: Option<String>,
    dosage_unit: String,
    default_dose: f64,
    icon: String,
    color: String,
    category: String,
    notes: Option<String>,
    is_active: bool,
    order: i64,
    created_at: String,
    updated_at: String,
}

impl SupplementRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            brand: row.get(2)?,
            dosage_unit: row.get(3)?,
            default_dose: row.get(4)?,
            icon: row.get(5)?,
            color: row.get(6)?,
            category: row.get(7)?,
            notes: row.get(8)?,
            is_active: row.get(9)?,
            order: row.get(10)?,
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
        })
    }

    fn into_supplement(self) -> Result<Supplement, DbError> {
        Ok(Supplement {
            created_at: parse_timestamp(&self.created_at, &self.id)?,
            updated_at: parse_timestamp(&self.updated_at, &self.id)?,
            category: self.category.parse()?,
            id: SupplementId::new(self.id)?,
            name: self.name,
            brand: self.brand,
            dosage_unit: self.dosage_unit,
            default_dose: self.default_dose,
            icon: self.icon,
            color: self.color,
            notes: self.notes,
            is_active: self.is_active,
            order: self.order,
        })
    }
}

#[derive(Debug)]
struct GoalRow {
    id: String,
    supplement_id: String,
    target_dose: f64,
    time_slot: String,
    is_active: bool,
    created_at: String,
}

impl GoalRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            supplement_id: row.get(1)?,
            target_dose: row.get(2)?,
            time_slot: row.get(3)?,
            is_active: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn into_goal(self) -> Result<DailyGoal, DbError> {
        Ok(DailyGoal {
            created_at: parse_timestamp(&self.created_at, &self.id)?,
            time_slot: self.time_slot.parse()?,
            id: GoalId::new(self.id)?,
            supplement_id: SupplementId::new(self.supplement_id)?,
            target_dose: self.target_dose,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug)]
struct LogRow {
    id: String,
    supplement_id: String,
    dose: f64,
    taken_at: String,
    time_slot: String,
}

impl LogRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            supplement_id: row.get(1)?,
            dose: row.get(2)?,
            taken_at: row.get(3)?,
            time_slot: row.get(4)?,
        })
    }

    fn into_log(self) -> Result<IntakeLog, DbError> {
        Ok(IntakeLog {
            taken_at: parse_timestamp(&self.taken_at, &self.id)?,
            time_slot: self.time_slot.parse()?,
            id: LogId::new(self.id)?,
            supplement_id: SupplementId::new(self.supplement_id)?,
            dose: self.dose,
        })
    }
}

fn parse_timestamp(timestamp: &str, id: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| DbError::TimestampParse {
            id: id.to_string(),
            timestamp: timestamp.to_string(),
            source,
        })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn to_count(count: i64) -> usize {
    usize::try_from(count).unwrap_or(0)
}
